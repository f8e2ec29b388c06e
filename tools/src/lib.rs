use anyhow::Context as _;
use anyhow::Result;
use itertools::Itertools as _;
use rank2d::Item;
use rank2d::Table;
use std::env;
use std::fs;
use std::io;

/// Parse the command-line arguments, print the usage and exit on `--help`.
///
/// At most `max_free` positional arguments are accepted.
pub fn parse_args(
    mut options: getopts::Options,
    usage: &str,
    max_free: usize,
) -> Result<getopts::Matches> {
    options.optflag("h", "help", "print this help menu");

    let matches = options.parse(env::args().skip(1))?;

    if matches.opt_present("h") {
        eprintln!("{}", options.usage(usage));
        std::process::exit(0);
    }
    if matches.free.len() > max_free {
        anyhow::bail!("too many arguments\n\n{}", options.usage(usage));
    }

    Ok(matches)
}

/// Open the given file for reading, or stdin if `None` or `-`.
pub fn reader(filename: Option<&String>) -> Result<Box<dyn io::BufRead>> {
    Ok(match filename.map(String::as_str) {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(filename) => {
            let file = fs::File::open(filename)
                .with_context(|| format!("failed to open {filename:?}"))?;
            Box::new(io::BufReader::new(file))
        }
    })
}

/// Open the given file for writing, or stdout if `None` or `-`.
pub fn writer(filename: Option<&String>) -> Result<Box<dyn io::Write>> {
    Ok(match filename.map(String::as_str) {
        None | Some("-") => Box::new(io::stdout().lock()),
        Some(filename) => {
            let file = fs::File::create(filename)
                .with_context(|| format!("failed to create {filename:?}"))?;
            Box::new(io::BufWriter::new(file))
        }
    })
}

/// Read one item per line, in the form `label<delimiter>x<delimiter>y`.
///
/// The label may itself contain the delimiter.  Blank lines and lines
/// starting with `#` are skipped.
pub fn read_items(r: impl io::BufRead, delimiter: char) -> Result<Vec<Item<String>>> {
    let mut items = Vec::new();
    for (i, line) in r.lines().enumerate() {
        let lineno = i + 1;
        let line = line.with_context(|| format!("failed to read line {lineno}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.rsplitn(3, delimiter);
        let (y, x, label) = match (fields.next(), fields.next(), fields.next()) {
            (Some(y), Some(x), Some(label)) => (y, x, label),
            _ => anyhow::bail!("line {lineno}: expected 'label{delimiter}x{delimiter}y'"),
        };
        let x: f64 = x
            .trim()
            .parse()
            .with_context(|| format!("line {lineno}: invalid x value {x:?}"))?;
        let y: f64 = y
            .trim()
            .parse()
            .with_context(|| format!("line {lineno}: invalid y value {y:?}"))?;

        items.push(Item::new(label.trim().to_owned(), x, y));
    }
    Ok(items)
}

/// Write the table one row per line, cells padded to the widest label.
pub fn write_table(mut w: impl io::Write, table: &Table<'_, String>) -> Result<()> {
    let width = table
        .iter()
        .flatten()
        .flatten()
        .map(|item| item.item.chars().count())
        .max()
        .unwrap_or(0);

    for row in table {
        let line = row
            .iter()
            .map(|cell| {
                let label = cell.map_or("", |item| item.item.as_str());
                format!("{label:<width$}")
            })
            .join(" | ");
        writeln!(w, "{}", line.trim_end())?;
    }

    Ok(())
}
