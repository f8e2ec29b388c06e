use anyhow::Context as _;
use anyhow::Result;
use rank2d::LocalSearch;
use rank2d::RankGrid;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::Registry;
use tracing_tree::HierarchicalLayer;

const USAGE: &str = "Usage: rank2d [options] [in-file [out-file]] <in.csv >out.txt";

fn main() -> Result<()> {
    let mut options = getopts::Options::new();
    options.optopt("d", "delimiter", "field delimiter (default: ',')", "CHAR");
    options.optflag("n", "no-optimize", "print the initial placement");
    options.optopt("s", "max-sweeps", "stop after this many sweeps", "NUMBER");
    options.optopt("t", "trace", "emit a chrome trace", "FILE");
    options.optflag("v", "verbose", "print diagnostic data");

    let matches = rank2d_tools::parse_args(options, USAGE, 2)?;

    let registry = Registry::default().with(EnvFilter::from_env("LOG")).with(
        HierarchicalLayer::new(4)
            .with_targets(true)
            .with_bracketed_fields(true),
    );
    let _chrome_trace_guard = match matches.opt_str("t") {
        Some(filename) => {
            let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
                .file(filename)
                .build();
            registry.with(chrome_layer).init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    };

    let delimiter: char = matches
        .opt_get("d")
        .context("invalid value for -d, --delimiter")?
        .unwrap_or(',');
    let max_sweeps: Option<usize> = matches
        .opt_get("s")
        .context("invalid value for -s, --max-sweeps")?;
    let verbose = matches.opt_present("v");

    let input = rank2d_tools::reader(matches.free.first())?;
    let items = rank2d_tools::read_items(input, delimiter).context("failed to read items")?;

    let mut grid = RankGrid::new(items).context("failed to place items")?;
    if verbose {
        eprintln!(
            "grid: {} rows x {} columns, initial displacement: {}",
            grid.rowcount(),
            grid.colcount(),
            grid.displacement(),
        );
    }

    if !matches.opt_present("n") {
        let mut algorithm = LocalSearch {
            max_sweeps,
            ..LocalSearch::default()
        };
        let metadata = grid
            .improve(&mut algorithm)
            .context("failed to optimize layout")?;
        if verbose {
            eprintln!("local search: {metadata:?}");
        }
    }

    let output = rank2d_tools::writer(matches.free.get(1))?;
    rank2d_tools::write_table(output, &grid.table()).context("failed to write table")?;

    Ok(())
}
