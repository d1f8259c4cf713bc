use clap::Parser;
use tracing::error;

use timesheet::{build_timesheet, endpoints, logging, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    if args.init {
        return endpoints::init_default_endpoints();
    }

    match build_timesheet(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
