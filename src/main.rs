// src/main.rs

use std::process::ExitCode;

use watchdog::config::load_and_resolve;
use watchdog::errors::WatchdogError;
use watchdog::{cli, logging, run};

#[tokio::main]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("watchdog error: {err:?}");
            let usage = err
                .downcast_ref::<WatchdogError>()
                .is_some_and(WatchdogError::is_usage);
            if usage {
                eprintln!("usage: watchdog [OPTIONS] <COMMAND>...");
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    let config = load_and_resolve(&args)?;
    run(config).await?;
    Ok(())
}
