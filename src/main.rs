//! travel-auth binary entry point.

use std::process::ExitCode;

use tracing::debug;
use travel_auth::cli::{self, Args};
use travel_auth::config::Config;
use travel_auth::{logging, FileStorage, MockAuthBackend};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Run 'travel-auth --help' for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&args)?;
    logging::try_init(Some(config.log_filter())).ok();

    let Some(command) = args.command else {
        cli::print_help();
        return Ok(());
    };

    debug!(data_file = %config.data_file().display(), "using session file");
    let backend =
        MockAuthBackend::with_config(FileStorage::new(config.data_file()), config.mock_config());

    let output = cli::execute(&backend, command).await?;
    println!("{output}");
    Ok(())
}
