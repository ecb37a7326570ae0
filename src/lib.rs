pub mod cli;
pub mod commands;
pub mod core;
pub mod logging;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;
use crate::commands::{run_updater, RunOptions};
use crate::core::config::load_installations;
use crate::core::state::{AppState, Endpoints};

/// Config or logging could not be set up; nothing was updated.
const EXIT_FATAL: u8 = 2;

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let log_path = cli.log_path();
    if let Err(e) = logging::init_logging(cli.print_verbosity, log_path.as_deref(), cli.log_verbosity) {
        eprintln!("{e}");
        return ExitCode::from(EXIT_FATAL);
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Could not start the async runtime: {}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    runtime.block_on(run_cli(cli))
}

/// Everything after argument parsing and logging setup.
pub async fn run_cli(cli: Cli) -> ExitCode {
    let mut summary = crate::core::report::RunSummary::new();
    summary.info(format!(
        "Mod Updater starting using config file {}.",
        cli.config_file.display()
    ));

    let installations = match load_installations(&cli.config_file).await {
        Ok(installations) => installations,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let mut state = match AppState::new(Endpoints::default()) {
        Ok(state) => state,
        Err(e) => {
            error!("Could not build HTTP client: {}", e);
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let options = RunOptions {
        mode: cli.mode,
        version_override: cli.mcversion.clone(),
        install_loader: !cli.noloader,
    };
    summary.merge(run_updater(&mut state, &installations, &options).await);

    let closing = summary.closing_line();
    summary.info(closing);
    if summary.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
