mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use giga_core::Session;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Shell completions need nothing else
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "gigactl", &mut std::io::stdout());
            Ok(())
        }

        // Cron manipulates the local crontab; no cloud connection needed
        Command::Cron(args) => {
            let resolved = config::resolve(&cli.global)?;
            commands::cron::handle(args, &resolved, &cli.global)
        }

        // Everything else authenticates first
        cmd => {
            let resolved = config::resolve(&cli.global)?;
            validate_inputs(&cmd)?;

            let (mut session, greeting) = Session::connect(resolved.session.clone()).await?;
            if !cli.global.quiet && !greeting.message.is_empty() {
                println!("{}", greeting.message);
            }

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut session, &resolved, &cli.global).await
        }
    }
}

/// Fail fast on malformed user input before any network call.
fn validate_inputs(cmd: &Command) -> Result<(), CliError> {
    if let Command::Events(args) = cmd {
        commands::events::parse_date_range(args.date.as_deref())?;
    }
    Ok(())
}
