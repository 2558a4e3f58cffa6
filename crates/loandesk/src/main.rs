mod cli;
mod commands;
mod error;
mod output;

use clap::{CommandFactory, FromArgMatches, ValueEnum};
use tracing_subscriber::EnvFilter;

use loandesk_core::{Coordinator, LoanStatus};

use crate::cli::{Cli, ColorMode, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::Spinner;

#[tokio::main]
async fn main() {
    let cli = parse_cli();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn parse_cli() -> Cli {
    let mut cmd = command();
    let mut matches = cmd.clone().get_matches();
    Cli::from_arg_matches_mut(&mut matches).unwrap_or_else(|e| e.format(&mut cmd).exit())
}

/// The derived command tree plus help text built from the domain model.
fn command() -> clap::Command {
    let statuses: Vec<&str> = LoanStatus::KNOWN.iter().map(LoanStatus::as_str).collect();
    let status_help = format!("Loan status: {}; other values pass through", statuses.join(", "));
    let with_status_help =
        |cmd: clap::Command| cmd.mut_arg("status", |arg| arg.help(status_help.clone()));

    Cli::command().mut_subcommand("loans", |loans| {
        loans
            .mut_subcommand("create", with_status_help)
            .mut_subcommand("update", with_status_help)
    })
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
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { mut global, command } = cli;

    match command {
        // Local commands: no API connection
        Command::Config(args) => commands::config_cmd::handle(args, &global),
        Command::Catalog => commands::catalog::handle(&global),
        Command::Completions(args) => {
            use clap_complete::generate;

            let mut cmd = self::command();
            generate(args.shell, &mut cmd, "loandesk", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let coordinator = build_coordinator(&mut global)?;

            let interrupt = coordinator.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    interrupt.cancel();
                }
            });

            let spinner = Spinner::attach(coordinator.subscribe(), global.quiet);
            tracing::debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &coordinator, &global).await;
            if let Some(spinner) = spinner {
                spinner.finish().await;
            }
            result
        }
    }
}

/// Load the config file and environment, fold in CLI overrides, and
/// connect a coordinator to the resolved API URL.
fn build_coordinator(global: &mut GlobalOpts) -> Result<Coordinator, CliError> {
    let mut cfg = loandesk_config::load_config()?;
    if let Some(env) = global.environment {
        cfg.environment = env.into();
    }
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&cfg.defaults.color, true).ok();
    }

    let client_config = loandesk_config::to_client_config(&cfg, global.api_url.as_deref())?;
    tracing::debug!(base_url = %client_config.base_url, "resolved API endpoint");
    Ok(Coordinator::new(&client_config)?)
}
