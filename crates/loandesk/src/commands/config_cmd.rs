//! Config subcommand handlers.

use serde::Serialize;

use loandesk_config::{self as config, Config, Environment};

use crate::cli::{ConfigArgs, ConfigCommand, EnvironmentArg, GlobalOpts};
use crate::error::CliError;
use crate::output;

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Development => Self::Development,
            EnvironmentArg::Production => Self::Production,
        }
    }
}

#[derive(Serialize)]
struct ConfigView<'a> {
    #[serde(flatten)]
    config: &'a Config,
    resolved_api_url: String,
}

fn format_config(view: &ConfigView<'_>) -> String {
    use std::fmt::Write;
    let cfg = view.config;
    let mut out = String::new();

    let _ = writeln!(out, "environment = \"{}\"", cfg.environment);
    if let Some(ref url) = cfg.api_url {
        let _ = writeln!(out, "api_url = \"{url}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out);
    let _ = write!(out, "# resolved API URL: {}", view.resolved_api_url);
    out
}

fn save(cfg: &Config, quiet: bool) -> Result<(), CliError> {
    let path = config::save_config(cfg)?;
    if !quiet {
        eprintln!("Config saved to {}", path.display());
    }
    Ok(())
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            if let Some(env) = global.environment {
                cfg.environment = env.into();
            }
            let resolved = config::resolve_base_url(global.api_url.as_deref(), &cfg)?;
            let view = ConfigView {
                config: &cfg,
                resolved_api_url: resolved.to_string(),
            };
            let out = output::render_single(&global.format(), &view, format_config, |v| {
                v.resolved_api_url.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::SetUrl { url } => {
            let mut cfg = config::load_config_or_default();
            let parsed = config::resolve_base_url(Some(&url), &cfg)?;
            cfg.api_url = Some(parsed.to_string());
            save(&cfg, global.quiet)
        }

        ConfigCommand::UnsetUrl => {
            let mut cfg = config::load_config_or_default();
            cfg.api_url = None;
            save(&cfg, global.quiet)
        }

        ConfigCommand::SetEnv { environment } => {
            let mut cfg = config::load_config_or_default();
            cfg.environment = environment.into();
            save(&cfg, global.quiet)
        }
    }
}
