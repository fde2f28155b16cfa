//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { name } => init(&name, global),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = match global.output.unwrap_or_default() {
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
                        message: format!("failed to render config: {e}"),
                    })?
                }
                structured => output::render_structured(structured, &cfg)?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}

// ── Init ────────────────────────────────────────────────────────────

/// Write a profile from flags, prompting for the base URL only when it
/// was not given and a terminal is attached.
fn init(name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    let mut cfg: Config = config::load_config()?;

    let base_url = match &global.base_url {
        Some(url) => url.clone(),
        None if std::io::stdin().is_terminal() => {
            eprintln!("roster configuration");
            eprintln!("   Config path: {}\n", path.display());
            Input::new()
                .with_prompt("Service base URL")
                .default(config::DEFAULT_BASE_URL.to_string())
                .interact_text()
                .map_err(prompt_err)?
        }
        None => config::DEFAULT_BASE_URL.to_string(),
    };

    let profile = Profile {
        base_url,
        ca_cert: None,
        insecure: global.insecure.then_some(true),
        timeout: global.timeout,
    };

    // Reject the profile before it lands on disk.
    config::profile_to_roster_config(&profile, name)?;

    cfg.profiles.insert(name.to_owned(), profile);
    cfg.default_profile = Some(name.to_owned());
    config::save_config(&cfg)?;

    if !global.quiet {
        eprintln!("Profile '{name}' written to {}", path.display());
    }
    Ok(())
}
