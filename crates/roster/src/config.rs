//! CLI configuration: thin wrapper around `roster_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --insecure, --timeout, --output, --color).

use clap::ValueEnum;
use roster_core::RosterConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use roster_config::{
    Config, DEFAULT_BASE_URL, Profile, config_path, load_config, profile_to_roster_config,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill unset output/color flags from the config's `[defaults]`.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// Build a `RosterConfig` from the active profile plus flag overrides.
///
/// An explicit `--base-url` works even when the named profile does not
/// exist; otherwise the profile must be present.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<RosterConfig, CliError> {
    let profile_name = config.active_profile_name(global.profile.as_deref());

    let base = match (config.profile(&profile_name), &global.base_url) {
        (Ok(profile), _) => profile.clone(),
        (Err(_), Some(_)) => Profile::default(),
        (Err(e), None) => return Err(e.into()),
    };

    // Flag > env > profile
    let profile = Profile {
        base_url: global.base_url.clone().unwrap_or(base.base_url),
        insecure: if global.insecure { Some(true) } else { base.insecure },
        timeout: global.timeout.or(base.timeout),
        ca_cert: base.ca_cert,
    };

    Ok(profile_to_roster_config(&profile, &profile_name)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use roster_core::TlsVerification;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["roster"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["students", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn default_profile_uses_default_url() {
        let resolved = resolve(&global(&[]), &Config::default()).unwrap();
        assert_eq!(resolved.base_url.as_str(), "https://student-api-nestjs.onrender.com/");
        assert_eq!(resolved.timeout, None);
    }

    #[test]
    fn flags_override_profile() {
        let g = global(&["--base-url", "http://localhost:9000", "-k", "--timeout", "3"]);
        let resolved = resolve(&g, &Config::default()).unwrap();
        assert_eq!(resolved.base_url.as_str(), "http://localhost:9000/");
        assert_eq!(resolved.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(resolved.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn unknown_profile_without_url_fails() {
        let err = resolve(&global(&["-p", "ghost"]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { .. }));
    }

    #[test]
    fn unknown_profile_with_url_succeeds() {
        let g = global(&["-p", "ghost", "-u", "http://localhost:9000"]);
        assert!(resolve(&g, &Config::default()).is_ok());
    }

    #[test]
    fn defaults_fill_unset_flags() {
        let mut cfg = Config::default();
        cfg.defaults.output = "json".into();
        cfg.defaults.color = "never".into();

        let mut g = global(&[]);
        apply_defaults(&mut g, &cfg);
        assert_eq!(g.output, Some(OutputFormat::Json));
        assert_eq!(g.color, Some(ColorMode::Never));

        let mut g = global(&["-o", "yaml"]);
        apply_defaults(&mut g, &cfg);
        assert_eq!(g.output, Some(OutputFormat::Yaml));
    }
}
