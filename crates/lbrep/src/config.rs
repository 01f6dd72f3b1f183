//! Optional TOML configuration and run settings resolution.
//!
//! Precedence, highest first: command-line flag or its `OS_*` variable,
//! `LBREP_*` variable, config file, built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use lbrep_api::{Interface, TlsMode, TransportConfig};

use crate::cli::{Cli, EndpointInterface};
use crate::error::CliError;

// ── TOML config ─────────────────────────────────────────────────────

/// Defaults for settings that rarely change between runs.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Catalog interface: public, internal or admin.
    #[serde(default = "default_interface")]
    pub interface: String,

    pub region: Option<String>,

    /// Path to a CA bundle.
    pub cacert: Option<PathBuf>,

    /// Where snapshots are read from and written to.
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            insecure: false,
            interface: default_interface(),
            region: None,
            cacert: None,
            snapshot_dir: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_interface() -> String {
    "public".into()
}

/// Canonical config file location.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "lbrep", "lbrep").map_or_else(
        || PathBuf::from("lbrep.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Load config from `path`; a missing file just yields the defaults.
pub fn load_config(path: &Path) -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LBREP_").ignore(&["config"]));

    Ok(figment.extract()?)
}

// ── Resolved settings ───────────────────────────────────────────────

/// Everything a run needs besides credentials.
#[derive(Debug, Clone)]
pub struct Settings {
    pub transport: TransportConfig,
    pub interface: Interface,
    pub region: Option<String>,
    pub snapshot_dir: PathBuf,
}

impl From<EndpointInterface> for Interface {
    fn from(value: EndpointInterface) -> Self {
        match value {
            EndpointInterface::Public => Interface::Public,
            EndpointInterface::Internal => Interface::Internal,
            EndpointInterface::Admin => Interface::Admin,
        }
    }
}

/// Merge command-line flags over the loaded config.
pub fn resolve(cli: &Cli, config: &Config) -> Result<Settings, CliError> {
    let auth = &cli.auth;

    let interface = match auth.interface {
        Some(flag) => flag.into(),
        None => config
            .interface
            .parse::<Interface>()
            .map_err(|_| CliError::Validation {
                field: "interface".into(),
                reason: format!("expected public, internal or admin, got '{}'", config.interface),
            })?,
    };

    let tls = if auth.insecure || config.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca) = auth.cacert.as_ref().or(config.cacert.as_ref()) {
        TlsMode::CustomCa(ca.clone())
    } else {
        TlsMode::System
    };

    let timeout = cli.global.timeout.unwrap_or(config.timeout);
    if timeout == 0 {
        return Err(CliError::Validation {
            field: "timeout".into(),
            reason: "must be at least one second".into(),
        });
    }

    Ok(Settings {
        transport: TransportConfig {
            tls,
            timeout: Duration::from_secs(timeout),
        },
        interface,
        region: auth.region.clone().or_else(|| config.region.clone()),
        snapshot_dir: cli
            .snapshot_dir
            .clone()
            .or_else(|| config.snapshot_dir.clone())
            .unwrap_or_else(|| PathBuf::from(".")),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lbrep").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let config = Config {
            timeout: 90,
            interface: "internal".into(),
            region: Some("RegionOne".into()),
            snapshot_dir: Some("/var/lib/lbrep".into()),
            ..Config::default()
        };
        let cli = cli(&["-l", "lb-1", "--timeout", "5", "--region", "RegionTwo", "--snapshot-dir", "snaps"]);

        let settings = resolve(&cli, &config).unwrap();
        assert_eq!(settings.transport.timeout, Duration::from_secs(5));
        assert_eq!(settings.region.as_deref(), Some("RegionTwo"));
        assert_eq!(settings.interface, Interface::Internal);
        assert_eq!(settings.snapshot_dir, PathBuf::from("snaps"));
    }

    #[test]
    fn credential_short_flags_and_aliases_parse() {
        let short = cli(&["-l", "lb-1", "-a", "https://keystone.example/v3", "-u", "admin", "-p", "demo"]);
        assert_eq!(short.auth.auth_url.as_deref(), Some("https://keystone.example/v3"));
        assert_eq!(short.auth.username.as_deref(), Some("admin"));
        assert_eq!(short.auth.project_name.as_deref(), Some("demo"));

        let aliased = cli(&["--lb_id", "lb-1", "--auth_url", "https://k.example", "--project_name", "ops"]);
        assert_eq!(aliased.auth.auth_url.as_deref(), Some("https://k.example"));
        assert_eq!(aliased.auth.project_name.as_deref(), Some("ops"));
    }

    #[test]
    fn insecure_wins_over_cacert() {
        let cli = cli(&["-l", "lb-1", "-k", "--cacert", "/etc/ca.pem"]);
        let settings = resolve(&cli, &Config::default()).unwrap();
        assert_eq!(settings.transport.tls, TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn bad_interface_in_config_is_rejected() {
        let config = Config {
            interface: "sideways".into(),
            ..Config::default()
        };
        assert!(resolve(&cli(&["-l", "lb-1", "--interface", "admin"]), &config).is_ok());
        assert!(resolve(&cli(&["-l", "lb-1"]), &config).is_err());
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = load_config(Path::new("/nonexistent/lbrep/config.toml")).unwrap();
        assert_eq!(config.timeout, 30);
        assert_eq!(config.interface, "public");
    }
}
