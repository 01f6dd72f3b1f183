//! Clap derive structures for the `lbrep` CLI.
//!
//! Only depends on clap so `build.rs` can include it to render the man page.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// lbrep -- replicate Neutron-LBaaS load balancers into Octavia
#[derive(Debug, Parser)]
#[command(
    name = "lbrep",
    version,
    about = "Replicate a Neutron-LBaaS load balancer into Octavia",
    long_about = "Collects a load balancer and everything hanging off it (listeners,\n\
        pools, health monitors, members) from Neutron-LBaaS v2 and recreates it\n\
        in Octavia with a single create call.\n\n\
        With --to-file the collected graph is written to <lb_id>_data.json\n\
        instead; --from-file replays such a snapshot into Octavia later.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// ID of the source load balancer
    #[arg(long = "lb-id", short = 'l', alias = "lb_id", value_name = "ID")]
    pub lb_id: String,

    /// Save the collected graph to a snapshot file; do not touch Octavia
    #[arg(long = "to-file", alias = "to_file", conflicts_with = "from_file")]
    pub to_file: bool,

    /// Create the load balancer from a previously saved snapshot
    #[arg(long = "from-file", alias = "from_file")]
    pub from_file: bool,

    /// Carry the source VIP address over to the new load balancer
    #[arg(long = "reuse-vip", alias = "reuse_vip")]
    pub reuse_vip: bool,

    /// Print the tree that would be created without creating it
    #[arg(long, conflicts_with = "to_file")]
    pub dry_run: bool,

    /// Snapshot file to read or write (default: <snapshot-dir>/<lb_id>_data.json)
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Directory holding snapshot files
    #[arg(long, value_name = "DIR")]
    pub snapshot_dir: Option<PathBuf>,

    #[command(flatten)]
    pub auth: AuthOpts,

    #[command(flatten)]
    pub global: GlobalOpts,
}

// ── Authentication ───────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Authentication")]
pub struct AuthOpts {
    /// Keystone v3 URL
    #[arg(long, short = 'a', alias = "auth_url", env = "OS_AUTH_URL", value_name = "URL")]
    pub auth_url: Option<String>,

    /// Project to scope the token to
    #[arg(long, short = 'p', alias = "project_name", env = "OS_PROJECT_NAME")]
    pub project_name: Option<String>,

    /// User name
    #[arg(long, short = 'u', env = "OS_USERNAME")]
    pub username: Option<String>,

    /// Password
    #[arg(long, env = "OS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Domain of the project
    #[arg(long, env = "OS_PROJECT_DOMAIN_NAME", default_value = "Default")]
    pub project_domain_name: String,

    /// Domain of the user
    #[arg(long, env = "OS_USER_DOMAIN_NAME", default_value = "Default")]
    pub user_domain_name: String,

    /// Region to pick endpoints from
    #[arg(long, env = "OS_REGION_NAME")]
    pub region: Option<String>,

    /// Catalog interface to use [default: public]
    #[arg(long, env = "OS_INTERFACE", value_enum)]
    pub interface: Option<EndpointInterface>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "OS_INSECURE")]
    pub insecure: bool,

    /// CA bundle to verify endpoints against
    #[arg(long, env = "OS_CACERT", value_name = "FILE")]
    pub cacert: Option<PathBuf>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'o', default_value = "table")]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Configuration file [default: platform config dir]
    #[arg(long, env = "LBREP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

// ── Enums ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointInterface {
    #[value(alias = "publicURL")]
    Public,
    #[value(alias = "internalURL")]
    Internal,
    #[value(alias = "adminURL")]
    Admin,
}
