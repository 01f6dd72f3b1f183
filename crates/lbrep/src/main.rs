mod cli;
mod config;
mod connect;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lbrep_core::{Mode, ReplicationRequest, SnapshotStore};

use crate::cli::Cli;
use crate::connect::SessionConnector;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
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
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.global.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path)?;
    let settings = config::resolve(&cli, &cfg)?;

    let mode = if cli.to_file {
        Mode::ToFile
    } else if cli.from_file {
        Mode::FromFile
    } else {
        Mode::Create
    };

    let request = ReplicationRequest {
        reuse_vip: cli.reuse_vip,
        dry_run: cli.dry_run,
        snapshot: cli.snapshot.clone(),
        ..ReplicationRequest::new(cli.lb_id.clone(), mode)
    };
    let store = SnapshotStore::new(settings.snapshot_dir.clone());
    let connector = SessionConnector::new(&cli.auth, &settings);

    tracing::debug!(?request, config = %config_path.display(), "dispatching run");
    let outcome = lbrep_core::replicate(&request, &store, &connector).await?;

    let color = output::should_color(cli.global.color);
    let rendered = output::render(cli.global.output, &request.lb_id, &outcome, color)?;
    output::print_output(&rendered, cli.global.quiet);
    Ok(())
}
