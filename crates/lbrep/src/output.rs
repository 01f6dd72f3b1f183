//! Output formatting: table, JSON, YAML.
//!
//! Table prints a per-kind summary followed by a one-line status. The
//! structured formats serialize a report that also carries the projected
//! tree, so `--dry-run -o json` shows exactly what would be submitted.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use owo_colors::OwoColorize;
use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::{Table, Tabled, settings::Style};

use lbrep_api::octavia::models::LoadBalancerTree;
use lbrep_core::{GraphCounts, Outcome, ResourceKind};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Report ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Report<'a> {
    source_lb_id: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_balancer_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<&'a Path>,
    counts: GraphCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a LoadBalancerTree>,
}

impl<'a> Report<'a> {
    fn new(lb_id: &'a str, outcome: &'a Outcome) -> Self {
        let (status, load_balancer_id, snapshot) = match outcome {
            Outcome::Saved { path, .. } => ("saved", None, Some(path.as_path())),
            Outcome::Created { id, .. } => ("created", Some(id.as_str()), None),
            Outcome::Planned { .. } => ("planned", None, None),
        };
        Self {
            source_lb_id: lb_id,
            status,
            load_balancer_id,
            snapshot,
            counts: outcome.counts(),
            tree: outcome.tree(),
        }
    }
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Resource")]
    kind: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

// ── Render dispatch ──────────────────────────────────────────────────

/// Render the outcome of a run in the chosen format.
pub fn render(
    format: OutputFormat,
    lb_id: &str,
    outcome: &Outcome,
    color: bool,
) -> Result<String, CliError> {
    let report = Report::new(lb_id, outcome);
    match format {
        OutputFormat::Table => Ok(render_table(lb_id, outcome, color)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&report).map_err(|e| CliError::Render(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&report).map_err(|e| CliError::Render(e.to_string()))
        }
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end());
}

fn render_table(lb_id: &str, outcome: &Outcome, color: bool) -> String {
    let counts = outcome.counts();
    let rows: Vec<CountRow> = ResourceKind::iter()
        .map(|kind| CountRow {
            kind: kind.into(),
            count: counts.get(kind),
        })
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();

    format!("{table}\n{}", status_line(lb_id, outcome, color))
}

fn status_line(lb_id: &str, outcome: &Outcome, color: bool) -> String {
    match outcome {
        Outcome::Saved { path, .. } => {
            let path = path.display().to_string();
            if color {
                format!("Saved {lb_id} to {}", path.bold())
            } else {
                format!("Saved {lb_id} to {path}")
            }
        }
        Outcome::Created { id, .. } => {
            if color {
                format!("{} {}", "Created load balancer".green(), id.bold())
            } else {
                format!("Created load balancer {id}")
            }
        }
        Outcome::Planned { .. } => {
            let line = format!("Dry run: nothing created for {lb_id} (-o json prints the tree)");
            if color { line.yellow().to_string() } else { line }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn counts() -> GraphCounts {
        GraphCounts {
            listeners: 1,
            pools: 1,
            health_monitors: 1,
            members: 2,
        }
    }

    #[test]
    fn table_lists_every_kind_and_status() {
        let outcome = Outcome::Created {
            id: "octavia-lb-1".into(),
            tree: LoadBalancerTree::default(),
            counts: counts(),
        };
        let out = render(OutputFormat::Table, "lb-1", &outcome, false).unwrap();

        for kind in ["load balancer", "listener", "pool", "health monitor", "member"] {
            assert!(out.contains(kind), "missing {kind} in\n{out}");
        }
        assert!(out.ends_with("Created load balancer octavia-lb-1"));
    }

    #[test]
    fn json_report_for_saved_snapshot_has_no_tree() {
        let outcome = Outcome::Saved {
            path: PathBuf::from("lb-1_data.json"),
            counts: counts(),
        };
        let out = render(OutputFormat::Json, "lb-1", &outcome, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["status"], "saved");
        assert_eq!(value["snapshot"], "lb-1_data.json");
        assert_eq!(value["counts"]["members"], 2);
        assert!(value.get("tree").is_none());
        assert!(value.get("load_balancer_id").is_none());
    }

    #[test]
    fn yaml_report_for_dry_run_carries_tree() {
        let outcome = Outcome::Planned {
            tree: LoadBalancerTree::default(),
            counts: counts(),
        };
        let out = render(OutputFormat::Yaml, "lb-1", &outcome, false).unwrap();
        assert!(out.contains("status: planned"));
        assert!(out.contains("tree:"));
    }
}
