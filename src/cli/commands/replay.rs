//! `replay` command
//!
//! Reads one JSON [`Request`] per line and dispatches them in order against a
//! single [`Site`], so state built by earlier lines is visible to later ones.
//! Blank lines and lines starting with `#` are skipped.

use super::{resolve_config, EXIT_CONFIG, EXIT_CONNECTION, EXIT_INPUT, EXIT_OK, EXIT_REQUEST_FAILED};
use crate::core::site::Site;
use crate::routing::{Request, Status};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the replay command
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON-lines file of requests
    pub file: PathBuf,

    /// Print each response body, not only its status
    #[arg(long)]
    pub bodies: bool,
}

/// Outcome counts of a replay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub dispatched: usize,
    pub non_ok: usize,
    pub malformed: usize,
}

impl ReplaySummary {
    pub fn exit_code(&self) -> i32 {
        if self.malformed > 0 {
            EXIT_INPUT
        } else if self.non_ok > 0 {
            EXIT_REQUEST_FAILED
        } else {
            EXIT_OK
        }
    }
}

/// Dispatches every request line of `input` against `site`
///
/// A malformed line is reported and counted; the following lines still run.
pub async fn replay(site: &Site, input: &str, bodies: bool) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping malformed request line");
                println!("line {}: malformed request: {e}", index + 1);
                summary.malformed += 1;
                continue;
            }
        };

        let label = format!("{} {}", request.method, request.path);
        let response = site.handle(request).await;
        summary.dispatched += 1;
        if response.status != Status::Ok {
            summary.non_ok += 1;
        }

        println!("{label} -> {}", response.status.line());
        if bodies {
            println!("{}", response.body);
        }
    }

    summary
}

impl ReplayArgs {
    /// Execute the replay command
    pub async fn execute(&self, config_path: Option<&Path>) -> anyhow::Result<i32> {
        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Failed to load configuration");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let input = match tokio::fs::read_to_string(&self.file).await {
            Ok(input) => input,
            Err(e) => {
                println!("Failed to read {}", self.file.display());
                println!("   Error: {e}");
                return Ok(EXIT_INPUT);
            }
        };

        let site = match Site::from_config(&config).await {
            Ok(site) => site,
            Err(e) => {
                println!("Failed to start the site");
                println!("   Error: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        tracing::info!(file = %self.file.display(), "Replaying requests");
        let summary = replay(&site, &input, self.bodies).await;
        println!();
        println!(
            "Dispatched: {}, non-200: {}, malformed: {}",
            summary.dispatched, summary.non_ok, summary.malformed
        );
        tracing::info!(
            dispatched = summary.dispatched,
            non_ok = summary.non_ok,
            malformed = summary.malformed,
            "Replay finished"
        );
        Ok(summary.exit_code())
    }
}
