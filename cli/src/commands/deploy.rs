//! `cw-kargo deploy`: apply generated resource sets with kubectl.
//!
//! Usage:
//!   cw-kargo deploy
//!   cw-kargo deploy --service-name nginx --skip-namespace-creation
//!   cw-kargo deploy --context staging --dry-run

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::{load_config, ConfigOverrides};
use crate::domain::DeploymentReport;
use crate::error::DiscoveryError;
use crate::infrastructure::{KubectlClient, LocalFileStore};
use crate::services::{DeployRequest, Sequencer};
use crate::ui;

/// Arguments of the deploy command
#[derive(Debug, Clone, Default)]
pub struct DeployArgs {
    pub service_name: Option<String>,
    pub skip_namespace: bool,
    pub output_dir: Option<String>,
    pub context: Option<String>,
    pub dry_run: bool,
    pub config: Option<String>,
    pub json: bool,
}

/// Apply resource sets and print the report.
///
/// Returns the report; per-service failures are not an `Err`.
pub async fn execute(args: DeployArgs) -> Result<DeploymentReport> {
    let config = load_config(args.config.as_deref())?.with_overrides(ConfigOverrides {
        output_dir: args.output_dir,
        ..Default::default()
    });

    if !args.json {
        ui::print_header("Deploy Kargo Resource Sets");
    }
    info!("📤 Resource sets: {}", config.output_dir);
    if let Some(ref context) = args.context {
        info!("☸️  Context: {}", context);
    }
    if args.skip_namespace {
        info!("⏭️  Skipping namespace creation");
    }
    if args.dry_run {
        info!("🧪 Dry run: kubectl apply --dry-run=client");
    }

    // Also checked by the sequencer; repeated so a missing directory is
    // reported ahead of kubectl discovery
    let output_dir = PathBuf::from(&config.output_dir);
    if !output_dir.is_dir() {
        return Err(DiscoveryError::OutputDirNotFound { path: output_dir }.into());
    }

    let cluster = KubectlClient::discover()?
        .with_kube_context(args.context)
        .with_dry_run(args.dry_run);
    let store = LocalFileStore;

    let request = DeployRequest {
        output_dir,
        service_filter: args.service_name,
        skip_namespace: args.skip_namespace,
    };

    let mut sequencer = Sequencer::new(&cluster, &store);
    if !args.json {
        sequencer = sequencer.with_progress(ui::create_progress_bar(0));
    }

    let report = sequencer
        .deploy(&request)
        .await
        .context("Deployment aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::print_deployment_summary(&report);
    }

    Ok(report)
}
