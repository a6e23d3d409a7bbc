//! `cw-kargo generate`: expand templates into per-service resource sets.
//!
//! Usage:
//!   cw-kargo generate --image-repository ghcr.io/myorg --git-repo-url https://github.com/myorg/gitops.git
//!   cw-kargo generate --service-name nginx --force

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::{load_config, ConfigOverrides};
use crate::domain::GenerationReport;
use crate::infrastructure::LocalFileStore;
use crate::services::{GenerateRequest, Generator};
use crate::ui;

/// Arguments of the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub service_name: Option<String>,
    pub overrides: ConfigOverrides,
    pub force: bool,
    pub config: Option<String>,
    pub json: bool,
}

/// Run generation and print the report.
///
/// Returns the report; per-service failures are not an `Err`.
pub fn execute(args: GenerateArgs) -> Result<GenerationReport> {
    let config = load_config(args.config.as_deref())?.with_overrides(args.overrides);
    config.validate()?;

    if !args.json {
        ui::print_header("Generate Kargo Resource Sets");
    }
    info!("📁 Services:  {}", config.services_dir);
    info!("📄 Templates: {}", config.templates_dir);
    info!("📤 Output:    {}", config.output_dir);
    info!("🐳 Images:    {}/<service>", config.image_repository);
    info!("🌍 Region:    {}", config.region);
    if args.force {
        info!("♻️  Existing resource sets will be regenerated (--force)");
    }

    let request = GenerateRequest {
        services_dir: PathBuf::from(&config.services_dir),
        templates_dir: PathBuf::from(&config.templates_dir),
        output_dir: PathBuf::from(&config.output_dir),
        service_filter: args.service_name,
        image_repository: config.image_repository,
        git_repo_url: config.git_repo_url,
        region: config.region,
        force: args.force,
    };

    let store = LocalFileStore;
    let mut generator = Generator::new(&store);
    if !args.json {
        generator = generator.with_progress(ui::create_progress_bar(0));
    }

    let report = generator
        .generate(&request)
        .context("Resource set generation aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ui::print_generation_summary(&report);
    }

    Ok(report)
}
