//! CLI definitions for cw-kargo
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cw-kargo",
    version,
    about = "Per-service Kargo promotion topology generator",
    long_about = "Generates an isolated namespace, Kargo project, warehouse and stages for every service\nfrom four YAML templates, and applies them to a cluster in dependency order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate per-service resource sets from templates
    Generate {
        /// Only generate this service
        #[arg(short = 's', long)]
        service_name: Option<String>,

        /// Base image repository; the service name is appended (e.g., ghcr.io/myorg)
        #[arg(long, env = "CW_KARGO_IMAGE_REPOSITORY")]
        image_repository: Option<String>,

        /// GitOps repository URL used by the stages
        #[arg(long, env = "CW_KARGO_GIT_REPO_URL")]
        git_repo_url: Option<String>,

        /// Deployment region
        #[arg(long, env = "CW_KARGO_REGION")]
        region: Option<String>,

        /// Directory with one subdirectory per service
        #[arg(long)]
        services_dir: Option<String>,

        /// Directory with the four *.yaml.template files
        #[arg(long)]
        templates_dir: Option<String>,

        /// Output directory for generated resource sets
        #[arg(long)]
        output_dir: Option<String>,

        /// Regenerate services whose output directory already exists
        #[arg(short, long)]
        force: bool,

        /// Config file (default: ./cw-kargo.yaml if present)
        #[arg(long)]
        config: Option<String>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply generated resource sets to the cluster
    Deploy {
        /// Only deploy this service
        #[arg(short = 's', long)]
        service_name: Option<String>,

        /// Do not apply namespace.yaml (namespaces already exist)
        #[arg(long)]
        skip_namespace_creation: bool,

        /// Directory containing generated resource sets
        #[arg(long)]
        output_dir: Option<String>,

        /// kubeconfig context to use
        #[arg(long, env = "KUBECONTEXT")]
        context: Option<String>,

        /// Validate with `kubectl apply --dry-run=client` without persisting
        #[arg(long)]
        dry_run: bool,

        /// Config file (default: ./cw-kargo.yaml if present)
        #[arg(long)]
        config: Option<String>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List discovered services and their generation state
    List {
        /// Directory with one subdirectory per service
        #[arg(long)]
        services_dir: Option<String>,

        /// Output directory for generated resource sets
        #[arg(long)]
        output_dir: Option<String>,

        /// Config file (default: ./cw-kargo.yaml if present)
        #[arg(long)]
        config: Option<String>,
    },

    /// Print a DNS-safe resource name composed from its parts
    Name {
        /// Application name
        app_name: String,

        /// Environment (e.g., dev, staging, prod)
        #[arg(short, long)]
        environment: Option<String>,

        /// Flavor (e.g., canary, blue)
        #[arg(long)]
        flavor: Option<String>,

        /// Region (e.g., us-east-1)
        #[arg(short, long)]
        region: Option<String>,

        /// Use this full name instead of composing one
        #[arg(long)]
        name_override: Option<String>,
    },
}
