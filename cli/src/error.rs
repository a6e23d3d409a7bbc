//! Centralized error types for cw-kargo
//!
//! Uses thiserror for typed errors that can be matched on,
//! while still being compatible with anyhow for propagation.
//!
//! Fatal errors (`DiscoveryError`, `ClusterError::Connectivity`) abort a run
//! before any per-service work. Per-service errors are recorded in the run
//! report and never abort the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a deploy run
#[derive(Error, Debug)]
pub enum KargoError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Cluster error: {0}")]
    Cluster(#[from] ClusterError),
}

/// Input or output layout is missing. Fatal for the whole run.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Services directory not found: {}", path.display())]
    ServicesDirNotFound { path: PathBuf },

    #[error("Templates directory not found: {}", path.display())]
    TemplatesDirNotFound { path: PathBuf },

    #[error("Required template missing: {}", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("Output directory not found: {}. Run `cw-kargo generate` first", path.display())]
    OutputDirNotFound { path: PathBuf },

    #[error("Service '{name}' not found under {}", dir.display())]
    ServiceNotFound { name: String, dir: PathBuf },

    #[error("Failed to list {}: {message}", path.display())]
    ListFailed { path: PathBuf, message: String },
}

/// Per-service generation failures
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to read template {}: {message}", path.display())]
    TemplateUnreadable { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    WriteFailed { path: PathBuf, message: String },

    #[error("Failed to clear existing output {}: {message}", path.display())]
    ClearFailed { path: PathBuf, message: String },

    #[error("Resolves to '{name}', already generated for service '{with}'")]
    NameCollision { name: String, with: String },
}

/// Cluster CLI failures
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("kubectl not found. Install kubectl or set KUBECTL_BIN to its path")]
    KubectlNotFound,

    #[error("Cluster unreachable: {message}")]
    Connectivity { message: String },

    #[error("Resource file missing: {}", path.display())]
    ResourceMissing { path: PathBuf },

    #[error("kubectl apply failed for {}: {message}", path.display())]
    ApplyFailed { path: PathBuf, message: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required configuration missing: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },
}
