//! Cluster operations via kubectl
//!
//! The sequencer only needs two things from a cluster: "is it reachable" and
//! "apply this file". [`ClusterClient`] is that seam; [`KubectlClient`] shells
//! out to kubectl.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::ClusterError;
use crate::tools::{resolve_tool, KUBECTL};

/// Cluster access needed by the deployment sequencer
#[allow(async_fn_in_trait)]
pub trait ClusterClient {
    /// Verify the cluster API is reachable and the caller is authenticated
    async fn check_connectivity(&self) -> Result<(), ClusterError>;

    /// Declaratively apply a manifest file (idempotent upsert)
    async fn apply(&self, path: &Path) -> Result<(), ClusterError>;
}

/// Client for kubectl operations
#[derive(Debug, Clone)]
pub struct KubectlClient {
    binary: PathBuf,
    /// kubeconfig context; current context when `None`
    context: Option<String>,
    /// Pass `--dry-run=client` to every apply
    dry_run: bool,
}

impl KubectlClient {
    /// Locate kubectl (`KUBECTL_BIN` or PATH)
    pub fn discover() -> Result<Self, ClusterError> {
        let binary = resolve_tool(KUBECTL).ok_or(ClusterError::KubectlNotFound)?;
        debug!("Using kubectl at {}", binary.display());
        Ok(Self::with_binary(binary))
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            context: None,
            dry_run: false,
        }
    }

    /// Builder: target a kubeconfig context
    pub fn with_kube_context(mut self, context: Option<String>) -> Self {
        self.context = context.filter(|c| !c.is_empty());
        self
    }

    /// Builder: client-side dry run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        if let Some(ref context) = self.context {
            cmd.arg("--context").arg(context);
        }
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd
    }

    /// Arguments for `kubectl apply` of one file
    fn apply_args(&self, path: &Path) -> Vec<String> {
        let mut args = vec![
            "apply".to_string(),
            "-f".to_string(),
            path.display().to_string(),
        ];
        if self.dry_run {
            args.push("--dry-run=client".to_string());
        }
        args
    }
}

impl ClusterClient for KubectlClient {
    async fn check_connectivity(&self) -> Result<(), ClusterError> {
        let output = self
            .command()
            .args(["cluster-info", "--request-timeout=10s"])
            .output()
            .await
            .map_err(|e| ClusterError::Connectivity {
                message: format!("failed to run kubectl: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClusterError::Connectivity {
                message: stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    async fn apply(&self, path: &Path) -> Result<(), ClusterError> {
        let output = self
            .command()
            .args(self.apply_args(path))
            .output()
            .await
            .map_err(|e| ClusterError::ApplyFailed {
                path: path.to_path_buf(),
                message: format!("failed to run kubectl: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClusterError::ApplyFailed {
                path: path.to_path_buf(),
                message: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines() {
            debug!("{}", line);
        }

        Ok(())
    }
}
