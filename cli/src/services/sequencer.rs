//! Deployment sequencer
//!
//! Applies generated resource sets in dependency order:
//! namespace → project → warehouse → stages.
//!
//! A failed apply stops the remaining steps for that service only. Earlier
//! applies are not rolled back and nothing is retried; re-running is safe
//! because every apply is a declarative upsert.

use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::{info, warn};

use super::generator::discover_services;
use crate::domain::{DeploymentOutcome, DeploymentReport, ResourceKind};
use crate::error::{ClusterError, DiscoveryError, KargoError};
use crate::infrastructure::{ClusterClient, FileStore};

/// Inputs for one deploy run
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub output_dir: PathBuf,
    /// Only deploy this service
    pub service_filter: Option<String>,
    /// Assume namespaces already exist
    pub skip_namespace: bool,
}

impl DeployRequest {
    /// Resources to apply for each service, in order
    pub fn steps(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|kind| !(self.skip_namespace && *kind == ResourceKind::Namespace))
            .collect()
    }
}

/// Applies resource sets through a [`ClusterClient`]
pub struct Sequencer<'a, C: ClusterClient, S: FileStore> {
    cluster: &'a C,
    store: &'a S,
    progress: ProgressBar,
}

impl<'a, C: ClusterClient, S: FileStore> Sequencer<'a, C, S> {
    pub fn new(cluster: &'a C, store: &'a S) -> Self {
        Self {
            cluster,
            store,
            progress: ProgressBar::hidden(),
        }
    }

    /// Builder: report progress on this bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Apply every generated resource set (or the filtered one).
    ///
    /// Fatal before any apply: missing output dir, unknown service, unreachable cluster.
    pub async fn deploy(&self, request: &DeployRequest) -> Result<DeploymentReport, KargoError> {
        if !self.store.is_dir(&request.output_dir) {
            return Err(DiscoveryError::OutputDirNotFound {
                path: request.output_dir.clone(),
            }
            .into());
        }

        let services = discover_services(
            self.store,
            &request.output_dir,
            request.service_filter.as_deref(),
        )?;

        info!("🔌 Checking cluster connectivity...");
        self.cluster.check_connectivity().await?;

        let steps = request.steps();
        info!(
            "🚀 Deploying {} service(s): {}",
            services.len(),
            steps
                .iter()
                .map(ResourceKind::name)
                .collect::<Vec<_>>()
                .join(" → ")
        );

        self.progress.set_length(services.len() as u64);
        let mut report = DeploymentReport::default();

        for service in &services {
            self.progress.set_message(format!("Deploying {}", service));
            let outcome = self.deploy_service(request, service, &steps).await;

            match &outcome.error {
                None => info!("   ✅ {}: applied {} resource(s)", service, outcome.applied.len()),
                Some(error) => warn!("   ❌ {}: {}", service, error),
            }

            report.outcomes.push(outcome);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(report)
    }

    async fn deploy_service(
        &self,
        request: &DeployRequest,
        service: &str,
        steps: &[ResourceKind],
    ) -> DeploymentOutcome {
        let service_dir = request.output_dir.join(service);
        let mut outcome = DeploymentOutcome::new(service);

        for &kind in steps {
            let path = service_dir.join(kind.output_file());

            let result = if self.store.is_file(&path) {
                self.cluster.apply(&path).await
            } else {
                Err(ClusterError::ResourceMissing { path })
            };

            match result {
                Ok(()) => outcome.applied.push(kind),
                Err(e) => {
                    outcome.fail(kind, e.to_string());
                    break;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::memory::MemoryFileStore;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records applies; fails any path containing one of `fail_on`
    #[derive(Default)]
    struct FakeCluster {
        unreachable: bool,
        fail_on: Vec<String>,
        applied: Mutex<Vec<PathBuf>>,
    }

    impl FakeCluster {
        fn failing_on(pattern: &str) -> Self {
            Self {
                fail_on: vec![pattern.to_string()],
                ..Default::default()
            }
        }

        fn applied(&self) -> Vec<String> {
            self.applied
                .lock()
                .unwrap()
                .iter()
                .map(|p| p.display().to_string())
                .collect()
        }
    }

    impl ClusterClient for FakeCluster {
        async fn check_connectivity(&self) -> Result<(), ClusterError> {
            if self.unreachable {
                return Err(ClusterError::Connectivity {
                    message: "connection refused".to_string(),
                });
            }
            Ok(())
        }

        async fn apply(&self, path: &Path) -> Result<(), ClusterError> {
            let display = path.display().to_string();
            if self.fail_on.iter().any(|p| display.contains(p.as_str())) {
                return Err(ClusterError::ApplyFailed {
                    path: path.to_path_buf(),
                    message: "admission webhook denied the request".to_string(),
                });
            }
            self.applied.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn generated_store(services: &[&str]) -> MemoryFileStore {
        let store = MemoryFileStore::new();
        for service in services {
            for kind in ResourceKind::ALL {
                store.add_file(
                    Path::new("projects").join(service).join(kind.output_file()),
                    "kind: Test\n",
                );
            }
        }
        store
    }

    fn request() -> DeployRequest {
        DeployRequest {
            output_dir: PathBuf::from("projects"),
            service_filter: None,
            skip_namespace: false,
        }
    }

    #[tokio::test]
    async fn test_applies_in_dependency_order() {
        let store = generated_store(&["nginx"]);
        let cluster = FakeCluster::default();

        let report = Sequencer::new(&cluster, &store).deploy(&request()).await.unwrap();

        assert_eq!(report.success_count(), 1);
        assert_eq!(
            cluster.applied(),
            vec![
                "projects/nginx/namespace.yaml",
                "projects/nginx/project.yaml",
                "projects/nginx/warehouse.yaml",
                "projects/nginx/stages.yaml",
            ]
        );
    }

    #[tokio::test]
    async fn test_skip_namespace() {
        let store = generated_store(&["nginx"]);
        let cluster = FakeCluster::default();
        let mut req = request();
        req.skip_namespace = true;

        Sequencer::new(&cluster, &store).deploy(&req).await.unwrap();

        let applied = cluster.applied();
        assert_eq!(applied.len(), 3);
        assert_eq!(applied[0], "projects/nginx/project.yaml");
    }

    #[tokio::test]
    async fn test_failure_stops_only_that_service() {
        let store = generated_store(&["api-gw", "nginx"]);
        let cluster = FakeCluster::failing_on("api-gw/warehouse.yaml");

        let report = Sequencer::new(&cluster, &store).deploy(&request()).await.unwrap();

        assert_eq!(report.success_count(), 1);
        assert_eq!(report.fail_count(), 1);

        let failed = report.outcome("api-gw").unwrap();
        assert_eq!(
            failed.applied,
            vec![ResourceKind::Namespace, ResourceKind::Project]
        );
        assert_eq!(failed.failed_resource, Some(ResourceKind::Warehouse));
        assert!(!cluster.applied().contains(&"projects/api-gw/stages.yaml".to_string()));

        // Later service still fully applied
        assert_eq!(report.outcome("nginx").unwrap().applied.len(), 4);
    }

    #[tokio::test]
    async fn test_redeploy_after_partial_failure() {
        let store = generated_store(&["api-gw", "nginx"]);

        let flaky = FakeCluster::failing_on("api-gw/project.yaml");
        let first = Sequencer::new(&flaky, &store).deploy(&request()).await.unwrap();
        assert_eq!(first.fail_count(), 1);

        let healthy = FakeCluster::default();
        let second = Sequencer::new(&healthy, &store).deploy(&request()).await.unwrap();
        assert!(second.is_success());
        assert_eq!(healthy.applied().len(), 8);
    }

    #[tokio::test]
    async fn test_missing_resource_file_fails_service() {
        let store = generated_store(&[]);
        store.add_file("projects/nginx/namespace.yaml", "kind: Namespace\n");
        let cluster = FakeCluster::default();

        let report = Sequencer::new(&cluster, &store).deploy(&request()).await.unwrap();

        let outcome = report.outcome("nginx").unwrap();
        assert_eq!(outcome.failed_resource, Some(ResourceKind::Project));
        assert!(outcome.error.as_ref().unwrap().contains("Resource file missing"));
    }

    #[tokio::test]
    async fn test_unreachable_cluster_is_fatal() {
        let store = generated_store(&["nginx"]);
        let cluster = FakeCluster {
            unreachable: true,
            ..Default::default()
        };

        let err = Sequencer::new(&cluster, &store)
            .deploy(&request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            KargoError::Cluster(ClusterError::Connectivity { .. })
        ));
        assert!(cluster.applied().is_empty());
    }

    #[tokio::test]
    async fn test_missing_output_dir_is_fatal() {
        let store = MemoryFileStore::new();
        let cluster = FakeCluster::default();

        let err = Sequencer::new(&cluster, &store)
            .deploy(&request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            KargoError::Discovery(DiscoveryError::OutputDirNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_filter_deploys_one_service() {
        let store = generated_store(&["api-gw", "nginx"]);
        let cluster = FakeCluster::default();
        let mut req = request();
        req.service_filter = Some("nginx".to_string());

        let report = Sequencer::new(&cluster, &store).deploy(&req).await.unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert!(cluster.applied().iter().all(|p| p.starts_with("projects/nginx")));
    }
}
