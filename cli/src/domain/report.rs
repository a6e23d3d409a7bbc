//! Run reports
//!
//! Every generate or deploy run returns one report with a per-service outcome.
//! Reports are plain values; nothing about a run is kept in global state.

use serde::Serialize;

use super::resource::ResourceKind;

/// What happened to a service's output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// No previous output; resource set written
    Created,
    /// Output already present and not forced; left untouched
    SkippedExisting,
    /// Output present, removed and regenerated under `--force`
    Overwritten,
}

impl GenerationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::SkippedExisting => "skipped (exists)",
            Self::Overwritten => "overwritten",
        }
    }
}

/// Generation result for one service
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub service: String,
    /// `None` when generation failed
    pub status: Option<GenerationStatus>,
    pub error: Option<String>,
    /// Placeholders left in the generated files
    pub unresolved_tokens: Vec<String>,
}

impl GenerationOutcome {
    pub fn success(
        service: impl Into<String>,
        status: GenerationStatus,
        unresolved_tokens: Vec<String>,
    ) -> Self {
        Self {
            service: service.into(),
            status: Some(status),
            error: None,
            unresolved_tokens,
        }
    }

    pub fn failure(service: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: None,
            error: Some(error.into()),
            unresolved_tokens: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate result of a generate run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub outcomes: Vec<GenerationOutcome>,
}

impl GenerationReport {
    /// Services whose resource set was written (created or overwritten)
    pub fn success_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.status,
                    Some(GenerationStatus::Created | GenerationStatus::Overwritten)
                )
            })
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == Some(GenerationStatus::SkippedExisting))
            .count()
    }

    pub fn fail_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.fail_count() == 0
    }

    pub fn outcome(&self, service: &str) -> Option<&GenerationOutcome> {
        self.outcomes.iter().find(|o| o.service == service)
    }
}

/// Deployment result for one service
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentOutcome {
    pub service: String,
    /// Resources applied successfully, in order
    pub applied: Vec<ResourceKind>,
    /// Resource whose apply failed, if any
    pub failed_resource: Option<ResourceKind>,
    pub error: Option<String>,
}

impl DeploymentOutcome {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            applied: Vec::new(),
            failed_resource: None,
            error: None,
        }
    }

    pub fn fail(&mut self, kind: ResourceKind, error: impl Into<String>) {
        self.failed_resource = Some(kind);
        self.error = Some(error.into());
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate result of a deploy run
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeploymentReport {
    pub outcomes: Vec<DeploymentOutcome>,
}

impl DeploymentReport {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn fail_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.fail_count() == 0
    }

    pub fn outcome(&self, service: &str) -> Option<&DeploymentOutcome> {
        self.outcomes.iter().find(|o| o.service == service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_counts() {
        let report = GenerationReport {
            outcomes: vec![
                GenerationOutcome::success("a", GenerationStatus::Created, vec![]),
                GenerationOutcome::success("b", GenerationStatus::Overwritten, vec![]),
                GenerationOutcome::success("c", GenerationStatus::SkippedExisting, vec![]),
                GenerationOutcome::failure("d", "permission denied"),
            ],
        };

        assert_eq!(report.success_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.fail_count(), 1);
        assert!(!report.is_success());
        assert_eq!(report.outcome("d").unwrap().error.as_deref(), Some("permission denied"));
    }

    #[test]
    fn test_skipped_only_is_success() {
        let report = GenerationReport {
            outcomes: vec![GenerationOutcome::success(
                "a",
                GenerationStatus::SkippedExisting,
                vec![],
            )],
        };
        assert!(report.is_success());
    }

    #[test]
    fn test_deployment_outcome_failure() {
        let mut outcome = DeploymentOutcome::new("nginx");
        outcome.applied.push(ResourceKind::Namespace);
        outcome.fail(ResourceKind::Project, "forbidden");

        let report = DeploymentReport {
            outcomes: vec![outcome, DeploymentOutcome::new("api-gw")],
        };
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.fail_count(), 1);
        assert_eq!(
            report.outcome("nginx").unwrap().failed_resource,
            Some(ResourceKind::Project)
        );
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&GenerationStatus::SkippedExisting).unwrap();
        assert_eq!(json, "\"skipped_existing\"");
    }
}
