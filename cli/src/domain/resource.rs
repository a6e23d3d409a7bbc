//! Service and resource set domain types
//!
//! A service gets an isolated resource set: its own namespace, Kargo project,
//! warehouse and stages, generated from four fixed templates.

use serde::Serialize;

use super::naming;
use super::template::{self, Replacements};

/// One of the four resources generated per service, in apply order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Kubernetes namespace isolating the service
    Namespace,
    /// Kargo project
    Project,
    /// Kargo warehouse watching the image repository
    Warehouse,
    /// Kargo promotion stages
    Stages,
}

impl ResourceKind {
    /// Every kind, in the order resources must be applied
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Namespace,
        ResourceKind::Project,
        ResourceKind::Warehouse,
        ResourceKind::Stages,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Project => "project",
            Self::Warehouse => "warehouse",
            Self::Stages => "stages",
        }
    }

    /// Template file name, e.g. `namespace.yaml.template`
    pub fn template_file(&self) -> String {
        format!("{}.yaml.template", self.name())
    }

    /// Generated file name, e.g. `namespace.yaml`
    pub fn output_file(&self) -> String {
        format!("{}.yaml", self.name())
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A discovered service and the values substituted into its templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Service name (directory name under the services dir)
    pub name: String,
    /// Full image repository, `<base>/<name>`
    pub image_repository: String,
    /// GitOps repository URL
    pub git_repo_url: String,
    /// Deployment region
    pub region: String,
}

impl ServiceDescriptor {
    /// Build a descriptor from a directory name and shared settings
    pub fn new(
        dir_name: &str,
        image_repository_base: &str,
        git_repo_url: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        let name = naming::fullname(dir_name, None, None, None);
        Self {
            image_repository: format!(
                "{}/{}",
                image_repository_base.trim_end_matches('/'),
                name
            ),
            name,
            git_repo_url: git_repo_url.into(),
            region: region.into(),
        }
    }

    /// Placeholder values for this service's templates
    pub fn replacements(&self) -> Replacements {
        Replacements::from([
            (template::SERVICE_NAME.to_string(), self.name.clone()),
            (
                template::IMAGE_REPOSITORY.to_string(),
                self.image_repository.clone(),
            ),
            (template::GIT_REPO_URL.to_string(), self.git_repo_url.clone()),
            (template::REGION.to_string(), self.region.clone()),
        ])
    }
}
