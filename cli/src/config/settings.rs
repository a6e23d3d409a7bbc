//! Generator settings shared by every service in a run.

use serde::{Deserialize, Serialize};

/// Settings read from `cw-kargo.yaml`; every field may be overridden on the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Base image repository (e.g., "ghcr.io/myorg"); the service name is appended
    #[serde(default)]
    pub image_repository: String,

    /// GitOps repository URL the stages promote into
    #[serde(default)]
    pub git_repo_url: String,

    /// Deployment region
    #[serde(default = "default_region")]
    pub region: String,

    /// Directory containing one subdirectory per service
    #[serde(default = "default_services_dir")]
    pub services_dir: String,

    /// Directory containing the four `*.yaml.template` files
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Directory receiving `<service>/{namespace,project,warehouse,stages}.yaml`
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_services_dir() -> String {
    "services".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_output_dir() -> String {
    "projects".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            image_repository: String::new(),
            git_repo_url: String::new(),
            region: default_region(),
            services_dir: default_services_dir(),
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl GeneratorConfig {
    /// Names of required fields that are still empty
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.image_repository.trim().is_empty() {
            missing.push("image_repository (--image-repository)".to_string());
        }
        if self.git_repo_url.trim().is_empty() {
            missing.push("git_repo_url (--git-repo-url)".to_string());
        }
        if self.region.trim().is_empty() {
            missing.push("region (--region)".to_string());
        }
        missing
    }
}
