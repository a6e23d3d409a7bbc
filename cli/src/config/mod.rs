//! # Generator Configuration
//!
//! Layered configuration: defaults → `cw-kargo.yaml` → CLI flags / env vars.
//!
//! ## Configuration File
//!
//! `cw-kargo.yaml` in the working directory (or `--config <path>`):
//!
//! ```yaml
//! imageRepository: ghcr.io/myorg
//! gitRepoUrl: https://github.com/myorg/gitops.git
//! region: us-east-1
//! servicesDir: services
//! templatesDir: templates
//! outputDir: projects
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! let config = load_config(None)?.with_overrides(overrides);
//! config.validate()?;
//! ```

mod settings;

pub use settings::GeneratorConfig;

use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cw-kargo.yaml";

/// Values supplied on the command line (or via their env vars)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub image_repository: Option<String>,
    pub git_repo_url: Option<String>,
    pub region: Option<String>,
    pub services_dir: Option<String>,
    pub templates_dir: Option<String>,
    pub output_dir: Option<String>,
}

/// Load configuration.
///
/// An explicit path must exist; the default file is optional and defaults
/// are used when it is absent.
pub fn load_config(path: Option<&str>) -> Result<GeneratorConfig, ConfigError> {
    match path {
        Some(path) => {
            if !Path::new(path).is_file() {
                return Err(ConfigError::FileNotFound {
                    path: path.to_string(),
                });
            }
            load_config_file(Path::new(path))
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_config_file(default_path)
            } else {
                debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(GeneratorConfig::default())
            }
        }
    }
}

/// Parse a config file
pub fn load_config_file(path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!("Loaded config from {}", path.display());
    parse_config(&content).map_err(|message| ConfigError::ParseError {
        path: path.display().to_string(),
        message,
    })
}

fn parse_config(content: &str) -> Result<GeneratorConfig, String> {
    if content.trim().is_empty() {
        return Ok(GeneratorConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| e.to_string())
}

impl GeneratorConfig {
    /// Apply CLI values on top of file values; empty strings are ignored
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        fn set(field: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *field = value;
            }
        }

        set(&mut self.image_repository, overrides.image_repository);
        set(&mut self.git_repo_url, overrides.git_repo_url);
        set(&mut self.region, overrides.region);
        set(&mut self.services_dir, overrides.services_dir);
        set(&mut self.templates_dir, overrides.templates_dir);
        set(&mut self.output_dir, overrides.output_dir);
        self
    }

    /// Fail with every missing required field at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = self.missing_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingFields { fields })
        }
    }
}
