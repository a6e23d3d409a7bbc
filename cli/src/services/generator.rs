//! Resource set generator
//!
//! Discovers service directories and expands the four resource templates once
//! per service into `<output>/<service>/`. A failure for one service is
//! recorded and the batch moves on.

use indicatif::ProgressBar;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::domain::naming;
use crate::domain::template;
use crate::domain::{
    GenerationOutcome, GenerationReport, GenerationStatus, ResourceKind, ServiceDescriptor,
};
use crate::error::{DiscoveryError, GenerationError};
use crate::infrastructure::FileStore;

/// Inputs for one generate run
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub services_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Only generate this service
    pub service_filter: Option<String>,
    /// Base image repository; the service name is appended
    pub image_repository: String,
    pub git_repo_url: String,
    pub region: String,
    /// Replace existing output instead of skipping it
    pub force: bool,
}

/// Generates per-service resource sets through a [`FileStore`]
pub struct Generator<'a, S: FileStore> {
    store: &'a S,
    progress: ProgressBar,
}

impl<'a, S: FileStore> Generator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            progress: ProgressBar::hidden(),
        }
    }

    /// Builder: report progress on this bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run generation for every discovered service (or the filtered one).
    ///
    /// Only missing inputs are fatal; per-service problems end up in the report.
    pub fn generate(&self, request: &GenerateRequest) -> Result<GenerationReport, DiscoveryError> {
        if !self.store.is_dir(&request.services_dir) {
            return Err(DiscoveryError::ServicesDirNotFound {
                path: request.services_dir.clone(),
            });
        }
        self.check_templates(&request.templates_dir)?;
        let services = discover_services(
            self.store,
            &request.services_dir,
            request.service_filter.as_deref(),
        )?;

        info!(
            "📦 Generating resource sets for {} service(s) into {}",
            services.len(),
            request.output_dir.display()
        );

        self.progress.set_length(services.len() as u64);
        let mut report = GenerationReport::default();
        // resolved name -> directory that claimed it in this run
        let mut claimed: BTreeMap<String, String> = BTreeMap::new();

        for dir_name in &services {
            self.progress.set_message(format!("Generating {}", dir_name));

            let service = ServiceDescriptor::new(
                dir_name,
                &request.image_repository,
                request.git_repo_url.clone(),
                request.region.clone(),
            );

            let result = match claimed.get(&service.name) {
                Some(owner) => Err(GenerationError::NameCollision {
                    name: service.name.clone(),
                    with: owner.clone(),
                }),
                None => {
                    claimed.insert(service.name.clone(), dir_name.clone());
                    self.generate_service(request, &service)
                }
            };

            let outcome = match result {
                Ok((status, unresolved)) => {
                    info!("   ✅ {}: {}", dir_name, status.label());
                    if !unresolved.is_empty() {
                        warn!(
                            "   {}: unresolved placeholders left in output: {}",
                            dir_name,
                            unresolved.join(", ")
                        );
                    }
                    GenerationOutcome::success(dir_name, status, unresolved)
                }
                Err(e) => {
                    warn!("   ❌ {}: {}", dir_name, e);
                    GenerationOutcome::failure(dir_name, e.to_string())
                }
            };

            report.outcomes.push(outcome);
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        Ok(report)
    }

    fn check_templates(&self, templates_dir: &Path) -> Result<(), DiscoveryError> {
        if !self.store.is_dir(templates_dir) {
            return Err(DiscoveryError::TemplatesDirNotFound {
                path: templates_dir.to_path_buf(),
            });
        }

        for kind in ResourceKind::ALL {
            let path = templates_dir.join(kind.template_file());
            if !self.store.is_file(&path) {
                return Err(DiscoveryError::TemplateMissing { path });
            }
        }

        Ok(())
    }

    /// Render and write one service's resource set.
    ///
    /// All four templates are rendered before existing output is removed.
    fn generate_service(
        &self,
        request: &GenerateRequest,
        service: &ServiceDescriptor,
    ) -> Result<(GenerationStatus, Vec<String>), GenerationError> {
        let service_dir = request.output_dir.join(&service.name);

        let exists = self.store.is_dir(&service_dir);
        if exists && !request.force {
            debug!("{} already exists, skipping", service_dir.display());
            return Ok((GenerationStatus::SkippedExisting, Vec::new()));
        }

        let replacements = service.replacements();
        let mut rendered = Vec::with_capacity(ResourceKind::ALL.len());
        let mut unresolved: Vec<String> = Vec::new();

        for kind in ResourceKind::ALL {
            let template_path = request.templates_dir.join(kind.template_file());
            let text = self.store.read_to_string(&template_path).map_err(|e| {
                GenerationError::TemplateUnreadable {
                    path: template_path.clone(),
                    message: e.to_string(),
                }
            })?;

            let expanded = template::expand(&text, &replacements);
            for token in template::unresolved_tokens(&expanded) {
                if !unresolved.contains(&token) {
                    unresolved.push(token);
                }
            }
            rendered.push((kind, expanded));
        }

        let status = if exists {
            self.store
                .remove_dir_all(&service_dir)
                .map_err(|e| GenerationError::ClearFailed {
                    path: service_dir.clone(),
                    message: e.to_string(),
                })?;
            GenerationStatus::Overwritten
        } else {
            GenerationStatus::Created
        };

        self.store
            .create_dir_all(&service_dir)
            .map_err(|e| GenerationError::WriteFailed {
                path: service_dir.clone(),
                message: e.to_string(),
            })?;

        for (kind, contents) in &rendered {
            let path = service_dir.join(kind.output_file());
            self.store
                .write(&path, contents)
                .map_err(|e| GenerationError::WriteFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            debug!("Wrote {}", path.display());
        }

        Ok((status, unresolved))
    }
}

/// List service directory names under `dir`, sorted, optionally narrowed to one.
///
/// Shared by generation (services dir) and deployment (output dir).
pub fn discover_services<S: FileStore>(
    store: &S,
    dir: &Path,
    filter: Option<&str>,
) -> Result<Vec<String>, DiscoveryError> {
    let names = store
        .list_dirs(dir)
        .map_err(|e| DiscoveryError::ListFailed {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

    for name in &names {
        if !naming::is_dns_label(name) {
            warn!(
                "'{}' is not a valid DNS label; Kubernetes will reject resources named after it",
                name
            );
        }
    }

    match filter.filter(|f| !f.is_empty()) {
        Some(wanted) => {
            if names.iter().any(|n| n == wanted) {
                Ok(vec![wanted.to_string()])
            } else {
                Err(DiscoveryError::ServiceNotFound {
                    name: wanted.to_string(),
                    dir: dir.to_path_buf(),
                })
            }
        }
        None => Ok(names),
    }
}
