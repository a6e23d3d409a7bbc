//! `cw-kargo list`: show discovered services and whether each already has a
//! generated resource set.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::{load_config, ConfigOverrides};
use crate::domain::naming;
use crate::domain::ResourceKind;
use crate::infrastructure::{FileStore, LocalFileStore};
use crate::services::discover_services;
use crate::ui;

/// Generation state of one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceListing {
    pub name: String,
    /// Output directory exists
    pub generated: bool,
    /// Output files present, out of four
    pub files_present: usize,
    pub dns_safe: bool,
}

/// Inspect every service under `services_dir` against `output_dir`
pub fn collect<S: FileStore>(
    store: &S,
    services_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<ServiceListing>> {
    let services = discover_services(store, services_dir, None)
        .with_context(|| format!("Failed to discover services in {}", services_dir.display()))?;

    Ok(services
        .into_iter()
        .map(|name| {
            let dir = output_dir.join(&name);
            let files_present = ResourceKind::ALL
                .iter()
                .filter(|kind| store.is_file(&dir.join(kind.output_file())))
                .count();
            ServiceListing {
                generated: store.is_dir(&dir),
                files_present,
                dns_safe: naming::is_dns_label(&name),
                name,
            }
        })
        .collect())
}

pub fn execute(
    services_dir: Option<String>,
    output_dir: Option<String>,
    config: Option<String>,
) -> Result<()> {
    let config = load_config(config.as_deref())?.with_overrides(ConfigOverrides {
        services_dir,
        output_dir,
        ..Default::default()
    });

    let listings = collect(
        &LocalFileStore,
        Path::new(&config.services_dir),
        Path::new(&config.output_dir),
    )?;

    ui::print_header(&format!("Services in {}", config.services_dir));

    if listings.is_empty() {
        ui::print_warning("No service directories found");
        return Ok(());
    }

    let total = ResourceKind::ALL.len();
    for listing in &listings {
        let state = if !listing.generated {
            "not generated".dimmed()
        } else if listing.files_present == total {
            "generated".green()
        } else {
            format!("incomplete ({}/{} files)", listing.files_present, total).yellow()
        };

        println!("   {} {:<30} {}", "•".bright_cyan(), listing.name.bright_white(), state);
        if !listing.dns_safe {
            println!("     {}", "not a valid DNS label".red());
        }
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::store::memory::MemoryFileStore;

    #[test]
    fn test_collect_reports_generation_state() {
        let store = MemoryFileStore::new();
        store.add_dir("services/nginx");
        store.add_dir("services/api-gw");
        store.add_dir("services/Legacy_App");
        for kind in ResourceKind::ALL {
            store.add_file(Path::new("projects/nginx").join(kind.output_file()), "x");
        }
        store.add_file("projects/api-gw/namespace.yaml", "x");

        let listings = collect(&store, Path::new("services"), Path::new("projects")).unwrap();

        assert_eq!(listings.len(), 3);
        let by_name = |n: &str| listings.iter().find(|l| l.name == n).unwrap().clone();

        assert_eq!(by_name("nginx").files_present, 4);
        assert!(by_name("nginx").generated);
        assert_eq!(by_name("api-gw").files_present, 1);
        assert!(!by_name("Legacy_App").generated);
        assert!(!by_name("Legacy_App").dns_safe);
    }

    #[test]
    fn test_collect_missing_services_dir() {
        let store = MemoryFileStore::new();
        assert!(collect(&store, Path::new("services"), Path::new("projects")).is_err());
    }
}
