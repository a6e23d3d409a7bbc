//! Infrastructure layer - external I/O adapters
//!
//! This module contains all code that interacts with external systems:
//! - Local filesystem (templates, generated resource sets)
//! - Kubernetes API via kubectl

pub mod kubectl;
pub mod store;

// Re-export commonly used types
pub use kubectl::{ClusterClient, KubectlClient};
pub use store::{FileStore, LocalFileStore};
