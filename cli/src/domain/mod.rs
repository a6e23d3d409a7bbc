//! Domain layer - pure business logic
//!
//! This module contains business logic with no external I/O.
//! Types and functions here can be unit tested without mocking.

pub mod naming;
pub mod report;
pub mod resource;
pub mod template;

// Re-export commonly used types
pub use naming::NamingComponents;
pub use report::{
    DeploymentOutcome, DeploymentReport, GenerationOutcome, GenerationReport, GenerationStatus,
};
pub use resource::{ResourceKind, ServiceDescriptor};
