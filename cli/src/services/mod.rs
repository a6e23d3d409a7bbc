//! Services layer - orchestration logic
//!
//! This module coordinates between domain logic and infrastructure.
//! Services use infrastructure adapters to perform I/O operations.

pub mod generator;
pub mod sequencer;

// Re-export commonly used types
pub use generator::{discover_services, GenerateRequest, Generator};
pub use sequencer::{DeployRequest, Sequencer};
