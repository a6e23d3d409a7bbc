//! Runtime tool path resolution
//!
//! For each external tool (e.g. `kubectl`) we:
//! 1. Check for an environment variable `{TOOL}_BIN` (e.g. `KUBECTL_BIN`)
//! 2. Fall back to looking the tool up on `PATH`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::tools::{resolve_tool, KUBECTL};
//!
//! let kubectl = resolve_tool(KUBECTL).ok_or(ClusterError::KubectlNotFound)?;
//! Command::new(&kubectl).args(["cluster-info"]).status().await?;
//! ```

use std::env;
use std::path::PathBuf;

pub const KUBECTL: &str = "kubectl";

/// Name of the override variable for `tool`, e.g. `kubectl` → `KUBECTL_BIN`
pub fn tool_env_var(tool: &str) -> String {
    format!("{}_BIN", tool.to_uppercase().replace('-', "_"))
}

/// Resolve a tool to an executable path, or `None` if it cannot be found
pub fn resolve_tool(tool: &str) -> Option<PathBuf> {
    match env::var(tool_env_var(tool)) {
        Ok(path) if !path.is_empty() => which::which(path).ok(),
        _ => which::which(tool).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_env_var() {
        assert_eq!(tool_env_var("kubectl"), "KUBECTL_BIN");
        assert_eq!(tool_env_var("kargo-cli"), "KARGO_CLI_BIN");
    }

    #[test]
    fn test_resolve_from_env_override() {
        env::set_var("CWK_TEST_TOOL_BIN", "/nonexistent/path/to/test-tool");
        // Override points at a missing file: no PATH fallback
        assert!(resolve_tool("cwk-test-tool").is_none());
        env::remove_var("CWK_TEST_TOOL_BIN");
    }

    #[test]
    fn test_resolve_missing_tool() {
        assert!(resolve_tool("cwk-definitely-not-installed").is_none());
    }
}
