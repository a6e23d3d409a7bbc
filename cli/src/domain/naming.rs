//! Resource naming
//!
//! Composes DNS-safe Kubernetes resource names from an application name and
//! optional environment, flavor and region components, the same way the chart
//! `fullname` helper does.

/// Maximum length of a DNS label (RFC 1123), and so of any generated name
pub const MAX_NAME_LEN: usize = 63;

const SEPARATOR: char = '-';

/// Components of a composed resource name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingComponents {
    pub app_name: String,
    pub environment: Option<String>,
    pub flavor: Option<String>,
    pub region: Option<String>,
    /// Complete name supplied by the caller; skips composition when set
    pub name_override: Option<String>,
}

impl NamingComponents {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Default::default()
        }
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn name_override(mut self, name: impl Into<String>) -> Self {
        self.name_override = Some(name.into());
        self
    }

    /// Resolve to the final resource name
    pub fn fullname(&self) -> String {
        match self.name_override.as_deref().filter(|o| !o.is_empty()) {
            Some(name) => fullname_override(name),
            None => fullname(
                &self.app_name,
                self.environment.as_deref(),
                self.flavor.as_deref(),
                self.region.as_deref(),
            ),
        }
    }
}

/// Join the non-empty components with `-`, truncate to 63 chars and strip a
/// trailing separator left by the cut.
pub fn fullname(
    app_name: &str,
    environment: Option<&str>,
    flavor: Option<&str>,
    region: Option<&str>,
) -> String {
    let joined = [Some(app_name), environment, flavor, region]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    truncate_trim(&joined)
}

/// Apply only the length and separator rules to a caller-supplied name.
pub fn fullname_override(name: &str) -> String {
    truncate_trim(name)
}

fn truncate_trim(name: &str) -> String {
    let truncated: String = name.chars().take(MAX_NAME_LEN).collect();
    truncated.trim_end_matches(SEPARATOR).to_string()
}

/// Check whether `name` is a valid RFC 1123 DNS label.
pub fn is_dns_label(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_NAME_LEN {
        return false;
    }

    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    edge_ok(bytes[0])
        && edge_ok(bytes[bytes.len() - 1])
        && bytes.iter().all(|&b| edge_ok(b) || b == b'-')
}
