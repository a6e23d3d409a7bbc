//! Placeholder substitution for resource templates
//!
//! Templates are plain YAML with `{{TOKEN}}` placeholders. Expansion is one
//! literal find-and-replace pass: no conditionals, no loops, no escaping.
//! Placeholders without a replacement are left in the output untouched.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const SERVICE_NAME: &str = "SERVICE_NAME";
pub const IMAGE_REPOSITORY: &str = "IMAGE_REPOSITORY";
pub const GIT_REPO_URL: &str = "GIT_REPO_URL";
pub const REGION: &str = "REGION";

/// Key → value map; ordered so expansion is reproducible
pub type Replacements = BTreeMap<String, String>;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
static ANY_PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

/// Conventional token names, the ones reported when left unresolved
fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([A-Z0-9_]+)\}\}").expect("valid placeholder regex"))
}

/// Any `{{...}}` without nested braces; replacement keys are not restricted
fn any_placeholder_regex() -> &'static Regex {
    ANY_PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid placeholder regex"))
}

/// Format a key as its placeholder token, e.g. `REGION` → `{{REGION}}`
pub fn token(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}

/// Replace every `{{KEY}}` in `template` with its value.
///
/// Single pass over the template: inserted values are never scanned again,
/// so a value containing `{{OTHER}}` comes out verbatim.
pub fn expand(template: &str, replacements: &Replacements) -> String {
    any_placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            replacements
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Placeholder names still present in `text`, deduplicated, in first-seen order
pub fn unresolved_tokens(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for cap in placeholder_regex().captures_iter(text) {
        let name = cap[1].to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}
