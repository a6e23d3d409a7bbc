//! `cw-kargo name`: print the composed resource name for a set of components.

use crate::domain::NamingComponents;

pub fn build(
    app_name: String,
    environment: Option<String>,
    flavor: Option<String>,
    region: Option<String>,
    name_override: Option<String>,
) -> NamingComponents {
    let mut components = NamingComponents::new(app_name);
    if let Some(environment) = environment {
        components = components.environment(environment);
    }
    if let Some(flavor) = flavor {
        components = components.flavor(flavor);
    }
    if let Some(region) = region {
        components = components.region(region);
    }
    if let Some(name) = name_override {
        components = components.name_override(name);
    }
    components
}

pub fn execute(
    app_name: String,
    environment: Option<String>,
    flavor: Option<String>,
    region: Option<String>,
    name_override: Option<String>,
) {
    println!(
        "{}",
        build(app_name, environment, flavor, region, name_override).fullname()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_flags() {
        let name = build(
            "svc".to_string(),
            Some("dev".to_string()),
            None,
            Some("us-east-1".to_string()),
            None,
        );
        assert_eq!(name.fullname(), "svc-dev-us-east-1");
    }
}
