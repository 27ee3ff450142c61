//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ManifestConfig;
use crate::config::validation::validate_config;
use crate::error::ConfigurationError;

/// Load and validate a route manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<ManifestConfig, ConfigurationError> {
    let content = fs::read_to_string(path)?;
    let manifest = parse_manifest(&content)?;
    tracing::debug!(
        path = %path.display(),
        routes = manifest.routes.len(),
        "Manifest loaded"
    );
    Ok(manifest)
}

/// Parse and validate a route manifest from TOML text.
pub fn parse_manifest(content: &str) -> Result<ManifestConfig, ConfigurationError> {
    let manifest: ManifestConfig = toml::from_str(content)?;
    validate_config(&manifest).map_err(ConfigurationError::Validation)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::HandlerKind;
    use crate::pattern::DynamicPattern;

    #[test]
    fn test_parse_manifest() {
        let manifest = parse_manifest(
            r#"
            [router]
            prefix = "api/"
            namespace = "blog"
            auto_trailing_slash = true
            dynamic_pattern = "colon"

            [[routes]]
            path = "articles/:user_id/"
            handler = "ArticleView"
            kind = "bundle"
            verbs = ["GET", "POST"]
            params = { user_id = "int" }

            [[routes]]
            path = "about"
            handler = "about"
            methods = ["get"]
            "#,
        )
        .unwrap();

        assert_eq!(manifest.router.dynamic_pattern, DynamicPattern::Colon);
        assert!(manifest.router.auto_naming);
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[0].kind, HandlerKind::Bundle);
        assert_eq!(manifest.routes[1].kind, HandlerKind::Function);
        assert_eq!(manifest.routes[1].methods.as_deref(), Some(&["get".to_string()][..]));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_manifest("[router]\ndynamic_pattern = \"square\""),
            Err(ConfigurationError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_error() {
        assert!(matches!(
            parse_manifest("[[routes]]\npath = \"a/\"\nhandler = \"\""),
            Err(ConfigurationError::Validation(ref errors)) if errors.len() == 1
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_manifest(Path::new("/nonexistent/routes.toml")),
            Err(ConfigurationError::Io(_))
        ));
    }
}
