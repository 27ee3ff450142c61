//! Host primitives for composing a route table under a prefix.

use crate::handler::Endpoint;
use crate::routing::Router;

/// A single host path entry: `{pattern, target, name}`.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    pattern: String,
    endpoint: Endpoint,
    name: Option<String>,
}

impl UrlPattern {
    pub fn new(pattern: impl Into<String>, endpoint: Endpoint, name: Option<String>) -> Self {
        Self {
            pattern: pattern.into(),
            endpoint,
            name,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A table of path entries included under a prefix and optional namespace.
#[derive(Debug, Clone)]
pub struct Include {
    prefix: String,
    namespace: Option<String>,
    patterns: Vec<UrlPattern>,
}

impl Include {
    pub fn new(
        prefix: impl Into<String>,
        namespace: Option<String>,
        patterns: Vec<UrlPattern>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            namespace,
            patterns,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn patterns(&self) -> &[UrlPattern] {
        &self.patterns
    }
}

/// Package a router's table, prefix and namespace for the host dispatcher.
pub fn mount(router: &Router) -> Include {
    Include::new(
        router.prefix(),
        router.namespace().map(String::from),
        router
            .routes()
            .iter()
            .map(|entry| entry.to_url_pattern())
            .collect(),
    )
}
