//! A finished row of the route table.

use std::fmt;

use serde::Serialize;

use crate::dispatch::UrlPattern;
use crate::guard::HttpMethod;
use crate::handler::{Endpoint, Handler};

/// One registered route. Immutable once created.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub(crate) path: String,
    pub(crate) handler: Handler,
    pub(crate) endpoint: Endpoint,
    pub(crate) name: Option<String>,
    pub(crate) methods: Vec<HttpMethod>,
}

impl RouteEntry {
    /// Normalized path in host-native syntax, relative to the router prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The handler as registered (guard included when methods were given).
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Dispatch entry point handed to the host.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Allowed methods. Empty means every method passes.
    pub fn methods(&self) -> &[HttpMethod] {
        &self.methods
    }

    /// The host dispatcher's view of this entry.
    pub fn to_url_pattern(&self) -> UrlPattern {
        UrlPattern::new(self.path.clone(), self.endpoint.clone(), self.name.clone())
    }

    /// Plain-data description, for inspection and JSON output.
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            path: self.path.clone(),
            handler: self.handler.name().to_string(),
            kind: if self.handler.is_bundle() {
                "bundle"
            } else {
                "function"
            },
            name: self.name.clone(),
            methods: self.methods.clone(),
        }
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<URLPattern '{}'", self.path)?;
        if let Some(name) = &self.name {
            write!(f, " [name='{name}']")?;
        }
        f.write_str(">")
    }
}

/// Serializable snapshot of a [`RouteEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub path: String,
    pub handler: String,
    pub kind: &'static str,
    pub name: Option<String>,
    pub methods: Vec<HttpMethod>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::FunctionHandler;

    fn entry(name: Option<&str>) -> RouteEntry {
        let handler: Handler = FunctionHandler::new("home", |_req| async { "home" }).into();
        RouteEntry {
            path: "home/".into(),
            endpoint: handler.endpoint(),
            handler,
            name: name.map(String::from),
            methods: vec![HttpMethod::Get],
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(entry(Some("home")).to_string(), "<URLPattern 'home/' [name='home']>");
        assert_eq!(entry(None).to_string(), "<URLPattern 'home/'>");
    }

    #[test]
    fn test_summary_json() {
        let json = serde_json::to_value(entry(Some("home")).summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "path": "home/",
                "handler": "home",
                "kind": "function",
                "name": "home",
                "methods": ["GET"],
            })
        );
    }
}
