//! The route table.
//!
//! # Responsibilities
//! - Own the group prefix, namespace and naming/trailing-slash policy
//! - Normalize each registered path and append it to the table
//! - Hand the finished table to the host through [`crate::dispatch::mount`]
//!
//! # Design Decisions
//! - Prefix and namespace are checked once, at construction
//! - Dynamic placeholders in the prefix are typed lazily, with the first
//!   handler registered while the prefix still needs it
//! - Each registration is all-or-nothing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::schema::RouterConfig;
use crate::error::{ConfigurationError, RegistrationError, RegistrationResult};
use crate::guard::{self, HttpMethod};
use crate::handler::Handler;
use crate::pattern::native::NativePath;
use crate::pattern::{DynamicPattern, PatternEngine};
use crate::routing::entry::RouteEntry;
use crate::routing::naming::infer_name;
use crate::routing::registration::Registration;

/// Policy switches fixed for a router's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Infer a name from the handler when none is given.
    pub auto_naming: bool,
    /// Give every path exactly one trailing slash (none for the empty path).
    pub auto_trailing_slash: bool,
    /// Placeholder syntax accepted in paths besides the host-native one.
    pub dynamic_pattern: DynamicPattern,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            auto_naming: true,
            auto_trailing_slash: false,
            dynamic_pattern: DynamicPattern::NoOp,
        }
    }
}

/// Builder for [`Router`]. Validation runs in [`RouterBuilder::build`].
#[derive(Debug, Clone)]
pub struct RouterBuilder {
    prefix: String,
    namespace: Option<String>,
    options: RouterOptions,
}

impl RouterBuilder {
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn auto_naming(mut self, enabled: bool) -> Self {
        self.options.auto_naming = enabled;
        self
    }

    pub fn auto_trailing_slash(mut self, enabled: bool) -> Self {
        self.options.auto_trailing_slash = enabled;
        self
    }

    pub fn dynamic_pattern(mut self, pattern: DynamicPattern) -> Self {
        self.options.dynamic_pattern = pattern;
        self
    }

    pub fn options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<Router, ConfigurationError> {
        if let Some(reason) = prefix_problem(&self.prefix) {
            return Err(ConfigurationError::InvalidPrefix {
                prefix: self.prefix,
                reason,
            });
        }
        let namespace = self.namespace.filter(|ns| !ns.is_empty());
        if let Some(ns) = &namespace {
            if let Some(reason) = namespace_problem(ns) {
                return Err(ConfigurationError::InvalidNamespace {
                    namespace: ns.clone(),
                    reason,
                });
            }
        }

        Ok(Router {
            prefix: normalize_prefix(&self.prefix, self.options.auto_trailing_slash),
            namespace,
            options: self.options,
            routes: Vec::new(),
        })
    }
}

/// A group of routes sharing a prefix, a namespace and a policy.
#[derive(Debug, Clone)]
pub struct Router {
    prefix: String,
    namespace: Option<String>,
    options: RouterOptions,
    routes: Vec<RouteEntry>,
}

impl Router {
    pub fn builder(prefix: impl Into<String>) -> RouterBuilder {
        RouterBuilder {
            prefix: prefix.into(),
            namespace: None,
            options: RouterOptions::default(),
        }
    }

    /// Router with default options.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigurationError> {
        Self::builder(prefix).build()
    }

    pub fn from_config(config: &RouterConfig) -> Result<Self, ConfigurationError> {
        let mut builder = Self::builder(config.prefix.clone()).options(RouterOptions {
            auto_naming: config.auto_naming,
            auto_trailing_slash: config.auto_trailing_slash,
            dynamic_pattern: config.dynamic_pattern,
        });
        if let Some(ns) = &config.namespace {
            builder = builder.namespace(ns.clone());
        }
        builder.build()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn options(&self) -> RouterOptions {
        self.options
    }

    pub fn auto_naming(&self) -> bool {
        self.options.auto_naming
    }

    pub fn auto_trailing_slash(&self) -> bool {
        self.options.auto_trailing_slash
    }

    pub fn dynamic_pattern(&self) -> DynamicPattern {
        self.options.dynamic_pattern
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Start a registration for `path`.
    pub fn route(&mut self, path: impl Into<String>) -> Registration<'_> {
        Registration::new(self, path)
    }

    pub fn get(&mut self, path: impl Into<String>) -> Registration<'_> {
        Registration::for_verb(self, path, HttpMethod::Get)
    }

    pub fn post(&mut self, path: impl Into<String>) -> Registration<'_> {
        Registration::for_verb(self, path, HttpMethod::Post)
    }

    pub fn put(&mut self, path: impl Into<String>) -> Registration<'_> {
        Registration::for_verb(self, path, HttpMethod::Put)
    }

    pub fn patch(&mut self, path: impl Into<String>) -> Registration<'_> {
        Registration::for_verb(self, path, HttpMethod::Patch)
    }

    pub fn delete(&mut self, path: impl Into<String>) -> Registration<'_> {
        Registration::for_verb(self, path, HttpMethod::Delete)
    }

    pub(crate) fn register(
        &mut self,
        path: &str,
        name: Option<String>,
        methods: Option<Vec<String>>,
        handler: Handler,
    ) -> RegistrationResult<Handler> {
        let engine = self.options.dynamic_pattern;

        // Not committed until the whole registration succeeds
        let pending_prefix = engine
            .is_custom(&self.prefix)
            .then(|| engine.normalize(&self.prefix, &handler));
        let prefix = pending_prefix.as_deref().unwrap_or(&self.prefix);
        if let Some(marker) = engine.residual(prefix) {
            return Err(RegistrationError::InvalidPrefix {
                prefix: prefix.to_string(),
                reason: format!("{marker:?} left over after {engine} normalization"),
            });
        }
        NativePath::parse(prefix).map_err(|reason| RegistrationError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason,
        })?;

        let mut path = path.to_string();
        if self.options.auto_trailing_slash {
            path = path.trim_matches('/').to_string();
            if !path.is_empty() {
                path.push('/');
            }
        }
        if path == "/" && prefix.ends_with('/') {
            path.clear();
        }
        if path.starts_with('/') && (prefix.is_empty() || prefix.ends_with('/')) {
            tracing::warn!(
                path = %path,
                prefix = %prefix,
                "Path starts with '/' and will never match under this prefix"
            );
        }
        if engine.is_custom(&path) {
            path = engine.normalize(&path, &handler);
        }
        if let Some(marker) = engine.residual(&path) {
            let reason = format!("{marker:?} left over after {engine} normalization");
            return Err(RegistrationError::InvalidPattern { path, reason });
        }

        NativePath::parse(&path).map_err(|reason| RegistrationError::InvalidPattern {
            path: path.clone(),
            reason,
        })?;
        let full = format!("{prefix}{path}");
        NativePath::parse(&full)
            .map_err(|reason| RegistrationError::InvalidPattern { path: full, reason })?;

        let name = match name.filter(|n| !n.is_empty()) {
            Some(explicit) => Some(explicit),
            None if self.options.auto_naming => Some(infer_name(&handler)),
            None => None,
        };

        let methods = match methods {
            Some(methods) => guard::validate(methods)?,
            None => Vec::new(),
        };
        let handler = guard::wrap(handler, &methods);
        let endpoint = handler.endpoint();

        if let Some(prefix) = pending_prefix {
            tracing::debug!(
                from = %self.prefix,
                to = %prefix,
                handler = handler.name(),
                "Router prefix normalized"
            );
            self.prefix = prefix;
        }

        tracing::debug!(
            prefix = %self.prefix,
            path = %path,
            name = name.as_deref().unwrap_or("-"),
            methods = ?methods,
            handler = handler.name(),
            "Route registered"
        );

        self.routes.push(RouteEntry {
            path,
            handler: handler.clone(),
            endpoint,
            name,
            methods,
        });
        Ok(handler)
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Router(")?;
        writeln!(f, "\tnamespace:\t\"{}\"", self.namespace.as_deref().unwrap_or(""))?;
        writeln!(f, "\tprefix:\t\t\"{}\"", self.prefix)?;
        let routes = self
            .routes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "\troutes:\t\t[{routes}]")?;
        f.write_str(")")
    }
}

/// Why the host could never match this prefix, if it could not.
pub(crate) fn prefix_problem(prefix: &str) -> Option<String> {
    if let Some(c) = prefix
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || *c == '?' || *c == '#')
    {
        return Some(format!("contains {c:?}"));
    }
    if prefix.trim_matches('/').contains("//") {
        return Some("contains an empty segment".to_string());
    }
    None
}

/// Why this namespace cannot qualify route names, if it cannot.
pub(crate) fn namespace_problem(namespace: &str) -> Option<String> {
    if namespace.contains(':') {
        return Some("must not contain ':'".to_string());
    }
    if namespace.chars().any(char::is_whitespace) {
        return Some("must not contain whitespace".to_string());
    }
    None
}

fn normalize_prefix(prefix: &str, auto_trailing_slash: bool) -> String {
    let mut prefix = prefix.trim_start_matches('/').to_string();
    if auto_trailing_slash {
        prefix = prefix.trim_end_matches('/').to_string();
        prefix.push('/');
    }
    if prefix == "/" {
        prefix.clear();
    }
    prefix
}
