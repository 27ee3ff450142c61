//! URL resolution and reversal over a set of includes.

use std::borrow::Cow;
use std::collections::BTreeMap;

use regex::Regex;

use crate::dispatch::include::Include;
use crate::error::{RegistrationError, ReverseError};
use crate::handler::Endpoint;
use crate::pattern::native::{Converter, NativePath};

/// Result of matching a request path.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    pub endpoint: Endpoint,
    /// Captured segments, canonicalized by their converter.
    pub kwargs: BTreeMap<String, String>,
    pub url_name: Option<String>,
    pub namespace: Option<String>,
}

impl ResolvedRoute {
    /// `namespace:name`, or just `name` outside a namespace.
    pub fn view_name(&self) -> Option<String> {
        let name = self.url_name.as_deref()?;
        Some(match &self.namespace {
            Some(ns) => format!("{ns}:{name}"),
            None => name.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    route: NativePath,
    regex: Regex,
    params: Vec<(String, Converter)>,
    endpoint: Endpoint,
    name: Option<String>,
    namespace: Option<String>,
}

impl CompiledRoute {
    fn capture(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(path)?;
        let mut kwargs = BTreeMap::new();
        for (i, (name, converter)) in self.params.iter().enumerate() {
            let value = caps.get(i + 1)?.as_str();
            if !converter.accepts(value) {
                return None;
            }
            kwargs.insert(name.clone(), converter.canonicalize(value));
        }
        Some(kwargs)
    }
}

/// The host's URL configuration: every included table, compiled.
#[derive(Debug, Clone, Default)]
pub struct UrlConf {
    routes: Vec<CompiledRoute>,
}

impl UrlConf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and append every pattern of `include`.
    pub fn include(&mut self, include: Include) -> Result<&mut Self, RegistrationError> {
        for pattern in include.patterns() {
            let full = format!("{}{}", include.prefix(), pattern.pattern());
            let route = NativePath::parse(&full).map_err(|reason| {
                RegistrationError::InvalidPattern {
                    path: full.clone(),
                    reason,
                }
            })?;
            let regex = Regex::new(&route.to_regex_source()).map_err(|e| {
                RegistrationError::InvalidPattern {
                    path: full.clone(),
                    reason: e.to_string(),
                }
            })?;
            let params = route
                .params()
                .map(|(name, converter)| (name.to_string(), converter))
                .collect();

            self.routes.push(CompiledRoute {
                route,
                regex,
                params,
                endpoint: pattern.endpoint().clone(),
                name: pattern.name().map(String::from),
                namespace: include.namespace().map(String::from),
            });
        }
        Ok(self)
    }

    /// Builder form of [`UrlConf::include`].
    pub fn with(mut self, include: Include) -> Result<Self, RegistrationError> {
        self.include(include)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match a request path. A single leading `/` is ignored.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        // Match against the decoded path; undecodable input is matched as sent
        let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));
        let path: &str = &decoded;
        let path = path.strip_prefix('/').unwrap_or(path);
        self.routes.iter().find_map(|route| {
            let kwargs = route.capture(path)?;
            Some(ResolvedRoute {
                endpoint: route.endpoint.clone(),
                kwargs,
                url_name: route.name.clone(),
                namespace: route.namespace.clone(),
            })
        })
    }

    /// Build `/path` for `"namespace:name"` (or `"name"`) from keyword arguments.
    ///
    /// When several patterns share the name, the most recently included one
    /// that accepts the arguments wins.
    pub fn reverse(&self, view_name: &str, kwargs: &[(&str, &str)]) -> Result<String, ReverseError> {
        let (namespace, name) = match view_name.rsplit_once(':') {
            Some((ns, name)) => (Some(ns), name),
            None => (None, view_name),
        };
        let kwargs: BTreeMap<&str, &str> = kwargs.iter().copied().collect();

        let mut last_reason = None;
        let candidates = self.routes.iter().rev().filter(|route| {
            route.name.as_deref() == Some(name) && route.namespace.as_deref() == namespace
        });
        for route in candidates {
            match route.route.render(&kwargs) {
                Ok(path) => return Ok(format!("/{path}")),
                Err(reason) => last_reason = Some(reason),
            }
        }

        Err(ReverseError::NoReverseMatch {
            name: view_name.to_string(),
            reason: last_reason.unwrap_or_else(|| "no pattern has this name".to_string()),
        })
    }
}
