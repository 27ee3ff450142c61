//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Prefix and namespace must be usable by the host dispatcher
//! - Handler identifiers and methods must be well-formed
//! - Explicit route names must be unique within the manifest
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ManifestConfig → Result<(), Vec<ValidationError>>
//! - Runs before any route is registered

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::ManifestConfig;
use crate::guard::HttpMethod;
use crate::pattern::native::is_identifier;
use crate::routing::router::{namespace_problem, prefix_problem};

/// One semantic problem in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("router.prefix {prefix:?} {reason}")]
    PrefixCharacters { prefix: String, reason: String },

    #[error("router.namespace {namespace:?} {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("routes[{index}]: handler identifier is empty")]
    EmptyHandler { index: usize },

    #[error("routes[{index}]: handler {handler:?} is not a valid identifier")]
    InvalidHandlerIdentifier { index: usize, handler: String },

    #[error("routes[{index}]: method {method:?} is not one of {allowed:?}")]
    UnknownMethod {
        index: usize,
        method: String,
        allowed: Vec<&'static str>,
    },

    #[error("routes[{index}]: name {name:?} is already used by routes[{first}]")]
    DuplicateName {
        index: usize,
        first: usize,
        name: String,
    },
}

/// Check a manifest, collecting every problem found.
pub fn validate_config(config: &ManifestConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(reason) = prefix_problem(&config.router.prefix) {
        errors.push(ValidationError::PrefixCharacters {
            prefix: config.router.prefix.clone(),
            reason,
        });
    }
    if let Some(ns) = config.router.namespace.as_deref().filter(|ns| !ns.is_empty()) {
        if let Some(reason) = namespace_problem(ns) {
            errors.push(ValidationError::InvalidNamespace {
                namespace: ns.to_string(),
                reason,
            });
        }
    }

    let mut names: HashMap<&str, usize> = HashMap::new();
    for (index, route) in config.routes.iter().enumerate() {
        let handler = route.handler.trim();
        if handler.is_empty() {
            errors.push(ValidationError::EmptyHandler { index });
        } else if !is_identifier(handler) {
            errors.push(ValidationError::InvalidHandlerIdentifier {
                index,
                handler: route.handler.clone(),
            });
        }

        for method in route.methods.iter().flatten() {
            if method.parse::<HttpMethod>().is_err() {
                errors.push(ValidationError::UnknownMethod {
                    index,
                    method: method.clone(),
                    allowed: HttpMethod::allowed_names(),
                });
            }
        }

        if let Some(name) = route.name.as_deref().filter(|n| !n.is_empty()) {
            if let Some(&first) = names.get(name) {
                errors.push(ValidationError::DuplicateName {
                    index,
                    first,
                    name: name.to_string(),
                });
            } else {
                names.insert(name, index);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
