//! Configuration schema definitions.
//!
//! A manifest declares one router and the routes registered on it. Handlers
//! named in a manifest have no body; they answer `501 Not Implemented` and
//! exist so a table can be checked, inspected and resolved without the
//! application that will eventually own it.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::guard::HttpMethod;
use crate::handler::{Endpoint, FunctionHandler, Handler, HandlerBundle, ParamTypes};
use crate::pattern::DynamicPattern;
use crate::routing::Router;

/// Root of a route manifest.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ManifestConfig {
    /// Router construction options.
    pub router: RouterConfig,

    /// Routes, registered in order.
    pub routes: Vec<RouteConfig>,
}

/// Router construction options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Group prefix (leading `/` is stripped).
    pub prefix: String,

    /// Namespace qualifying route names (`namespace:name`).
    pub namespace: Option<String>,

    /// Infer names for routes declared without one.
    pub auto_naming: bool,

    /// Give every path exactly one trailing slash.
    pub auto_trailing_slash: bool,

    /// Accepted placeholder syntax: "noop", "colon", "brace" or "angle".
    pub dynamic_pattern: DynamicPattern,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            namespace: None,
            auto_naming: true,
            auto_trailing_slash: false,
            dynamic_pattern: DynamicPattern::NoOp,
        }
    }
}

/// Shape of a declared handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    #[default]
    Function,
    Bundle,
}

/// One route declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path template, in host-native or the router's dynamic syntax.
    pub path: String,

    /// Handler identifier (e.g. `get_book`, `ArticleView`).
    pub handler: String,

    #[serde(default)]
    pub kind: HandlerKind,

    /// Explicit route name.
    #[serde(default)]
    pub name: Option<String>,

    /// Allowed methods; absent means unrestricted.
    #[serde(default)]
    pub methods: Option<Vec<String>>,

    /// Declared segment types (`int`, `uuid`, anything else is a slug).
    #[serde(default)]
    pub params: ParamTypes,

    /// Verbs a bundle defines.
    #[serde(default = "default_verbs")]
    pub verbs: Vec<HttpMethod>,
}

fn default_verbs() -> Vec<HttpMethod> {
    vec![HttpMethod::Get]
}

impl RouteConfig {
    /// Handler standing in for the declared one.
    pub fn placeholder_handler(&self) -> Handler {
        match self.kind {
            HandlerKind::Function => {
                FunctionHandler::from_endpoint(&self.handler, not_implemented(&self.handler))
                    .params(self.params.clone())
                    .into()
            }
            HandlerKind::Bundle => {
                let mut bundle =
                    HandlerBundle::new(&self.handler).parameters(self.params.clone());
                for verb in &self.verbs {
                    bundle = bundle.on_endpoint(*verb, not_implemented(&self.handler));
                }
                bundle.into()
            }
        }
    }
}

impl ManifestConfig {
    /// Build the router and register every declared route, in order.
    pub fn build_router(&self) -> Result<Router, ManifestError> {
        let mut router = Router::from_config(&self.router)?;
        for (index, route) in self.routes.iter().enumerate() {
            let mut registration = router.route(route.path.clone());
            if let Some(name) = &route.name {
                registration = registration.name(name.clone());
            }
            if let Some(methods) = &route.methods {
                registration = registration.methods(methods.iter().cloned());
            }
            registration
                .handler(route.placeholder_handler())
                .map_err(|source| ManifestError::Registration {
                    index,
                    handler: route.handler.clone(),
                    source,
                })?;
        }
        Ok(router)
    }
}

fn not_implemented(handler: &str) -> Endpoint {
    let message = format!("{handler} is declared but not implemented");
    Endpoint::new(move |_req| {
        let message = message.clone();
        async move { (StatusCode::NOT_IMPLEMENTED, message) }
    })
}
