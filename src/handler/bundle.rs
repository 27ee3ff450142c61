//! Handler bundles: one entry point per HTTP verb behind a single dispatcher.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::IntoResponse;
use futures_util::future::{ready, FutureExt};

use crate::guard::{method_not_allowed, HttpMethod, MethodGuard};
use crate::handler::endpoint::{Endpoint, ResponseFuture};
use crate::handler::types::{ParamTypes, SegmentType};

/// A verb-specific entry point of a bundle.
#[derive(Debug, Clone)]
pub struct BundleMethod {
    params: ParamTypes,
    endpoint: Endpoint,
}

impl BundleMethod {
    pub fn params(&self) -> &ParamTypes {
        &self.params
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

/// A class-like group of per-verb handlers sharing one identifier.
///
/// Requests reach the verb handlers through [`HandlerBundle::as_view`], which
/// dispatches on the request method. Guards attached at registration wrap that
/// dispatcher, so they apply to every verb uniformly.
#[derive(Debug, Clone)]
pub struct HandlerBundle {
    name: String,
    parameters: Option<ParamTypes>,
    dispatch_params: ParamTypes,
    methods: BTreeMap<HttpMethod, BundleMethod>,
    guards: Vec<MethodGuard>,
}

impl HandlerBundle {
    /// Create an empty bundle with the given identifier (e.g. `ArticleView`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
            dispatch_params: ParamTypes::new(),
            methods: BTreeMap::new(),
            guards: Vec::new(),
        }
    }

    /// Explicit segment-type map. Consulted before any verb's parameters.
    pub fn parameters(mut self, params: ParamTypes) -> Self {
        self.parameters = Some(params);
        self
    }

    /// Parameters declared on the dispatcher itself. Consulted last.
    pub fn dispatch_params(mut self, params: ParamTypes) -> Self {
        self.dispatch_params = params;
        self
    }

    /// Define the handler for `verb` without declared parameters.
    pub fn on<F, Fut, R>(self, verb: HttpMethod, f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.on_with(verb, ParamTypes::new(), f)
    }

    /// Define the handler for `verb` with its declared parameter types.
    pub fn on_with<F, Fut, R>(mut self, verb: HttpMethod, params: ParamTypes, f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.methods.insert(
            verb,
            BundleMethod {
                params,
                endpoint: Endpoint::new(f),
            },
        );
        self
    }

    /// Define the handler for `verb` from an existing endpoint.
    pub fn on_endpoint(mut self, verb: HttpMethod, endpoint: Endpoint) -> Self {
        self.methods.insert(
            verb,
            BundleMethod {
                params: ParamTypes::new(),
                endpoint,
            },
        );
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Verbs this bundle implements, in canonical order.
    pub fn defined_methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.methods.keys().copied()
    }

    pub fn method(&self, verb: HttpMethod) -> Option<&BundleMethod> {
        self.methods.get(&verb)
    }

    /// Guards attached by registrations, innermost first.
    pub fn guards(&self) -> &[MethodGuard] {
        &self.guards
    }

    pub(crate) fn push_guard(&mut self, guard: MethodGuard) {
        self.guards.push(guard);
    }

    /// Resolve a segment type: explicit map, then verb parameters, then dispatcher parameters.
    pub fn param_type(&self, segment: &str) -> SegmentType {
        if let Some(ty) = self.parameters.as_ref().and_then(|p| p.get(segment)) {
            return ty.clone();
        }
        if let Some(ty) = self.methods.values().find_map(|m| m.params.get(segment)) {
            return ty.clone();
        }
        self.dispatch_params
            .get(segment)
            .cloned()
            .unwrap_or_default()
    }

    /// Dispatch entry point, with every attached guard applied.
    pub fn as_view(&self) -> Endpoint {
        let methods = Arc::new(self.methods.clone());
        let view = Endpoint::from_fn(move |req| dispatch(&methods, req));
        self.guards
            .iter()
            .fold(view, |inner, guard| guard.wrap(inner))
    }
}

fn dispatch(methods: &BTreeMap<HttpMethod, BundleMethod>, req: Request<Body>) -> ResponseFuture {
    let requested = req.method().clone();

    if let Some(handler) = HttpMethod::from_method(&requested).and_then(|verb| methods.get(&verb)) {
        return handler.endpoint.call(req);
    }
    // HEAD is served by GET when not defined explicitly
    if requested == Method::HEAD {
        if let Some(get) = methods.get(&HttpMethod::Get) {
            return get.endpoint.call(req);
        }
    }

    let allowed = allowed_methods(methods);
    if requested == Method::OPTIONS {
        let allow = allowed.join(", ");
        return ready((StatusCode::OK, [(header::ALLOW, allow)]).into_response()).boxed();
    }
    ready(method_not_allowed(allowed)).boxed()
}

fn allowed_methods(methods: &BTreeMap<HttpMethod, BundleMethod>) -> Vec<&'static str> {
    let mut allowed: Vec<&'static str> = methods.keys().map(|m| m.as_str()).collect();
    if methods.contains_key(&HttpMethod::Get) {
        allowed.push("HEAD");
    }
    allowed.push("OPTIONS");
    allowed
}
