//! Explicit registration call: `router.route(path).name(..).methods(..).handler(h)`.

use crate::error::RegistrationResult;
use crate::guard::HttpMethod;
use crate::handler::Handler;
use crate::routing::router::Router;

/// A pending registration against one router.
#[must_use = "nothing is registered until `.handler(...)` is called"]
#[derive(Debug)]
pub struct Registration<'r> {
    router: &'r mut Router,
    path: String,
    name: Option<String>,
    methods: Option<Vec<String>>,
    verb: Option<HttpMethod>,
}

impl<'r> Registration<'r> {
    pub(crate) fn new(router: &'r mut Router, path: impl Into<String>) -> Self {
        Self {
            router,
            path: path.into(),
            name: None,
            methods: None,
            verb: None,
        }
    }

    /// A registration pinned to one method, as made by `get`, `post` and friends.
    pub(crate) fn for_verb(
        router: &'r mut Router,
        path: impl Into<String>,
        verb: HttpMethod,
    ) -> Self {
        Self {
            verb: Some(verb),
            ..Self::new(router, path)
        }
    }

    /// Explicit route name, used verbatim. An empty name counts as absent.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restrict the route to these methods (case-insensitive).
    ///
    /// Ignored on a verb shortcut: the shortcut's method always wins.
    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    /// Register `handler` and return it, wrapped by the method guard when
    /// methods were given, so it can be registered again elsewhere.
    pub fn handler(self, handler: impl Into<Handler>) -> RegistrationResult<Handler> {
        let methods = match self.verb {
            Some(verb) => Some(vec![verb.as_str().to_string()]),
            None => self.methods,
        };
        self.router
            .register(&self.path, self.name, methods, handler.into())
    }
}
