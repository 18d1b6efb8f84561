//! Routing table
//!
//! Explicit mapping of exact path + method to handler function, built once
//! at startup and shared read-only by every connection.

use hyper::body::Bytes;
use hyper::{Method, Request};
use std::collections::HashMap;

use crate::error::HandlerResult;

/// A request handler: a pure function of the collected request
pub type Handler = fn(&Request<Bytes>) -> HandlerResult;

/// Outcome of resolving a request against the table
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(Handler),
    /// Path is known but not for this method; carries the `Allow` value
    MethodNotAllowed(String),
    NotFound,
}

#[derive(Debug, Default)]
pub struct Router {
    routes: HashMap<&'static str, Vec<(Method, Handler)>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` on `path`
    ///
    /// Registering the same method and path twice replaces the earlier handler.
    #[must_use]
    pub fn route(mut self, method: Method, path: &'static str, handler: Handler) -> Self {
        let entries = self.routes.entry(path).or_default();
        match entries.iter().position(|(m, _)| *m == method) {
            Some(i) => entries[i].1 = handler,
            None => entries.push((method, handler)),
        }
        self
    }

    #[must_use]
    pub fn get(self, path: &'static str, handler: Handler) -> Self {
        self.route(Method::GET, path, handler)
    }

    #[must_use]
    pub fn post(self, path: &'static str, handler: Handler) -> Self {
        self.route(Method::POST, path, handler)
    }

    /// Resolve by exact path; `HEAD` falls back to the `GET` handler
    pub fn resolve(&self, method: &Method, path: &str) -> Resolution {
        let Some(entries) = self.routes.get(path) else {
            return Resolution::NotFound;
        };

        let find = |wanted: &Method| {
            entries
                .iter()
                .find(|(m, _)| m == wanted)
                .map(|(_, handler)| *handler)
        };

        let handler = find(method).or_else(|| {
            if *method == Method::HEAD {
                find(&Method::GET)
            } else {
                None
            }
        });

        match handler {
            Some(handler) => Resolution::Found(handler),
            None => Resolution::MethodNotAllowed(allow_header(entries)),
        }
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<&'static str> {
        let mut paths: Vec<_> = self.routes.keys().copied().collect();
        paths.sort_unstable();
        paths
    }
}

fn allow_header(entries: &[(Method, Handler)]) -> String {
    let mut methods: Vec<&str> = entries.iter().map(|(m, _)| m.as_str()).collect();
    if entries.iter().any(|(m, _)| *m == Method::GET) && !methods.contains(&"HEAD") {
        methods.push("HEAD");
    }
    methods.join(", ")
}
