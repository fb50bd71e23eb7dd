use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::core::{RequestContext, Route, RouteData};
use crate::redirect::RedirectRoute;
use crate::server::{Response, RouteRequest};

/// Ordered route table.
///
/// Routes are tried in registration order and the first match wins. Named
/// routes can be looked up later, which is how redirect targets are bound.
#[derive(Clone)]
pub struct RouteTable {
    routes: Vec<Arc<dyn Route>>,
    named: HashMap<String, Arc<dyn Route>>,
    application_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Empty table rooted at `/`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            named: HashMap::new(),
            application_path: "/".to_string(),
        }
    }

    /// Set the application root used to resolve `~/` redirect targets.
    #[must_use]
    pub fn with_application_path(mut self, application_path: impl Into<String>) -> Self {
        self.application_path = application_path.into();
        self
    }

    #[must_use]
    pub fn application_path(&self) -> &str {
        &self.application_path
    }

    /// Append an unnamed route.
    pub fn add(&mut self, route: Arc<dyn Route>) {
        self.routes.push(route);
    }

    /// Append a route and index it by name; a later route with the same name
    /// replaces the index entry (both stay registered for matching).
    pub fn map_route(&mut self, name: &str, route: Arc<dyn Route>) {
        if self.named.insert(name.to_string(), Arc::clone(&route)).is_some() {
            warn!(route_name = %name, "Route name re-registered; lookups now return the newer route");
        }
        self.routes.push(route);
    }

    /// Look up a named route.
    #[must_use]
    pub fn route(&self, name: &str) -> Option<Arc<dyn Route>> {
        self.named.get(name).map(Arc::clone)
    }

    /// Register a redirect whose target is bound later with
    /// [`RedirectRoute::to`], so it can point at routes declared after it.
    pub fn redirect(&mut self, source: Arc<dyn Route>, permanent: bool) -> Arc<RedirectRoute> {
        let redirect = Arc::new(RedirectRoute::new(source, permanent));
        self.routes.push(Arc::clone(&redirect) as Arc<dyn Route>);
        redirect
    }

    /// Register an already configured redirect route.
    pub fn add_redirect(&mut self, redirect: RedirectRoute) -> Arc<RedirectRoute> {
        let redirect = Arc::new(redirect);
        self.routes.push(Arc::clone(&redirect) as Arc<dyn Route>);
        redirect
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// First route that matches the request, in registration order.
    #[must_use]
    pub fn match_request(&self, request: &RouteRequest) -> Option<RouteData> {
        debug!(
            method = %request.method,
            path = %request.path,
            routes_count = self.routes.len(),
            "Route match attempt"
        );
        self.routes
            .iter()
            .find_map(|route| Arc::clone(route).match_request(request))
    }

    /// Match, resolve the handler and execute its action.
    ///
    /// A request nothing matches, or whose match has no handler, gets a 404.
    #[must_use]
    pub fn dispatch(&self, request: RouteRequest) -> Response {
        let start = Instant::now();
        let mut response = Response::new();

        let Some(route_data) = self.match_request(&request) else {
            warn!(
                method = %request.method,
                path = %request.path,
                "No route matched"
            );
            response.set_status(404);
            return response;
        };

        let handler = route_data.handler.as_ref().map(Arc::clone);
        let ctx = RequestContext::new(request, route_data)
            .with_application_path(self.application_path.as_str());

        match handler {
            Some(handler) => {
                let action = handler.resolve_handler(&ctx);
                action.execute(&ctx, &mut response);
            }
            None => {
                warn!(
                    request_id = %ctx.request_id,
                    path = %ctx.request.path,
                    "Matched route has no handler"
                );
                response.set_status(404);
            }
        }

        info!(
            request_id = %ctx.request_id,
            method = %ctx.request.method,
            path = %ctx.request.path,
            status = response.status,
            location = response.location().unwrap_or(""),
            duration_us = start.elapsed().as_micros() as u64,
            "Request dispatched"
        );
        response
    }
}
