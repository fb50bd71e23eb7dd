use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

use super::action::RedirectAction;
use crate::router::{
    Action, RequestContext, Route, RouteData, RouteError, RouteHandler, RouteValues, VirtualPath,
};
use crate::server::RouteRequest;

/// Route table entry that answers matching requests with a redirect.
///
/// Matching is delegated to `source`; on a match the route designates itself
/// as the handler. Resolving the handler asks `target` to generate a URL from
/// the matched values (with `additional_values` as defaults) and returns a
/// [`RedirectAction`].
///
/// The target and the additional values are each bound exactly once, either
/// at construction or through [`RedirectRoute::to`] and friends.
pub struct RedirectRoute {
    source: Arc<dyn Route>,
    target: OnceLock<Arc<dyn Route>>,
    permanent: bool,
    include_query_string: bool,
    additional_values: OnceLock<RouteValues>,
}

impl RedirectRoute {
    /// A redirect with no target yet; bind one with [`RedirectRoute::to`].
    #[must_use]
    pub fn new(source: Arc<dyn Route>, permanent: bool) -> Self {
        Self {
            source,
            target: OnceLock::new(),
            permanent,
            include_query_string: false,
            additional_values: OnceLock::new(),
        }
    }

    /// A redirect whose additional values are bound up front and whose target
    /// comes later. A later [`RedirectRoute::to`] binds the target and then
    /// fails because the values are already set.
    #[must_use]
    pub fn with_values(source: Arc<dyn Route>, permanent: bool, values: RouteValues) -> Self {
        Self {
            additional_values: OnceLock::from(values),
            ..Self::new(source, permanent)
        }
    }

    /// A redirect with its target (and optionally extra values) bound up front.
    #[must_use]
    pub fn with_target(
        source: Arc<dyn Route>,
        target: Arc<dyn Route>,
        permanent: bool,
        additional_values: Option<RouteValues>,
    ) -> Self {
        Self {
            source,
            target: OnceLock::from(target),
            permanent,
            include_query_string: false,
            additional_values: additional_values.map(OnceLock::from).unwrap_or_default(),
        }
    }

    /// Forward the unmatched part of the original query string.
    #[must_use]
    pub fn include_query_string(mut self, include: bool) -> Self {
        self.include_query_string = include;
        self
    }

    #[must_use]
    pub fn permanent(&self) -> bool {
        self.permanent
    }

    #[must_use]
    pub fn includes_query_string(&self) -> bool {
        self.include_query_string
    }

    #[must_use]
    pub fn source(&self) -> &Arc<dyn Route> {
        &self.source
    }

    #[must_use]
    pub fn target(&self) -> Option<&Arc<dyn Route>> {
        self.target.get()
    }

    #[must_use]
    pub fn additional_values(&self) -> Option<&RouteValues> {
        self.additional_values.get()
    }

    /// Bind the target route with no additional values.
    pub fn to(&self, target: Option<Arc<dyn Route>>) -> Result<&Self, RouteError> {
        self.to_with_values(target, None)
    }

    /// Bind the target route plus additional values from any key/value collection.
    pub fn to_with<I, K, V>(
        &self,
        target: Option<Arc<dyn Route>>,
        values: I,
    ) -> Result<&Self, RouteError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.to_with_values(target, Some(values.into_iter().collect()))
    }

    /// Bind the target route plus an optional ready-made value set.
    ///
    /// `None` binds an empty value set, so any later `to*` call fails.
    pub fn to_with_values(
        &self,
        target: Option<Arc<dyn Route>>,
        values: Option<RouteValues>,
    ) -> Result<&Self, RouteError> {
        let target = target.ok_or(RouteError::InvalidArgument("target"))?;

        self.target
            .set(target)
            .map_err(|_| RouteError::InvalidState("target route"))?;

        self.additional_values
            .set(values.unwrap_or_default())
            .map_err(|_| RouteError::InvalidState("additional route values"))?;

        Ok(self)
    }

    /// Resolve the redirect for a matched request.
    #[must_use]
    pub fn resolve(&self, ctx: &RequestContext) -> RedirectAction {
        let Some(target) = self.target.get() else {
            warn!(
                request_id = %ctx.request_id,
                path = %ctx.request.path,
                "Redirect route matched but no target route is bound"
            );
            return RedirectAction::NotFound;
        };

        let request_values = &ctx.route_data.values;
        let values = RouteValues::merged(self.additional_values.get(), request_values);

        let Some(virtual_path) = target.virtual_path(ctx, &values) else {
            warn!(
                request_id = %ctx.request_id,
                path = %ctx.request.path,
                values = ?values,
                "Redirect target could not generate a URL"
            );
            return RedirectAction::NotFound;
        };

        let mut url = format!("~/{virtual_path}");
        if self.include_query_string {
            append_unmatched_query(&mut url, &ctx.request, request_values);
        }

        info!(
            request_id = %ctx.request_id,
            path = %ctx.request.path,
            url = %url,
            permanent = self.permanent,
            "Redirect resolved"
        );

        RedirectAction::Redirect {
            url,
            permanent: self.permanent,
        }
    }
}

/// Append raw `key=value` pairs whose key the route didn't consume.
fn append_unmatched_query(url: &mut String, request: &RouteRequest, matched: &RouteValues) {
    let mut separator = '?';
    for (key, value) in request.query_pairs() {
        if matched.contains_key(key) {
            continue;
        }
        url.push(separator);
        url.push_str(key);
        url.push('=');
        url.push_str(value);
        separator = '&';
    }
}

impl fmt::Debug for RedirectRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectRoute")
            .field("permanent", &self.permanent)
            .field("include_query_string", &self.include_query_string)
            .field("target_bound", &self.target.get().is_some())
            .field("additional_values", &self.additional_values.get())
            .finish()
    }
}

impl Route for RedirectRoute {
    fn match_request(self: Arc<Self>, request: &RouteRequest) -> Option<RouteData> {
        let data = Arc::clone(&self.source).match_request(request)?;
        debug!(
            path = %request.path,
            values = ?data.values,
            "Redirect source matched"
        );
        let handler: Arc<dyn RouteHandler> = self;
        Some(data.with_handler(handler))
    }

    /// Redirect routes never generate URLs.
    fn virtual_path(&self, _ctx: &RequestContext, _values: &RouteValues) -> Option<VirtualPath> {
        None
    }
}

impl RouteHandler for RedirectRoute {
    fn resolve_handler(&self, ctx: &RequestContext) -> Box<dyn Action> {
        Box::new(self.resolve(ctx))
    }
}
