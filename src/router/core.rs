//! Router core module - the contracts shared by every route table entry.
//!
//! A route answers two questions: "does this request match me?" and "can you
//! build a URL from these values?". A handler answers a third: "what should
//! happen for this matched request?". Keeping them as separate traits lets one
//! type play both roles (see [`crate::redirect::RedirectRoute`]).

use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

use crate::ids::RequestId;
use crate::server::{Response, RouteRequest};

/// Maximum number of route values before heap allocation.
/// Most routes carry ≤4 values (e.g. `/users/{id}/posts/{postId}`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
///
/// Param names use `Arc<str>` because they usually come from a static route
/// pattern and are cloned for every match.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Route values: parameter name to string value.
///
/// Keys compare ASCII case-insensitively. Insertion order is preserved and
/// overwriting a key keeps its original position and spelling.
#[derive(Clone, Default)]
pub struct RouteValues {
    params: ParamVec,
}

impl RouteValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.params.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .params
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.params.push((Arc::from(name), value)),
        }
    }

    /// Insert using an already shared name (avoids re-allocating static names).
    pub(crate) fn insert_shared(&mut self, name: &Arc<str>, value: String) {
        match self
            .params
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value,
            None => self.params.push((Arc::clone(name), value)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Seed with `defaults`, then overwrite with `overrides`.
    ///
    /// `overrides` wins on every key collision.
    #[must_use]
    pub fn merged(defaults: Option<&RouteValues>, overrides: &RouteValues) -> RouteValues {
        let mut merged = defaults.cloned().unwrap_or_default();
        for (k, v) in &overrides.params {
            merged.insert_shared(k, v.clone());
        }
        merged
    }
}

impl fmt::Debug for RouteValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same keys (case-insensitive) with the same values,
/// regardless of order.
impl PartialEq for RouteValues {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for RouteValues {}

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = RouteValues::new();
        values.extend(iter);
        values
    }
}

impl<K, V> Extend<(K, V)> for RouteValues
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k.as_ref(), v);
        }
    }
}

/// Application-root-relative path produced by URL generation (no leading `/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPath(String);

impl VirtualPath {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        match path.strip_prefix('/') {
            Some(rest) => Self(rest.to_string()),
            None => Self(path),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a successful match: the values captured and who handles the request.
#[derive(Clone, Default)]
pub struct RouteData {
    /// Values matched on the request (pattern captures plus route defaults)
    pub values: RouteValues,
    /// Handler designated for the request, if the route has one
    pub handler: Option<Arc<dyn RouteHandler>>,
}

impl RouteData {
    #[must_use]
    pub fn new(values: RouteValues) -> Self {
        Self {
            values,
            handler: None,
        }
    }

    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn RouteHandler>) -> Self {
        self.handler = Some(handler);
        self
    }
}

impl fmt::Debug for RouteData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteData")
            .field("values", &self.values)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Everything a handler needs about the request it is resolving.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id for log events
    pub request_id: RequestId,
    /// The original request
    pub request: RouteRequest,
    /// The match that selected the handler
    pub route_data: RouteData,
    /// Application root that `~/` URLs are resolved against (e.g. `/` or `/app`)
    pub application_path: String,
}

impl RequestContext {
    /// Build a context rooted at `/`, reusing a valid `x-request-id` if present.
    #[must_use]
    pub fn new(request: RouteRequest, route_data: RouteData) -> Self {
        let request_id = RequestId::from_header_or_new(request.request_id_header.as_deref());
        Self {
            request_id,
            request,
            route_data,
            application_path: "/".to_string(),
        }
    }

    #[must_use]
    pub fn with_application_path(mut self, application_path: impl Into<String>) -> Self {
        self.application_path = application_path.into();
        self
    }

    /// Resolve an application-relative URL (`~/new/42`) against the application path.
    ///
    /// URLs without the `~/` marker are returned unchanged.
    #[must_use]
    pub fn resolve_url(&self, url: &str) -> String {
        match url.strip_prefix("~/") {
            Some(rest) => {
                let root = self.application_path.trim_end_matches('/');
                format!("{root}/{rest}")
            }
            None => url.to_string(),
        }
    }
}

/// Inbound matching and outbound URL generation.
pub trait Route: Send + Sync {
    /// Match the request; `None` when this route does not apply.
    ///
    /// Takes `Arc<Self>` so a route can name itself as the handler.
    fn match_request(self: Arc<Self>, request: &RouteRequest) -> Option<RouteData>;

    /// Generate a virtual path from `values`; `None` when the values don't fit.
    fn virtual_path(&self, ctx: &RequestContext, values: &RouteValues) -> Option<VirtualPath>;
}

/// Turns a matched request into an executable action.
pub trait RouteHandler: Send + Sync {
    fn resolve_handler(&self, ctx: &RequestContext) -> Box<dyn Action>;
}

/// Writes the outcome of a request to the response.
pub trait Action: Send {
    fn execute(&self, ctx: &RequestContext, response: &mut Response);
}

impl<F> RouteHandler for F
where
    F: Fn(&RequestContext) -> Box<dyn Action> + Send + Sync,
{
    fn resolve_handler(&self, ctx: &RequestContext) -> Box<dyn Action> {
        self(ctx)
    }
}

impl<F> Action for F
where
    F: Fn(&RequestContext, &mut Response) + Send,
{
    fn execute(&self, ctx: &RequestContext, response: &mut Response) {
        self(ctx, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> RouteValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let mut v = values(&[("Id", "1")]);
        assert_eq!(v.get("id"), Some("1"));
        assert!(v.contains_key("ID"));
        v.insert("ID", "2");
        assert_eq!(v.len(), 1);
        assert_eq!(v.iter().next(), Some(("Id", "2")));
    }

    #[test]
    fn test_merged_overrides_win() {
        let defaults = values(&[("a", "1"), ("b", "2")]);
        let request = values(&[("b", "3")]);
        let merged = RouteValues::merged(Some(&defaults), &request);
        assert_eq!(merged, values(&[("a", "1"), ("b", "3")]));
    }

    #[test]
    fn test_merged_without_defaults() {
        let request = values(&[("id", "7")]);
        assert_eq!(RouteValues::merged(None, &request), request);
        assert!(RouteValues::merged(None, &RouteValues::new()).is_empty());
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(
            values(&[("a", "1"), ("b", "2")]),
            values(&[("B", "2"), ("a", "1")])
        );
        assert_ne!(values(&[("a", "1")]), values(&[("a", "2")]));
    }

    #[test]
    fn test_virtual_path_strips_leading_slash() {
        assert_eq!(VirtualPath::new("/new/42").as_str(), "new/42");
        assert_eq!(VirtualPath::new("new/42").to_string(), "new/42");
    }

    #[test]
    fn test_context_reuses_request_id_header() {
        let id = RequestId::new();
        let req = RouteRequest::get("/x")
            .unwrap()
            .with_request_id_header(id.to_string());
        let ctx = RequestContext::new(req, RouteData::default());
        assert_eq!(ctx.request_id, id);
    }

    #[test]
    fn test_resolve_url() {
        let req = RouteRequest::get("/x").unwrap();
        let ctx = RequestContext::new(req, RouteData::default());
        assert_eq!(ctx.resolve_url("~/new/42?a=1"), "/new/42?a=1");
        assert_eq!(ctx.resolve_url("~/"), "/");
        assert_eq!(ctx.resolve_url("https://example.com/"), "https://example.com/");

        let ctx = ctx.with_application_path("/app/");
        assert_eq!(ctx.resolve_url("~/new/42"), "/app/new/42");
    }
}
