use http::{Method, Uri};
use tracing::debug;

use crate::router::RouteError;

/// Inbound request as seen by the routing layer.
///
/// Only the pieces routes care about are kept: method, path, the raw query
/// string and an optional request id header value. The query string is
/// stored exactly as received so it can be forwarded without re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Request path without the query string (e.g. `/old/42`)
    pub path: String,
    /// Raw query string without the leading `?`, if any
    pub query: Option<String>,
    /// Value of the `x-request-id` header, if the caller supplied one
    pub request_id_header: Option<String>,
}

impl RouteRequest {
    /// Build a request from a method and an origin-form target such as
    /// `/old/42?ref=x`.
    pub fn new(method: Method, target: &str) -> Result<Self, RouteError> {
        let uri = target.parse::<Uri>().map_err(|e: http::uri::InvalidUri| {
            RouteError::InvalidRequestTarget {
                target: target.to_string(),
                reason: e.to_string(),
            }
        })?;
        let path = match uri.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        let query = uri.query().map(str::to_string);
        debug!(method = %method, path = %path, query = ?query, "Parsed route request");
        Ok(Self {
            method,
            path,
            query,
            request_id_header: None,
        })
    }

    /// Shorthand for a `GET` request.
    pub fn get(target: &str) -> Result<Self, RouteError> {
        Self::new(Method::GET, target)
    }

    /// Attach the `x-request-id` header value.
    #[must_use]
    pub fn with_request_id_header(mut self, value: impl Into<String>) -> Self {
        self.request_id_header = Some(value.into());
        self
    }

    /// Iterate the query string as raw `(key, value)` pairs in original order.
    ///
    /// Nothing is percent-decoded. Empty segments (`a=1&&b=2`) are skipped and
    /// a bare key (`?flag`) yields an empty value.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.query
            .as_deref()
            .unwrap_or("")
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_splits_path_and_query() {
        let req = RouteRequest::get("/old/42?ref=x&y=2").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path, "/old/42");
        assert_eq!(req.query.as_deref(), Some("ref=x&y=2"));
    }

    #[test]
    fn test_query_pairs_are_raw_and_ordered() {
        let req = RouteRequest::get("/s?b=%20x&a=1&&flag&a=2").unwrap();
        let pairs: Vec<_> = req.query_pairs().collect();
        assert_eq!(
            pairs,
            vec![("b", "%20x"), ("a", "1"), ("flag", ""), ("a", "2")]
        );
    }

    #[test]
    fn test_no_query() {
        let req = RouteRequest::get("/plain").unwrap();
        assert!(req.query.is_none());
        assert_eq!(req.query_pairs().count(), 0);
    }

    #[test]
    fn test_invalid_target() {
        let err = RouteRequest::get("/bad path").unwrap_err();
        assert!(matches!(err, RouteError::InvalidRequestTarget { .. }));
    }
}
