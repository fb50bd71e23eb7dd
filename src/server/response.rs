use http::StatusCode;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 8;

/// Stack-allocated header storage; names are `Arc<str>` so static names clone in O(1).
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Response sink written by actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderVec,
    /// Optional plain-text body
    pub body: Option<String>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// A fresh `200 OK` response with no headers and no body.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: 200,
            headers: HeaderVec::new(),
            body: None,
        }
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Point the client at `location` with 301 (permanent) or 302 (temporary).
    pub fn redirect(&mut self, location: &str, permanent: bool) {
        self.status = if permanent {
            StatusCode::MOVED_PERMANENTLY.as_u16()
        } else {
            StatusCode::FOUND.as_u16()
        };
        self.set_header("location", location.to_string());
    }

    /// Get a header by name (case-insensitive)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }

    /// The `Location` header, if a redirect was written.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.get_header("location")
    }

    /// Canonical reason phrase for the current status.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
    }
}
