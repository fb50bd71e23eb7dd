use http::Method;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::core::{RequestContext, Route, RouteData, RouteHandler, RouteValues, VirtualPath};
use super::error::RouteError;
use crate::server::RouteRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(Arc<str>),
}

/// Route built from a `/segment/{param}` pattern.
///
/// Matches request paths against a compiled regex and generates URLs by
/// substituting values back into the pattern. Literal segments match exactly;
/// each `{name}` segment matches one non-empty path segment.
pub struct PatternRoute {
    pattern: String,
    regex: Regex,
    segments: Vec<Segment>,
    method: Option<Method>,
    defaults: RouteValues,
    handler: Option<Arc<dyn RouteHandler>>,
}

impl PatternRoute {
    /// Compile a pattern such as `/new/{id}`.
    pub fn new(pattern: &str) -> Result<Self, RouteError> {
        let segments = Self::parse_segments(pattern)?;
        let regex = Self::compile(pattern, &segments)?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            segments,
            method: None,
            defaults: RouteValues::new(),
            handler: None,
        })
    }

    /// Only match requests with this method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Values used when the request or generation call doesn't supply them.
    #[must_use]
    pub fn with_defaults<I, K, V>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.defaults.extend(defaults);
        self
    }

    /// Handler designated on every match.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn RouteHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn defaults(&self) -> &RouteValues {
        &self.defaults
    }

    fn param_names(&self) -> impl Iterator<Item = &Arc<str>> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name),
            Segment::Literal(_) => None,
        })
    }

    fn parse_segments(pattern: &str) -> Result<Vec<Segment>, RouteError> {
        let mut segments = Vec::with_capacity(pattern.matches('/').count());
        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            if segment.starts_with('{') && segment.ends_with('}') {
                let name = segment.trim_start_matches('{').trim_end_matches('}');
                if name.is_empty() || name.contains(['{', '}']) {
                    return Err(RouteError::InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: format!("malformed parameter segment '{segment}'"),
                    });
                }
                segments.push(Segment::Param(Arc::from(name)));
            } else if segment.contains(['{', '}']) {
                return Err(RouteError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: format!("parameters must span a whole segment, got '{segment}'"),
                });
            } else {
                segments.push(Segment::Literal(segment.to_string()));
            }
        }
        Ok(segments)
    }

    fn compile(pattern: &str, segments: &[Segment]) -> Result<Regex, RouteError> {
        let regex = if segments.is_empty() {
            r"^/$".to_string()
        } else {
            let mut re = String::with_capacity(pattern.len() + 8);
            re.push('^');
            for segment in segments {
                match segment {
                    Segment::Literal(lit) => {
                        re.push('/');
                        re.push_str(&regex::escape(lit));
                    }
                    Segment::Param(_) => re.push_str("/([^/]+)"),
                }
            }
            re.push_str("/?$");
            re
        };
        Regex::new(&regex).map_err(|e| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for PatternRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRoute")
            .field("pattern", &self.pattern)
            .field("method", &self.method)
            .field("defaults", &self.defaults)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl Route for PatternRoute {
    fn match_request(self: Arc<Self>, request: &RouteRequest) -> Option<RouteData> {
        if let Some(method) = &self.method {
            if *method != request.method {
                return None;
            }
        }
        let captures = self.regex.captures(&request.path)?;

        let mut values = self.defaults.clone();
        for (i, name) in self.param_names().enumerate() {
            if let Some(raw) = captures.get(i + 1) {
                let raw = raw.as_str();
                let decoded = urlencoding::decode(raw)
                    .map(Cow::into_owned)
                    .unwrap_or_else(|_| raw.to_string());
                values.insert_shared(name, decoded);
            }
        }

        debug!(
            pattern = %self.pattern,
            path = %request.path,
            values = ?values,
            "Pattern route matched"
        );

        let mut data = RouteData::new(values);
        data.handler = self.handler.as_ref().map(Arc::clone);
        Some(data)
    }

    fn virtual_path(&self, _ctx: &RequestContext, values: &RouteValues) -> Option<VirtualPath> {
        let mut path = String::with_capacity(self.pattern.len());
        for segment in &self.segments {
            let part = match segment {
                Segment::Literal(lit) => Cow::Borrowed(lit.as_str()),
                Segment::Param(name) => {
                    let value = values
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .or_else(|| self.defaults.get(name).filter(|v| !v.is_empty()));
                    match value {
                        Some(v) => urlencoding::encode(v),
                        None => {
                            debug!(
                                pattern = %self.pattern,
                                missing = %name,
                                "Cannot generate virtual path: missing route value"
                            );
                            return None;
                        }
                    }
                }
            };
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(&part);
        }
        Some(VirtualPath::new(path))
    }
}
