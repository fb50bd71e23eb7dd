use std::fmt;

/// Routing configuration error
///
/// Raised while routes are being built or bound at startup. These are
/// programming errors: registration should abort rather than serve traffic
/// with a half-configured table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A required argument was missing
    ///
    /// Returned by `RedirectRoute::to*` when no target route is supplied.
    InvalidArgument(&'static str),
    /// A once-only binding was attempted a second time
    InvalidState(&'static str),
    /// A path pattern could not be compiled
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Why compilation failed
        reason: String,
    },
    /// A request target could not be parsed as an origin-form URI
    InvalidRequestTarget {
        /// The offending target
        target: String,
        /// Parser message
        reason: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidArgument(name) => {
                write!(f, "Routing error: argument '{}' must be provided", name)
            }
            RouteError::InvalidState(name) => {
                write!(f, "Routing error: {} should be set once only", name)
            }
            RouteError::InvalidPattern { pattern, reason } => {
                write!(
                    f,
                    "Routing error: invalid path pattern '{}': {}",
                    pattern, reason
                )
            }
            RouteError::InvalidRequestTarget { target, reason } => {
                write!(
                    f,
                    "Routing error: invalid request target '{}': {}",
                    target, reason
                )
            }
        }
    }
}

impl std::error::Error for RouteError {}
