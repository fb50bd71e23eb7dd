use http::StatusCode;
use tracing::debug;

use crate::router::{Action, RequestContext};
use crate::server::Response;

/// Outcome of resolving a redirect for one request.
///
/// Built fresh for every request by [`super::RedirectRoute`] and executed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectAction {
    /// The target route could not generate a URL; answer 404.
    NotFound,
    /// Redirect to `url` (application-relative, `~/...`).
    Redirect {
        url: String,
        permanent: bool,
    },
}

impl RedirectAction {
    /// Status code this action writes.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            RedirectAction::NotFound => StatusCode::NOT_FOUND,
            RedirectAction::Redirect { permanent: true, .. } => StatusCode::MOVED_PERMANENTLY,
            RedirectAction::Redirect { permanent: false, .. } => StatusCode::FOUND,
        }
    }

    /// Target URL, if this is a redirect.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            RedirectAction::NotFound => None,
            RedirectAction::Redirect { url, .. } => Some(url),
        }
    }
}

impl Action for RedirectAction {
    fn execute(&self, ctx: &RequestContext, response: &mut Response) {
        match self {
            RedirectAction::NotFound => {
                response.set_status(StatusCode::NOT_FOUND.as_u16());
            }
            RedirectAction::Redirect { url, permanent } => {
                let location = ctx.resolve_url(url);
                debug!(
                    request_id = %ctx.request_id,
                    url = %url,
                    location = %location,
                    permanent = *permanent,
                    "Writing redirect"
                );
                response.redirect(&location, *permanent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouteData;
    use crate::server::RouteRequest;

    fn ctx() -> RequestContext {
        RequestContext::new(RouteRequest::get("/old/1").unwrap(), RouteData::default())
    }

    #[test]
    fn test_not_found_sets_404_only() {
        let mut res = Response::new();
        RedirectAction::NotFound.execute(&ctx(), &mut res);
        assert_eq!(res.status, 404);
        assert!(res.location().is_none());
        assert!(res.body.is_none());
    }

    #[test]
    fn test_permanent_redirect() {
        let action = RedirectAction::Redirect {
            url: "~/new/1".to_string(),
            permanent: true,
        };
        assert_eq!(action.status_code(), StatusCode::MOVED_PERMANENTLY);
        let mut res = Response::new();
        action.execute(&ctx(), &mut res);
        assert_eq!(res.status, 301);
        assert_eq!(res.location(), Some("/new/1"));
    }

    #[test]
    fn test_temporary_redirect_under_application_path() {
        let action = RedirectAction::Redirect {
            url: "~/new/1?a=b".to_string(),
            permanent: false,
        };
        assert_eq!(action.url(), Some("~/new/1?a=b"));
        let mut res = Response::new();
        action.execute(&ctx().with_application_path("/shop"), &mut res);
        assert_eq!(res.status, 302);
        assert_eq!(res.location(), Some("/shop/new/1?a=b"));
    }
}
