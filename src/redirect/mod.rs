//! # Redirect Module
//!
//! Redirects performed at the routing layer instead of inside a handler.
//!
//! A [`RedirectRoute`] sits in the route table like any other route. It
//! borrows its matching from a *source* route and its URL generation from a
//! *target* route, then answers the request with a [`RedirectAction`]:
//!
//! ```text
//! request ─► RouteTable ─► RedirectRoute::match_request ─► source.match_request
//!                               │ (handler = the RedirectRoute itself)
//!                               ▼
//!            RedirectRoute::resolve ─► target.virtual_path(merged values)
//!                               │
//!                 ┌─────────────┴──────────────┐
//!                 ▼                            ▼
//!      Redirect { "~/new/42?ref=x" }       NotFound (404)
//! ```
//!
//! Values matched on the request win over the route's additional values, and
//! with query forwarding enabled the query pairs the source route didn't
//! consume are appended verbatim.

mod action;
mod route;

pub use action::RedirectAction;
pub use route::RedirectRoute;
