//! # BRRTRouter Redirect
//!
//! **brrtrouter-redirect** performs URL redirection at the routing layer
//! instead of inside a request handler.
//!
//! ## Overview
//!
//! A [`RedirectRoute`] is registered in a [`RouteTable`] like any other route.
//! It matches requests with a *source* route, designates itself as the
//! handler, then asks a *target* route to generate the destination URL from
//! the matched values and answers with a 301 or 302.
//!
//! ## Architecture
//!
//! - **[`router`]** - route contracts, pattern routes and the ordered route table
//! - **[`redirect`]** - `RedirectRoute` and the `RedirectAction` it produces
//! - **[`server`]** - request and response primitives seen by routes
//! - **[`redirect_map`]** - YAML redirect maps built into route tables
//! - **[`runtime_config`]** / **[`logging`]** - environment configuration and tracing setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Table as RouteTable
//!     participant Redirect as RedirectRoute
//!     participant Source as Source route
//!     participant Target as Target route
//!
//!     Client->>Table: GET /old/42?ref=x
//!     Table->>Redirect: match_request
//!     Redirect->>Source: match_request
//!     Source-->>Redirect: {id: 42}
//!     Redirect-->>Table: RouteData (handler = RedirectRoute)
//!     Table->>Redirect: resolve_handler
//!     Redirect->>Target: virtual_path({id: 42})
//!     alt Generation failed
//!         Target-->>Redirect: None
//!         Redirect-->>Client: 404 Not Found
//!     end
//!     Target-->>Redirect: new/42
//!     Redirect-->>Client: 302 Location: /new/42?ref=x
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtrouter_redirect::{PatternRoute, RouteRequest, RouteTable};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = RouteTable::new();
//! table.map_route("new_item", Arc::new(PatternRoute::new("/new/{id}")?));
//!
//! let old = table
//!     .redirect(Arc::new(PatternRoute::new("/old/{id}")?), false);
//! old.to(table.route("new_item"))?;
//!
//! let response = table.dispatch(RouteRequest::get("/old/42")?);
//! assert_eq!(response.status, 302);
//! assert_eq!(response.location(), Some("/new/42"));
//! # Ok(())
//! # }
//! ```
//!
//! Query forwarding has to be chosen before the route is shared, so build
//! the route first and register it with [`RouteTable::add_redirect`]:
//!
//! ```rust
//! use brrtrouter_redirect::{PatternRoute, RedirectRoute, RouteRequest, RouteTable};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = RouteTable::new();
//! table.map_route("item", Arc::new(PatternRoute::new("/{locale}/items/{id}")?));
//!
//! let redirect = RedirectRoute::new(Arc::new(PatternRoute::new("/items/{id}")?), true)
//!     .include_query_string(true);
//! redirect.to_with(table.route("item"), [("locale", "en")])?;
//! table.add_redirect(redirect);
//!
//! let response = table.dispatch(RouteRequest::get("/items/7?utm=feed")?);
//! assert_eq!(response.status, 301);
//! assert_eq!(response.location(), Some("/en/items/7?utm=feed"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
mod ids;
pub mod logging;
pub mod redirect;
pub mod redirect_map;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use ids::RequestId;
pub use redirect::{RedirectAction, RedirectRoute};
pub use redirect_map::RedirectMap;
pub use router::{
    Action, PatternRoute, RequestContext, Route, RouteData, RouteError, RouteHandler, RouteTable,
    RouteValues, VirtualPath,
};
pub use server::{Response, RouteRequest};
