//! # Router Module
//!
//! The route contracts and the minimal collaborators the redirect adapter
//! plugs into.
//!
//! ## Overview
//!
//! - [`Route`] - inbound matching plus outbound URL generation
//! - [`RouteHandler`] / [`Action`] - turn a matched request into a response
//! - [`PatternRoute`] - `/segment/{param}` routes compiled to regexes
//! - [`RouteTable`] - ordered registration, first match wins, named lookup
//!
//! ## Example
//!
//! ```rust
//! use brrtrouter_redirect::router::{PatternRoute, RouteTable};
//! use brrtrouter_redirect::server::RouteRequest;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = RouteTable::new();
//! table.map_route("new_item", Arc::new(PatternRoute::new("/new/{id}")?));
//!
//! let old = table.redirect(Arc::new(PatternRoute::new("/old/{id}")?), true);
//! old.to(table.route("new_item"))?;
//!
//! let response = table.dispatch(RouteRequest::get("/old/42")?);
//! assert_eq!(response.status, 301);
//! assert_eq!(response.location(), Some("/new/42"));
//! # Ok(())
//! # }
//! ```

mod core;
mod error;
mod pattern;
mod table;
#[cfg(test)]
mod tests;

pub use self::core::{
    Action, ParamVec, RequestContext, Route, RouteData, RouteHandler, RouteValues, VirtualPath,
    MAX_INLINE_PARAMS,
};
pub use error::RouteError;
pub use pattern::PatternRoute;
pub use table::RouteTable;
