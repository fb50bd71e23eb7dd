pub mod request;
pub mod response;

pub use request::RouteRequest;
pub use response::{HeaderVec, Response};
