//! Request routing
//!
//! - [`Dispatcher`] - normalized path to handler table with fronts
//! - [`Handler`] - page controller contract, [`NotFoundHandler`] fallback
//! - [`DebugHandler`] - timing decorator
//! - [`Front`] - request decorators, [`DateFront`]
//!
//! # Example
//!
//! ```rust
//! use polyclinic::core::site::Site;
//! use polyclinic::routing::{Request, Status};
//!
//! # async fn example() {
//! let site = Site::builder().build();
//! let response = site.handle(Request::get("/about")).await;
//! assert_eq!(response.status, Status::Ok);
//!
//! let missing = site.handle(Request::get("/missing/")).await;
//! assert_eq!(missing.status, Status::NotFound);
//! # }
//! ```

pub mod debug;
pub mod dispatcher;
pub mod front;
pub mod handler;
pub mod request;

pub use debug::DebugHandler;
pub use dispatcher::{error_response, normalize, Dispatcher};
pub use front::{DateFront, Front, DATE_KEY};
pub use handler::{Handler, NotFoundHandler, NOT_FOUND_BODY};
pub use request::{Method, Request, Response, Status};
