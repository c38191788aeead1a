//! Core application logic for Polyclinic.
//!
//! # Modules
//!
//! - [`registry`] - In-memory entity registry and factories
//! - [`site`] - The application: registry, store, renderer and dispatcher
//!
//! # Request Flow
//!
//! 1. **Fronts**: decorate the request (the date front adds today's date)
//! 2. **Resolve**: the dispatcher maps the normalized path to a handler
//! 3. **Handle**: the handler reads and writes the registry
//! 4. **Notify**: enrolling a patient fans out to the clinic's observers
//! 5. **Persist**: new patients are inserted through the mapper
//!
//! # Example
//!
//! ```rust
//! use polyclinic::core::site::Site;
//! use polyclinic::routing::{Request, Status};
//!
//! # async fn example() {
//! let site = Site::builder().build();
//!
//! let created = site
//!     .handle(Request::post("/create-location/").with_data("name", "Center"))
//!     .await;
//! assert_eq!(created.status, Status::Ok);
//! assert_eq!(site.engine().await.locations().len(), 1);
//! # }
//! ```

pub mod registry;
pub mod site;
