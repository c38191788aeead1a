//! In-memory entity registry
//!
//! - [`Engine`] stores doctors, patients, clinics and locations and builds
//!   new entities for them
//! - [`IdAllocator`] issues location ids
//! - [`decode_value`] decodes form values posted by the page controllers

pub mod allocator;
pub mod decode;
pub mod engine;

pub use allocator::{IdAllocator, SequentialIds};
pub use decode::decode_value;
pub use engine::Engine;
