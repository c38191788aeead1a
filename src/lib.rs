// Polyclinic - In-process clinic registry and route dispatcher
// Copyright (c) 2025 Polyclinic Contributors
// Licensed under the MIT License

//! # Polyclinic
//!
//! A small in-process application for a district clinic directory: named
//! page routes, a registry of locations, clinics and people, observer
//! notifications when patients join clinics, and a patient table mapper.
//!
//! ## Architecture
//!
//! - [`routing`] - requests, the dispatcher, fronts and the debug wrapper
//! - [`views`] - page controllers and the render boundary
//! - [`core`] - the registry engine and the [`core::site::Site`] that owns it
//! - [`notification`] - observers, subjects and the email/sms notifiers
//! - [`adapters`] - storage connections and data mappers
//! - [`domain`] - entities, typed ids and errors
//! - [`config`] - TOML configuration with environment overrides
//! - [`logging`] - `tracing` setup and the keyed application loggers
//! - [`cli`] - command-line interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use polyclinic::config::load_default_config;
//! use polyclinic::core::site::Site;
//! use polyclinic::routing::Request;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_default_config()?;
//!     let site = Site::from_config(&config).await?;
//!
//!     site.handle(Request::post("/create-location/").with_data("name", "North")).await;
//!     let response = site.handle(Request::get("/locations-list/")).await;
//!     println!("{}\n{}", response.status, response.body);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error is
//! [`domain::PolyclinicError`]. The dispatcher turns handler errors into
//! `400`, `404` or `500` responses.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod notification;
pub mod routing;
pub mod views;
