//! # postboard-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API for users (`/users`) and posts (`/posts`)
//! - Turn malformed bodies, queries and path ids into `400` responses
//! - Map application results and [`PostboardError`](postboard_domain::error::PostboardError)s
//!   into HTTP responses
//!
//! ## Dependency rule
//! Depends on `postboard-app` (for port traits and services) and `postboard-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
