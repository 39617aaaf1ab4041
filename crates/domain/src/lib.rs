//! # postboard-domain
//!
//! Pure domain model for the postboard backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** and **Posts** along with their partial-update patches
//! - Define the **Event** envelope broadcast on every mutation, and the fixed
//!   topic vocabulary
//! - Define **pagination** requests and the page arithmetic shared by all
//!   listing use-cases
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod page;
pub mod post;
pub mod user;
