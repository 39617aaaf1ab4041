//! # postboard-app
//!
//! Application layer with the use-cases, **port definitions** (traits) and the
//! in-process event broker.
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository`: CRUD and paging for users
//!   - `PostRepository`: CRUD, paging and title search for posts
//!   - `EventPublisher`: topic-addressed event publication
//! - Provide the **event broker** (topics, subscribers, producers) that
//!   decouples request handling from side effects such as persistence
//! - Define **driving/inbound ports** as use-case structs:
//!   - `UserService`: get, list, create, update, delete
//!   - `PostService`: get, list by author, search, create, update, delete
//! - Wire the persistence **subscribers** that turn events into writes
//!
//! ## Dependency rule
//! Depends on `postboard-domain` only (plus `tokio` for task spawning and
//! timers). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
pub mod subscribers;

#[cfg(test)]
pub(crate) mod testing;
