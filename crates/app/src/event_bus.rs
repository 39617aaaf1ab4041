//! In-process publish/subscribe.
//!
//! A [`Broker`] owns named [`Topic`]s. Each topic keeps an ordered list of
//! handlers and runs them in registration order on every valid publish.
//! Synchronous handlers run inline; asynchronous handlers are spawned and
//! their completion is tracked by the returned [`Delivery`], which the caller
//! may await or simply drop.
//!
//! Topics and subscriptions are registered at startup and never removed.

pub mod broker;
pub mod producer;
pub mod subscriber;
pub mod topic;

pub use broker::Broker;
pub use producer::Producer;
pub use subscriber::Subscriber;
pub use topic::{Delivery, Handler, Topic};
