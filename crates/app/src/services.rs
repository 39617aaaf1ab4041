//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.
//!
//! Mutations never write to a repository directly: they check preconditions,
//! compute the next state and publish it. Persistence is done by the
//! subscribers wired in [`crate::subscribers`].

pub mod post_service;
pub mod user_service;

use postboard_domain::error::PostboardError;
use postboard_domain::event::{Event, Payload};

use crate::event_bus::Delivery;
use crate::ports::EventPublisher;

/// How long a mutating use-case waits on the subscribers of its event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Return as soon as the event is dispatched. Asynchronous subscriber
    /// work, such as persistence, may still be running.
    #[default]
    Detached,
    /// Wait until every subscriber finished and report the first failure.
    Settled,
}

impl DeliveryMode {
    async fn finish(self, delivery: Delivery) -> Result<(), PostboardError> {
        match self {
            Self::Detached => Ok(()),
            Self::Settled => delivery.settle().await.map_err(PostboardError::from),
        }
    }
}

/// Publish `payload` on `topic` using the default envelope version.
async fn emit<P: EventPublisher>(
    publisher: &P,
    mode: DeliveryMode,
    topic: &str,
    payload: impl Into<Payload>,
) -> Result<(), PostboardError> {
    let delivery = publisher.publish(topic, Event::new(topic, payload))?;
    mode.finish(delivery).await
}
