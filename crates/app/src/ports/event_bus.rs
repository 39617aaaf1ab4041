//! Event bus port: topic-addressed publication of domain events.

use postboard_domain::error::EventError;
use postboard_domain::event::Event;

use crate::event_bus::Delivery;

/// Publishes domain events on named topics.
pub trait EventPublisher {
    /// Publish `event` on `topic`, returning the work it started.
    ///
    /// # Errors
    ///
    /// Returns an [`EventError`] when the event is rejected before delivery.
    fn publish(&self, topic: &str, event: Event) -> Result<Delivery, EventError>;
}

impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, topic: &str, event: Event) -> Result<Delivery, EventError> {
        (**self).publish(topic, event)
    }
}
