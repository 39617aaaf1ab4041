//! Publisher bound to a single topic that fills in the default version.

use std::sync::Arc;

use postboard_domain::error::EventError;
use postboard_domain::event::{DEFAULT_VERSION, Event};

use super::topic::{Delivery, Topic};

/// Publishes on one [`Topic`], stamping [`DEFAULT_VERSION`] on envelopes
/// that carry no version.
#[derive(Debug, Clone)]
pub struct Producer {
    topic: Arc<Topic>,
}

impl Producer {
    /// Create a producer for `topic`.
    pub fn new(topic: Arc<Topic>) -> Self {
        Self { topic }
    }

    /// Publish `event`, defaulting an empty version first.
    ///
    /// # Errors
    ///
    /// Propagates [`Topic::publish`] failures, e.g. an empty `type`.
    pub fn publish(&self, mut event: Event) -> Result<Delivery, EventError> {
        if event.version.is_empty() {
            event.version = DEFAULT_VERSION.to_string();
        }
        self.topic.publish(event)
    }
}
