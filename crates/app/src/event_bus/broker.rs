//! Registry of named topics; the single entry point for publish and subscribe.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::runtime::Handle;

use postboard_domain::error::{EventError, PostboardError};
use postboard_domain::event::Event;

use super::subscriber::Subscriber;
use super::topic::{Delivery, Handler, Topic};
use crate::ports::EventPublisher;

/// Owns every [`Topic`] of the process.
///
/// One broker is built at startup and shared by reference with services and
/// subscriber registration. Topics must exist before anything subscribes.
#[derive(Debug, Default)]
pub struct Broker {
    topics: RwLock<HashMap<String, Arc<Topic>>>,
}

impl Broker {
    /// Create a broker with no topics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the topic registered under `name`, creating it first when
    /// missing. Calling this again with the same name returns the same topic.
    pub fn create_topic(&self, name: &str) -> Arc<Topic> {
        let mut topics = self.topics.write().unwrap_or_else(PoisonError::into_inner);
        let topic = topics.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(topic = name, "topic created");
            Arc::new(Topic::new(name))
        });
        Arc::clone(topic)
    }

    /// Look up a topic by name.
    #[must_use]
    pub fn topic(&self, name: &str) -> Option<Arc<Topic>> {
        self.topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Names of all registered topics, sorted.
    #[must_use]
    pub fn topic_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .topics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Publish `event` on the topic called `name`.
    ///
    /// An unknown topic is not an error: a warning is logged and nothing is
    /// delivered.
    ///
    /// # Errors
    ///
    /// Propagates [`Topic::publish`] failures for a known topic.
    pub fn publish(&self, name: &str, event: Event) -> Result<Delivery, EventError> {
        match self.topic(name) {
            Some(topic) => topic.publish(event),
            None => {
                tracing::warn!(topic = name, "topic does not exist, event dropped");
                Ok(Delivery::empty(name))
            }
        }
    }

    /// Publish `event` after `delay`.
    ///
    /// A zero delay publishes synchronously, exactly like [`Broker::publish`].
    /// Otherwise a timer task is spawned and an empty delivery is returned
    /// at once; the deferred publish cannot be cancelled and its outcome,
    /// including a failed shape check, is only logged.
    ///
    /// # Errors
    ///
    /// With a zero delay, see [`Broker::publish`]. With a non-zero delay,
    /// returns [`EventError::RuntimeUnavailable`] when called outside a tokio
    /// runtime.
    pub fn publish_after(
        &self,
        name: &str,
        event: Event,
        delay: Duration,
    ) -> Result<Delivery, EventError> {
        if delay.is_zero() {
            return self.publish(name, event);
        }
        let Some(topic) = self.topic(name) else {
            tracing::warn!(topic = name, "topic does not exist, delayed event dropped");
            return Ok(Delivery::empty(name));
        };
        let runtime = Handle::try_current().map_err(|_| EventError::RuntimeUnavailable {
            topic: name.to_string(),
        })?;

        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = topic.publish(event) {
                tracing::warn!(%err, topic = topic.name(), "delayed publish failed");
            }
        });
        Ok(Delivery::empty(name))
    }

    /// Bind a synchronous handler to the topic called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::TopicNotFound`] when no such topic exists.
    pub fn subscribe<F>(&self, name: &str, handler: F) -> Result<Subscriber, EventError>
    where
        F: Fn(Event) + Send + Sync + 'static,
    {
        self.bind(name, Handler::sync(handler))
    }

    /// Bind an asynchronous handler to the topic called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::TopicNotFound`] when no such topic exists.
    pub fn subscribe_async<F, Fut>(&self, name: &str, handler: F) -> Result<Subscriber, EventError>
    where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), PostboardError>> + Send + 'static,
    {
        self.bind(name, Handler::future(handler))
    }

    fn bind(&self, name: &str, handler: Handler) -> Result<Subscriber, EventError> {
        let topic = self
            .topic(name)
            .ok_or_else(|| EventError::TopicNotFound(name.to_string()))?;
        Ok(Subscriber::new(topic, handler))
    }
}

impl EventPublisher for Broker {
    fn publish(&self, topic: &str, event: Event) -> Result<Delivery, EventError> {
        Broker::publish(self, topic, event)
    }
}
