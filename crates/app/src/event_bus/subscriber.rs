//! Binding between one handler and one topic.

use std::sync::Arc;

use super::topic::{Handler, Topic};

/// A handler bound to a [`Topic`].
///
/// Construction registers the handler; there is no way to detach it again.
#[derive(Debug)]
pub struct Subscriber {
    topic: Arc<Topic>,
}

impl Subscriber {
    /// Register `handler` on `topic` and return the binding.
    pub fn new(topic: Arc<Topic>, handler: Handler) -> Self {
        topic.subscribe(handler);
        Self { topic }
    }

    /// The topic this subscriber listens to.
    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_domain::event::{Event, Payload};
    use std::sync::Mutex;

    #[test]
    fn should_register_handler_on_construction() {
        let topic = Arc::new(Topic::new("X"));
        let calls = Arc::new(Mutex::new(0_u32));
        let counter = Arc::clone(&calls);

        let subscriber = Subscriber::new(
            Arc::clone(&topic),
            Handler::sync(move |_| *counter.lock().unwrap() += 1),
        );

        assert_eq!(subscriber.topic().name(), "X");
        assert_eq!(topic.subscriber_count(), 1);

        topic
            .publish(Event::new("X", Payload::Id("abc".into())))
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn should_keep_handler_registered_after_subscriber_dropped() {
        let topic = Arc::new(Topic::new("X"));
        drop(Subscriber::new(Arc::clone(&topic), Handler::sync(|_| {})));
        assert_eq!(topic.subscriber_count(), 1);
    }
}
