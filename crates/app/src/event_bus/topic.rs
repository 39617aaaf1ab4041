//! A named event stream with an ordered list of handlers.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use postboard_domain::error::{EventError, PostboardError};
use postboard_domain::event::Event;

/// Boxed future returned by asynchronous handlers.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<(), PostboardError>> + Send>>;

type SyncFn = dyn Fn(Event) + Send + Sync;
type AsyncFn = dyn Fn(Event) -> HandlerFuture + Send + Sync;

/// A callback invoked for every valid event published on a topic.
#[derive(Clone)]
pub enum Handler {
    /// Runs to completion inside `publish`.
    Sync(Arc<SyncFn>),
    /// Produces a future that is spawned by `publish` and not awaited.
    Async(Arc<AsyncFn>),
}

impl Handler {
    /// Wrap a synchronous callback.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(Event) + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Wrap a callback returning a future.
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), PostboardError>> + Send + 'static,
    {
        Self::Async(Arc::new(move |event| Box::pin(f(event)) as HandlerFuture))
    }

    fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Handler::Sync"),
            Self::Async(_) => f.write_str("Handler::Async"),
        }
    }
}

/// Outstanding asynchronous work started by one publish.
///
/// Dropping a `Delivery` detaches the work: it keeps running and failures are
/// only logged. [`Delivery::settle`] waits for all of it instead.
#[derive(Debug)]
pub struct Delivery {
    topic: String,
    pending: Vec<JoinHandle<Result<(), EventError>>>,
}

impl Delivery {
    /// A delivery with nothing outstanding.
    pub fn empty(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            pending: Vec::new(),
        }
    }

    /// Name of the topic this delivery belongs to.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Number of asynchronous handlers started by the publish.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Wait for every asynchronous handler to finish.
    ///
    /// All handlers are awaited even when one of them fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`EventError::Handler`] produced, in registration
    /// order, by a handler that failed or panicked.
    pub async fn settle(self) -> Result<(), EventError> {
        let mut first_error = None;
        for handle in self.pending {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(err) => Err(EventError::Handler {
                    topic: self.topic.clone(),
                    message: err.to_string(),
                }),
            };
            if let Err(err) = outcome {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Named stream of events delivered to subscribers in registration order.
pub struct Topic {
    name: String,
    handlers: RwLock<Vec<Handler>>,
}

impl Topic {
    /// Create an empty topic.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registered handlers, duplicates included.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Append a handler. The same handler may be added several times and is
    /// then invoked once per registration.
    pub fn subscribe(&self, handler: Handler) {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    /// Validate `event` and hand a copy of it to every handler, in order.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventStructure`] when the envelope fails
    /// the shape check, and [`EventError::RuntimeUnavailable`] when an
    /// asynchronous handler is registered but no tokio runtime is running.
    /// In both cases no handler is invoked.
    pub fn publish(&self, event: Event) -> Result<Delivery, EventError> {
        event.validate()?;

        let handlers = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let runtime = if handlers.iter().any(Handler::is_async) {
            let handle = Handle::try_current().map_err(|_| EventError::RuntimeUnavailable {
                topic: self.name.clone(),
            })?;
            Some(handle)
        } else {
            None
        };

        let mut delivery = Delivery::empty(&self.name);
        for handler in handlers {
            match handler {
                Handler::Sync(callback) => callback(event.clone()),
                Handler::Async(callback) => {
                    let Some(runtime) = runtime.as_ref() else {
                        continue;
                    };
                    let work = callback(event.clone());
                    let topic = self.name.clone();
                    delivery.pending.push(runtime.spawn(async move {
                        work.await.map_err(|err| {
                            tracing::error!(%err, %topic, "subscriber failed");
                            EventError::Handler {
                                topic,
                                message: err.to_string(),
                            }
                        })
                    }));
                }
            }
        }

        tracing::trace!(
            topic = %self.name,
            spawned = delivery.pending(),
            "event dispatched"
        );
        Ok(delivery)
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_domain::error::NotFoundError;
    use postboard_domain::event::Payload;
    use std::sync::Mutex;

    fn event() -> Event {
        Event::new("TEST", Payload::Id("abc".to_string()))
    }

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> Handler {
        let log = Arc::clone(log);
        Handler::sync(move |_| log.lock().unwrap().push(label))
    }

    #[test]
    fn should_reject_event_with_empty_version_before_dispatch() {
        let topic = Topic::new("TEST");
        let calls = Arc::new(Mutex::new(Vec::new()));
        topic.subscribe(recorder(&calls, "spy"));

        let invalid = Event::with_version("", "TEST", Payload::Id("abc".into()));
        let result = topic.publish(invalid);

        assert!(matches!(result, Err(EventError::InvalidEventStructure)));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn should_reject_event_with_empty_type_before_dispatch() {
        let topic = Topic::new("TEST");
        let calls = Arc::new(Mutex::new(Vec::new()));
        topic.subscribe(recorder(&calls, "spy"));

        let invalid = Event::with_version("v1", "", Payload::Id("abc".into()));
        assert!(topic.publish(invalid).is_err());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn should_invoke_handlers_in_registration_order() {
        let topic = Topic::new("TEST");
        let calls = Arc::new(Mutex::new(Vec::new()));
        topic.subscribe(recorder(&calls, "h1"));
        topic.subscribe(recorder(&calls, "h2"));
        topic.subscribe(recorder(&calls, "h3"));

        topic.publish(event()).unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn should_invoke_duplicate_handler_once_per_registration() {
        let topic = Topic::new("TEST");
        let calls = Arc::new(Mutex::new(Vec::new()));
        let handler = recorder(&calls, "dup");
        topic.subscribe(handler.clone());
        topic.subscribe(handler);

        topic.publish(event()).unwrap();

        assert_eq!(topic.subscriber_count(), 2);
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn should_pass_event_by_value_to_each_handler() {
        let topic = Topic::new("TEST");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        topic.subscribe(Handler::sync(move |event| sink.lock().unwrap().push(event)));

        topic.publish(event()).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![event()]);
    }

    #[test]
    fn should_succeed_when_no_subscribers() {
        let topic = Topic::new("EMPTY");
        let delivery = topic.publish(event()).unwrap();
        assert_eq!(delivery.pending(), 0);
        assert_eq!(delivery.topic(), "EMPTY");
    }

    #[test]
    fn should_fail_without_runtime_when_async_handler_registered() {
        let topic = Topic::new("TEST");
        let calls = Arc::new(Mutex::new(Vec::new()));
        topic.subscribe(recorder(&calls, "sync"));
        topic.subscribe(Handler::future(|_| async { Ok::<(), PostboardError>(()) }));

        let result = topic.publish(event());

        assert!(matches!(
            result,
            Err(EventError::RuntimeUnavailable { ref topic }) if topic == "TEST"
        ));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_track_async_handlers_until_settled() {
        let topic = Topic::new("TEST");
        let done = Arc::new(Mutex::new(0_u32));
        for _ in 0..2 {
            let done = Arc::clone(&done);
            topic.subscribe(Handler::future(move |_| {
                let done = Arc::clone(&done);
                async move {
                    tokio::task::yield_now().await;
                    *done.lock().unwrap() += 1;
                    Ok(())
                }
            }));
        }

        let delivery = topic.publish(event()).unwrap();
        assert_eq!(delivery.pending(), 2);

        delivery.settle().await.unwrap();
        assert_eq!(*done.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn should_report_first_failure_when_settled() {
        let topic = Topic::new("TEST");
        topic.subscribe(Handler::future(|_| async {
            Err(PostboardError::from(NotFoundError {
                entity: "Post",
                id: "abc".to_string(),
            }))
        }));
        topic.subscribe(Handler::future(|_| async { Ok::<(), PostboardError>(()) }));

        let result = topic.publish(event()).unwrap().settle().await;

        assert!(matches!(
            result,
            Err(EventError::Handler { ref topic, ref message })
                if topic == "TEST" && message.contains("Post not found")
        ));
    }

    #[tokio::test]
    async fn should_keep_running_detached_work_when_delivery_dropped() {
        let topic = Topic::new("TEST");
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        topic.subscribe(Handler::future(move |event| {
            let tx = tx.clone();
            async move {
                tx.send(event.event_type).ok();
                Ok(())
            }
        }));

        drop(topic.publish(event()).unwrap());

        let received = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .unwrap();
        assert_eq!(received.as_deref(), Some("TEST"));
    }
}
