//! Topic registration and the subscribers that persist published changes.
//!
//! Services only publish. Every write to storage happens here, inside an
//! asynchronous handler bound to the matching topic.

use std::future::Future;
use std::sync::Arc;

use tracing::Instrument;

use postboard_domain::error::{EventError, PostboardError};
use postboard_domain::event::{Event, Payload, topics};
use postboard_domain::id::PostId;
use postboard_domain::post::Post;
use postboard_domain::user::User;

use crate::event_bus::{Broker, Subscriber};
use crate::ports::{PostRepository, UserRepository};

/// Create every topic of the fixed vocabulary on `broker`.
pub fn register_topics(broker: &Broker) {
    for name in topics::ALL {
        broker.create_topic(name);
    }
    tracing::debug!(count = topics::ALL.len(), "topics registered");
}

/// Bind one persistence handler to each topic.
///
/// # Errors
///
/// Returns [`EventError::TopicNotFound`] when [`register_topics`] has not run
/// first.
pub fn register_persistence<UR, PR>(
    broker: &Broker,
    users: Arc<UR>,
    posts: Arc<PR>,
) -> Result<(), EventError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
{
    persist(broker, topics::USER_CREATED, Arc::clone(&users), create_user::<UR>)?;
    persist(broker, topics::USER_UPDATED, Arc::clone(&users), update_user::<UR>)?;
    persist(
        broker,
        topics::USER_DELETED,
        (users, Arc::clone(&posts)),
        delete_user::<UR, PR>,
    )?;
    persist(broker, topics::POST_CREATED, Arc::clone(&posts), create_post::<PR>)?;
    persist(broker, topics::POST_UPDATED, Arc::clone(&posts), update_post::<PR>)?;
    persist(broker, topics::POST_DELETED, posts, delete_post::<PR>)?;

    tracing::info!("persistence subscribers registered");
    Ok(())
}

/// Subscribe `apply` to `topic`, handing it a clone of `ctx` and running it
/// inside a span that names the event.
fn persist<C, F, Fut>(
    broker: &Broker,
    topic: &str,
    ctx: C,
    apply: F,
) -> Result<Subscriber, EventError>
where
    C: Clone + Send + Sync + 'static,
    F: Fn(C, Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), PostboardError>> + Send + 'static,
{
    broker.subscribe_async(topic, move |event: Event| {
        let span = tracing::info_span!(
            "subscriber",
            "event.type" = %event.event_type,
            "event.version" = %event.version,
        );
        apply(ctx.clone(), event).instrument(span)
    })
}

fn unexpected(topic: String) -> PostboardError {
    EventError::UnexpectedPayload { topic }.into()
}

fn user_payload(event: Event) -> Result<User, PostboardError> {
    match event.payload {
        Payload::User(user) => Ok(user),
        _ => Err(unexpected(event.event_type)),
    }
}

fn post_payload(event: Event) -> Result<Post, PostboardError> {
    match event.payload {
        Payload::Post(post) => Ok(post),
        _ => Err(unexpected(event.event_type)),
    }
}

async fn create_user<UR: UserRepository>(users: Arc<UR>, event: Event) -> Result<(), PostboardError> {
    let user = users.create(user_payload(event)?).await?;
    tracing::info!(user_id = %user.id, "user stored");
    Ok(())
}

async fn update_user<UR: UserRepository>(users: Arc<UR>, event: Event) -> Result<(), PostboardError> {
    let user = users.update(user_payload(event)?).await?;
    tracing::info!(user_id = %user.id, "user updated in storage");
    Ok(())
}

async fn delete_user<UR, PR>(
    (users, posts): (Arc<UR>, Arc<PR>),
    event: Event,
) -> Result<(), PostboardError>
where
    UR: UserRepository,
    PR: PostRepository,
{
    let user = user_payload(event)?;
    let removed = posts.delete_by_user(user.id).await?;
    users.delete(user.id).await?;
    tracing::info!(user_id = %user.id, posts = removed, "user removed from storage");
    Ok(())
}

async fn create_post<PR: PostRepository>(posts: Arc<PR>, event: Event) -> Result<(), PostboardError> {
    let post = posts.create(post_payload(event)?).await?;
    tracing::info!(post_id = %post.id, "post stored");
    Ok(())
}

async fn update_post<PR: PostRepository>(posts: Arc<PR>, event: Event) -> Result<(), PostboardError> {
    let post = posts.update(post_payload(event)?).await?;
    tracing::info!(post_id = %post.id, "post updated in storage");
    Ok(())
}

async fn delete_post<PR: PostRepository>(posts: Arc<PR>, event: Event) -> Result<(), PostboardError> {
    let id = match &event.payload {
        Payload::Id(raw) => raw.parse::<PostId>()?,
        _ => return Err(unexpected(event.event_type)),
    };
    posts.delete(id).await?;
    tracing::info!(post_id = %id, "post removed from storage");
    Ok(())
}
