//! JSON API handler modules and the routes they serve.

#[allow(clippy::missing_errors_doc)]
pub mod posts;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{get, patch, post};
use serde::Serialize;

use postboard_app::ports::{EventPublisher, PostRepository, UserRepository};

use crate::state::AppState;

/// Body of responses that only carry a confirmation.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Build the users and posts routes.
pub fn routes<UR, PR, P>() -> Router<AppState<UR, PR, P>>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Users
        .route(
            "/users",
            get(users::list::<UR, PR, P>).post(users::create::<UR, PR, P>),
        )
        .route(
            "/users/{user_id}",
            get(users::get::<UR, PR, P>)
                .patch(users::update::<UR, PR, P>)
                .delete(users::delete::<UR, PR, P>),
        )
        .route(
            "/users/{user_id}/posts",
            get(posts::list_by_user::<UR, PR, P>),
        )
        .route(
            "/users/{user_id}/posts/{post_id}",
            patch(posts::update::<UR, PR, P>).delete(posts::delete::<UR, PR, P>),
        )
        // Posts
        .route("/posts", post(posts::create::<UR, PR, P>))
        .route("/posts/search", post(posts::search::<UR, PR, P>))
        .route("/posts/{post_id}", get(posts::get::<UR, PR, P>))
}
