//! Shared application state for axum handlers.

use std::sync::Arc;

use postboard_app::ports::{EventPublisher, PostRepository, UserRepository};
use postboard_app::services::post_service::PostService;
use postboard_app::services::user_service::UserService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types and the event publisher to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying types
/// themselves do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<UR, PR, P> {
    /// User use-cases.
    pub user_service: Arc<UserService<UR, P>>,
    /// Post use-cases.
    pub post_service: Arc<PostService<PR, UR, P>>,
}

impl<UR, PR, P> Clone for AppState<UR, PR, P> {
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            post_service: Arc::clone(&self.post_service),
        }
    }
}

impl<UR, PR, P> AppState<UR, PR, P>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(user_service: UserService<UR, P>, post_service: PostService<PR, UR, P>) -> Self {
        Self {
            user_service: Arc::new(user_service),
            post_service: Arc::new(post_service),
        }
    }
}
