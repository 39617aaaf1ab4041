//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use postboard_app::ports::{EventPublisher, PostRepository, UserRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<UR, PR, P>(state: AppState<UR, PR, P>) -> Router
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use postboard_app::event_bus::Broker;
    use postboard_app::services::post_service::PostService;
    use postboard_app::services::user_service::UserService;
    use postboard_domain::error::PostboardError;
    use postboard_domain::event::topics;
    use postboard_domain::id::{PostId, UserId};
    use postboard_domain::post::Post;
    use postboard_domain::time::now;
    use postboard_domain::user::User;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubUserRepo(Vec<User>);
    struct StubPostRepo(Vec<Post>);

    impl UserRepository for StubUserRepo {
        async fn create(&self, user: User) -> Result<User, PostboardError> {
            Ok(user)
        }
        async fn get_by_id(&self, id: UserId) -> Result<Option<User>, PostboardError> {
            Ok(self.0.iter().find(|user| user.id == id).cloned())
        }
        async fn find_page(
            &self,
            _offset: u64,
            _limit: u64,
        ) -> Result<(Vec<User>, u64), PostboardError> {
            Ok((self.0.clone(), self.0.len() as u64))
        }
        async fn update(&self, user: User) -> Result<User, PostboardError> {
            Ok(user)
        }
        async fn delete(&self, _id: UserId) -> Result<(), PostboardError> {
            Ok(())
        }
    }

    impl PostRepository for StubPostRepo {
        async fn create(&self, post: Post) -> Result<Post, PostboardError> {
            Ok(post)
        }
        async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, PostboardError> {
            Ok(self.0.iter().find(|post| post.id == id).cloned())
        }
        async fn find_by_user_and_title(
            &self,
            user_id: UserId,
            title: &str,
        ) -> Result<Option<Post>, PostboardError> {
            Ok(self
                .0
                .iter()
                .find(|post| post.user_id == user_id && post.title == title)
                .cloned())
        }
        async fn find_by_id_and_user(
            &self,
            id: PostId,
            user_id: UserId,
        ) -> Result<Option<Post>, PostboardError> {
            Ok(self
                .0
                .iter()
                .find(|post| post.id == id && post.user_id == user_id)
                .cloned())
        }
        async fn find_page_by_user(
            &self,
            _user_id: UserId,
            _offset: u64,
            _limit: u64,
        ) -> Result<(Vec<Post>, u64), PostboardError> {
            Ok((self.0.clone(), self.0.len() as u64))
        }
        async fn search_by_title(
            &self,
            _title: &str,
            _offset: u64,
            _limit: u64,
        ) -> Result<Vec<Post>, PostboardError> {
            Ok(vec![])
        }
        async fn update(&self, post: Post) -> Result<Post, PostboardError> {
            Ok(post)
        }
        async fn delete(&self, _id: PostId) -> Result<(), PostboardError> {
            Ok(())
        }
        async fn delete_by_user(&self, _user_id: UserId) -> Result<u64, PostboardError> {
            Ok(0)
        }
    }

    type State = AppState<Arc<StubUserRepo>, StubPostRepo, Arc<Broker>>;

    fn alice() -> User {
        User::builder()
            .first_name("Alice")
            .last_name("Liddell")
            .build()
            .unwrap()
    }

    fn test_state(users: Vec<User>, posts: Vec<Post>) -> State {
        let broker = Arc::new(Broker::new());
        for name in topics::ALL {
            broker.create_topic(name);
        }
        let users = Arc::new(StubUserRepo(users));
        AppState::new(
            UserService::new(Arc::clone(&users), Arc::clone(&broker)),
            PostService::new(StubPostRepo(posts), users, broker),
        )
    }

    async fn send(state: State, request: Request<Body>) -> (StatusCode, Value) {
        let response = build(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state(vec![], vec![]));

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_user_with_age() {
        let user = alice();
        let (status, body) = send(
            test_state(vec![user.clone()], vec![]),
            get_request(&format!("/users/{}", user.id)),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], user.id.to_string());
        assert!(body["age"].is_i64());
    }

    #[tokio::test]
    async fn should_return_not_found_with_message() {
        let (status, body) = send(
            test_state(vec![], vec![]),
            get_request(&format!("/users/{}", UserId::new())),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().starts_with("User not found"));
    }

    #[tokio::test]
    async fn should_reject_malformed_id() {
        let (status, body) =
            send(test_state(vec![], vec![]), get_request("/users/not-a-uuid")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid input processing request");
    }

    #[tokio::test]
    async fn should_reject_zero_page_size() {
        let (status, _) = send(
            test_state(vec![alice()], vec![]),
            get_request("/users?pageSize=0&currentPage=1"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_page_past_the_end() {
        let (status, body) = send(
            test_state(vec![alice()], vec![]),
            get_request("/users?pageSize=1&currentPage=3"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Users does not exist for current page 3");
    }

    #[tokio::test]
    async fn should_list_users_as_page() {
        let (status, body) = send(
            test_state(vec![alice()], vec![]),
            get_request("/users?pageSize=10&currentPage=1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pagesLeft"], 0);
        assert_eq!(body["result"][0]["firstName"], "Alice");
    }

    #[tokio::test]
    async fn should_create_user() {
        let (status, body) = send(
            test_state(vec![], vec![]),
            json_request(
                "POST",
                "/users",
                r#"{"firstName":"Bob","lastName":"Builder","birthdate":"1990-01-01T00:00:00Z"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["firstName"], "Bob");
    }

    #[tokio::test]
    async fn should_reject_unknown_fields_in_user_patch() {
        let user = alice();
        let (status, body) = send(
            test_state(vec![user.clone()], vec![]),
            json_request("PATCH", &format!("/users/{}", user.id), r#"{"age":3}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid input processing request");
    }

    #[tokio::test]
    async fn should_confirm_user_deletion() {
        let user = alice();
        let (status, body) = send(
            test_state(vec![user.clone()], vec![]),
            Request::builder()
                .method("DELETE")
                .uri(format!("/users/{}", user.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User successfully deleted");
    }

    #[tokio::test]
    async fn should_return_conflict_for_duplicate_post_title() {
        let user = alice();
        let existing = Post::new(user.id, "Taken", "body", now());
        let (status, _) = send(
            test_state(vec![user.clone()], vec![existing]),
            json_request(
                "POST",
                "/posts",
                &format!(r#"{{"userId":"{}","title":"Taken","body":"again"}}"#, user.id),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn should_search_posts() {
        let (status, body) = send(
            test_state(vec![], vec![]),
            json_request(
                "POST",
                "/posts/search",
                r#"{"title":"x","pageSize":10,"currentPage":1}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Array(vec![]));
    }

    #[tokio::test]
    async fn should_not_delete_post_of_another_user() {
        let owner = alice();
        let post = Post::new(owner.id, "Mine", "body", now());
        let (status, _) = send(
            test_state(vec![owner], vec![post.clone()]),
            Request::builder()
                .method("DELETE")
                .uri(format!("/users/{}/posts/{}", UserId::new(), post.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
