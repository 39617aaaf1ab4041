//! JSON handlers for users.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use postboard_app::ports::{EventPublisher, PostRepository, UserRepository};
use postboard_domain::id::UserId;
use postboard_domain::page::{Page, PageRequest};
use postboard_domain::time::{Timestamp, now};
use postboard_domain::user::{NewUser, User, UserPatch};

use super::MessageBody;
use crate::error::ApiError;
use crate::state::AppState;

/// A user as served over HTTP, with its age derived at response time.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    pub age: i32,
}

impl UserResponse {
    fn at(user: User, instant: Timestamp) -> Self {
        let age = user.age_at(instant);
        Self { user, age }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::at(user, now())
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Page<UserResponse>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<UserResponse>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<UserResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(MessageBody {
                message: "User successfully deleted",
            })
            .into_response(),
        }
    }
}

/// `GET /users?pageSize=..&currentPage=..`
pub async fn list<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Query(page) = query?;
    let Page { pages_left, result } = state.user_service.list_users(page).await?;
    let instant = now();
    Ok(ListResponse::Ok(Json(Page {
        pages_left,
        result: result
            .into_iter()
            .map(|user| UserResponse::at(user, instant))
            .collect(),
    })))
}

/// `POST /users`
pub async fn create<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Json(input) = body?;
    let user = state.user_service.create_user(input).await?;
    Ok(CreateResponse::Created(Json(user.into())))
}

/// `GET /users/{user_id}`
pub async fn get<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Path(user_id) = path?;
    let user = state.user_service.get_user(user_id).await?;
    Ok(GetResponse::Ok(Json(user.into())))
}

/// `PATCH /users/{user_id}`
pub async fn update<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    path: Result<Path<UserId>, PathRejection>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Path(user_id) = path?;
    let Json(patch) = body?;
    let user = state.user_service.update_user(user_id, patch).await?;
    Ok(GetResponse::Ok(Json(user.into())))
}

/// `DELETE /users/{user_id}`
pub async fn delete<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<DeleteResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Path(user_id) = path?;
    state.user_service.delete_user(user_id).await?;
    Ok(DeleteResponse::Deleted)
}
