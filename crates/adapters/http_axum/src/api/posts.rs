//! JSON handlers for posts.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use postboard_app::ports::{EventPublisher, PostRepository, UserRepository};
use postboard_domain::id::{PostId, UserId};
use postboard_domain::page::{Page, PageRequest};
use postboard_domain::post::{NewPost, Post, PostPatch};

use super::MessageBody;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for the search endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPostsRequest {
    pub title: String,
    pub page_size: u32,
    pub current_page: u32,
}

impl SearchPostsRequest {
    fn page(&self) -> PageRequest {
        PageRequest {
            page_size: self.page_size,
            current_page: self.current_page,
        }
    }
}

/// Possible responses from the per-user list endpoint.
pub enum ListResponse {
    Ok(Json<Page<Post>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the search endpoint.
pub enum SearchResponse {
    Ok(Json<Vec<Post>>),
}

impl IntoResponse for SearchResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Post>),
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
    Created(Json<Post>),
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
                message: "Post successfully deleted",
            })
            .into_response(),
        }
    }
}

/// `GET /users/{user_id}/posts?pageSize=..&currentPage=..`
pub async fn list_by_user<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    path: Result<Path<UserId>, PathRejection>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Path(user_id) = path?;
    let Query(page) = query?;
    let page = state.post_service.list_user_posts(user_id, page).await?;
    Ok(ListResponse::Ok(Json(page)))
}

/// `POST /posts/search`
pub async fn search<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    body: Result<Json<SearchPostsRequest>, JsonRejection>,
) -> Result<SearchResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Json(request) = body?;
    let posts = state
        .post_service
        .search_posts(&request.title, request.page())
        .await?;
    Ok(SearchResponse::Ok(Json(posts)))
}

/// `GET /posts/{post_id}`
pub async fn get<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    path: Result<Path<PostId>, PathRejection>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Path(post_id) = path?;
    let post = state.post_service.get_post(post_id).await?;
    Ok(GetResponse::Ok(Json(post)))
}

/// `POST /posts`
pub async fn create<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    body: Result<Json<NewPost>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Json(input) = body?;
    let post = state.post_service.create_post(input).await?;
    Ok(CreateResponse::Created(Json(post)))
}

/// `PATCH /users/{user_id}/posts/{post_id}`
pub async fn update<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    path: Result<Path<(UserId, PostId)>, PathRejection>,
    body: Result<Json<PostPatch>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Path((user_id, post_id)) = path?;
    let Json(patch) = body?;
    let post = state
        .post_service
        .update_post(post_id, user_id, patch)
        .await?;
    Ok(GetResponse::Ok(Json(post)))
}

/// `DELETE /users/{user_id}/posts/{post_id}`
pub async fn delete<UR, PR, P>(
    State(state): State<AppState<UR, PR, P>>,
    path: Result<Path<(UserId, PostId)>, PathRejection>,
) -> Result<DeleteResponse, ApiError>
where
    UR: UserRepository + Send + Sync + 'static,
    PR: PostRepository + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let Path((user_id, post_id)) = path?;
    state.post_service.delete_post(post_id, user_id).await?;
    Ok(DeleteResponse::Deleted)
}
