//! Post service: reading, searching and changing posts.

use postboard_domain::error::{AlreadyExistsError, NotFoundError, PostboardError};
use postboard_domain::event::{Payload, topics};
use postboard_domain::id::{PostId, UserId};
use postboard_domain::page::{Page, PageRequest};
use postboard_domain::post::{NewPost, Post, PostPatch};
use postboard_domain::time::now;

use super::{DeliveryMode, emit};
use crate::ports::{EventPublisher, PostRepository, UserRepository};

/// Application service for posts.
///
/// Needs the user repository to check that authors exist.
pub struct PostService<PR, UR, P> {
    posts: PR,
    users: UR,
    publisher: P,
    mode: DeliveryMode,
}

impl<PR, UR, P> PostService<PR, UR, P>
where
    PR: PostRepository + Sync,
    UR: UserRepository + Sync,
    P: EventPublisher + Sync,
{
    pub fn new(posts: PR, users: UR, publisher: P) -> Self {
        Self {
            posts,
            users,
            publisher,
            mode: DeliveryMode::default(),
        }
    }

    /// Choose whether mutations wait for their subscribers.
    #[must_use]
    pub fn with_delivery_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Look up a post by id.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::NotFound`] when no post with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_post(&self, id: PostId) -> Result<Post, PostboardError> {
        self.posts.get_by_id(id).await?.ok_or_else(|| {
            PostboardError::from(NotFoundError {
                entity: "Post",
                id: id.to_string(),
            })
        })
    }

    /// List one page of the posts written by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] for a zero page size or page,
    /// [`PostboardError::NotFound`] when the user does not exist,
    /// [`PostboardError::PageOutOfRange`] past the last page, or a storage
    /// error from a repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_user_posts(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<Post>, PostboardError> {
        page.validate()?;
        self.require_user(user_id).await?;

        let (result, total) = self
            .posts
            .find_page_by_user(user_id, page.offset(), page.limit())
            .await?;
        let pages_left = page.pages_left(total, "Posts")?;
        Ok(Page { pages_left, result })
    }

    /// Return one page of posts whose title contains `title`.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] for a zero page size or page, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn search_posts(
        &self,
        title: &str,
        page: PageRequest,
    ) -> Result<Vec<Post>, PostboardError> {
        page.validate()?;
        self.posts
            .search_by_title(title, page.offset(), page.limit())
            .await
    }

    /// Write a new post and publish `POST_CREATED`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::AlreadyExists`] when the author already has a
    /// post with this title, [`PostboardError::NotFound`] when the author does
    /// not exist, [`PostboardError::Validation`] for an empty title, a storage
    /// error from a repository, or an event error when publishing fails.
    #[tracing::instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn create_post(&self, input: NewPost) -> Result<Post, PostboardError> {
        self.require_free_title(input.user_id, &input.title).await?;
        self.require_user(input.user_id).await?;

        let post = Post::new(input.user_id, input.title, input.body, now());
        post.validate()?;

        emit(&self.publisher, self.mode, topics::POST_CREATED, post.clone()).await?;
        tracing::info!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// Apply `patch` to a post owned by `user_id` and publish `POST_UPDATED`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::NotFound`] when `user_id` owns no post with
    /// `post_id`, [`PostboardError::AlreadyExists`] when the new title is
    /// taken by another post of the same author,
    /// [`PostboardError::Validation`] when the title would become empty, a
    /// storage error from the repository, or an event error when
    /// publishing fails.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_post(
        &self,
        post_id: PostId,
        user_id: UserId,
        patch: PostPatch,
    ) -> Result<Post, PostboardError> {
        let current = self.owned_post(post_id, user_id).await?;
        let next = current.merged(patch, now());
        next.validate()?;
        if next.title != current.title {
            self.require_free_title(user_id, &next.title).await?;
        }

        emit(&self.publisher, self.mode, topics::POST_UPDATED, next.clone()).await?;
        tracing::info!(%post_id, "post updated");
        Ok(next)
    }

    /// Publish `POST_DELETED` for a post owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::NotFound`] when `user_id` owns no post with
    /// `post_id`, a storage error from the repository, or an event error when
    /// publishing fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_post(&self, post_id: PostId, user_id: UserId) -> Result<(), PostboardError> {
        self.owned_post(post_id, user_id).await?;

        emit(
            &self.publisher,
            self.mode,
            topics::POST_DELETED,
            Payload::Id(post_id.to_string()),
        )
        .await?;
        tracing::info!(%post_id, "post deleted");
        Ok(())
    }

    async fn require_free_title(&self, user_id: UserId, title: &str) -> Result<(), PostboardError> {
        match self.posts.find_by_user_and_title(user_id, title).await? {
            Some(_) => Err(AlreadyExistsError {
                entity: "Post",
                key: title.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    async fn require_user(&self, user_id: UserId) -> Result<(), PostboardError> {
        match self.users.get_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError {
                entity: "User",
                id: user_id.to_string(),
            }
            .into()),
        }
    }

    async fn owned_post(&self, post_id: PostId, user_id: UserId) -> Result<Post, PostboardError> {
        self.posts
            .find_by_id_and_user(post_id, user_id)
            .await?
            .ok_or_else(|| {
                PostboardError::from(NotFoundError {
                    entity: "Post",
                    id: post_id.to_string(),
                })
            })
    }
}
