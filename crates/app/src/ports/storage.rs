//! Storage port: repository traits for persistence.

use std::future::Future;
use std::sync::Arc;

use postboard_domain::error::PostboardError;
use postboard_domain::id::{PostId, UserId};
use postboard_domain::post::Post;
use postboard_domain::user::User;

/// Repository for persisting and querying [`User`]s.
pub trait UserRepository {
    /// Persist a new user.
    fn create(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send;

    /// Get a user by its unique identifier.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PostboardError>> + Send;

    /// Return up to `limit` users after skipping `offset`, together with the
    /// total number of users.
    fn find_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<User>, u64), PostboardError>> + Send;

    /// Overwrite an existing user.
    fn update(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send;

    /// Delete a user by id. Deleting a missing user is not an error.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), PostboardError>> + Send;
}

/// Repository for persisting and querying [`Post`]s.
pub trait PostRepository {
    /// Persist a new post.
    fn create(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send;

    /// Get a post by its unique identifier.
    fn get_by_id(
        &self,
        id: PostId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send;

    /// Find the post `user_id` wrote under exactly this `title`.
    fn find_by_user_and_title(
        &self,
        user_id: UserId,
        title: &str,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send;

    /// Find a post by id, only if it belongs to `user_id`.
    fn find_by_id_and_user(
        &self,
        id: PostId,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send;

    /// Page through the posts of one author, with their total count.
    fn find_page_by_user(
        &self,
        user_id: UserId,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<Post>, u64), PostboardError>> + Send;

    /// Page through posts whose title contains `title`.
    fn search_by_title(
        &self,
        title: &str,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Post>, PostboardError>> + Send;

    /// Overwrite an existing post.
    fn update(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send;

    /// Delete a post by id. Deleting a missing post is not an error.
    fn delete(&self, id: PostId) -> impl Future<Output = Result<(), PostboardError>> + Send;

    /// Delete every post of one author, returning how many were removed.
    fn delete_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<u64, PostboardError>> + Send;
}

impl<T: UserRepository + Send + Sync> UserRepository for Arc<T> {
    fn create(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send {
        (**self).create(user)
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, PostboardError>> + Send {
        (**self).get_by_id(id)
    }

    fn find_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<User>, u64), PostboardError>> + Send {
        (**self).find_page(offset, limit)
    }

    fn update(&self, user: User) -> impl Future<Output = Result<User, PostboardError>> + Send {
        (**self).update(user)
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), PostboardError>> + Send {
        (**self).delete(id)
    }
}

impl<T: PostRepository + Send + Sync> PostRepository for Arc<T> {
    fn create(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send {
        (**self).create(post)
    }

    fn get_by_id(
        &self,
        id: PostId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        (**self).get_by_id(id)
    }

    fn find_by_user_and_title(
        &self,
        user_id: UserId,
        title: &str,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        (**self).find_by_user_and_title(user_id, title)
    }

    fn find_by_id_and_user(
        &self,
        id: PostId,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        (**self).find_by_id_and_user(id, user_id)
    }

    fn find_page_by_user(
        &self,
        user_id: UserId,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<Post>, u64), PostboardError>> + Send {
        (**self).find_page_by_user(user_id, offset, limit)
    }

    fn search_by_title(
        &self,
        title: &str,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Post>, PostboardError>> + Send {
        (**self).search_by_title(title, offset, limit)
    }

    fn update(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send {
        (**self).update(post)
    }

    fn delete(&self, id: PostId) -> impl Future<Output = Result<(), PostboardError>> + Send {
        (**self).delete(id)
    }

    fn delete_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<u64, PostboardError>> + Send {
        (**self).delete_by_user(user_id)
    }
}
