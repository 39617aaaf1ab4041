//! `SQLite` implementation of [`PostRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use postboard_app::ports::PostRepository;
use postboard_domain::error::PostboardError;
use postboard_domain::id::{PostId, UserId};
use postboard_domain::post::Post;

use crate::columns::{bound, count, parse_id, parse_timestamp, timestamp};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Post`].
struct Wrapper(Post);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Post> {
        value.map(|w| w.0)
    }

    fn many(values: Vec<Self>) -> Vec<Post> {
        values.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let title: String = row.try_get("title")?;
        let body: String = row.try_get("body")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        Ok(Self(Post {
            id: parse_id(&id)?,
            user_id: parse_id(&user_id)?,
            title,
            body,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO posts (id, user_id, title, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM posts WHERE id = ?";
const SELECT_BY_USER_AND_TITLE: &str = "SELECT * FROM posts WHERE user_id = ? AND title = ?";
const SELECT_BY_ID_AND_USER: &str = "SELECT * FROM posts WHERE id = ? AND user_id = ?";
const SELECT_PAGE_BY_USER: &str =
    "SELECT * FROM posts WHERE user_id = ? ORDER BY created_at, id LIMIT ? OFFSET ?";
const COUNT_BY_USER: &str = "SELECT COUNT(*) FROM posts WHERE user_id = ?";
// instr keeps the match case-sensitive and needs no wildcard escaping.
const SEARCH_BY_TITLE: &str =
    "SELECT * FROM posts WHERE instr(title, ?) > 0 ORDER BY created_at, id LIMIT ? OFFSET ?";
const UPDATE: &str = "UPDATE posts SET title = ?, body = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM posts WHERE id = ?";
const DELETE_BY_USER: &str = "DELETE FROM posts WHERE user_id = ?";

/// `SQLite`-backed post repository.
#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PostRepository for SqlitePostRepository {
    fn create(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(post.id.to_string())
                .bind(post.user_id.to_string())
                .bind(&post.title)
                .bind(&post.body)
                .bind(timestamp(post.created_at))
                .bind(timestamp(post.updated_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(post)
        }
    }

    fn get_by_id(
        &self,
        id: PostId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_user_and_title(
        &self,
        user_id: UserId,
        title: &str,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        let pool = self.pool.clone();
        let title = title.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USER_AND_TITLE)
                .bind(user_id.to_string())
                .bind(title)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_id_and_user(
        &self,
        id: PostId,
        user_id: UserId,
    ) -> impl Future<Output = Result<Option<Post>, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID_AND_USER)
                .bind(id.to_string())
                .bind(user_id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_page_by_user(
        &self,
        user_id: UserId,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<Post>, u64), PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_PAGE_BY_USER)
                .bind(user_id.to_string())
                .bind(bound(limit))
                .bind(bound(offset))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;
            let total: i64 = sqlx::query_scalar(COUNT_BY_USER)
                .bind(user_id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((Wrapper::many(rows), count(total)))
        }
    }

    fn search_by_title(
        &self,
        title: &str,
        offset: u64,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<Post>, PostboardError>> + Send {
        let pool = self.pool.clone();
        let title = title.to_string();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SEARCH_BY_TITLE)
                .bind(title)
                .bind(bound(limit))
                .bind(bound(offset))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::many(rows))
        }
    }

    fn update(&self, post: Post) -> impl Future<Output = Result<Post, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&post.title)
                .bind(&post.body)
                .bind(timestamp(post.updated_at))
                .bind(post.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(post)
        }
    }

    fn delete(&self, id: PostId) -> impl Future<Output = Result<(), PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn delete_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<u64, PostboardError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_USER)
                .bind(user_id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected())
        }
    }
}
