//! Post: a titled text body written by a [`User`](crate::user::User).

use serde::{Deserialize, Serialize};

use crate::error::{PostboardError, ValidationError};
use crate::id::{PostId, UserId};
use crate::time::Timestamp;

/// A post authored by a user. `(user_id, title)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    /// Create a brand-new post with a fresh id and identical creation and
    /// update timestamps.
    #[must_use]
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        body: impl Into<String>,
        at: Timestamp,
    ) -> Self {
        Self {
            id: PostId::new(),
            user_id,
            title: title.into(),
            body: body.into(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] when `title` is empty.
    pub fn validate(&self) -> Result<(), PostboardError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyField { field: "title" }.into());
        }
        Ok(())
    }

    /// Return a copy with the fields of `patch` applied over the current ones
    /// and `updated_at` moved to `at`.
    #[must_use]
    pub fn merged(&self, patch: PostPatch, at: Timestamp) -> Self {
        Self {
            id: self.id,
            user_id: self.user_id,
            title: patch.title.unwrap_or_else(|| self.title.clone()),
            body: patch.body.unwrap_or_else(|| self.body.clone()),
            created_at: self.created_at,
            updated_at: at,
        }
    }
}

/// Fields a caller supplies to write a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPost {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// Partial update of a [`Post`]. `None` means "keep the existing value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_create_post_with_equal_timestamps() {
        let post = Post::new(UserId::new(), "T", "B", now());
        assert_eq!(post.created_at, post.updated_at);
        assert!(post.validate().is_ok());
    }

    #[test]
    fn should_reject_empty_title() {
        let post = Post::new(UserId::new(), "", "B", now());
        assert!(matches!(
            post.validate(),
            Err(PostboardError::Validation(ValidationError::EmptyField {
                field: "title"
            }))
        ));
    }

    #[test]
    fn should_apply_only_provided_fields() {
        let post = Post::new(UserId::new(), "T", "B", now());
        let later = post.created_at + chrono::Duration::seconds(5);
        let merged = post.merged(
            PostPatch {
                body: Some("new body".to_string()),
                ..PostPatch::default()
            },
            later,
        );

        assert_eq!(merged.title, "T");
        assert_eq!(merged.body, "new body");
        assert_eq!(merged.created_at, post.created_at);
        assert_eq!(merged.updated_at, later);
    }

    #[test]
    fn should_serialize_author_as_user_id() {
        let post = Post::new(UserId::new(), "T", "B", now());
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], post.user_id.to_string());
        assert!(json.get("created_at").is_some());
    }
}
