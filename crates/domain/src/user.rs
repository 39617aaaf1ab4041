//! User: an author of posts.

use serde::{Deserialize, Serialize};

use crate::error::{PostboardError, ValidationError};
use crate::id::UserId;
use crate::time::{Timestamp, whole_years_between};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub birthdate: Timestamp,
}

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] when a name is empty.
    pub fn validate(&self) -> Result<(), PostboardError> {
        if self.first_name.is_empty() {
            return Err(ValidationError::EmptyField { field: "firstName" }.into());
        }
        if self.last_name.is_empty() {
            return Err(ValidationError::EmptyField { field: "lastName" }.into());
        }
        Ok(())
    }

    /// Age in whole years at the given instant.
    #[must_use]
    pub fn age_at(&self, at: Timestamp) -> i32 {
        whole_years_between(self.birthdate, at)
    }

    /// Return a copy with every field supplied in `patch` replacing the
    /// current value; absent fields keep their existing value.
    #[must_use]
    pub fn merged(&self, patch: UserPatch) -> Self {
        Self {
            id: self.id,
            first_name: patch.first_name.unwrap_or_else(|| self.first_name.clone()),
            last_name: patch.last_name.unwrap_or_else(|| self.last_name.clone()),
            birthdate: patch.birthdate.unwrap_or(self.birthdate),
        }
    }
}

/// Fields a caller supplies to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub birthdate: Timestamp,
}

/// Partial update of a [`User`]. `None` means "keep the existing value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<Timestamp>,
}

impl UserPatch {
    /// Check that every supplied field is acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] when a supplied name is empty.
    pub fn validate(&self) -> Result<(), PostboardError> {
        if self.first_name.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::EmptyField { field: "firstName" }.into());
        }
        if self.last_name.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::EmptyField { field: "lastName" }.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    first_name: Option<String>,
    last_name: Option<String>,
    birthdate: Option<Timestamp>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn birthdate(mut self, birthdate: Timestamp) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// A missing birthdate defaults to the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] if a name is missing or empty.
    pub fn build(self) -> Result<User, PostboardError> {
        let user = User {
            id: self.id.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            birthdate: self.birthdate.unwrap_or_default(),
        };
        user.validate()?;
        Ok(user)
    }
}
