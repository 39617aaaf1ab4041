//! Event: the envelope broadcast on a topic whenever a user or post changes.
//!
//! The payload carries a copy of the entity state at publish time, never a
//! live reference to stored data.

use serde::{Deserialize, Serialize};

use crate::error::EventError;
use crate::post::Post;
use crate::user::User;

/// Version stamped on envelopes that do not carry one.
pub const DEFAULT_VERSION: &str = "v0.0.1";

/// Fixed topic vocabulary.
pub mod topics {
    pub const POST_CREATED: &str = "POST_CREATED";
    pub const POST_UPDATED: &str = "POST_UPDATED";
    pub const POST_DELETED: &str = "POST_DELETED";

    pub const USER_CREATED: &str = "USER_CREATED";
    pub const USER_UPDATED: &str = "USER_UPDATED";
    pub const USER_DELETED: &str = "USER_DELETED";

    /// Every topic the application registers at startup.
    pub const ALL: [&str; 6] = [
        POST_CREATED,
        POST_UPDATED,
        POST_DELETED,
        USER_CREATED,
        USER_UPDATED,
        USER_DELETED,
    ];
}

/// What an event is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Post(Post),
    User(User),
    /// Bare identifier, e.g. the id of a deleted post.
    Id(String),
    /// Anything else; only reachable through raw JSON envelopes.
    Raw(serde_json::Value),
}

impl From<Post> for Payload {
    fn from(post: Post) -> Self {
        Self::Post(post)
    }
}

impl From<User> for Payload {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

/// Versioned event envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub version: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: Payload,
}

impl Event {
    /// Build an envelope stamped with [`DEFAULT_VERSION`].
    #[must_use]
    pub fn new(event_type: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self::with_version(DEFAULT_VERSION, event_type, payload)
    }

    /// Build an envelope with an explicit version.
    #[must_use]
    pub fn with_version(
        version: impl Into<String>,
        event_type: impl Into<String>,
        payload: impl Into<Payload>,
    ) -> Self {
        Self {
            version: version.into(),
            event_type: event_type.into(),
            payload: payload.into(),
        }
    }

    /// Shape check applied before any delivery: `version` and `type` must be
    /// non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.version.is_empty() && !self.event_type.is_empty()
    }

    /// Like [`Event::is_valid`], as a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventStructure`] when the shape check fails.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(EventError::InvalidEventStructure)
        }
    }
}

impl TryFrom<serde_json::Value> for Event {
    type Error = EventError;

    /// Convert an untyped envelope. `version` and `type` must be present and
    /// be strings; a missing payload becomes `null`.
    fn try_from(mut value: serde_json::Value) -> Result<Self, Self::Error> {
        let object = value
            .as_object_mut()
            .ok_or(EventError::InvalidEventStructure)?;

        let mut take_string = |key: &str| match object.remove(key) {
            Some(serde_json::Value::String(s)) => Ok(s),
            _ => Err(EventError::InvalidEventStructure),
        };
        let version = take_string("version")?;
        let event_type = take_string("type")?;

        let payload = match object.remove("payload") {
            Some(raw) => serde_json::from_value(raw)
                .map_err(|_| EventError::InvalidEventStructure)?,
            None => Payload::Raw(serde_json::Value::Null),
        };

        Ok(Self {
            version,
            event_type,
            payload,
        })
    }
}
