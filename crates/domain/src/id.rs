//! Identifiers of users and posts.
//!
//! Both are random v4 UUIDs. They travel as plain strings in JSON bodies,
//! URL paths, event payloads and `TEXT` columns, so parsing is the one place
//! a malformed value is turned into a [`ValidationError`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! uuid_newtype {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Draw a fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| ValidationError::InvalidId(s.to_string()))
            }
        }
    };
}

uuid_newtype!(
    /// Identifies a [`User`](crate::user::User).
    UserId
);

uuid_newtype!(
    /// Identifies a [`Post`](crate::post::Post).
    PostId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_give_each_new_post_its_own_id() {
        assert_ne!(PostId::new(), PostId::new());
    }

    #[test]
    fn should_read_back_the_id_it_printed() {
        let id = UserId::new();
        assert_eq!(id.to_string().parse::<UserId>(), Ok(id));
    }

    #[test]
    fn should_accept_uppercase_uuid_and_print_it_lowercase() {
        let id: PostId = "3B2BC752-66C2-4FD6-AFD8-16125EA21CC9".parse().unwrap();
        assert_eq!(id.to_string(), "3b2bc752-66c2-4fd6-afd8-16125ea21cc9");
    }

    #[test]
    fn should_appear_as_bare_string_inside_json_body() {
        let id = UserId::new();
        let body = serde_json::json!({ "userId": id });
        assert_eq!(body["userId"], id.to_string());
    }

    #[test]
    fn should_name_the_offending_value_when_rejecting_input() {
        assert_eq!(
            "42".parse::<PostId>(),
            Err(ValidationError::InvalidId("42".to_string()))
        );
        assert!("".parse::<UserId>().is_err());
    }
}
