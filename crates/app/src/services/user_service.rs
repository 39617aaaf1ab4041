//! User service: use-cases for reading and changing users.

use postboard_domain::error::{NotFoundError, PostboardError};
use postboard_domain::event::topics;
use postboard_domain::id::UserId;
use postboard_domain::page::{Page, PageRequest};
use postboard_domain::user::{NewUser, User, UserPatch};

use super::{DeliveryMode, emit};
use crate::ports::{EventPublisher, UserRepository};

/// Application service for users.
///
/// Reads go straight to the repository; mutations are published as
/// `USER_*` events.
pub struct UserService<R, P> {
    repo: R,
    publisher: P,
    mode: DeliveryMode,
}

impl<R, P> UserService<R, P>
where
    R: UserRepository + Sync,
    P: EventPublisher + Sync,
{
    /// Create a new service reading from `repo` and publishing on `publisher`.
    pub fn new(repo: R, publisher: P) -> Self {
        Self {
            repo,
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

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, id: UserId) -> Result<User, PostboardError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List one page of users.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] for a zero page size or page,
    /// [`PostboardError::PageOutOfRange`] when `current_page` lies beyond the
    /// last page, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_users(&self, page: PageRequest) -> Result<Page<User>, PostboardError> {
        page.validate()?;
        let (result, total) = self.repo.find_page(page.offset(), page.limit()).await?;
        let pages_left = page.pages_left(total, "Users")?;
        Ok(Page { pages_left, result })
    }

    /// Register a new user and publish `USER_CREATED`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] if a name is empty, or an
    /// event error when publishing fails.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_user(&self, input: NewUser) -> Result<User, PostboardError> {
        let user = User::builder()
            .first_name(input.first_name)
            .last_name(input.last_name)
            .birthdate(input.birthdate)
            .build()?;

        emit(&self.publisher, self.mode, topics::USER_CREATED, user.clone()).await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    /// Apply `patch` to an existing user and publish `USER_UPDATED`.
    ///
    /// Fields missing from the patch keep their current value. The returned
    /// user is exactly the published payload.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Validation`] for an empty name,
    /// [`PostboardError::NotFound`] if the user does not exist, a storage
    /// error from the repository, or an event error when publishing fails.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, PostboardError> {
        patch.validate()?;
        let current = self.get_user(id).await?;
        let next = current.merged(patch);

        emit(&self.publisher, self.mode, topics::USER_UPDATED, next.clone()).await?;
        tracing::info!(user_id = %id, "user updated");
        Ok(next)
    }

    /// Publish `USER_DELETED` for an existing user and return its last state.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::NotFound`] if the user does not exist, a
    /// storage error from the repository, or an event error when publishing
    /// fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<User, PostboardError> {
        let user = self.get_user(id).await?;

        emit(&self.publisher, self.mode, topics::USER_DELETED, user.clone()).await?;
        tracing::info!(user_id = %id, "user deleted");
        Ok(user)
    }
}
