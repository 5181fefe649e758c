//! User operations.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{HbnbFacade, email_taken, map_repository_error, user_not_found, validation_error};
use crate::domain::ports::{
    AmenityRepository, CreateUserRequest, PlaceRepository, ReviewRepository, UpdateUserRequest,
    UserRepository, UsersService,
};
use crate::domain::{Email, Error, HashedPassword, Password, User, UserId};

impl<U, P, A, R> HbnbFacade<U, P, A, R>
where
    U: UserRepository,
{
    pub(super) async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(user_not_found)
    }

    /// Reject `email` when a user other than `except` already holds it.
    async fn ensure_email_free(&self, email: &Email, except: Option<&UserId>) -> Result<(), Error> {
        let holder = self
            .users
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?;
        match holder {
            Some(existing) if Some(existing.id()) != except => Err(email_taken()),
            _ => Ok(()),
        }
    }
}

fn check_password(raw: Option<String>) -> Result<Option<Password>, Error> {
    raw.map(Password::new)
        .transpose()
        .map_err(|err| validation_error(&err))
}

fn hash_password(password: &Password) -> Result<HashedPassword, Error> {
    HashedPassword::hash(password).map_err(|err| Error::internal(err.to_string()))
}

#[async_trait]
impl<U, P, A, R> UsersService for HbnbFacade<U, P, A, R>
where
    U: UserRepository,
    P: PlaceRepository,
    A: AmenityRepository,
    R: ReviewRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, Error> {
        let CreateUserRequest { draft, password } = request;
        let now = self.now();
        let mut user = User::create(draft, now).map_err(|err| validation_error(&err))?;
        let password = check_password(password)?;
        self.ensure_email_free(user.email(), None).await?;
        if let Some(password) = password {
            user.set_password(hash_password(&password)?, now);
        }

        self.users
            .create(&user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_repository_error)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, Error> {
        self.require_user(id).await
    }

    async fn update_user(&self, id: &UserId, request: UpdateUserRequest) -> Result<User, Error> {
        let UpdateUserRequest { changes, password } = request;
        let mut user = self.require_user(id).await?;
        let now = self.now();
        user.apply(changes, now)
            .map_err(|err| validation_error(&err))?;
        let password = check_password(password)?;
        self.ensure_email_free(user.email(), Some(id)).await?;
        if let Some(password) = password {
            user.set_password(hash_password(&password)?, now);
        }

        let updated = self
            .users
            .update(&user)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(user_not_found());
        }
        debug!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(user_not_found());
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}
