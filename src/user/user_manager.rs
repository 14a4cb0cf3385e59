use super::auth::{CredentialHasher, PasswordCredentials};
use super::user_store::UserStore;
use crate::catalog_store::validate_non_empty;
use crate::error::{LibraryError, LibraryResult};
use std::sync::Arc;
use tracing::{info, warn};

fn duplicate_user(user_handle: &str) -> LibraryError {
    LibraryError::Conflict(format!(
        "User with username '{}' already exists",
        user_handle
    ))
}

pub struct UserManager {
    user_store: Arc<dyn UserStore>,
}

impl UserManager {
    pub fn new(user_store: Arc<dyn UserStore>) -> Self {
        Self { user_store }
    }

    pub fn create_account(&self, user_handle: &str, password: &str) -> LibraryResult<usize> {
        validate_non_empty("username", user_handle)?;
        validate_non_empty("password", password)?;

        if self.user_store.get_user_id(user_handle)?.is_some() {
            warn!("Attempted to create duplicate user {}", user_handle);
            return Err(duplicate_user(user_handle));
        }

        let hasher = CredentialHasher::Argon2;
        let salt = hasher.generate_b64_salt();
        let hash = hasher.hash(password.as_bytes(), &salt)?;
        let user_id = self
            .user_store
            .create_user_with_password(user_handle, &salt, &hash, &hasher)?
            .ok_or_else(|| {
                warn!("User {} was created concurrently", user_handle);
                duplicate_user(user_handle)
            })?;

        info!("Created user {} with id {}", user_handle, user_id);
        Ok(user_id)
    }

    /// Checks `password` against the stored credentials of `user_handle`.
    fn check_password(&self, user_handle: &str, password: &str) -> LibraryResult<PasswordCredentials> {
        let credentials = self
            .user_store
            .get_password_credentials(user_handle)?
            .ok_or(LibraryError::InvalidCredentials)?;

        let valid = credentials.verify(password)?;
        self.user_store
            .touch_password_credentials(credentials.user_id, valid)?;
        if !valid {
            warn!("Wrong password for user {}", user_handle);
            return Err(LibraryError::InvalidCredentials);
        }
        Ok(credentials)
    }

    pub fn login(&self, user_handle: &str, password: &str) -> LibraryResult<usize> {
        let credentials = self.check_password(user_handle, password)?;
        info!("User {} logged in", user_handle);
        Ok(credentials.user_id)
    }

    pub fn update_password(
        &self,
        user_handle: &str,
        old_password: &str,
        new_password: &str,
    ) -> LibraryResult<()> {
        validate_non_empty("new_password", new_password)?;
        let current = self.check_password(user_handle, old_password)?;

        let updated = PasswordCredentials::generate(current.user_id, new_password)?;
        self.user_store.update_password_credentials(&updated)?;
        info!("Password updated for user {}", user_handle);
        Ok(())
    }
}
