use super::auth::{CredentialHasher, PasswordCredentials};
use anyhow::Result;

pub trait UserStore: Send + Sync {
    /// Creates a user together with its password credentials, returning the new
    /// user id, or `None` if `user_handle` is already taken.
    fn create_user_with_password(
        &self,
        user_handle: &str,
        salt: &str,
        hash: &str,
        hasher: &CredentialHasher,
    ) -> Result<Option<usize>>;

    fn get_user_id(&self, user_handle: &str) -> Result<Option<usize>>;

    fn get_password_credentials(&self, user_handle: &str) -> Result<Option<PasswordCredentials>>;

    fn update_password_credentials(&self, credentials: &PasswordCredentials) -> Result<()>;

    /// Records a login attempt, successful or not.
    fn touch_password_credentials(&self, user_id: usize, success: bool) -> Result<()>;
}
