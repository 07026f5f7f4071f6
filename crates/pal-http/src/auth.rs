//! Identity endpoints under `auth/`.

use pal_core::{AuthTransport, Credentials, Registration, TransportError, User};

use crate::ApiClient;

pub(crate) const PROFILE_PATH: &str = "auth/profile/";
pub(crate) const LOGIN_PATH: &str = "auth/login/";
pub(crate) const REGISTER_PATH: &str = "auth/register/";
pub(crate) const LOGOUT_PATH: &str = "auth/logout/";

impl AuthTransport for ApiClient {
    async fn get_profile(&self) -> Result<User, TransportError> {
        self.get_json(PROFILE_PATH).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, TransportError> {
        self.post_json(LOGIN_PATH, Some(credentials)).await
    }

    async fn register(&self, registration: &Registration) -> Result<User, TransportError> {
        self.post_json(REGISTER_PATH, Some(registration)).await
    }

    async fn logout(&self) -> Result<(), TransportError> {
        self.post_empty(LOGOUT_PATH).await?;
        if let Err(error) = self.clear_persisted_cookies() {
            tracing::warn!(%error, "logged out but could not remove cookie file");
        }
        Ok(())
    }
}
