//! Authentication endpoints.

use reqwest::Method;
use tourism_core::error::CoreError;
use tourism_core::forms::{LoginForm, RegisterForm};
use tourism_core::models::{AuthToken, Profile};

use crate::error::ClientResult;
use crate::http::BackendClient;

impl BackendClient {
    /// POST /auth/login
    ///
    /// Returns the issued token; pair with [`BackendClient::with_token`] for
    /// subsequent admin calls.
    pub async fn login(&self, form: &LoginForm) -> ClientResult<AuthToken> {
        form.check()?;

        let token: AuthToken = self
            .send_json(self.request(Method::POST, "/auth/login").json(form))
            .await?;
        tracing::info!(username = %form.username, "Admin logged in");
        Ok(token)
    }

    /// POST /auth/register
    pub async fn register(&self, form: &RegisterForm) -> ClientResult<Profile> {
        form.check()?;

        let profile: Profile = self
            .send_json(self.request(Method::POST, "/auth/register").json(form))
            .await?;
        tracing::info!(user_id = profile.id, "Admin registered");
        Ok(profile)
    }

    /// GET /auth/profile
    pub async fn profile(&self) -> ClientResult<Profile> {
        if self.token().is_none() {
            return Err(CoreError::Unauthorized("No session token".into()).into());
        }
        self.get_json("/auth/profile").await
    }
}
