use std::sync::Arc;

use tracing::{instrument, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::notify::{NoticeLevel, Notifier};
use crate::schemas::User;

/// Authentication state over the session-cookie auth endpoints.
///
/// Holds the current user for the lifetime of one process; the cookie store
/// inside the shared [`ApiClient`] carries the actual session.
pub struct AuthSession {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    user: Option<User>,
}

impl AuthSession {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            user: None,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Check whether an existing session is still valid. Not being logged in
    /// is an ordinary answer, not an error.
    #[instrument(skip(self))]
    pub async fn restore(&mut self) -> Result<bool, ApiError> {
        match self.client.current_user().await {
            Ok(envelope) => {
                self.user = Some(envelope.user);
                Ok(true)
            }
            Err(ApiError::Api { status: 401, .. }) => {
                self.user = None;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        match self.client.login(email, password).await {
            Ok(response) => {
                self.user = Some(response.user.clone());
                self.notifier.notify(NoticeLevel::Success, "Login successful");
                Ok(response.user)
            }
            Err(err) => {
                self.notifier.notify(NoticeLevel::Error, login_failure(&err, "Login failed"));
                Err(err)
            }
        }
    }

    #[instrument(skip(self, password))]
    pub async fn register(&mut self, email: &str, password: &str) -> Result<User, ApiError> {
        match self.client.register(email, password).await {
            Ok(response) => {
                self.user = Some(response.user.clone());
                self.notifier
                    .notify(NoticeLevel::Success, "Registration successful");
                Ok(response.user)
            }
            Err(err) => {
                self.notifier
                    .notify(NoticeLevel::Error, login_failure(&err, "Registration failed"));
                Err(err)
            }
        }
    }

    /// End the session server-side. Local state is cleared only on success,
    /// matching the original behavior.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        match self.client.logout().await {
            Ok(_) => {
                self.user = None;
                self.notifier
                    .notify(NoticeLevel::Success, "Logged out successfully");
                Ok(())
            }
            Err(err) => {
                warn!("logout failed: {err}");
                Err(err)
            }
        }
    }
}

/// Prefer the server's own message (e.g. "Invalid email or password") and
/// fall back to a generic one for transport failures.
fn login_failure<'a>(err: &'a ApiError, fallback: &'a str) -> &'a str {
    match err {
        ApiError::Api { message, .. } => message,
        ApiError::Network(_) => fallback,
    }
}
