#[cfg(test)]
#[path = "auth_form_test.rs"]
mod tests;

use anyhow::Result;

use super::SessionStore;
use crate::domain::models::server_message;
use crate::domain::models::validate_password;
use crate::domain::models::ApiBox;
use crate::domain::models::AuthMode;
use crate::domain::models::Credentials;
use crate::domain::models::Route;
use crate::domain::models::Session;

const GENERIC_ERROR: &str = "An error occurred";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Password,
}

/// Login and signup share one form. Signup additionally asks for a name and
/// holds the password to the strength rules.
pub struct AuthForm {
    pub mode: AuthMode,
    pub credentials: Credentials,
    /// Last submission failure, empty when there is none.
    pub error: String,
    /// Password rule currently broken, empty when the password is fine.
    pub password_error: String,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> AuthForm {
        return AuthForm {
            mode,
            credentials: Credentials::for_mode(mode),
            error: "".to_string(),
            password_error: "".to_string(),
        };
    }

    pub fn update(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Name => self.credentials.name = Some(value.to_string()),
            FormField::Email => self.credentials.email = value.to_string(),
            FormField::Password => {
                self.credentials.password = value.to_string();
                if self.mode == AuthMode::Signup {
                    self.password_error = validate_password(value);
                }
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        return self.mode == AuthMode::Login || self.password_error.is_empty();
    }

    /// Exchanges the credentials for a session. `Ok(None)` means the form
    /// stays open: either the password was rejected locally or the backend
    /// refused, and `password_error`/`error` say why.
    pub async fn submit(&mut self, api: &ApiBox, store: &SessionStore) -> Result<Option<Session>> {
        if self.mode == AuthMode::Signup {
            let password_error = validate_password(&self.credentials.password);
            if !password_error.is_empty() {
                self.password_error = password_error;
                return Ok(None);
            }
        }

        let res = match self.mode {
            AuthMode::Login => api.login(&self.credentials).await,
            AuthMode::Signup => api.signup(&self.credentials).await,
        };

        let token = match res {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(mode = %self.mode, error = ?err, "Authentication failed");
                self.error = server_message(&err).unwrap_or_else(|| return GENERIC_ERROR.to_string());
                return Ok(None);
            }
        };

        self.error = "".to_string();
        let session = store.set(&token).await?;

        return Ok(Some(session));
    }

    /// Where the client goes after a successful submission.
    pub fn next_route(&self) -> Route {
        return Route::Search;
    }
}

pub async fn logout(store: &SessionStore) -> Result<Route> {
    store.clear().await?;
    return Ok(Route::Login);
}
