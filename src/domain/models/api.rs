use std::error;
use std::fmt;

use anyhow::Result;
use async_trait::async_trait;

use super::Credentials;
use super::ListUpdate;
use super::NewList;
use super::SavedList;
use super::SavedListReceipt;
use super::Session;

/// A non-2xx answer from the backend. `message` is whatever explanation the
/// backend put in the body, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(message) = &self.message {
            return write!(f, "{message} (status {})", self.status);
        }

        return write!(f, "request failed with status {}", self.status);
    }
}

impl error::Error for ApiError {}

/// Server provided explanation for a failed request, if the failure came from
/// the server at all.
pub fn server_message(err: &anyhow::Error) -> Option<String> {
    return err
        .downcast_ref::<ApiError>()
        .and_then(|api_err| return api_err.message.clone());
}

#[async_trait]
pub trait GalleryApi {
    /// Exchanges login credentials for a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<String>;

    /// Creates an account and returns a bearer token for it.
    async fn signup(&self, credentials: &Credentials) -> Result<String>;

    async fn save_list(&self, session: &Session, list: &NewList) -> Result<SavedListReceipt>;

    /// All lists owned by the session's user, in the order the backend
    /// returns them.
    async fn get_lists(&self, session: &Session) -> Result<Vec<SavedList>>;

    async fn update_list(&self, session: &Session, id: &str, update: &ListUpdate) -> Result<()>;

    async fn delete_list(&self, session: &Session, id: &str) -> Result<()>;
}

pub type ApiBox = Box<dyn GalleryApi + Send + Sync>;
