#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ApiError;
use crate::domain::models::AuthMode;
use crate::domain::models::Credentials;
use crate::domain::models::GalleryApi;
use crate::domain::models::ListUpdate;
use crate::domain::models::NewList;
use crate::domain::models::SavedList;
use crate::domain::models::SavedListReceipt;
use crate::domain::models::Session;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    error: Option<String>,
}

async fn check_status(res: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| return e.message.or(e.error));

    tracing::error!(status, message = ?message, action, "Gallery API request failed");
    return Err(ApiError { status, message }.into());
}

pub struct HttpApi {
    url: String,
    client: reqwest::Client,
}

impl Default for HttpApi {
    fn default() -> HttpApi {
        return HttpApi::new(Config::get(ConfigKey::ApiURL));
    }
}

impl HttpApi {
    pub fn new(url: String) -> HttpApi {
        return HttpApi {
            url: url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        };
    }

    async fn authenticate(&self, mode: AuthMode, credentials: &Credentials) -> Result<String> {
        tracing::debug!(mode = %mode, "Authenticating");

        let res = self
            .client
            .post(format!("{url}{endpoint}", url = self.url, endpoint = mode.endpoint()))
            .json(credentials)
            .send()
            .await?;

        let res = check_status(res, &mode.to_string()).await?;
        let token_res = res.json::<TokenResponse>().await?;

        return Ok(token_res.token);
    }
}

#[async_trait]
impl GalleryApi for HttpApi {
    #[allow(clippy::implicit_return)]
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        return self.authenticate(AuthMode::Login, credentials).await;
    }

    #[allow(clippy::implicit_return)]
    async fn signup(&self, credentials: &Credentials) -> Result<String> {
        return self.authenticate(AuthMode::Signup, credentials).await;
    }

    #[allow(clippy::implicit_return)]
    async fn save_list(&self, session: &Session, list: &NewList) -> Result<SavedListReceipt> {
        let res = self
            .client
            .post(format!("{url}/api/saveList", url = self.url))
            .bearer_auth(&session.token)
            .json(list)
            .send()
            .await?;

        let res = check_status(res, "save_list").await?;
        let body = res.text().await?;
        let receipt = serde_json::from_str::<SavedListReceipt>(&body).unwrap_or_default();
        tracing::debug!(id = ?receipt.id, name = list.name, "Saved list");

        return Ok(receipt);
    }

    #[allow(clippy::implicit_return)]
    async fn get_lists(&self, session: &Session) -> Result<Vec<SavedList>> {
        let res = self
            .client
            .get(format!("{url}/api/getLists", url = self.url))
            .bearer_auth(&session.token)
            .send()
            .await?;

        let res = check_status(res, "get_lists").await?;
        let lists = res.json::<Vec<SavedList>>().await?;
        tracing::debug!(count = lists.len(), "Fetched lists");

        return Ok(lists);
    }

    #[allow(clippy::implicit_return)]
    async fn update_list(&self, session: &Session, id: &str, update: &ListUpdate) -> Result<()> {
        let res = self
            .client
            .put(format!("{url}/api/updateList/{id}", url = self.url))
            .bearer_auth(&session.token)
            .json(update)
            .send()
            .await?;

        check_status(res, "update_list").await?;
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn delete_list(&self, session: &Session, id: &str) -> Result<()> {
        let res = self
            .client
            .delete(format!("{url}/api/deleteList/{id}", url = self.url))
            .bearer_auth(&session.token)
            .send()
            .await?;

        check_status(res, "delete_list").await?;
        return Ok(());
    }
}
