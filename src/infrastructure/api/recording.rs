use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::ApiBox;
use crate::domain::models::ApiError;
use crate::domain::models::Credentials;
use crate::domain::models::GalleryApi;
use crate::domain::models::ListUpdate;
use crate::domain::models::NewList;
use crate::domain::models::SavedList;
use crate::domain::models::SavedListReceipt;
use crate::domain::models::Session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Login(Credentials),
    Signup(Credentials),
    SaveList(NewList),
    GetLists,
    UpdateList(String, ListUpdate),
    DeleteList(String),
}

/// Shared handle on the requests a `RecordingApi` has seen. Stays readable
/// after the api is boxed away.
#[derive(Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<Request>>>);

impl RequestLog {
    pub fn all(&self) -> Vec<Request> {
        return self.0.lock().unwrap().clone();
    }

    pub fn count(&self, matcher: fn(&Request) -> bool) -> usize {
        return self.all().iter().filter(|e| return matcher(e)).count();
    }

    fn push(&self, request: Request) {
        self.0.lock().unwrap().push(request);
    }
}

/// In-memory backend that records every request it receives. Lists are served
/// from `lists`; mutations are recorded but not applied.
#[derive(Default)]
pub struct RecordingApi {
    pub lists: Mutex<Vec<SavedList>>,
    pub log: RequestLog,
    pub failure: Option<ApiError>,
}

impl RecordingApi {
    pub fn with_lists(lists: Vec<SavedList>) -> RecordingApi {
        return RecordingApi {
            lists: Mutex::new(lists),
            ..Default::default()
        };
    }

    pub fn failing(failure: ApiError) -> RecordingApi {
        return RecordingApi {
            failure: Some(failure),
            ..Default::default()
        };
    }

    pub fn boxed(self) -> (ApiBox, RequestLog) {
        let log = self.log.clone();
        return (Box::new(self), log);
    }

    fn record(&self, request: Request) -> Result<()> {
        self.log.push(request);
        if let Some(failure) = &self.failure {
            return Err(failure.clone().into());
        }

        return Ok(());
    }
}

#[async_trait]
impl GalleryApi for RecordingApi {
    #[allow(clippy::implicit_return)]
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        self.record(Request::Login(credentials.clone()))?;
        return Ok(format!("token-for-{}", credentials.email));
    }

    #[allow(clippy::implicit_return)]
    async fn signup(&self, credentials: &Credentials) -> Result<String> {
        self.record(Request::Signup(credentials.clone()))?;
        return Ok(format!("token-for-{}", credentials.email));
    }

    #[allow(clippy::implicit_return)]
    async fn save_list(&self, _session: &Session, list: &NewList) -> Result<SavedListReceipt> {
        self.record(Request::SaveList(list.clone()))?;
        return Ok(SavedListReceipt {
            id: Some("new".to_string()),
        });
    }

    #[allow(clippy::implicit_return)]
    async fn get_lists(&self, _session: &Session) -> Result<Vec<SavedList>> {
        self.record(Request::GetLists)?;
        return Ok(self.lists.lock().unwrap().clone());
    }

    #[allow(clippy::implicit_return)]
    async fn update_list(&self, _session: &Session, id: &str, update: &ListUpdate) -> Result<()> {
        return self.record(Request::UpdateList(id.to_string(), update.clone()));
    }

    #[allow(clippy::implicit_return)]
    async fn delete_list(&self, _session: &Session, id: &str) -> Result<()> {
        return self.record(Request::DeleteList(id.to_string()));
    }
}
