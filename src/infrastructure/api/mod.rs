pub mod http;
#[cfg(test)]
pub mod recording;

use crate::domain::models::ApiBox;

pub struct ApiManager {}

impl ApiManager {
    pub fn get() -> ApiBox {
        return Box::<http::HttpApi>::default();
    }
}
