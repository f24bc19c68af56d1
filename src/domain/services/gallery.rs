#[cfg(test)]
#[path = "gallery_test.rs"]
mod tests;

use crate::domain::models::match_codes;
use crate::domain::models::ApiBox;
use crate::domain::models::NewList;
use crate::domain::models::Session;
use crate::domain::models::StatusCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum SaveOutcome {
    #[strum(to_string = "Please enter a list name and filter some codes.")]
    Invalid,
    #[strum(to_string = "List saved successfully!")]
    Saved,
    #[strum(to_string = "Failed to save the list.")]
    Failed,
}

/// Search results and the pending list name of the search screen.
#[derive(Default)]
pub struct Gallery {
    pub filter: String,
    pub list_name: String,
    pub matched: Vec<StatusCode>,
}

impl Gallery {
    /// Replaces the current results with whatever `filter` matches.
    pub fn search(&mut self, filter: &str) -> &[StatusCode] {
        self.filter = filter.to_string();
        self.matched = match_codes(filter);

        return &self.matched;
    }

    pub fn images(&self) -> Vec<(StatusCode, String)> {
        return self
            .matched
            .iter()
            .map(|code| return (*code, code.image_url()))
            .collect();
    }

    /// Saves the current results under `list_name`. Nothing is sent unless
    /// both are present. The name is cleared once the backend accepts it.
    pub async fn save(&mut self, api: &ApiBox, session: &Session) -> SaveOutcome {
        if self.list_name.is_empty() || self.matched.is_empty() {
            return SaveOutcome::Invalid;
        }

        let new_list = NewList::new(&self.list_name, &self.matched);
        if let Err(err) = api.save_list(session, &new_list).await {
            tracing::error!(error = ?err, name = new_list.name, "Error saving list");
            return SaveOutcome::Failed;
        }

        self.list_name = "".to_string();
        return SaveOutcome::Saved;
    }
}
