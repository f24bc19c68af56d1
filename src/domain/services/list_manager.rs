#[cfg(test)]
#[path = "list_manager_test.rs"]
mod tests;

use crate::domain::models::ApiBox;
use crate::domain::models::ConfirmBox;
use crate::domain::models::ListUpdate;
use crate::domain::models::SavedList;
use crate::domain::models::Session;

pub const DELETE_LIST_PROMPT: &str = "This will delete the entire list. Continue?";
pub const DELETE_EMPTIED_LIST_PROMPT: &str =
    "This will delete the entire list as it will be empty. Continue?";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The request went through and the lists were refreshed.
    Applied,
    /// The user declined the confirmation. Nothing was sent.
    Cancelled,
    /// The input was unusable. Nothing was sent.
    Rejected,
    /// The backend or the prompt failed. Details are in the debug log.
    Failed,
}

/// Local view of the user's saved lists. Every successful mutation is
/// followed by a full refetch; nothing is patched locally.
#[derive(Default)]
pub struct ListManager {
    pub lists: Vec<SavedList>,
    pub expanded: Option<String>,
    pub editing: Option<String>,
    pub new_name: String,
}

impl ListManager {
    pub fn find(&self, list_id: &str) -> Option<&SavedList> {
        return self.lists.iter().find(|e| return e.id == list_id);
    }

    pub fn is_expanded(&self, list_id: &str) -> bool {
        return self.expanded.as_deref() == Some(list_id);
    }

    pub fn is_editing(&self, list_id: &str) -> bool {
        return self.editing.as_deref() == Some(list_id);
    }

    pub async fn fetch_all(&mut self, api: &ApiBox, session: &Session) -> Outcome {
        match api.get_lists(session).await {
            Ok(lists) => {
                self.lists = lists;
                if let Some(expanded) = self.expanded.clone() {
                    if self.find(&expanded).is_none() {
                        self.expanded = None;
                    }
                }
                return Outcome::Applied;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Error fetching lists");
                return Outcome::Failed;
            }
        }
    }

    /// Expands `list_id`, or collapses it if it already is. Only one list is
    /// open at a time, and any edit in progress is dropped.
    pub fn toggle(&mut self, list_id: &str) {
        if self.is_expanded(list_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(list_id.to_string());
        }

        self.editing = None;
    }

    pub fn start_edit(&mut self, list_id: &str) -> bool {
        let Some(name) = self.find(list_id).map(|e| return e.name.to_string()) else {
            return false;
        };

        self.editing = Some(list_id.to_string());
        self.new_name = name;
        return true;
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn delete(
        &mut self,
        api: &ApiBox,
        session: &Session,
        confirmer: &ConfirmBox,
        list_id: &str,
    ) -> Outcome {
        match confirmer.confirm(DELETE_LIST_PROMPT) {
            Ok(true) => {}
            Ok(false) => return Outcome::Cancelled,
            Err(err) => {
                tracing::error!(error = ?err, "Error confirming list deletion");
                return Outcome::Failed;
            }
        }

        return self.delete_confirmed(api, session, list_id).await;
    }

    /// Removes the element at `index`. Removing the last element deletes the
    /// whole list instead, after a second confirmation.
    pub async fn remove_element(
        &mut self,
        api: &ApiBox,
        session: &Session,
        confirmer: &ConfirmBox,
        list_id: &str,
        index: usize,
    ) -> Outcome {
        let Some((codes, image_urls)) = self.find(list_id).and_then(|e| return e.without_element(index))
        else {
            tracing::warn!(list_id, index, "No element to remove");
            return Outcome::Rejected;
        };

        if codes.is_empty() {
            match confirmer.confirm(DELETE_EMPTIED_LIST_PROMPT) {
                Ok(true) => {}
                Ok(false) => {
                    self.editing = None;
                    return Outcome::Cancelled;
                }
                Err(err) => {
                    tracing::error!(error = ?err, "Error confirming list deletion");
                    return Outcome::Failed;
                }
            }

            return self.delete_confirmed(api, session, list_id).await;
        }

        let update = ListUpdate::Elements { codes, image_urls };
        if let Err(err) = api.update_list(session, list_id, &update).await {
            tracing::error!(error = ?err, list_id, "Error removing image");
            return Outcome::Failed;
        }

        self.editing = None;
        return self.fetch_all(api, session).await;
    }

    pub async fn rename(
        &mut self,
        api: &ApiBox,
        session: &Session,
        list_id: &str,
        new_name: &str,
    ) -> Outcome {
        if new_name.is_empty() {
            return Outcome::Rejected;
        }

        let update = ListUpdate::Rename {
            name: new_name.to_string(),
        };
        if let Err(err) = api.update_list(session, list_id, &update).await {
            tracing::error!(error = ?err, list_id, "Error updating list name");
            return Outcome::Failed;
        }

        self.editing = None;
        self.new_name = "".to_string();
        return self.fetch_all(api, session).await;
    }

    async fn delete_confirmed(&mut self, api: &ApiBox, session: &Session, list_id: &str) -> Outcome {
        if let Err(err) = api.delete_list(session, list_id).await {
            tracing::error!(error = ?err, list_id, "Error deleting list");
            return Outcome::Failed;
        }

        self.editing = None;
        return self.fetch_all(api, session).await;
    }
}
