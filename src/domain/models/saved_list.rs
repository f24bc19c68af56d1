#[cfg(test)]
#[path = "saved_list_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::image_urls;
use super::StatusCode;

/// A named list of codes as stored by the backend. `codes` and `image_urls`
/// are paired by position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedList {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub codes: Vec<StatusCode>,
    #[serde(rename = "imageUrls")]
    pub image_urls: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: String,
}

impl SavedList {
    pub fn is_consistent(&self) -> bool {
        return self.codes.len() == self.image_urls.len();
    }

    pub fn len(&self) -> usize {
        return self.codes.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.codes.is_empty();
    }

    pub fn entries(&self) -> Vec<(StatusCode, String)> {
        return self
            .codes
            .iter()
            .zip(self.image_urls.iter())
            .map(|(code, url)| return (*code, url.to_string()))
            .collect();
    }

    /// Codes saved at some point that are no longer in the reference set.
    pub fn unknown_codes(&self) -> Vec<StatusCode> {
        return self
            .codes
            .iter()
            .filter(|code| return !code.is_known())
            .copied()
            .collect();
    }

    /// Copy of the list's elements with the pair at `index` removed. `None`
    /// when the index does not point at an element.
    pub fn without_element(&self, index: usize) -> Option<(Vec<StatusCode>, Vec<String>)> {
        if index >= self.codes.len() {
            return None;
        }

        let mut codes = self.codes.clone();
        let mut urls = self.image_urls.clone();
        codes.remove(index);
        if index < urls.len() {
            urls.remove(index);
        }

        return Some((codes, urls));
    }

    pub fn format_created_at(&self) -> String {
        let parsed = DateTime::parse_from_rfc3339(&self.created_at)
            .or_else(|_| return DateTime::parse_from_rfc2822(&self.created_at));

        return match parsed {
            Ok(date) => date
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Err(_) => self.created_at.to_string(),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewList {
    pub name: String,
    pub codes: Vec<StatusCode>,
    #[serde(rename = "imageUrls")]
    pub image_urls: Vec<String>,
}

impl NewList {
    pub fn new(name: &str, codes: &[StatusCode]) -> NewList {
        return NewList {
            name: name.to_string(),
            codes: codes.to_vec(),
            image_urls: image_urls(codes),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListUpdate {
    Rename {
        name: String,
    },
    Elements {
        codes: Vec<StatusCode>,
        #[serde(rename = "imageUrls")]
        image_urls: Vec<String>,
    },
}

/// What the backend hands back after creating a list. Older backends only
/// return `{message, id}`, newer ones the whole list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedListReceipt {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
}
