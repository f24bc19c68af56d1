use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The authenticated context every list request is made with. Built once at
/// login (or loaded from disk at startup) and passed along explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub version: String,
    pub timestamp: String,
}
