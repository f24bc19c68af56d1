#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use chrono::Local;
use chrono::SecondsFormat;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Session;

/// Keeps the bearer token on disk between runs. Only one session exists at a
/// time; setting a new token replaces the previous one.
pub struct SessionStore {
    pub file_path: path::PathBuf,
}

impl Default for SessionStore {
    fn default() -> SessionStore {
        return SessionStore::new(path::PathBuf::from(Config::get(ConfigKey::SessionFile)));
    }
}

impl SessionStore {
    pub fn new(file_path: path::PathBuf) -> SessionStore {
        return SessionStore { file_path };
    }

    pub async fn get(&self) -> Result<Option<Session>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        let session: Session = serde_yaml::from_str(&payload)?;
        if session.token.is_empty() {
            return Ok(None);
        }

        return Ok(Some(session));
    }

    /// Like `get`, but for commands that cannot do anything without a token.
    pub async fn require(&self) -> Result<Session> {
        if let Some(session) = self.get().await? {
            return Ok(session);
        }

        bail!("You are not logged in. Run 'dogcodes login' first.");
    }

    pub async fn set(&self, token: &str) -> Result<Session> {
        let session = Session {
            token: token.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };

        let payload = serde_yaml::to_string(&session)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = ?self.file_path, "Stored session");
        return Ok(session);
    }

    pub async fn clear(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path).await?;
        tracing::debug!(path = ?self.file_path, "Cleared session");
        return Ok(());
    }
}
