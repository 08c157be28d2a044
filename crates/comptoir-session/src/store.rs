//! # Session Store
//!
//! Remembers the signed-in user between launches.
//!
//! ## File Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   login ──► save(user) ──► session.json ◄── load() on startup           │
//! │                                 │                                       │
//! │   logout ─► clear() ────────────┘ removed                               │
//! │                                                                         │
//! │   load() outcomes:                                                      │
//! │   • file missing ─────────────► Ok(None)                                │
//! │   • file parses ──────────────► Ok(Some(user))                          │
//! │   • file corrupt ─────────────► removal attempted, warn!, Ok(None)      │
//! │   • any other I/O failure ────► Err(SessionError::Io)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Default Location
//! - **macOS**: `~/Library/Application Support/com.comptoir.dashboard/session.json`
//! - **Windows**: `%APPDATA%\comptoir\dashboard\data\session.json`
//! - **Linux**: `~/.local/share/dashboard/session.json`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use comptoir_core::User;
use directories::ProjectDirs;
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

/// File name of the persisted session inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// JSON file holding the signed-in [`User`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn at_default_path() -> SessionResult<Self> {
        Self::default_path()
            .map(SessionStore::new)
            .ok_or(SessionError::NoPath)
    }

    /// Platform data directory joined with [`SESSION_FILE_NAME`].
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "comptoir", "dashboard")
            .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted user, if any.
    pub async fn load(&self) -> SessionResult<Option<User>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No persisted session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<User>(&contents) {
            Ok(user) => {
                info!(user_id = %user.id, "Restored session");
                Ok(Some(user))
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Discarding unreadable session file");
                if let Err(e) = self.clear().await {
                    warn!(path = ?self.path, error = %e, "Could not remove unreadable session file");
                }
                Ok(None)
            }
        }
    }

    /// Persists `user`, creating the parent directory if needed.
    pub async fn save(&self, user: &User) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let contents = serde_json::to_vec_pretty(user)?;
        tokio::fs::write(&self.path, contents).await?;

        debug!(path = ?self.path, user_id = %user.id, "Session saved");
        Ok(())
    }

    /// Removes the persisted session. A missing file is fine.
    pub async fn clear(&self) -> SessionResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user() -> User {
        User {
            id: "U001".to_string(),
            name: "Jean Dupont".to_string(),
            email: "jean@example.com".to_string(),
            role: "Gestionnaire Principal".to_string(),
            avatar: None,
        }
    }

    fn store_in(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("nested").join(SESSION_FILE_NAME))
    }

    #[tokio::test]
    async fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&user()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(user()));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_discarded() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE_NAME));
        tokio::fs::write(store.path(), b"{not json").await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_corrupt_file_that_cannot_be_removed_still_loads_none() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        let store = SessionStore::new(locked.join(SESSION_FILE_NAME));
        std::fs::write(store.path(), b"{not json").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();

        let loaded = store.load().await;

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(loaded.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&user()).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = SessionStore::default_path() {
            assert!(path.ends_with(SESSION_FILE_NAME));
        }
    }
}
