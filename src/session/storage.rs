use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::api::User;
use crate::constants::{AUTH_TOKEN_KEY, USER_KEY};

/// Durable home for the session pair, read once at gateway construction so
/// an authenticated identity survives process restarts.
#[derive(Debug)]
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    /// Storage rooted at the platform config directory.
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("", "", "arena")
            .context("Could not determine a config directory")?;
        let dir = proj_dirs.config_dir().join("session");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Storage rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(AUTH_TOKEN_KEY)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_KEY)
    }

    /// Read the persisted token, if any.
    pub fn load_token(&self) -> Option<String> {
        let token = fs::read_to_string(self.token_path()).ok()?;
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    /// Read the persisted user record. Corrupt data is treated as absent.
    pub fn load_user(&self) -> Option<User> {
        let raw = fs::read_to_string(self.user_path()).ok()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                debug!("discarding unreadable session user: {}", err);
                None
            }
        }
    }

    /// Persist the session pair.
    pub fn save(&self, token: &str, user: &User) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.token_path(), token)?;
        self.save_user(user)
    }

    /// Persist the user record alone, after a profile refresh.
    pub fn save_user(&self, user: &User) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(user)?;
        fs::write(self.user_path(), json)?;
        Ok(())
    }

    /// Remove both keys. Missing files are fine.
    pub fn clear(&self) {
        let _ = fs::remove_file(self.token_path());
        let _ = fs::remove_file(self.user_path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::User;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_user() -> User {
        User {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: Some("Alice Example".to_string()),
            bio: None,
            is_active: true,
            is_admin: false,
            created_at: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn round_trips_the_session_pair() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SessionStorage::with_dir(temp_dir.path());

        storage.save("secret-token", &sample_user()).unwrap();

        assert_eq!(storage.load_token().as_deref(), Some("secret-token"));
        assert_eq!(storage.load_user(), Some(sample_user()));
    }

    #[test]
    fn clear_removes_both_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SessionStorage::with_dir(temp_dir.path());

        storage.save("secret-token", &sample_user()).unwrap();
        storage.clear();

        assert!(storage.load_token().is_none());
        assert!(storage.load_user().is_none());
        assert!(!temp_dir.path().join(AUTH_TOKEN_KEY).exists());
        assert!(!temp_dir.path().join(USER_KEY).exists());
    }

    #[test]
    fn malformed_user_record_is_treated_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SessionStorage::with_dir(temp_dir.path());

        fs::write(temp_dir.path().join(USER_KEY), "{not json").unwrap();

        assert!(storage.load_user().is_none());
    }

    #[test]
    fn missing_files_load_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SessionStorage::with_dir(temp_dir.path());

        assert!(storage.load_token().is_none());
        assert!(storage.load_user().is_none());
    }
}
