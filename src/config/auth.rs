//! Credential storage backed by `auth.json`.
//!
//! The file is a JSON object keyed by email; each value holds the tokens
//! from the most recent login plus an `isDefault` flag. At most one record
//! is the default at any time, and the default record is what authenticates
//! outgoing API requests.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::paths;
use crate::error::{DepwatchError, DepwatchResult};

/// One stored credential record. Field names are the on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredential {
    pub is_default: bool,
    pub access_token: String,
    pub refresh_token: String,
}

/// The full contents of `auth.json`: email → credential record.
pub type AuthConfig = BTreeMap<String, StoredCredential>;

/// Reads and rewrites the credential file, keeping the invariant that at
/// most one record is marked default.
#[derive(Debug, Clone)]
pub struct AuthStore {
    path: PathBuf,
}

impl AuthStore {
    /// Store over the standard config location (`$HOME/<LOCAL_DIR>/auth.json`).
    pub fn new() -> DepwatchResult<Self> {
        Ok(Self {
            path: paths::auth_file()?,
        })
    }

    /// Store over an explicit file path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the whole credential map. The bootstrap step creates the file
    /// before commands run, so a missing file means a broken installation.
    pub fn read(&self) -> DepwatchResult<AuthConfig> {
        if !self.path.exists() {
            return Err(DepwatchError::ConfigNotFound(self.path.clone()));
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(DepwatchError::from)
    }

    /// Insert or overwrite the record for `email` and make it the default.
    /// Every other record loses its default flag.
    pub fn write(&self, email: &str, access_token: &str, refresh_token: &str) -> DepwatchResult<()> {
        let mut config = self.read()?;
        for credential in config.values_mut() {
            credential.is_default = false;
        }
        config.insert(
            email.to_string(),
            StoredCredential {
                is_default: true,
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
            },
        );
        self.persist(&config)
    }

    /// Make the existing record for `email` the default, keeping its tokens.
    pub fn set_default(&self, email: &str) -> DepwatchResult<()> {
        let mut config = self.read()?;
        if !config.contains_key(email) {
            return Err(DepwatchError::UnknownUser(email.to_string()));
        }
        for (key, credential) in config.iter_mut() {
            credential.is_default = key == email;
        }
        self.persist(&config)
    }

    /// The single default record, as `(email, credential)`.
    pub fn default_user(&self) -> DepwatchResult<(String, StoredCredential)> {
        self.read()?
            .into_iter()
            .find(|(_, credential)| credential.is_default)
            .ok_or(DepwatchError::NoDefaultUser)
    }

    /// The default record's email.
    pub fn default_email(&self) -> DepwatchResult<String> {
        Ok(self.default_user()?.0)
    }

    /// Access token of the default user, if one is set. Used by the API
    /// client to decide whether to send an `Authorization` header.
    pub fn access_token(&self) -> Option<String> {
        self.default_user()
            .ok()
            .map(|(_, credential)| credential.access_token)
    }

    /// Persist atomically: write a temp file next to the target, flush and
    /// sync it, then rename over the original. A concurrent reader never
    /// sees a half-written file.
    fn persist(&self, config: &AuthConfig) -> DepwatchResult<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, config)?;
        writer.flush()?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| DepwatchError::Io(format!("failed to sync {}: {}", temp_path.display(), e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            DepwatchError::Io(format!("failed to replace {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn empty_store(dir: &TempDir) -> AuthStore {
        let path = dir.path().join("auth.json");
        fs::write(&path, "{}").unwrap();
        AuthStore::with_path(path)
    }

    fn defaults(store: &AuthStore) -> Vec<String> {
        store
            .read()
            .unwrap()
            .into_iter()
            .filter(|(_, c)| c.is_default)
            .map(|(email, _)| email)
            .collect()
    }

    #[test]
    fn test_read_missing_file_is_config_not_found() {
        let dir = TempDir::new().unwrap();
        let store = AuthStore::with_path(dir.path().join("auth.json"));
        assert!(matches!(store.read(), Err(DepwatchError::ConfigNotFound(_))));
    }

    #[test]
    fn test_write_marks_single_default() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);

        store.write("a@x.com", "tok1", "ref1").unwrap();
        assert_eq!(defaults(&store), vec!["a@x.com".to_string()]);

        store.write("b@y.com", "tok2", "ref2").unwrap();
        let config = store.read().unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(defaults(&store), vec!["b@y.com".to_string()]);
        assert!(!config["a@x.com"].is_default);
    }

    #[test]
    fn test_relogin_overwrites_tokens() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);

        store.write("a@x.com", "old", "old-ref").unwrap();
        store.write("b@y.com", "other", "other-ref").unwrap();
        store.write("a@x.com", "new", "new-ref").unwrap();

        let config = store.read().unwrap();
        assert_eq!(config["a@x.com"].access_token, "new");
        assert_eq!(config["a@x.com"].refresh_token, "new-ref");
        assert_eq!(defaults(&store), vec!["a@x.com".to_string()]);
    }

    #[test]
    fn test_set_default_preserves_tokens() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);

        store.write("a@x.com", "tok1", "ref1").unwrap();
        store.write("b@y.com", "tok2", "ref2").unwrap();
        store.set_default("a@x.com").unwrap();

        let config = store.read().unwrap();
        assert!(config["a@x.com"].is_default);
        assert!(!config["b@y.com"].is_default);
        assert_eq!(config["a@x.com"].access_token, "tok1");
        assert_eq!(config["a@x.com"].refresh_token, "ref1");
    }

    #[test]
    fn test_set_default_unknown_email_fails() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);
        store.write("a@x.com", "tok1", "ref1").unwrap();

        let err = store.set_default("nobody@y.com").unwrap_err();
        assert!(matches!(err, DepwatchError::UnknownUser(email) if email == "nobody@y.com"));
        // the store is untouched
        assert_eq!(defaults(&store), vec!["a@x.com".to_string()]);
    }

    #[test]
    fn test_default_user_lookups() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);

        assert!(matches!(
            store.default_user(),
            Err(DepwatchError::NoDefaultUser)
        ));
        assert!(store.access_token().is_none());

        store.write("a@x.com", "tok1", "ref1").unwrap();
        let (email, credential) = store.default_user().unwrap();
        assert_eq!(email, "a@x.com");
        assert_eq!(credential.access_token, "tok1");
        assert_eq!(store.default_email().unwrap(), "a@x.com");
        assert_eq!(store.access_token().as_deref(), Some("tok1"));
    }

    #[test]
    fn test_persist_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);
        store.write("a@x.com", "tok1", "ref1").unwrap();

        assert!(dir.path().join("auth.json").exists());
        assert!(!dir.path().join("auth.json.tmp").exists());
    }

    #[test]
    fn test_on_disk_field_names() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir);
        store.write("a@x.com", "tok1", "ref1").unwrap();

        let raw = fs::read_to_string(dir.path().join("auth.json")).unwrap();
        assert!(raw.contains("\"isDefault\""));
        assert!(raw.contains("\"accessToken\""));
        assert!(raw.contains("\"refreshToken\""));
    }
}
