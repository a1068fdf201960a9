//! Local configuration paths.
//!
//! All CLI state lives in a single directory under the user's home,
//! named by the required `LOCAL_DIR` environment variable
//! (e.g. `LOCAL_DIR=.depwatch` resolves to `~/.depwatch/`).

use std::fs;
use std::path::PathBuf;

use crate::error::{DepwatchError, DepwatchResult};

/// Environment variable naming the config directory under `$HOME`.
pub const LOCAL_DIR_ENV: &str = "LOCAL_DIR";

/// File holding stored credentials, one record per email.
pub const AUTH_FILE: &str = "auth.json";

/// The config directory: `$HOME/<LOCAL_DIR>`. Does not touch the disk.
pub fn config_dir() -> DepwatchResult<PathBuf> {
    let local_dir =
        std::env::var(LOCAL_DIR_ENV).map_err(|_| DepwatchError::MissingEnvVar(LOCAL_DIR_ENV))?;
    let home = dirs::home_dir()
        .ok_or_else(|| DepwatchError::Config("home directory could not be determined".into()))?;
    Ok(home.join(local_dir))
}

/// Path of the credentials file. Existence is checked by readers, not here.
pub fn auth_file() -> DepwatchResult<PathBuf> {
    Ok(config_dir()?.join(AUTH_FILE))
}

/// Resolve a file inside the config directory, requiring it to exist.
pub fn resolve(file_name: &str) -> DepwatchResult<PathBuf> {
    let path = config_dir()?.join(file_name);
    if !path.exists() {
        return Err(DepwatchError::ConfigNotFound(path));
    }
    Ok(path)
}

/// Create the config directory if it is missing.
pub fn ensure_config_dir() -> DepwatchResult<()> {
    let dir = config_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(())
}

/// Create `file_name` inside the config directory as an empty JSON object
/// if it is missing. Runs together with [`ensure_config_dir`] before any
/// command, so readers can rely on the file being present.
pub fn ensure_config_file(file_name: &str) -> DepwatchResult<()> {
    let path = config_dir()?.join(file_name);
    if !path.exists() {
        fs::write(&path, "{}")?;
    }
    Ok(())
}
