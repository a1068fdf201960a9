//! Wire types shared with the depwatch server.
//!
//! Every response arrives wrapped in an [`Envelope`]; failures use
//! [`ApiFailure`] instead. Field renames follow the server's JSON casing
//! exactly, so these types round-trip against live responses.

use serde::{Deserialize, Serialize};

/// Standard response wrapper: `{ message, status, data }`.
///
/// List endpoints may set `data` to `null`, so callers deserialize those
/// with `T = Option<Vec<_>>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub status: u16,
    pub data: T,
}

/// Body of a non-2xx response. Older server builds put the human-readable
/// text in `error` and leave `message` empty, so both are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub status: u16,
}

/// `data` payload of a successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub tokens: TokenPair,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
}

/// A monitored repository. `package_list` is populated only after the
/// server has scanned the repository's manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: String,
    pub name: String,
    pub owner: String,
    pub path: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_list: Option<Vec<Package>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    pub version: PackageVersion,
    pub file: String,
    pub is_outdated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageVersion {
    pub current: String,
    pub last: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "repoID")]
    pub repo_id: String,
    pub email: String,
    pub is_confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<Notify>,
}

/// Notification schedule attached to a subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notify {
    pub hour: u8,
    pub minute: u8,
    pub weekday: u8,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hour,
    // some existing records carry "way" where "day" was meant; accept both
    #[serde(alias = "way")]
    Day,
    Week,
}
