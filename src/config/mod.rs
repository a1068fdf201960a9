//! Local configuration: file locations and stored credentials.

pub mod auth;
pub mod paths;
