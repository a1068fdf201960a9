// Library root
// -----------
// The binary (`main.rs`) parses arguments and wires these modules
// together.
//
// Module responsibilities:
// - `client`: Blocking HTTP client for the depwatch API, one module per
//   resource (auth, repositories, subscribers).
// - `commands`: Interactive flows behind each CLI subcommand.
// - `config`: File locations under `$HOME/<LOCAL_DIR>` and the stored
//   credentials in `auth.json`.
// - `models`: Wire types shared with the server.
// - `validation`: Prompt input validators.
// - `error`: Error type used across the crate.
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;
