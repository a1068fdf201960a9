// Account flows: login, signup and choosing the default user.

use anyhow::Result;
use dialoguer::{Input, Password, Select};

use crate::client::ApiClient;
use crate::commands::{report_failure, report_success, report_warning, spinner};
use crate::config::auth::AuthStore;
use crate::models::AuthPayload;
use crate::validation::{require_min_chars, require_valid_email};

pub fn login(api: &ApiClient, store: &AuthStore) -> Result<()> {
    let email: String = Input::new()
        .with_prompt("Email")
        .validate_with(|input: &String| require_valid_email(input))
        .interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .validate_with(|input: &String| require_min_chars(input, 8, "password"))
        .interact()?;

    let progress = spinner("Authenticating...");
    let result = api.login(&email, &password);
    progress.finish_and_clear();

    match result {
        Ok(body) => store_credentials(store, &body.message, body.data),
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

pub fn signup(api: &ApiClient, store: &AuthStore) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Name")
        .validate_with(|input: &String| require_min_chars(input, 6, "name"))
        .interact_text()?;
    let email: String = Input::new()
        .with_prompt("Email")
        .validate_with(|input: &String| require_valid_email(input))
        .interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .validate_with(|input: &String| require_min_chars(input, 8, "password"))
        .with_confirmation("Confirm password", "Passwords must match")
        .interact()?;

    let progress = spinner("Authenticating...");
    let result = api.signup(&name, &email, &password);
    progress.finish_and_clear();

    match result {
        Ok(body) => store_credentials(store, &body.message, body.data),
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

/// Persist the token pair under the account's email and report the
/// server's message. The email comes from the response, not the prompt,
/// so the stored key matches what the server has on file.
fn store_credentials(store: &AuthStore, message: &str, payload: AuthPayload) {
    let tokens = payload.tokens;
    match store.write(&payload.user.email, &tokens.access_token, &tokens.refresh_token) {
        Ok(()) => report_success(message),
        Err(e) => report_failure(&e.to_string()),
    }
}

pub fn set_default_user(store: &AuthStore) -> Result<()> {
    let config = match store.read() {
        Ok(config) => config,
        Err(e) => {
            report_failure(&e.to_string());
            return Ok(());
        }
    };
    if config.is_empty() {
        report_warning("No stored users. Run `depwatch login` first.");
        return Ok(());
    }

    let current = config
        .iter()
        .find(|(_, credential)| credential.is_default)
        .map(|(email, _)| email.as_str());
    let emails: Vec<&String> = config.keys().collect();
    let index = Select::new()
        .with_prompt(default_user_prompt(current))
        .items(&emails)
        .default(0)
        .interact()?;

    match store.set_default(emails[index]) {
        Ok(()) => report_success(&format!("Default user set to {}", emails[index])),
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

fn default_user_prompt(current: Option<&str>) -> String {
    match current {
        Some(email) => format!("Select the default user (current: {email})"),
        None => "Select the default user".to_string(),
    }
}
