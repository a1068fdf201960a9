// Command implementations. Each command drives prompts, a spinner and one
// or more API calls. Service and store errors are reported on the spot
// rather than propagated; only prompt I/O failures bubble up.

use std::time::Duration;

use colored::Colorize;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};

use crate::models::Repo;

pub mod auth;
pub mod repo;
pub mod subscriber;

/// Spinner shown while a request is in flight. The steady tick keeps it
/// animating even though the calling thread is blocked on the response.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(message.to_string());
    spinner
}

pub(crate) fn report_success(message: &str) {
    println!("{} {}", "✔".green(), message);
}

pub(crate) fn report_failure(message: &str) {
    eprintln!("{} {}", "✖".red(), message);
}

pub(crate) fn report_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Ask the user to pick one of `repos` by name.
pub(crate) fn select_repo_name(repos: &[Repo], prompt: &str) -> anyhow::Result<String> {
    let names: Vec<&str> = repos.iter().map(|repo| repo.name.as_str()).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact()?;
    Ok(names[index].to_string())
}

/// Find the repository the user picked. Returns `None` when the name no
/// longer matches anything, which callers report as an undefined
/// repository.
pub(crate) fn resolve_repo<'a>(repos: &'a [Repo], name: &str) -> Option<&'a Repo> {
    repos.iter().find(|repo| repo.name == name)
}
