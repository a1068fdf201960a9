// Subscriber flows. Every one of them starts from a repository pick,
// since subscribers only exist in the context of one repository.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use crate::client::ApiClient;
use crate::commands::{
    report_failure, report_success, report_warning, resolve_repo, select_repo_name, spinner,
};
use crate::models::{Repo, Subscriber};
use crate::validation::require_valid_email;

pub fn add(api: &ApiClient) -> Result<()> {
    let (repos, message) = match fetch_repos(api) {
        Some(found) => found,
        None => return Ok(()),
    };
    report_success(&message);

    let name = select_repo_name(&repos, "Select the repository to add a subscriber to")?;
    let repo_id = match resolve_repo(&repos, &name).and_then(|repo| repo.id.as_deref()) {
        Some(id) => id,
        None => {
            report_failure("Undefined repository");
            return Ok(());
        }
    };
    let email: String = Input::new()
        .with_prompt("Email")
        .validate_with(|input: &String| require_valid_email(input))
        .interact_text()?;

    let progress = spinner("Adding subscriber...");
    let result = api.create_subscriber(repo_id, &email);
    progress.finish_and_clear();

    match result {
        Ok(body) => report_success(&body.message),
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

/// List a repository's subscribers, confirmed ones in green and the rest
/// in red.
pub fn list(api: &ApiClient) -> Result<()> {
    let (repos, message) = match fetch_repos(api) {
        Some(found) => found,
        None => return Ok(()),
    };
    report_success(&message);

    let name = select_repo_name(&repos, "Select the repository to list subscribers for")?;
    let repo_id = match resolve_repo(&repos, &name).and_then(|repo| repo.id.as_deref()) {
        Some(id) => id,
        None => {
            report_failure("Undefined repository");
            return Ok(());
        }
    };

    let (subscribers, message) = match fetch_subscribers(api, repo_id) {
        Some(found) => found,
        None => return Ok(()),
    };
    report_success(&message);
    for subscriber in &subscribers {
        let email = if subscriber.is_confirmed {
            subscriber.email.green()
        } else {
            subscriber.email.red()
        };
        println!("{}", email);
    }
    Ok(())
}

pub fn remove(api: &ApiClient) -> Result<()> {
    let (repos, message) = match fetch_repos(api) {
        Some(found) => found,
        None => return Ok(()),
    };
    report_success(&message);

    let name = select_repo_name(&repos, "Select the repository to remove a subscriber from")?;
    let repo_id = match resolve_repo(&repos, &name).and_then(|repo| repo.id.as_deref()) {
        Some(id) => id,
        None => {
            report_failure("Undefined repository");
            return Ok(());
        }
    };

    let (subscribers, message) = match fetch_subscribers(api, repo_id) {
        Some(found) => found,
        None => return Ok(()),
    };
    report_success(&message);

    let emails: Vec<&str> = subscribers
        .iter()
        .map(|subscriber| subscriber.email.as_str())
        .collect();
    let index = Select::new()
        .with_prompt("Select the subscriber to remove")
        .items(&emails)
        .default(0)
        .interact()?;

    let confirmed = Confirm::new()
        .with_prompt(format!("Remove {} from {}?", emails[index], name))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }

    let subscriber_id = match subscribers[index].id.as_deref() {
        Some(id) => id,
        None => {
            report_failure("Undefined subscriber");
            return Ok(());
        }
    };

    let progress = spinner("Removing subscriber...");
    let result = api.delete_subscriber(subscriber_id);
    progress.finish_and_clear();

    match result {
        Ok(body) => report_success(&body.message),
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

/// Re-send the confirmation mail to one of the repository's unconfirmed
/// subscribers.
pub fn send(api: &ApiClient) -> Result<()> {
    let (repos, message) = match fetch_repos(api) {
        Some(found) => found,
        None => return Ok(()),
    };
    report_success(&message);

    let name = select_repo_name(&repos, "Select the repository")?;
    let repo_id = match resolve_repo(&repos, &name).and_then(|repo| repo.id.as_deref()) {
        Some(id) => id,
        None => {
            report_failure("Undefined repository");
            return Ok(());
        }
    };

    let (subscribers, message) = match fetch_subscribers(api, repo_id) {
        Some(found) => found,
        None => return Ok(()),
    };
    report_success(&message);
    let pending = unconfirmed(&subscribers);
    if pending.is_empty() {
        report_warning("There are no unconfirmed subscribers in this repository.");
        return Ok(());
    }

    let emails: Vec<&str> = pending
        .iter()
        .map(|subscriber| subscriber.email.as_str())
        .collect();
    let index = Select::new()
        .with_prompt("Select the subscriber")
        .items(&emails)
        .default(0)
        .interact()?;

    let progress = spinner("Sending confirmation mail...");
    let result = api.send_mail_to_subscriber(repo_id, emails[index]);
    progress.finish_and_clear();

    match result {
        Ok(body) => report_success(&body.message),
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

/// Fetch the user's repositories, reporting and returning `None` when the
/// call fails or there is nothing to pick from.
fn fetch_repos(api: &ApiClient) -> Option<(Vec<Repo>, String)> {
    let progress = spinner("Fetching repositories...");
    let result = api.find_all_repositories();
    progress.finish_and_clear();

    match result {
        Ok(body) => {
            let repos = body.data.unwrap_or_default();
            if repos.is_empty() {
                report_warning("No repositories registered yet.");
                return None;
            }
            Some((repos, body.message))
        }
        Err(e) => {
            report_failure(&e.to_string());
            None
        }
    }
}

/// Fetch a repository's subscribers, reporting and returning `None` when
/// the call fails or the repository has none.
fn fetch_subscribers(api: &ApiClient, repo_id: &str) -> Option<(Vec<Subscriber>, String)> {
    let progress = spinner("Fetching subscribers...");
    let result = api.find_all_subscribers(repo_id);
    progress.finish_and_clear();

    match result {
        Ok(body) => {
            let subscribers = body.data.unwrap_or_default();
            if subscribers.is_empty() {
                report_warning("This repository has no subscribers.");
                return None;
            }
            Some((subscribers, body.message))
        }
        Err(e) => {
            report_failure(&e.to_string());
            None
        }
    }
}

fn unconfirmed(subscribers: &[Subscriber]) -> Vec<&Subscriber> {
    subscribers
        .iter()
        .filter(|subscriber| !subscriber.is_confirmed)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscriber(email: &str, is_confirmed: bool) -> Subscriber {
        Subscriber {
            id: Some(format!("id-{email}")),
            repo_id: "63f1a2".to_string(),
            email: email.to_string(),
            is_confirmed,
            notify: None,
        }
    }

    #[test]
    fn test_unconfirmed_keeps_only_pending() {
        let subscribers = vec![
            subscriber("a@example.com", true),
            subscriber("b@example.com", false),
            subscriber("c@example.com", false),
        ];
        let pending = unconfirmed(&subscribers);
        let emails: Vec<&str> = pending.iter().map(|s| s.email.as_str()).collect();
        assert_eq!(emails, vec!["b@example.com", "c@example.com"]);
    }

    #[test]
    fn test_unconfirmed_empty_when_all_confirmed() {
        let subscribers = vec![subscriber("a@example.com", true)];
        assert!(unconfirmed(&subscribers).is_empty());
    }
}
