// Repository flows: register, list, re-scan packages and delete.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use crate::client::ApiClient;
use crate::commands::{
    report_failure, report_success, report_warning, resolve_repo, select_repo_name, spinner,
};
use crate::config::auth::AuthStore;
use crate::error::DepwatchError;
use crate::models::{Package, Repo};

/// Register a repository, optionally subscribing the default user's own
/// email in the same run.
pub fn create(api: &ApiClient, store: &AuthStore, url: &str) -> Result<()> {
    let add_yourself = Confirm::new()
        .with_prompt("Add your own email as a subscriber?")
        .default(true)
        .interact()?;

    let progress = spinner("Creating repository...");
    let result = api.create_repository(url);
    progress.finish_and_clear();

    let body = match result {
        Ok(body) => body,
        Err(e) => {
            report_failure(&e.to_string());
            return Ok(());
        }
    };
    report_success(&body.message);

    if !add_yourself {
        return Ok(());
    }

    let repo_id = match body.data.id {
        Some(id) => id,
        None => {
            report_failure("Repository id missing from response");
            return Ok(());
        }
    };
    let email = match store.default_email() {
        Ok(email) => email,
        Err(DepwatchError::NoDefaultUser) => {
            report_warning("No default user set. Run `depwatch use` to pick one.");
            return Ok(());
        }
        Err(e) => {
            report_failure(&e.to_string());
            return Ok(());
        }
    };

    let progress = spinner("Adding subscriber...");
    let result = api.create_subscriber(&repo_id, &email);
    progress.finish_and_clear();

    match result {
        Ok(body) => report_success(&body.message),
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

pub fn list(api: &ApiClient) -> Result<()> {
    let progress = spinner("Fetching repositories...");
    let result = api.find_all_repositories();
    progress.finish_and_clear();

    match result {
        Ok(body) => {
            let repos = body.data.unwrap_or_default();
            if repos.is_empty() {
                report_warning("No repositories registered yet.");
                return Ok(());
            }
            for repo in &repos {
                println!("{}", repo.name);
            }
            report_success(&body.message);
        }
        Err(e) => report_failure(&e.to_string()),
    }
    Ok(())
}

/// Re-scan the chosen repository's manifest and print its packages with
/// current and latest versions.
pub fn update(api: &ApiClient) -> Result<()> {
    let progress = spinner("Fetching repositories...");
    let result = api.find_all_repositories();
    progress.finish_and_clear();

    let repos = match result {
        Ok(body) => body.data.unwrap_or_default(),
        Err(e) => {
            report_failure(&e.to_string());
            return Ok(());
        }
    };
    if repos.is_empty() {
        report_warning("No repositories registered yet.");
        return Ok(());
    }

    let name = select_repo_name(&repos, "Select the repository to update")?;
    let repo_id = match resolve_repo(&repos, &name).and_then(|repo| repo.id.as_deref()) {
        Some(id) => id,
        None => {
            report_failure("Undefined repository");
            return Ok(());
        }
    };

    let progress = spinner("Updating packages...");
    let result = api.update_repository_packages(repo_id);
    progress.finish_and_clear();

    let body = match result {
        Ok(body) => body,
        Err(e) => {
            report_failure(&e.to_string());
            return Ok(());
        }
    };

    let packages = body.data.package_list.unwrap_or_default();
    if packages.is_empty() {
        report_warning("There are no packages in this repository.");
        return Ok(());
    }
    for package in &packages {
        print_package(package);
    }
    Ok(())
}

pub fn delete(api: &ApiClient) -> Result<()> {
    let progress = spinner("Fetching repositories...");
    let result = api.find_all_repositories();
    progress.finish_and_clear();

    let (repos, message) = match result {
        Ok(body) => (body.data.unwrap_or_default(), body.message),
        Err(e) => {
            report_failure(&e.to_string());
            return Ok(());
        }
    };
    if repos.is_empty() {
        report_warning("No repositories registered yet.");
        return Ok(());
    }
    report_success(&message);

    let name = select_repo_name(&repos, "Select the repository to delete")?;
    delete_chosen(api, &repos, &name);
    Ok(())
}

/// Resolve the picked name back to its id and delete. When the name no
/// longer matches anything in the fetched list, reports the undefined
/// repository and sends no request.
fn delete_chosen(api: &ApiClient, repos: &[Repo], name: &str) {
    let repo_id = match resolve_repo(repos, name).and_then(|repo| repo.id.as_deref()) {
        Some(id) => id,
        None => {
            report_failure("Undefined repository");
            return;
        }
    };

    let progress = spinner("Deleting repository...");
    let result = api.delete_repository(repo_id);
    progress.finish_and_clear();

    match result {
        Ok(body) => report_success(&body.message),
        Err(e) => report_failure(&e.to_string()),
    }
}

/// One line per package: current and latest version, then the name.
/// Outdated packages switch to red so they stand out in the list.
fn print_package(package: &Package) {
    let mut name = package.name.bright_white();
    let mut current = package.version.current.green();
    let last = package.version.last.blue();

    if package.is_outdated {
        name = package.name.on_red();
        current = package.version.current.red();
    }

    println!("{} • {} - {}", current, last, name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::auth::AuthStore;
    use mockito::Matcher;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn client_for(server: &mockito::Server, dir: &TempDir) -> ApiClient {
        let path = dir.path().join("auth.json");
        fs::write(&path, "{}").unwrap();
        ApiClient::new(server.url(), AuthStore::with_path(path)).unwrap()
    }

    fn repo(name: &str) -> Repo {
        Repo {
            id: Some(format!("id-{name}")),
            user_id: "u1".to_string(),
            name: name.to_string(),
            owner: "octocat".to_string(),
            path: format!("octocat/{name}"),
            provider: "github".to_string(),
            package_list: None,
        }
    }

    #[test]
    fn test_delete_chosen_sends_resolved_id() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("DELETE", "/api/repository")
            .match_body(Matcher::Json(json!({ "id": "id-beta" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "message": "Repository has been deleted", "status": 200, "data": null }"#)
            .create();

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        delete_chosen(&client, &[repo("alpha"), repo("beta")], "beta");
        mock.assert();
    }

    #[test]
    fn test_delete_chosen_stale_name_sends_no_request() {
        let mut server = mockito::Server::new();
        let mock = server.mock("DELETE", "/api/repository").expect(0).create();

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        delete_chosen(&client, &[repo("alpha")], "gone");
        mock.assert();
    }
}
