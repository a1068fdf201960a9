// Repository endpoints. The server identifies repositories by id in the
// request body rather than in the path, including for DELETE.

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::DepwatchResult;
use crate::models::{Envelope, Repo};

#[derive(Serialize)]
struct RepoUrlBody<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct RepoIdBody<'a> {
    id: &'a str,
}

impl ApiClient {
    /// Register a repository for monitoring by its web URL.
    pub fn create_repository(&self, url: &str) -> DepwatchResult<Envelope<Repo>> {
        self.execute(self.post("api/repository").json(&RepoUrlBody { url }))
    }

    /// All repositories of the authenticated user. The server sends
    /// `data: null` when there are none.
    pub fn find_all_repositories(&self) -> DepwatchResult<Envelope<Option<Vec<Repo>>>> {
        self.execute(self.get("api/repository"))
    }

    /// Re-scan the repository's manifest and return it with a fresh
    /// package list, versions compared against the registry.
    pub fn update_repository_packages(&self, repo_id: &str) -> DepwatchResult<Envelope<Repo>> {
        self.execute(self.put("api/repository").json(&RepoIdBody { id: repo_id }))
    }

    /// Remove a repository along with its subscribers.
    pub fn delete_repository(&self, repo_id: &str) -> DepwatchResult<Envelope<Value>> {
        self.execute(self.delete("api/repository").json(&RepoIdBody { id: repo_id }))
    }
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

    #[test]
    fn test_create_posts_url_and_returns_repo() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/repository")
            .match_body(Matcher::Json(json!({ "url": "https://github.com/octocat/hello-world" })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "message": "You successfully create an git repository.",
                    "status": 201,
                    "data": {
                        "id": "63f1a2",
                        "userID": "63f1a1",
                        "name": "hello-world",
                        "owner": "octocat",
                        "path": "octocat/hello-world",
                        "provider": "github",
                        "packageList": null
                    }
                }"#,
            )
            .create();

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        let body = client
            .create_repository("https://github.com/octocat/hello-world")
            .unwrap();

        assert_eq!(body.data.id.as_deref(), Some("63f1a2"));
        assert_eq!(body.data.name, "hello-world");
        mock.assert();
    }

    #[test]
    fn test_find_all_parses_repo_list() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/repository")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "message": "All repositories that you have",
                    "status": 200,
                    "data": [
                        { "id": "1", "userID": "u", "name": "alpha", "owner": "o", "path": "o/alpha", "provider": "github" },
                        { "id": "2", "userID": "u", "name": "beta", "owner": "o", "path": "o/beta", "provider": "gitlab" }
                    ]
                }"#,
            )
            .create();

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        let body = client.find_all_repositories().unwrap();

        let names: Vec<String> = body
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|repo| repo.name)
            .collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        mock.assert();
    }

    #[test]
    fn test_update_puts_id_and_parses_packages() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("PUT", "/api/repository")
            .match_body(Matcher::Json(json!({ "id": "63f1a2" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "message": "Packages are updated.",
                    "status": 200,
                    "data": {
                        "id": "63f1a2",
                        "userID": "63f1a1",
                        "name": "hello-world",
                        "owner": "octocat",
                        "path": "octocat/hello-world",
                        "provider": "github",
                        "packageList": [{
                            "name": "left-pad",
                            "version": { "current": "1.0.0", "last": "1.3.0" },
                            "file": "package.json",
                            "isOutdated": true
                        }]
                    }
                }"#,
            )
            .create();

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        let body = client.update_repository_packages("63f1a2").unwrap();

        let packages = body.data.package_list.unwrap();
        assert_eq!(packages.len(), 1);
        assert!(packages[0].is_outdated);
        assert_eq!(packages[0].version.last, "1.3.0");
        mock.assert();
    }

    #[test]
    fn test_delete_sends_id_in_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("DELETE", "/api/repository")
            .match_body(Matcher::Json(json!({ "id": "63f1a2" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "message": "Repository and all subscribers that repository have, has been deleted",
                    "status": 200,
                    "data": null
                }"#,
            )
            .create();

        let dir = TempDir::new().unwrap();
        let client = client_for(&server, &dir);
        let body = client.delete_repository("63f1a2").unwrap();

        assert!(body.message.starts_with("Repository and all subscribers"));
        mock.assert();
    }
}
