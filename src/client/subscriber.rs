// Subscriber endpoints. Listing is a POST because the repository id
// travels in the request body.

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::DepwatchResult;
use crate::models::{Envelope, Subscriber};

#[derive(Serialize)]
struct SubscriberBody<'a> {
    #[serde(rename = "repoID")]
    repo_id: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct SubscriberIdBody<'a> {
    id: &'a str,
}

impl ApiClient {
    /// Subscribe an email address to a repository. The server sends the
    /// confirmation mail as part of this call.
    pub fn create_subscriber(&self, repo_id: &str, email: &str) -> DepwatchResult<Envelope<Subscriber>> {
        self.execute(self.post("api/subscriber").json(&SubscriberBody { repo_id, email }))
    }

    /// All subscribers of one repository, or `data: null` when it has none.
    pub fn find_all_subscribers(
        &self,
        repo_id: &str,
    ) -> DepwatchResult<Envelope<Option<Vec<Subscriber>>>> {
        self.execute(self.post("api/subscriber/all").json(&SubscriberIdBody { id: repo_id }))
    }

    pub fn delete_subscriber(&self, subscriber_id: &str) -> DepwatchResult<Envelope<Value>> {
        self.execute(self.delete("api/subscriber").json(&SubscriberIdBody { id: subscriber_id }))
    }

    /// Re-send the confirmation mail to an unconfirmed subscriber.
    pub fn send_mail_to_subscriber(&self, repo_id: &str, email: &str) -> DepwatchResult<Envelope<Value>> {
        self.execute(self.post("api/subscriber/send").json(&SubscriberBody { repo_id, email }))
    }
}
