// Authentication endpoints. Credentials travel in the body; the server
// answers with a token pair plus the user's profile.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::DepwatchResult;
use crate::models::{AuthPayload, Envelope};

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    pub fn login(&self, email: &str, password: &str) -> DepwatchResult<Envelope<AuthPayload>> {
        self.execute(self.post("auth/login").json(&LoginBody { email, password }))
    }

    pub fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DepwatchResult<Envelope<AuthPayload>> {
        self.execute(self.post("auth/signup").json(&SignupBody {
            name,
            email,
            password,
        }))
    }
}
