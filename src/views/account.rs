use crate::error::ClientError;
use crate::models::{User, VotedPoll};
use crate::remote::ApiClient;
use tracing::error;

/// The user's own page: who they are and which polls they voted in.
#[derive(Debug)]
pub struct AccountView {
    user: User,
    voted_polls: Vec<VotedPoll>,
}

impl AccountView {
    pub fn new(user: Option<&User>) -> Result<Self, ClientError> {
        let user = user.ok_or(ClientError::NotLoggedIn)?;
        Ok(AccountView {
            user: user.clone(),
            voted_polls: Vec::new(),
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn voted_polls(&self) -> &[VotedPoll] {
        &self.voted_polls
    }

    pub async fn load(&mut self, api: &ApiClient) {
        match api.get_voted_polls(&self.user.username).await {
            Ok(polls) => self.voted_polls = polls,
            Err(e) => error!("Loading voted polls of {} failed: {e}", self.user.username),
        }
    }
}
