use super::create_poll::PollDraft;
use crate::error::ClientError;
use crate::models::{Poll, User};
use crate::remote::ApiClient;
use tracing::{error, info};

/// Polls authored by the logged-in user, with create and delete.
///
/// Each change is followed by a full refresh from the server.
#[derive(Debug)]
pub struct MyPollsView {
    user: User,
    polls: Vec<Poll>,
    error: Option<String>,
}

impl MyPollsView {
    pub fn new(user: Option<&User>) -> Result<Self, ClientError> {
        let user = user.ok_or(ClientError::NotLoggedIn)?;
        Ok(MyPollsView {
            user: user.clone(),
            polls: Vec::new(),
            error: None,
        })
    }

    pub fn polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ClientError> {
        self.error = None;
        match api.get_polls_by_author(&self.user.username).await {
            Ok(polls) => {
                self.polls = polls;
                Ok(())
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Validates the draft locally first; an invalid draft never reaches the server.
    pub async fn create(&mut self, api: &ApiClient, draft: PollDraft) -> Result<(), ClientError> {
        let poll = match draft.into_new_poll(&self.user) {
            Ok(poll) => poll,
            Err(e) => return Err(self.record(e.into())),
        };

        if let Err(e) = api.add_poll(&poll).await {
            return Err(self.record(e));
        }
        info!("{} created poll {:?}", self.user.username, poll.title);
        self.refresh(api).await
    }

    pub async fn delete(&mut self, api: &ApiClient, title: &str) -> Result<(), ClientError> {
        if let Err(e) = api.delete_poll(title).await {
            return Err(self.record(e));
        }
        info!("{} deleted poll {title:?}", self.user.username);
        self.refresh(api).await
    }

    fn record(&mut self, e: ClientError) -> ClientError {
        error!("My polls of {}: {e}", self.user.username);
        self.error = Some(e.to_string());
        e
    }
}
