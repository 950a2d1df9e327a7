pub mod client;
mod poll_repository;
mod user_repository;
mod vote_repository;

pub use client::ApiClient;

use crate::error::ClientError;
use crate::models::{Poll, PollId};

/// The three poll operations the vote view depends on.
#[allow(async_fn_in_trait)]
pub trait PollStore {
    async fn fetch_poll(&self, poll_id: &PollId) -> Result<Poll, ClientError>;

    /// The server decides whether the vote is allowed; nothing is checked here.
    async fn cast_vote(
        &self,
        poll_id: &PollId,
        username: &str,
        option_title: &str,
    ) -> Result<Poll, ClientError>;

    /// Does not return the updated poll; callers re-fetch.
    async fn cancel_vote(&self, poll_id: &PollId, username: &str) -> Result<(), ClientError>;
}

impl PollStore for ApiClient {
    async fn fetch_poll(&self, poll_id: &PollId) -> Result<Poll, ClientError> {
        self.get_poll_by_id(poll_id).await
    }

    async fn cast_vote(
        &self,
        poll_id: &PollId,
        username: &str,
        option_title: &str,
    ) -> Result<Poll, ClientError> {
        self.post_vote(poll_id, username, option_title).await
    }

    async fn cancel_vote(&self, poll_id: &PollId, username: &str) -> Result<(), ClientError> {
        self.post_cancel_vote(poll_id, username).await
    }
}
