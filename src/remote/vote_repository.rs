use super::client::{ApiClient, error_detail, json_body};
use crate::error::ClientError;
use crate::models::{CancelVoteRequest, Poll, PollId, VoteRequest, VotedPoll};
use serde_json::Value;
use tracing::{debug, warn};

const VOTE_FAILED: &str = "Voting failed";
const CANCEL_FAILED: &str = "Cancelling the vote failed";

impl ApiClient {
    pub(super) async fn post_vote(
        &self,
        poll_id: &PollId,
        username: &str,
        option_title: &str,
    ) -> Result<Poll, ClientError> {
        let url = self.endpoint(&["vote"])?;
        debug!("POST {url} poll={poll_id} user={username} option={option_title:?}");

        let body = VoteRequest {
            poll_id,
            username,
            option_title,
        };
        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();

        if status.is_client_error() {
            let reason = error_detail(response)
                .await
                .unwrap_or_else(|| VOTE_FAILED.to_string());
            warn!("Vote of {username} on poll {poll_id} rejected: {reason}");
            return Err(ClientError::VoteRejected(reason));
        }
        if !status.is_success() {
            warn!("Vote of {username} on poll {poll_id} failed with {status}");
            return Err(match error_detail(response).await {
                Some(detail) => ClientError::DomainRejection(detail),
                None => ClientError::Status(status),
            });
        }

        match json_body(response).await? {
            Value::Object(mut body) => match body.remove("poll") {
                Some(poll) => Poll::from_value(poll),
                None => Err(ClientError::MalformedPollData(
                    "vote response has no poll".to_string(),
                )),
            },
            _ => Err(ClientError::MalformedPollData(
                "vote response is not an object".to_string(),
            )),
        }
    }

    pub(super) async fn post_cancel_vote(
        &self,
        poll_id: &PollId,
        username: &str,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["cancel_vote"])?;
        debug!("POST {url} poll={poll_id} user={username}");

        let body = CancelVoteRequest { poll_id, username };
        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();

        if status.is_client_error() {
            let reason = error_detail(response)
                .await
                .unwrap_or_else(|| CANCEL_FAILED.to_string());
            warn!("Cancelling vote of {username} on poll {poll_id} rejected: {reason}");
            return Err(ClientError::CancelRejected(reason));
        }
        if !status.is_success() {
            warn!("Cancelling vote of {username} on poll {poll_id} failed with {status}");
            return Err(match error_detail(response).await {
                Some(detail) => ClientError::DomainRejection(detail),
                None => ClientError::Status(status),
            });
        }
        Ok(())
    }

    pub async fn get_voted_polls(&self, username: &str) -> Result<Vec<VotedPoll>, ClientError> {
        let url = self.endpoint(&["get_voted_polls", username])?;
        debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            warn!("Loading voted polls of {username} failed with {}", response.status());
            return Err(ClientError::Status(response.status()));
        }

        let body = json_body(response).await?;
        serde_json::from_value(body)
            .map_err(|e| ClientError::MalformedPollData(format!("voted polls: {e}")))
    }
}
