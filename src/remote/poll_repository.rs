use super::client::{ApiClient, error_detail, json_body};
use crate::error::ClientError;
use crate::models::{NewPoll, Poll, PollId, PollSummary};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, warn};

impl ApiClient {
    pub async fn get_all_polls(&self) -> Result<Vec<PollSummary>, ClientError> {
        let url = self.endpoint(&["get_all_polls"])?;
        debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            warn!("Loading polls failed with {}", response.status());
            return Err(ClientError::Status(response.status()));
        }

        let body = json_body(response).await?;
        serde_json::from_value(body)
            .map_err(|e| ClientError::MalformedPollData(format!("poll list: {e}")))
    }

    pub(super) async fn get_poll_by_id(&self, poll_id: &PollId) -> Result<Poll, ClientError> {
        let id = poll_id.to_string();
        let url = self.endpoint(&["get_poll_by_id", &id])?;
        debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            warn!("Poll {poll_id} could not be loaded: {}", response.status());
            return Err(ClientError::NotFound);
        }

        Poll::from_value(json_body(response).await?)
    }

    /// A body that is not a list is read as "no polls".
    pub async fn get_polls_by_author(&self, username: &str) -> Result<Vec<Poll>, ClientError> {
        let url = self.endpoint(&["get_polls_by_author", username])?;
        debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            warn!("Loading polls of {username} failed with {}", response.status());
            return Err(ClientError::Status(response.status()));
        }

        match json_body(response).await? {
            Value::Array(polls) => polls.into_iter().map(Poll::from_value).collect(),
            other => {
                warn!("Expected a list of polls for {username}, got {other}");
                Ok(Vec::new())
            }
        }
    }

    /// Returns the server's copy of the created poll when it sends one back.
    pub async fn add_poll(&self, poll: &NewPoll) -> Result<Option<Poll>, ClientError> {
        let url = self.endpoint(&["add_poll"])?;
        debug!("POST {url} title={:?}", poll.title);

        let response = self.http.post(url).json(poll).send().await?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            warn!("Poll {:?} rejected as duplicate", poll.title);
            return Err(ClientError::DuplicatePoll);
        }
        if !status.is_success() {
            error!("Adding poll {:?} failed with {status}", poll.title);
            return Err(match error_detail(response).await {
                Some(detail) => ClientError::DomainRejection(detail),
                None => ClientError::Status(status),
            });
        }

        match json_body(response).await? {
            Value::Null => Ok(None),
            body => match Poll::from_value(body) {
                Ok(created) => Ok(Some(created)),
                Err(e) => {
                    warn!("Ignoring unexpected add_poll response: {e}");
                    Ok(None)
                }
            },
        }
    }

    pub async fn delete_poll(&self, title: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["delete_poll", title])?;
        debug!("DELETE {url}");

        let response = self.http.delete(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Deleting poll {title:?} failed with {status}");
            return Err(match error_detail(response).await {
                Some(detail) => ClientError::DomainRejection(detail),
                None if status == StatusCode::NOT_FOUND => ClientError::NotFound,
                None => ClientError::Status(status),
            });
        }
        Ok(())
    }
}
