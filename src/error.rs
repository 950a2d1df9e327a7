use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollFormError {
    #[error("Poll title is required")]
    EmptyTitle,
    #[error("Poll description is required")]
    EmptyDescription,
    #[error("Option {index} has no title")]
    EmptyOption { index: usize },
    #[error("A poll needs at least {min} options")]
    TooFewOptions { min: usize },
    #[error("A poll can have at most {max} options")]
    TooManyOptions { max: usize },
    #[error("Poll options must not repeat")]
    DuplicateOptions,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Not found")]
    NotFound,
    #[error("Request failed with status {0}")]
    Status(StatusCode),
    #[error("{0}")]
    DomainRejection(String),
    #[error("{0}")]
    VoteRejected(String),
    #[error("{0}")]
    CancelRejected(String),
    #[error("A poll with this title already exists")]
    DuplicatePoll,
    #[error("{0}")]
    UsernameTaken(String),
    #[error("Malformed poll data: {0}")]
    MalformedPollData(String),
    #[error(transparent)]
    InvalidPoll(#[from] PollFormError),
    #[error("You need to log in first")]
    NotLoggedIn,
    #[error("Poll is not loaded yet")]
    NotLoaded,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True for failures the server reported as a business rule.
    pub fn is_domain_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::DomainRejection(_)
                | ClientError::VoteRejected(_)
                | ClientError::CancelRejected(_)
                | ClientError::DuplicatePoll
                | ClientError::UsernameTaken(_)
        )
    }
}
