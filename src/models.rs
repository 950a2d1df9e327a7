use crate::error::ClientError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Server-assigned poll identifier. The backend may hand out either numbers or strings,
/// so the id is kept in whatever shape it arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PollId {
    Int(i64),
    Text(String),
}

impl fmt::Display for PollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollId::Int(id) => write!(f, "{id}"),
            PollId::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for PollId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(id) => PollId::Int(id),
            Err(_) => PollId::Text(s.to_string()),
        })
    }
}

impl From<i64> for PollId {
    fn from(id: i64) -> Self {
        PollId::Int(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub title: String,
    #[serde(default)]
    pub votes_list_db: Vec<String>,
}

impl PollOption {
    pub fn votes(&self) -> usize {
        self.votes_list_db.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<PollOption>,
}

/// One tallied row of a poll, in the order the server listed the options.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionResult {
    pub title: String,
    pub votes: usize,
    pub percentage: f64,
}

impl Poll {
    /// Parses a server payload, rejecting the shapes the client cannot work with:
    /// a missing `id`, a missing or non-list `fields`, or an option without a `title`.
    pub fn from_value(value: Value) -> Result<Self, ClientError> {
        let Value::Object(mut object) = value else {
            return Err(ClientError::MalformedPollData(
                "poll payload is not an object".to_string(),
            ));
        };

        let id = match object.remove("id") {
            None | Some(Value::Null) => {
                return Err(ClientError::MalformedPollData("poll has no id".to_string()));
            }
            Some(id) => serde_json::from_value::<PollId>(id)
                .map_err(|_| ClientError::MalformedPollData("poll id is not a number or string".to_string()))?,
        };

        let fields = match object.remove("fields") {
            Some(Value::Array(fields)) => fields,
            Some(_) => {
                return Err(ClientError::MalformedPollData(format!(
                    "poll {id} has non-list fields"
                )));
            }
            None => {
                return Err(ClientError::MalformedPollData(format!(
                    "poll {id} has no fields"
                )));
            }
        };

        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| parse_option(&id, index, field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Poll {
            author: take_string(&mut object, "author"),
            title: take_string(&mut object, "title"),
            description: take_string(&mut object, "description"),
            id,
            fields,
        })
    }

    pub fn total_votes(&self) -> usize {
        self.fields.iter().map(PollOption::votes).sum()
    }

    pub fn has_voted(&self, username: &str) -> bool {
        self.selected_option(username).is_some()
    }

    pub fn selected_option(&self, username: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.votes_list_db.iter().any(|voter| voter == username))
            .map(|field| field.title.as_str())
    }

    pub fn results(&self) -> Vec<OptionResult> {
        let total = self.total_votes();

        self.fields
            .iter()
            .map(|field| OptionResult {
                title: field.title.clone(),
                votes: field.votes(),
                percentage: percentage(field.votes(), total),
            })
            .collect()
    }
}

pub fn percentage(votes: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    votes as f64 / total as f64 * 100.0
}

fn parse_option(poll_id: &PollId, index: usize, value: Value) -> Result<PollOption, ClientError> {
    let Value::Object(mut object) = value else {
        return Err(ClientError::MalformedPollData(format!(
            "option {index} of poll {poll_id} is not an object"
        )));
    };

    let title = match object.remove("title") {
        Some(Value::String(title)) => title,
        _ => {
            return Err(ClientError::MalformedPollData(format!(
                "option {index} of poll {poll_id} has no title"
            )));
        }
    };

    let votes_list_db = match object.remove("votes_list_db") {
        None | Some(Value::Null) => Vec::new(),
        Some(votes) => serde_json::from_value(votes).map_err(|_| {
            ClientError::MalformedPollData(format!(
                "votes of option {title:?} in poll {poll_id} are not a list of usernames"
            ))
        })?,
    };

    Ok(PollOption {
        title,
        votes_list_db,
    })
}

fn take_string(object: &mut serde_json::Map<String, Value>, key: &str) -> String {
    match object.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollSummary {
    pub id: PollId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotedPoll {
    pub id: PollId,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "selectedOption", default)]
    pub selected_option: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub registration_date: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        User {
            username: username.into(),
            registration_date: None,
        }
    }

    /// Registration day, when the server sent something starting with `YYYY-MM-DD`.
    pub fn registered_on(&self) -> Option<NaiveDate> {
        let raw = self.registration_date.as_deref()?;
        let day = raw.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Body of `add_poll`: a poll as the author drafted it, without an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoll {
    pub author: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<PollOption>,
}

#[derive(Debug, Serialize)]
pub struct VoteRequest<'a> {
    pub poll_id: &'a PollId,
    pub username: &'a str,
    pub option_title: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CancelVoteRequest<'a> {
    pub poll_id: &'a PollId,
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
