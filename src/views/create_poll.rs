use crate::error::PollFormError;
use crate::models::{NewPoll, PollOption, User};
use std::collections::HashSet;

pub const MAX_OPTIONS: usize = 10;
pub const MIN_OPTIONS: usize = 2;

/// A poll being written by its author. Nothing reaches the server until `validate` passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollDraft {
    pub title: String,
    pub description: String,
    options: Vec<String>,
}

impl PollDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        PollDraft {
            title: title.into(),
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, T>(mut self, options: I) -> Result<Self, PollFormError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for option in options {
            self.add_option(option)?;
        }
        Ok(self)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn add_option(&mut self, title: impl Into<String>) -> Result<(), PollFormError> {
        if self.options.len() >= MAX_OPTIONS {
            return Err(PollFormError::TooManyOptions { max: MAX_OPTIONS });
        }
        self.options.push(title.into());
        Ok(())
    }

    pub fn set_option(&mut self, index: usize, title: impl Into<String>) {
        if let Some(option) = self.options.get_mut(index) {
            *option = title.into();
        }
    }

    pub fn remove_option(&mut self, index: usize) -> Option<String> {
        (index < self.options.len()).then(|| self.options.remove(index))
    }

    pub fn validate(&self) -> Result<(), PollFormError> {
        if self.title.trim().is_empty() {
            return Err(PollFormError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(PollFormError::EmptyDescription);
        }
        if self.options.len() > MAX_OPTIONS {
            return Err(PollFormError::TooManyOptions { max: MAX_OPTIONS });
        }
        if self.options.len() < MIN_OPTIONS {
            return Err(PollFormError::TooFewOptions { min: MIN_OPTIONS });
        }
        if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(PollFormError::EmptyOption { index });
        }

        let mut seen = HashSet::new();
        if !self.options.iter().all(|o| seen.insert(o.to_lowercase())) {
            return Err(PollFormError::DuplicateOptions);
        }
        Ok(())
    }

    pub fn into_new_poll(self, author: &User) -> Result<NewPoll, PollFormError> {
        self.validate()?;
        Ok(NewPoll {
            author: author.username.clone(),
            title: self.title,
            description: self.description,
            fields: self
                .options
                .into_iter()
                .map(|title| PollOption {
                    title,
                    votes_list_db: Vec::new(),
                })
                .collect(),
        })
    }
}
