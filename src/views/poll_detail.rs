use crate::banner::ErrorBanner;
use crate::error::ClientError;
use crate::models::{OptionResult, Poll, PollId, User};
use crate::remote::PollStore;
use tracing::{error, info};

pub const LOGIN_TO_VOTE: &str = "You need to log in or register to vote in this poll";

#[derive(Debug)]
pub enum ViewState {
    Loading,
    Loaded(Poll),
    LoadFailed(ClientError),
}

/// What the user may do with the poll right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Controls {
    /// One vote button per option, in display order.
    VoteButtons(Vec<String>),
    CancelVote,
    Hidden,
}

/// Detail page of one poll: results, vote buttons and the cancel-vote control.
///
/// Every mutation is followed by replacing the held poll with the server's copy.
pub struct PollDetailView<S: PollStore> {
    store: S,
    poll_id: PollId,
    state: ViewState,
    banner: ErrorBanner,
}

impl<S: PollStore> PollDetailView<S> {
    pub fn new(store: S, poll_id: PollId) -> Self {
        PollDetailView {
            store,
            poll_id,
            state: ViewState::Loading,
            banner: ErrorBanner::new(),
        }
    }

    pub fn poll_id(&self) -> &PollId {
        &self.poll_id
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn poll(&self) -> Option<&Poll> {
        match &self.state {
            ViewState::Loaded(poll) => Some(poll),
            _ => None,
        }
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn banner_mut(&mut self) -> &mut ErrorBanner {
        &mut self.banner
    }

    pub async fn load(&mut self) -> &ViewState {
        match self.store.fetch_poll(&self.poll_id).await {
            Ok(poll) => self.state = ViewState::Loaded(poll),
            Err(e) => {
                error!("Loading poll {} failed: {e}", self.poll_id);
                if self.poll().is_some() {
                    self.banner.show(e.to_string());
                } else {
                    self.state = ViewState::LoadFailed(e);
                }
            }
        }
        &self.state
    }

    pub fn has_voted(&self, user: Option<&User>) -> bool {
        match (self.poll(), user) {
            (Some(poll), Some(user)) => poll.has_voted(&user.username),
            _ => false,
        }
    }

    pub fn controls(&self, user: Option<&User>) -> Controls {
        let Some(poll) = self.poll() else {
            return Controls::Hidden;
        };
        if self.has_voted(user) {
            Controls::CancelVote
        } else {
            Controls::VoteButtons(poll.fields.iter().map(|f| f.title.clone()).collect())
        }
    }

    pub fn results(&self) -> Vec<OptionResult> {
        self.poll().map(Poll::results).unwrap_or_default()
    }

    pub async fn select_option(
        &mut self,
        user: Option<&User>,
        option_title: &str,
    ) -> Result<(), ClientError> {
        let Some(user) = user else {
            self.banner.show(LOGIN_TO_VOTE);
            return Err(ClientError::NotLoggedIn);
        };
        if self.poll().is_none() {
            return Err(ClientError::NotLoaded);
        }

        match self
            .store
            .cast_vote(&self.poll_id, &user.username, option_title)
            .await
        {
            Ok(poll) => {
                info!("{} voted for {option_title:?} in poll {}", user.username, self.poll_id);
                self.state = ViewState::Loaded(poll);
                Ok(())
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    pub async fn cancel_vote(&mut self, user: Option<&User>) -> Result<(), ClientError> {
        let Some(user) = user else {
            self.banner.show(LOGIN_TO_VOTE);
            return Err(ClientError::NotLoggedIn);
        };
        if self.poll().is_none() {
            return Err(ClientError::NotLoaded);
        }

        if let Err(e) = self.store.cancel_vote(&self.poll_id, &user.username).await {
            return Err(self.surface(e));
        }
        match self.store.fetch_poll(&self.poll_id).await {
            Ok(poll) => {
                info!("{} cancelled their vote in poll {}", user.username, self.poll_id);
                self.state = ViewState::Loaded(poll);
                Ok(())
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    fn surface(&mut self, e: ClientError) -> ClientError {
        error!("Poll {}: {e}", self.poll_id);
        self.banner.show(e.to_string());
        e
    }
}
