use crate::models::PollSummary;
use crate::remote::ApiClient;
use tracing::error;

/// Front page: every poll on the server.
#[derive(Debug)]
pub struct PollListView {
    polls: Vec<PollSummary>,
    loading: bool,
}

impl PollListView {
    pub fn new() -> Self {
        PollListView {
            polls: Vec::new(),
            loading: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn polls(&self) -> &[PollSummary] {
        &self.polls
    }

    /// A failed load is logged and leaves the list as it was.
    pub async fn load(&mut self, api: &ApiClient) {
        self.loading = true;
        match api.get_all_polls().await {
            Ok(polls) => self.polls = polls,
            Err(e) => error!("Loading the poll list failed: {e}"),
        }
        self.loading = false;
    }
}
