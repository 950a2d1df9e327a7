pub mod account;
pub mod create_poll;
pub mod my_polls;
pub mod poll_detail;
pub mod poll_list;
pub mod session;

pub use account::AccountView;
pub use create_poll::{MAX_OPTIONS, MIN_OPTIONS, PollDraft};
pub use my_polls::MyPollsView;
pub use poll_detail::{Controls, PollDetailView, ViewState};
pub use poll_list::PollListView;
