//! Client for the polldance polling service: poll model, HTTP store, vote view-state
//! machine and the screens of the client built on top of them.

pub mod auth;
pub mod banner;
pub mod config;
pub mod error;
pub mod models;
pub mod remote;
pub mod render;
pub mod storage;
pub mod views;

pub use auth::AuthContext;
pub use config::Config;
pub use error::{ClientError, PollFormError};
pub use models::{Poll, PollId, PollOption, User};
pub use remote::{ApiClient, PollStore};
