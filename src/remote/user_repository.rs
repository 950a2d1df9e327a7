use super::client::{ApiClient, error_detail, json_body};
use crate::error::ClientError;
use crate::models::{Credentials, User};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

const USERNAME_TAKEN: &str = "This username is already taken";
const LOGIN_FAILED: &str = "Invalid username or password";

impl ApiClient {
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["register"])?;
        debug!("POST {url} user={username}");

        let response = self
            .http
            .post(url)
            .json(&Credentials { username, password })
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            let reason = error_detail(response)
                .await
                .unwrap_or_else(|| USERNAME_TAKEN.to_string());
            warn!("Registration of {username} rejected: {reason}");
            return Err(ClientError::UsernameTaken(reason));
        }
        if !status.is_success() {
            warn!("Registration of {username} failed with {status}");
            return Err(match error_detail(response).await {
                Some(detail) => ClientError::DomainRejection(detail),
                None => ClientError::Status(status),
            });
        }

        info!("Registered {username}");
        Ok(())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let url = self.endpoint(&["login"])?;
        debug!("POST {url} user={username}");

        let response = self
            .http
            .post(url)
            .json(&Credentials { username, password })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Login of {username} failed with {status}");
            return Err(match error_detail(response).await {
                Some(detail) => ClientError::DomainRejection(detail),
                None if status.is_client_error() => {
                    ClientError::DomainRejection(LOGIN_FAILED.to_string())
                }
                None => ClientError::Status(status),
            });
        }

        let body = json_body(response).await?;
        let user: User = serde_json::from_value(body)?;
        info!("Logged in {}", user.username);
        Ok(user)
    }
}
