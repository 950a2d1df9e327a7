use crate::auth::AuthContext;
use crate::error::ClientError;
use crate::models::User;
use crate::remote::ApiClient;
use crate::storage::KeyValueStore;

fn require_credentials(username: &str, password: &str) -> Result<(), ClientError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ClientError::DomainRejection(
            "Username and password are required".to_string(),
        ));
    }
    Ok(())
}

pub async fn register(api: &ApiClient, username: &str, password: &str) -> Result<(), ClientError> {
    require_credentials(username, password)?;
    api.register(username, password).await
}

/// Logs in against the server and remembers the user in the auth context.
pub async fn login<S: KeyValueStore>(
    api: &ApiClient,
    auth: &mut AuthContext<S>,
    username: &str,
    password: &str,
) -> Result<User, ClientError> {
    require_credentials(username, password)?;
    let user = api.login(username, password).await?;
    auth.login(user.clone())?;
    Ok(user)
}

pub fn logout<S: KeyValueStore>(auth: &mut AuthContext<S>) -> Result<(), ClientError> {
    auth.logout()
}
