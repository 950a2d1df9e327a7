use crate::error::ClientError;
use crate::models::User;
use crate::storage::KeyValueStore;
use tracing::{info, warn};

pub const USER_STORAGE_KEY: &str = "user";

/// The logged-in user, shared with every view that needs one.
///
/// Built once at startup from storage; afterwards only `login` and `logout` change it.
pub struct AuthContext<S: KeyValueStore> {
    storage: S,
    user: Option<User>,
}

impl<S: KeyValueStore> AuthContext<S> {
    pub fn restore(storage: S) -> Result<Self, ClientError> {
        let user = match storage.get(USER_STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    info!("Restored session for {}", user.username);
                    Some(user)
                }
                Err(e) => {
                    warn!("Discarding unreadable saved user: {e}");
                    None
                }
            },
            None => None,
        };

        Ok(AuthContext { storage, user })
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn login(&mut self, user: User) -> Result<(), ClientError> {
        let raw = serde_json::to_string(&user)?;
        self.storage.set(USER_STORAGE_KEY, &raw)?;
        info!("Logged in as {}", user.username);
        self.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        self.storage.remove(USER_STORAGE_KEY)?;
        if let Some(user) = self.user.take() {
            info!("Logged out {}", user.username);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    fn test_starts_logged_out() {
        let auth = AuthContext::restore(MemoryStore::default()).unwrap();

        assert!(auth.user().is_none());
        assert!(!auth.is_logged_in());
    }

    #[rstest]
    fn test_login_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let user = User {
            username: "alice".to_string(),
            registration_date: Some("2024-01-02".to_string()),
        };

        let mut auth = AuthContext::restore(FileStore::new(&path)).unwrap();
        auth.login(user.clone()).unwrap();
        drop(auth);

        let restored = AuthContext::restore(FileStore::new(&path)).unwrap();
        assert_eq!(restored.user(), Some(&user));
    }

    #[rstest]
    fn test_logout_clears_storage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        let mut auth = AuthContext::restore(FileStore::new(&path)).unwrap();
        auth.login(User::new("bob")).unwrap();
        auth.logout().unwrap();
        assert!(auth.user().is_none());

        let restored = AuthContext::restore(FileStore::new(&path)).unwrap();
        assert!(restored.user().is_none());
    }

    #[rstest]
    fn test_corrupt_saved_user_is_dropped() {
        let mut storage = MemoryStore::default();
        storage.set(USER_STORAGE_KEY, "{not json").unwrap();

        let auth = AuthContext::restore(storage).unwrap();

        assert!(auth.user().is_none());
    }
}
