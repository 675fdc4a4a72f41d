//! Authenticated Session
//!
//! The logged-in identity, mirrored to a key-value store under two keys:
//! `user` (JSON) and `accessToken`. A session is created explicitly at
//! startup from whatever the store holds and torn down by `logout` or by a
//! 401 from any service.

use crate::storage::{KeyValueStorage, StorageResult};

use super::types::AuthenticatedUser;

/// Storage key holding the user as JSON
pub const USER_KEY: &str = "user";

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "accessToken";

/// Where the app sends the user once credentials are gone
pub const LOGIN_ROUTE: &str = "/login";

/// Session state over a key-value store
#[derive(Debug)]
pub struct Session<S: KeyValueStorage> {
    storage: S,
    user: Option<AuthenticatedUser>,
}

impl<S: KeyValueStorage> Session<S> {
    /// Restore the session from storage
    ///
    /// A user is restored only when both keys are present and the user JSON
    /// parses. Read failures leave the session logged out.
    pub fn restore(storage: S) -> Self {
        let user = match read_user(&storage) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Could not restore session");
                None
            }
        };

        if let Some(user) = &user {
            tracing::debug!(username = %user.username, "Session restored");
        }

        Self { storage, user }
    }

    /// Record a successful login
    pub fn login(&mut self, user: AuthenticatedUser, token: &str) -> StorageResult<()> {
        let json = serde_json::to_string(&user)?;
        self.storage.set(USER_KEY, &json)?;
        self.storage.set(TOKEN_KEY, token)?;

        tracing::info!(username = %user.username, "Logged in");
        self.user = Some(user);
        Ok(())
    }

    /// Forget the user and both stored keys
    pub fn logout(&mut self) -> StorageResult<()> {
        if let Some(user) = self.user.take() {
            tracing::info!(username = %user.username, "Logged out");
        }
        clear_credentials(&self.storage)
    }

    /// Logged in: a user in memory and a token in storage
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token().is_some()
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        self.user.as_ref()
    }

    /// Stored bearer token, if any
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).ok().flatten()
    }

    /// Re-read storage, picking up a logout done elsewhere (e.g. after a 401)
    pub fn reload(&mut self) {
        self.user = read_user(&self.storage).unwrap_or(None);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Remove both credential keys
pub fn clear_credentials<S: KeyValueStorage + ?Sized>(storage: &S) -> StorageResult<()> {
    storage.remove(USER_KEY)?;
    storage.remove(TOKEN_KEY)?;
    Ok(())
}

/// Handle a 401 from any service
///
/// Clears the stored identity and returns the route to navigate to. A
/// storage failure is logged; the redirect happens regardless.
pub fn expire_credentials<S: KeyValueStorage + ?Sized>(storage: &S) -> &'static str {
    if let Err(e) = clear_credentials(storage) {
        tracing::warn!(error = %e, "Failed to clear credentials after 401");
    }
    tracing::info!("Credentials expired; redirecting to login");
    LOGIN_ROUTE
}

fn read_user<S: KeyValueStorage + ?Sized>(
    storage: &S,
) -> StorageResult<Option<AuthenticatedUser>> {
    let (Some(user_json), Some(_token)) = (storage.get(USER_KEY)?, storage.get(TOKEN_KEY)?)
    else {
        return Ok(None);
    };

    match serde_json::from_str(&user_json) {
        Ok(user) => Ok(Some(user)),
        Err(e) => {
            tracing::warn!(error = %e, "Stored user is not valid JSON");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Some(1),
            username: "faker".to_string(),
            email: Some("faker@t1.gg".to_string()),
            role: Some("USER".to_string()),
        }
    }

    #[test]
    fn test_login_persists_and_restores() {
        let storage = Arc::new(MemoryStorage::new());

        let mut session = Session::restore(Arc::clone(&storage));
        assert!(!session.is_authenticated());

        session.login(user(), "jwt").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("jwt"));

        let restored = Session::restore(Arc::clone(&storage));
        assert!(restored.is_authenticated());
        assert_eq!(restored.user(), Some(&user()));
    }

    #[test]
    fn test_logout_clears_both_keys() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = Session::restore(Arc::clone(&storage));
        session.login(user(), "jwt").unwrap();

        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_restore_needs_both_keys() {
        let storage = MemoryStorage::new();
        storage
            .set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        let session = Session::restore(storage);
        assert!(session.user().is_none());
    }

    #[test]
    fn test_restore_ignores_malformed_user() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "{not json").unwrap();
        storage.set(TOKEN_KEY, "jwt").unwrap();

        let session = Session::restore(storage);
        assert!(session.user().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_unauthorized_clears_identity_and_redirects() {
        let storage = Arc::new(MemoryStorage::new());
        let mut session = Session::restore(Arc::clone(&storage));
        session.login(user(), "jwt").unwrap();

        let route = expire_credentials(&*storage);
        assert_eq!(route, "/login");
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);

        // The in-memory user lingers until reloaded, but is no longer authenticated
        assert!(!session.is_authenticated());
        session.reload();
        assert!(session.user().is_none());
    }
}
