//! Browser Storage
//!
//! `window.localStorage` behind the shared key-value trait, so the session
//! code runs unchanged in the browser.

use toyproject::storage::{KeyValueStorage, StorageError, StorageResult};

/// Handle to `window.localStorage`
///
/// Holds nothing itself; every call looks the storage object up again.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl WebStorage {
    fn local() -> StorageResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStorage for WebStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::local()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::local()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        Self::local()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toyproject::auth::{expire_credentials, AuthenticatedUser, Session, TOKEN_KEY, USER_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_round_trip() {
        let storage = WebStorage;
        storage.set("toyproject_test_key", "value").unwrap();
        assert_eq!(
            storage.get("toyproject_test_key").unwrap().as_deref(),
            Some("value")
        );

        storage.remove("toyproject_test_key").unwrap();
        assert_eq!(storage.get("toyproject_test_key").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_session_survives_reload_until_unauthorized() {
        let user = AuthenticatedUser {
            user_id: Some(7),
            username: "faker".to_string(),
            email: None,
            role: Some("USER".to_string()),
        };

        let mut session = Session::restore(WebStorage);
        session.login(user.clone(), "jwt").unwrap();

        let restored = Session::restore(WebStorage);
        assert_eq!(restored.user(), Some(&user));

        assert_eq!(expire_credentials(&WebStorage), "/login");
        assert_eq!(WebStorage.get(USER_KEY).unwrap(), None);
        assert_eq!(WebStorage.get(TOKEN_KEY).unwrap(), None);
        assert!(Session::restore(WebStorage).user().is_none());
    }
}
