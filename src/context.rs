//! Application Context
//!
//! The native front end's explicit state: configuration, the persisted
//! session and the service client, created once at startup and torn down at
//! exit. Session and client share one store, so a 401 seen by the client is
//! visible to the session on its next `reload`.

use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiClient, ApiError};
use crate::auth::{
    AuthenticatedUser, FieldErrors, LoginForm, LoginValidationError, Session, SignupData,
    SignupForm, LOGIN_ROUTE,
};
use crate::config::Config;
use crate::riot::{MatchDetail, PlayerMatches, SearchQuery};
use crate::storage::{FileStorage, SharedStorage, StorageError};

/// Errors surfaced by context operations
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Login(#[from] LoginValidationError),

    #[error(transparent)]
    Signup(#[from] FieldErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Explicit application state for the CLI
pub struct AppContext {
    config: Config,
    session: Session<SharedStorage>,
    client: ApiClient,
}

impl AppContext {
    /// Open the configured session file and build the client
    pub fn init(config: Config) -> Result<Self, AppError> {
        let storage: SharedStorage = Arc::new(FileStorage::open(&config.session.storage_path));
        tracing::debug!(path = %config.session.storage_path, "Session store opened");
        Self::with_storage(config, storage)
    }

    /// Build a context over an existing store
    pub fn with_storage(config: Config, storage: SharedStorage) -> Result<Self, AppError> {
        let client = ApiClient::new(&config.api, Arc::clone(&storage))?;
        let session = Session::restore(storage);

        Ok(Self {
            config,
            session,
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session<SharedStorage> {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Validate the form, log in and persist the session
    pub async fn login(&mut self, form: &LoginForm) -> Result<AuthenticatedUser, AppError> {
        let request = form.to_request()?;
        let data = self.client.login(&request).await?;
        self.session.login(data.user.clone(), &data.token)?;
        Ok(data.user)
    }

    /// Validate every field, then create the account
    ///
    /// Signing up does not log in.
    pub async fn signup(&self, form: &SignupForm) -> Result<SignupData, AppError> {
        let request = form.to_request()?;
        Ok(self.client.signup(&request).await?)
    }

    /// End the session locally; the server call is best effort
    pub async fn logout(&mut self) -> Result<(), AppError> {
        if let Err(e) = self.client.logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        self.session.logout()?;
        Ok(())
    }

    /// Match history for a Riot id
    pub async fn player_matches(
        &mut self,
        query: &SearchQuery,
    ) -> Result<PlayerMatches, AppError> {
        let result = self.client.player_matches(query).await;
        self.after_call(result)
    }

    /// One match from one player's point of view
    pub async fn match_detail(
        &mut self,
        match_id: &str,
        puuid: &str,
    ) -> Result<MatchDetail, AppError> {
        let result = self.client.match_detail(match_id, puuid).await;
        self.after_call(result)
    }

    /// Pick up a credential wipe done by the client and report where to go
    pub fn handle_unauthorized(&mut self) -> &'static str {
        self.session.reload();
        LOGIN_ROUTE
    }

    fn after_call<T>(&mut self, result: Result<T, ApiError>) -> Result<T, AppError> {
        if let Err(e) = &result {
            if e.is_unauthorized() {
                self.handle_unauthorized();
            }
        }
        Ok(result?)
    }

    /// Release resources at exit
    pub fn shutdown(self) {
        tracing::debug!(
            authenticated = self.session.is_authenticated(),
            "Application context shut down"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{TOKEN_KEY, USER_KEY};
    use crate::storage::{KeyValueStorage, MemoryStorage};

    fn context_with_user() -> (AppContext, SharedStorage) {
        let storage: SharedStorage = Arc::new(MemoryStorage::new());
        storage.set(USER_KEY, r#"{"username":"faker"}"#).unwrap();
        storage.set(TOKEN_KEY, "jwt").unwrap();
        let ctx = AppContext::with_storage(Config::default(), Arc::clone(&storage)).unwrap();
        (ctx, storage)
    }

    #[test]
    fn test_init_restores_session() {
        let (ctx, _) = context_with_user();
        assert!(ctx.session().is_authenticated());
        assert_eq!(ctx.session().user().unwrap().username, "faker");
    }

    #[test]
    fn test_unauthorized_result_drops_session() {
        let (mut ctx, storage) = context_with_user();

        // What the client does on a 401
        crate::auth::expire_credentials(&*storage);
        let result: Result<(), AppError> =
            ctx.after_call(Err(ApiError::Unauthorized { message: None }));

        assert!(matches!(result, Err(AppError::Api(ApiError::Unauthorized { .. }))));
        assert!(!ctx.session().is_authenticated());
        assert!(ctx.session().user().is_none());
    }

    #[tokio::test]
    async fn test_login_validates_before_network() {
        let (mut ctx, _) = context_with_user();
        let form = LoginForm {
            username: "faker".to_string(),
            password: "  ".to_string(),
        };

        let err = ctx.login(&form).await.unwrap_err();
        assert!(matches!(err, AppError::Login(LoginValidationError::MissingPassword)));
    }
}
