//! # Session State
//!
//! Who is signed in, backed by the session file.
//!
//! ```text
//! startup ──► restore() ──► SessionStore::load() ──► user or nobody
//! login ────► AuthStub::login() (delay, no lock held) ──► save ──► user
//! logout ───► SessionStore::clear() ──► nobody
//! ```

use comptoir_core::User;
use comptoir_session::{AuthStub, SessionStore};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::ApiError;

#[derive(Debug)]
pub struct SessionState {
    auth: AuthStub,
    store: SessionStore,
    user: RwLock<Option<User>>,
}

impl SessionState {
    /// Creates a signed-out session state.
    pub fn new(auth: AuthStub, store: SessionStore) -> Self {
        SessionState {
            auth,
            store,
            user: RwLock::new(None),
        }
    }

    /// Picks up the user persisted by a previous run, if any.
    ///
    /// A session file that cannot be read leaves the app signed out.
    pub async fn restore(&self) -> Option<User> {
        let restored = match self.store.load().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Could not read session file; starting signed out");
                None
            }
        };

        *self.user.write().await = restored.clone();
        restored
    }

    /// Signs in with the stub and persists the result.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let user = self.auth.login(email, password).await;
        self.store.save(&user).await?;

        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    /// Signs out and removes the session file.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let previous = self.user.write().await.take();
        self.store.clear().await?;

        if let Some(user) = previous {
            info!(user_id = %user.id, "Signed out");
        }
        Ok(())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    /// The signed-in user, or `UNAUTHENTICATED`.
    pub async fn require_user(&self) -> Result<User, ApiError> {
        self.current_user()
            .await
            .ok_or_else(ApiError::unauthenticated)
    }
}
