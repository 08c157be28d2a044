//! # Auth Commands
//!
//! Sign-in, sign-out, and the identity shown in the header.

use comptoir_core::User;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{LedgerState, SessionState};

/// Signs in with any credentials and records it in the activity feed.
///
/// The simulated delay runs before any lock is taken, so other commands
/// keep being served meanwhile.
pub async fn login(
    session: &SessionState,
    ledger: &LedgerState,
    email: String,
    password: String,
) -> Result<User, ApiError> {
    debug!(email = %email, "login command");

    let user = session.login(&email, &password).await?;
    ledger.record_system(format!("Session ouverte par {}", user.name));
    Ok(user)
}

pub async fn logout(session: &SessionState) -> Result<(), ApiError> {
    debug!("logout command");
    session.logout().await
}

/// `null` when nobody is signed in.
pub async fn current_user(session: &SessionState) -> Option<User> {
    debug!("current_user command");
    session.current_user().await
}
