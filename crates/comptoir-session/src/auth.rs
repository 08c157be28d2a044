//! # Authentication Stub
//!
//! Stand-in for a real identity provider: every credential pair is
//! accepted and yields the demo operator, after a short delay so the
//! front-end's loading state is exercised.
//!
//! ```text
//! login(email, password)
//!     │
//!     ├── sleep(delay)              default 1000 ms
//!     │
//!     └── User { id: "U001", name: "Jean Dupont", email, role, avatar }
//! ```

use std::time::Duration;

use comptoir_core::User;
use tracing::{debug, info};

/// Default simulated round-trip of a sign-in.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

const DEMO_USER_ID: &str = "U001";
const DEMO_USER_NAME: &str = "Jean Dupont";
const DEMO_USER_ROLE: &str = "Gestionnaire Principal";
const DEMO_USER_AVATAR: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=Jean";

/// Accepts any credentials and returns the demo identity.
#[derive(Debug, Clone)]
pub struct AuthStub {
    delay: Duration,
}

impl AuthStub {
    pub fn new(delay: Duration) -> Self {
        AuthStub { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Signs in. Never fails; the password is not inspected.
    pub async fn login(&self, email: &str, _password: &str) -> User {
        debug!(email = %email, delay_ms = self.delay.as_millis() as u64, "Signing in");
        tokio::time::sleep(self.delay).await;

        let user = demo_user(email);
        info!(user_id = %user.id, "Signed in");
        user
    }
}

impl Default for AuthStub {
    fn default() -> Self {
        AuthStub::new(DEFAULT_LOGIN_DELAY)
    }
}

/// The demo operator, carrying the submitted email.
pub fn demo_user(email: &str) -> User {
    User {
        id: DEMO_USER_ID.to_string(),
        name: DEMO_USER_NAME.to_string(),
        email: email.to_string(),
        role: DEMO_USER_ROLE.to_string(),
        avatar: Some(DEMO_USER_AVATAR.to_string()),
    }
}
