//! # comptoir-session: Sign-in and Session Persistence
//!
//! ## Modules
//!
//! - [`auth`] - `AuthStub`, the accept-everything sign-in
//! - [`store`] - `SessionStore`, the `session.json` file
//! - [`error`] - `SessionError`
//!
//! ## Example
//!
//! ```rust,no_run
//! use comptoir_session::{AuthStub, SessionStore};
//!
//! # async fn example() -> comptoir_session::SessionResult<()> {
//! let store = SessionStore::at_default_path()?;
//! let user = match store.load().await? {
//!     Some(user) => user,
//!     None => {
//!         let user = AuthStub::default().login("gerant@boutique.cm", "secret").await;
//!         store.save(&user).await?;
//!         user
//!     }
//! };
//! println!("Bonjour {}", user.name);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod store;

pub use auth::{demo_user, AuthStub, DEFAULT_LOGIN_DELAY};
pub use error::{SessionError, SessionResult};
pub use store::{SessionStore, SESSION_FILE_NAME};
