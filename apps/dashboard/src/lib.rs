//! # Comptoir Dashboard Application
//!
//! The application layer of the bookkeeping dashboard. It owns the shared
//! state and exposes every operation as a command reachable over the
//! JSON-lines channel on stdin/stdout.
//!
//! ## Module Structure
//! ```text
//! comptoir_dashboard_lib/
//! ├── lib.rs          ◄─── You are here (AppContext, startup)
//! ├── error.rs        ◄─── ApiError returned by every command
//! ├── ipc.rs          ◄─── Request decoding, dispatch, response encoding
//! ├── state/
//! │   ├── ledger.rs   ◄─── Records + activity log (Arc<Mutex<AppState>>)
//! │   ├── config.rs   ◄─── Store identity and delays (read-only)
//! │   ├── session.rs  ◄─── Signed-in user, session file
//! │   └── sync.rs     ◄─── Simulated cloud sync status
//! └── commands/
//!     ├── auth.rs     ◄─── login, logout, current_user
//!     ├── dashboard.rs◄─── get_dashboard, get_activity
//!     ├── sale.rs     ◄─── list/add/delete sales
//!     ├── expense.rs  ◄─── list/add/delete expenses
//!     ├── stock.rs    ◄─── list/filter/add/delete/update stock
//!     ├── export.rs   ◄─── CSV export
//!     ├── invoice.rs  ◄─── Printable invoice
//!     ├── sync.rs     ◄─── sync, get_sync_status
//!     └── config.rs   ◄─── get_config
//! ```
//!
//! ## Startup Sequence
//! ```text
//! run()
//!   ├── init_tracing()            logs to stderr
//!   ├── ConfigState::from_env()
//!   ├── AppContext::new()         demo records, startup entry
//!   ├── session.restore()         previous user, if any
//!   └── ipc::serve(stdin, stdout) until stdin closes
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use comptoir_core::AppState;
use comptoir_session::{AuthStub, SessionStore, SESSION_FILE_NAME};
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{ConfigState, LedgerState, SessionState, SyncState};

/// Everything a command may need, shared by all request tasks.
#[derive(Debug)]
pub struct AppContext {
    pub ledger: LedgerState,
    pub config: ConfigState,
    pub session: SessionState,
    pub sync: SyncState,
}

impl AppContext {
    pub fn new(config: ConfigState, initial: AppState) -> Self {
        let session_path = config
            .session_path
            .clone()
            .or_else(SessionStore::default_path)
            .unwrap_or_else(|| PathBuf::from(SESSION_FILE_NAME));
        info!(path = %session_path.display(), "Session file location");

        let session = SessionState::new(
            AuthStub::new(config.login_delay()),
            SessionStore::new(session_path),
        );
        let sync = SyncState::new(config.sync_delay());

        AppContext {
            ledger: LedgerState::new(initial),
            config,
            session,
            sync,
        }
    }
}

/// Installs the log subscriber.
///
/// `RUST_LOG` overrides the default filter. Output goes to stderr because
/// stdout carries the responses.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,comptoir=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the application until stdin closes.
pub async fn run() -> std::io::Result<()> {
    init_tracing();
    info!("Starting Comptoir dashboard");

    let config = ConfigState::from_env();
    let ctx = Arc::new(AppContext::new(config, AppState::demo()));

    match ctx.session.restore().await {
        Some(user) => info!(user_id = %user.id, "Session restored"),
        None => info!("No saved session"),
    }

    ipc::serve(ctx, tokio::io::stdin(), tokio::io::stdout()).await?;

    info!("Comptoir dashboard stopped");
    Ok(())
}
