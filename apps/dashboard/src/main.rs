//! # Comptoir Dashboard Entry Point
//!
//! Reads one JSON request per line on stdin and answers on stdout.
//! The actual setup is in lib.rs so it can be tested.
//!
//! ```text
//! front-end ──► stdin  ──► ipc::serve ──► commands ──► comptoir-core
//! front-end ◄── stdout ◄──────┘
//!               stderr ◄── tracing
//! ```

#[tokio::main]
async fn main() {
    if let Err(e) = comptoir_dashboard_lib::run().await {
        tracing::error!(error = %e, "Dashboard stopped on an I/O error");
        std::process::exit(1);
    }
}
