//! Web host layer - routes, sessions, and the login guard.
//!
//! The catalog core stays network-framework-agnostic; this module owns
//! everything HTTP-facing: the axum router (`server`), the JSON handlers
//! (`handlers`), and session management plus the login middleware
//! (`session`).

pub mod handlers;
pub mod server;
pub mod session;

pub use server::{build_router, run, AppState};
pub use session::{CurrentUser, SessionStore};
