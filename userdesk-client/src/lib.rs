//! Userdesk client library
//!
//! Session handling, request authorization and the user directory client for
//! the Userdesk user-management backend, plus headless controllers for the
//! login, register and user management screens.
//!
//! Notes
//! - The session is derived from the stored token on every check; nothing
//!   about login state is cached beyond the last recorded username.
//! - The `userdesk` binary in `src/main.rs` is a thin CLI over [`bootstrap`].

pub mod bootstrap;
pub mod config;
pub mod domains;
pub mod infra;

pub use bootstrap::Services;
pub use config::ClientConfig;
