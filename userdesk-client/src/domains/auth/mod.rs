//! Authentication domain
//!
//! Owns the bearer token lifecycle: persisting it, deriving the session state
//! from its claims, and clearing everything on logout.

pub mod errors;
pub mod manager;
pub mod service;
pub mod state_types;
pub mod storage;
pub mod token;

pub use errors::TokenError;
pub use manager::SessionManager;
pub use service::{AuthApiAdapter, AuthGateway, LoginOutcome};
pub use state_types::SessionState;
pub use storage::TokenStore;
pub use token::{TokenClaims, decode_claims};
