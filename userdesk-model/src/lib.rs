//! Data model definitions shared between the Userdesk client and its tools.
#![allow(missing_docs)]

#[cfg(feature = "serde")]
pub mod dates;
pub mod error;
pub mod messages;
pub mod requests;
pub mod role;
pub mod user;

pub use error::{ModelError, Result as ModelResult};
pub use messages::ServerMessage;
pub use requests::{LoginRequest, RegisterRequest};
pub use role::UserRole;
pub use user::User;
