//! Application domains: session/authentication, the user directory and the
//! headless UI controllers that drive them.

pub mod auth;
pub mod ui;
pub mod users;
