//! Constants module for centralized configuration values

pub mod routes;
pub mod storage_keys;

/// Response header carrying the signed token after a successful login
pub const DEFAULT_TOKEN_HEADER: &str = "Jwt-Token";

/// Shown when a failed request carried no usable message
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again";
