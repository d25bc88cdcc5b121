//! Keys used in the durable key-value store

/// Raw bearer token string
pub const TOKEN: &str = "token";
/// JSON-encoded logged-in user
pub const USER: &str = "user";
/// JSON-encoded array of every user from the last list call
pub const USERS: &str = "users";

/// Everything that belongs to a session; cleared together on logout
pub const SESSION_KEYS: [&str; 3] = [USER, TOKEN, USERS];
