//! API Routes Constants for the Userdesk backend
//!
//! Paths are relative to the configured API base URL.

/// Plain text substitution of a path parameter. The value is not encoded;
/// requests carrying user input go through `ApiClient::route_url`.
pub fn replace_param(
    route: &str,
    param: &str,
    value: impl AsRef<str>,
) -> String {
    route.replace(param, value.as_ref())
}

/// User resource endpoints
pub mod user {
    /// Authenticate, returns the token header and the user body
    pub const LOGIN: &str = "/user/login";
    /// Create an account; the backend emails a temporary password
    pub const REGISTER: &str = "/user/register";
    /// Fetch all users
    pub const LIST: &str = "/user/list";
    /// Create a user (multipart form)
    pub const ADD: &str = "/user/add";
    /// Update a user (multipart form)
    pub const UPDATE: &str = "/user/update";
    /// Trigger a password reset email
    pub const RESET_PASSWORD: &str = "/user/resetpassword/{email}";
    /// Replace a profile image (multipart upload)
    pub const UPDATE_PROFILE_IMAGE: &str = "/user/updateProfileImage";
    /// Delete a user
    pub const DELETE: &str = "/user/delete/{username}";
}

/// Endpoints reachable without a bearer token
pub const PUBLIC: [&str; 2] = [user::LOGIN, user::REGISTER];
