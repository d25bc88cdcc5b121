//! User directory domain
//!
//! CRUD calls against `/user/*`, the denormalized local copy of the user list,
//! and client-side search over that copy.

pub mod directory;
pub mod form;
pub mod search;
pub mod upload;

pub use directory::{UserDirectoryClient, UserDirectoryService};
pub use form::{ProfileImage, UserForm, create_user_form_data};
pub use search::search_users;
pub use upload::{FileUploadStatus, UploadEvent, UploadStatus, UploadStream};
