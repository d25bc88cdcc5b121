//! Infrastructure: durable storage, the HTTP pipeline and its errors.

pub mod api_client;
pub mod authorizer;
pub mod constants;
pub mod errors;
pub mod storage;

pub use api_client::ApiClient;
pub use authorizer::RequestAuthorizer;
pub use errors::{ClientError, ClientResult, StorageError, StorageResult};
