//! Profile image upload progress
//!
//! The multipart body is streamed in chunks; every chunk the transport pulls
//! produces an [`UploadEvent::UploadProgress`].

use futures::stream::{self, BoxStream, StreamExt};
use reqwest::Body;
use tokio::sync::mpsc::UnboundedSender;
use userdesk_model::User;

use crate::infra::errors::ClientResult;

pub const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// Request handed to the transport
    Sent,
    UploadProgress { loaded: u64, total: u64 },
    /// Backend accepted the image and returned the updated user
    Response(User),
}

pub type UploadStream = BoxStream<'static, ClientResult<UploadEvent>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    Progress,
    Done,
}

/// What the profile view shows while an upload runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileUploadStatus {
    pub status: UploadStatus,
    pub percentage: u8,
}

impl FileUploadStatus {
    pub fn record(&mut self, event: &UploadEvent) {
        match event {
            UploadEvent::Sent => {}
            UploadEvent::UploadProgress { loaded, total } => {
                self.percentage = percentage(*loaded, *total);
                self.status = UploadStatus::Progress;
            }
            UploadEvent::Response(_) => {
                self.percentage = 100;
                self.status = UploadStatus::Done;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `round(100 * loaded / total)`, clamped to 100; an empty body is complete.
fn percentage(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let loaded = u128::from(loaded.min(total));
    let total = u128::from(total);
    let rounded = (200 * loaded + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Wrap `bytes` in a streaming body that reports each chunk it yields.
pub fn progress_body(
    bytes: Vec<u8>,
    events: UnboundedSender<ClientResult<UploadEvent>>,
) -> Body {
    let total = bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = bytes
        .chunks(UPLOAD_CHUNK_SIZE)
        .map(<[u8]>::to_vec)
        .collect();

    let mut loaded = 0u64;
    let stream = stream::iter(chunks).map(move |chunk| {
        loaded += chunk.len() as u64;
        // Receiver may be gone if the caller stopped listening
        let _ = events.send(Ok(UploadEvent::UploadProgress { loaded, total }));
        Ok::<_, std::io::Error>(chunk)
    });
    Body::wrap_stream(stream)
}
