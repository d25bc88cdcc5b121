/// Generic status body the backend returns for deletes, password resets and
/// every error response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ServerMessage {
    pub http_status_code: u16,
    pub http_status: String,
    pub reason: String,
    pub message: String,
}

impl ServerMessage {
    /// The human-readable message, if the backend sent a non-blank one.
    pub fn text(&self) -> Option<&str> {
        let trimmed = self.message.trim();
        (!trimmed.is_empty()).then_some(self.message.as_str())
    }
}
