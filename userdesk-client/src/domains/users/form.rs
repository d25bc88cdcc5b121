//! Multipart form payloads for `/user/add`, `/user/update` and
//! `/user/updateProfileImage`

use std::fmt;
use std::path::Path;

use reqwest::multipart::{Form, Part};
use userdesk_model::User;

use crate::infra::errors::{ClientError, ClientResult};

/// An image staged for upload
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ProfileImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ProfileImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: content_type_for(&file_name).to_string(),
            file_name,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile-image".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_part(self) -> ClientResult<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(ClientError::from)
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Everything the add/update endpoints take, before it becomes multipart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    /// Username the record is stored under; only sent on update
    pub current_username: Option<String>,
    pub user: User,
    pub profile_image: Option<ProfileImage>,
}

/// Build the add/update payload for `user`
pub fn create_user_form_data(
    current_username: Option<&str>,
    user: &User,
    profile_image: Option<ProfileImage>,
) -> UserForm {
    UserForm {
        current_username: current_username.map(str::to_string),
        user: user.clone(),
        profile_image,
    }
}

impl UserForm {
    /// Text fields in the order the backend documents them
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(8);
        if let Some(current) = &self.current_username {
            fields.push(("currentUsername", current.clone()));
        }
        fields.extend([
            ("firstName", self.user.first_name.clone()),
            ("lastName", self.user.last_name.clone()),
            ("username", self.user.username.clone()),
            ("email", self.user.email.clone()),
            ("role", self.user.role.clone()),
            ("isActive", self.user.active.to_string()),
            ("isNonLocked", self.user.not_locked.to_string()),
        ]);
        fields
    }

    pub fn into_multipart(self) -> ClientResult<Form> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = self.profile_image {
            form = form.part("profileImage", image.into_part()?);
        }
        Ok(form)
    }
}
