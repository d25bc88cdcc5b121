use chrono::{DateTime, Utc};

use crate::role::UserRole;

/// Identity record as served by `/user/list`, `/user/login` and friends.
///
/// Every field is defaulted when absent so that partial payloads (e.g. the
/// register response, or a cache written by an older build) still parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct User {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::dates::deserialize_optional")
    )]
    pub last_login_date: Option<DateTime<Utc>>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::dates::deserialize_optional")
    )]
    pub last_login_date_display: Option<DateTime<Utc>>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::dates::deserialize_optional")
    )]
    pub join_date: Option<DateTime<Utc>>,
    pub profile_image_url: String,
    pub active: bool,
    pub not_locked: bool,
    pub role: String,
    pub authorities: Vec<String>,
}

impl User {
    /// Parsed role, `None` when the backend sent something unrecognised.
    pub fn role(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match against first or last name.
    ///
    /// `needle` must already be lowercased.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.first_name.to_lowercase().contains(needle)
            || self.last_name.to_lowercase().contains(needle)
    }
}


#[cfg(test)]
mod name_tests {
    use super::*;

    #[test]
    fn name_match_checks_both_fields() {
        let user = User {
            first_name: "Ann".into(),
            last_name: "Hart".into(),
            ..Default::default()
        };
        assert!(user.name_contains("an"));
        assert!(user.name_contains("har"));
        assert!(!user.name_contains("ben"));
    }
}
