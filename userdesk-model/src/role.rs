use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Roles issued by the backend, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserRole {
    User,
    Hr,
    Manager,
    Admin,
    SuperAdmin,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::User,
        UserRole::Hr,
        UserRole::Manager,
        UserRole::Admin,
        UserRole::SuperAdmin,
    ];

    /// Wire representation, e.g. `ROLE_ADMIN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Hr => "ROLE_HR",
            UserRole::Manager => "ROLE_MANAGER",
            UserRole::Admin => "ROLE_ADMIN",
            UserRole::SuperAdmin => "ROLE_SUPER_ADMIN",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::SuperAdmin)
    }

    /// Manager or anything above it.
    pub fn is_manager(&self) -> bool {
        *self >= UserRole::Manager
    }

    pub fn is_admin_or_manager(&self) -> bool {
        self.is_admin() || self.is_manager()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let bare = normalized.strip_prefix("ROLE_").unwrap_or(&normalized);
        match bare {
            "USER" => Ok(UserRole::User),
            "HR" => Ok(UserRole::Hr),
            "MANAGER" => Ok(UserRole::Manager),
            "ADMIN" => Ok(UserRole::Admin),
            "SUPER_ADMIN" => Ok(UserRole::SuperAdmin),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_and_bare_names() {
        assert_eq!("ROLE_ADMIN".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("super_admin".parse::<UserRole>(), Ok(UserRole::SuperAdmin));
        assert_eq!(" ROLE_hr ".parse::<UserRole>(), Ok(UserRole::Hr));
        assert!("ROLE_JANITOR".parse::<UserRole>().is_err());
    }

    #[test]
    fn privilege_helpers_follow_role_order() {
        assert!(!UserRole::Hr.is_admin_or_manager());
        assert!(UserRole::Manager.is_admin_or_manager());
        assert!(!UserRole::Manager.is_admin());
        assert!(UserRole::SuperAdmin.is_admin());
        assert!(UserRole::Admin.is_manager());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for role in UserRole::ALL {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
        }
    }
}
