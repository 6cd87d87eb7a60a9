use std::str::FromStr;

/// Who is at the console. Admins manage orders; guests may only read the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Guest,
}

impl Role {
    pub fn dashboard_banner(self) -> &'static str {
        match self {
            Role::Admin => "[Admin Dashboard] Full access granted.",
            Role::Guest => "[Guest Dashboard] Menu access only.",
        }
    }

    pub fn can_manage_orders(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Guest => write!(f, "guest"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected admin, guest, 1 or 2)")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts the role names and the console's numeric choices.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "1" => Ok(Role::Admin),
            "guest" | "2" => Ok(Role::Guest),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
