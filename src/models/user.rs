use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::Role;

/// An account as the backend serializes it. Roles and flags are defaulted
/// because some endpoints embed a trimmed user object (e.g. inside an
/// appointment) without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Name to show in headers and tables: full name when present,
    /// else the username.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}
