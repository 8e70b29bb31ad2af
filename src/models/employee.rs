use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub position: String,
    pub department: String,
    pub is_admin: bool,
    pub created_at: String,
}

impl Employee {
    /// Display name, falling back to the username when empty.
    pub fn name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub username: String,
    pub display_name: String,
    pub position: String,
    pub department: String,
    pub is_admin: bool,
}
