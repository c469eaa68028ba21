use shared::{Role, UserProfile};

/// A portal account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub username: String,
    /// Plain-text demo password
    pub password: String,
    pub role: Role,
    /// Only meaningful for teachers
    pub is_absent: bool,
}

impl User {
    pub fn email(&self) -> String {
        format!("{}@school.edu", self.username)
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.username.clone(),
            email: self.email(),
            role: self.role,
        }
    }
}

/// Account data before an id is assigned
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
        }
    }
}
