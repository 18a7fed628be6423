use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Student,
}

/// A stored account. `username` is the unique key.
///
/// Passwords are kept as entered so existing data files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
            extra: Map::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// What the API reveals about a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let user = User::new("admin", "password123", Role::Admin);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_missing_role_defaults_to_student() {
        let user: User = serde_json::from_str(r#"{"username":"x","password":"y"}"#).unwrap();
        assert_eq!(user.role, Role::Student);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_profile_omits_password() {
        let user = User::new("E22CSEU1156", "student123", Role::Student);
        let json = serde_json::to_value(UserProfile::from(&user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "E22CSEU1156");
    }
}
