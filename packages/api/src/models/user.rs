//! # User records
//!
//! [`User`] is the backend's view of an account: the email is the identity key,
//! `_id` is needed for the admin-only role and delete routes. [`Role`] is the
//! only value the route guards branch on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role as resolved by `GET /users/:email/role`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// The role an admin toggle switches to.
    pub fn toggled(self) -> Role {
        match self {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        }
    }
}

/// User record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub email: String,
    #[serde(default, alias = "displayName")]
    pub name: Option<String>,
    #[serde(default, alias = "photoURL", alias = "photo")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Body of `POST /users`, sent after every register or login.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// Body of `PATCH /users/profile`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleResponse {
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PremiumResponse {
    #[serde(default)]
    pub is_premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_backend_json() {
        let user: User = serde_json::from_str(
            r#"{
                "_id": "65f0",
                "email": "ana@example.com",
                "displayName": "Ana",
                "photoURL": "https://img/ana.png",
                "role": "admin",
                "isPremium": true,
                "createdAt": "2025-01-02T03:04:05Z"
            }"#,
        )
        .unwrap();

        assert_eq!(user.id, "65f0");
        assert_eq!(user.display_name(), "Ana");
        assert_eq!(user.photo_url.as_deref(), Some("https://img/ana.png"));
        assert!(user.role.is_admin());
        assert!(user.is_premium);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_minimal_user_defaults() {
        let user: User = serde_json::from_str(r#"{"email":"bo@example.com","name":"  "}"#).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_premium);
        assert_eq!(user.display_name(), "bo@example.com");
    }

    #[test]
    fn test_role_toggle() {
        assert_eq!(Role::User.toggled(), Role::Admin);
        assert_eq!(Role::Admin.toggled().as_str(), "user");
    }
}
