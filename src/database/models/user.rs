use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Identity record. Role and lifecycle status are stored as text and parsed
/// into the closed enums below for authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Administrator)
    }

    pub fn is_active(&self) -> bool {
        UserStatus::parse(&self.status) == Some(UserStatus::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "STUDENT")]
    Student,
    #[serde(rename = "TEACHER")]
    Teacher,
    #[serde(rename = "ADMINISTRATOR")]
    Administrator,
}

impl Role {
    pub const ALL: [&'static str; 3] = ["STUDENT", "TEACHER", "ADMINISTRATOR"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Administrator => "ADMINISTRATOR",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "STUDENT" => Some(Role::Student),
            "TEACHER" => Some(Role::Teacher),
            "ADMINISTRATOR" => Some(Role::Administrator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "INACTIVE")]
    Inactive,
}

impl UserStatus {
    pub const ALL: [&'static str; 3] = ["PENDING", "ACTIVE", "INACTIVE"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "PENDING",
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
        }
    }

    pub fn parse(s: &str) -> Option<UserStatus> {
        match s {
            "PENDING" => Some(UserStatus::Pending),
            "ACTIVE" => Some(UserStatus::Active),
            "INACTIVE" => Some(UserStatus::Inactive),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: &str, status: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "t@example.com".into(),
            name: "T".into(),
            role: role.into(),
            status: status.into(),
            password_hash: "$argon2id$x".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_round_trips() {
        for s in Role::ALL {
            assert_eq!(Role::parse(s).unwrap().as_str(), s);
        }
        assert_eq!(Role::parse("ROOT"), None);
    }

    #[test]
    fn unknown_role_is_not_admin() {
        assert!(!user("SUPERUSER", "ACTIVE").is_admin());
        assert!(user("ADMINISTRATOR", "ACTIVE").is_admin());
    }

    #[test]
    fn password_hash_never_serialized() {
        let json = serde_json::to_value(user("STUDENT", "PENDING")).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["status"], "PENDING");
    }
}
