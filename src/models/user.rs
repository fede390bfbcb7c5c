use diesel::prelude::*;
use serde::Serialize;

/// Profile of an authenticated account
///
/// Never carries the password hash; that column is only read by the
/// credential lookup.
#[derive(Debug, Queryable, Selectable, Serialize, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub status: i32,
    pub role: i32,
}

impl UserRecord {
    pub fn is_enabled(&self) -> bool {
        self.status == AccountStatus::Enabled.value()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.value()
    }
}

/// Values of the `users.status` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Disabled,
    Enabled,
}

impl AccountStatus {
    pub const fn value(self) -> i32 {
        match self {
            AccountStatus::Disabled => 0,
            AccountStatus::Enabled => 1,
        }
    }
}

/// Values of the `users.role` column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Normal,
}

impl Role {
    pub const fn value(self) -> i32 {
        match self {
            Role::Admin => 1,
            Role::Normal => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: i32, role: i32) -> UserRecord {
        UserRecord {
            id: 7,
            username: "nate".to_string(),
            full_name: "Nate B".to_string(),
            email: "nate@example.com".to_string(),
            status,
            role,
        }
    }

    #[test]
    fn test_column_values() {
        assert_eq!(AccountStatus::Enabled.value(), 1);
        assert_eq!(AccountStatus::Disabled.value(), 0);
        assert_eq!(Role::Admin.value(), 1);
        assert_eq!(Role::Normal.value(), 10);
    }

    #[test]
    fn test_record_flags() {
        assert!(record(1, 1).is_admin());
        assert!(record(1, 10).is_enabled());
        assert!(!record(0, 10).is_enabled());
        assert!(!record(1, 10).is_admin());
    }

    #[test]
    fn test_serializes_without_password() {
        let json = serde_json::to_value(record(1, 10)).unwrap();
        assert_eq!(json["username"], "nate");
        assert!(json.get("password").is_none());
    }
}
