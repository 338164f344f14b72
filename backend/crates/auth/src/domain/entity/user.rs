//! User Entity
//!
//! Created once at signup. No exposed operation updates or deletes a
//! user; records are read to verify logins and resolve ownership/role.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    Email, UserRole, user_name::UserName, user_password::PasswordHash,
};
use kernel::id::UserId;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name (not unique)
    pub user_name: UserName,
    /// Unique login handle
    pub email: Email,
    /// Argon2id PHC hash, never returned to clients
    pub password_hash: PasswordHash,
    /// Role (Standard, Admin)
    pub role: UserRole,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the default role
    pub fn new(user_name: UserName, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            role: UserRole::default(),
            created_at: Utc::now(),
        }
    }

    /// Check if the user holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
