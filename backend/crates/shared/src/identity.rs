//! Caller Identity
//!
//! The verified identity asserted by an access token. Produced by the
//! auth side when a token is verified, consumed by every domain that
//! gates mutations on ownership or role.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::app_error::{AppError, AppResult};
use crate::id::UserId;

/// User role
///
/// Absent/default is [`UserRole::Standard`]; admins may mutate any item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Standard = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Standard => "standard",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            0 => UserRole::Standard,
            1 => UserRole::Admin,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                unreachable!("Invalid UserRole id: {}", id)
            }
        }
    }

    /// Parse a role code from untrusted input (token claims, wire data)
    #[inline]
    pub fn parse(code: &str) -> AppResult<Self> {
        match code {
            "standard" => Ok(UserRole::Standard),
            "admin" => Ok(UserRole::Admin),
            other => Err(AppError::bad_request(format!(
                "Unknown user role: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Verified caller identity, carried in request extensions once the
/// bearer token has been checked.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: UserId,
    pub user_name: String,
    pub role: UserRole,
}

impl Identity {
    pub fn new(user_id: UserId, user_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            role,
        }
    }

    /// Whether this caller may mutate a record owned by `owner_id`
    #[inline]
    pub fn can_modify(&self, owner_id: &UserId) -> bool {
        self.role.is_admin() || &self.user_id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::Id;

    #[test]
    fn test_role_codes() {
        assert_eq!(UserRole::Standard.code(), "standard");
        assert_eq!(UserRole::Admin.code(), "admin");
        assert_eq!(UserRole::from_id(0), UserRole::Standard);
        assert_eq!(UserRole::from_id(1), UserRole::Admin);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("standard").unwrap(), UserRole::Standard);
        assert_eq!(UserRole::parse("admin").unwrap(), UserRole::Admin);
        assert!(UserRole::parse("superuser").is_err());
    }

    #[test]
    fn test_default_role_is_standard() {
        assert_eq!(UserRole::default(), UserRole::Standard);
        assert!(!UserRole::default().is_admin());
    }

    #[test]
    fn test_can_modify() {
        let owner: UserId = Id::new();
        let stranger: UserId = Id::new();

        let caller = Identity::new(owner, "alice", UserRole::Standard);
        assert!(caller.can_modify(&owner));
        assert!(!caller.can_modify(&stranger));

        let admin = Identity::new(stranger, "root", UserRole::Admin);
        assert!(admin.can_modify(&owner));
    }
}
