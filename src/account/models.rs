//! Data models for the tiered account hierarchy

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Account role tier
///
/// Role IDs are designed for PostgreSQL storage as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum Role {
    SuperAdmin = 0,
    Admin = 1,
    SubAdmin = 2,
    User = 3,
}

impl Role {
    /// Convert from PostgreSQL role ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Role::SuperAdmin),
            1 => Some(Role::Admin),
            2 => Some(Role::SubAdmin),
            3 => Some(Role::User),
            _ => None,
        }
    }

    /// Get the numeric role ID for PostgreSQL storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::SubAdmin => "sub_admin",
            Role::User => "user",
        }
    }

    /// Any tier above plain user
    #[inline]
    pub fn is_admin_tier(&self) -> bool {
        !matches!(self, Role::User)
    }

    /// Roles exempt from the balance-sufficiency check on transfer;
    /// their debits model currency creation
    #[inline]
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    /// Whether an account of this role may provision an account of `other`
    pub fn may_create(&self, other: Role) -> bool {
        other.id() > self.id() && self.is_admin_tier()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "sub_admin" => Ok(Role::SubAdmin),
            "user" => Ok(Role::User),
            _ => Err(()),
        }
    }
}

/// Wallet account
///
/// `balance` is authoritative and non-negative; the password hash never
/// leaves the repository layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub account_id: i64,
    pub username: String,
    pub role: Role,
    pub balance: Decimal,
    pub created_by: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Hierarchy authority rule: super_admin acts on anyone, admin/sub_admin
/// only on accounts they provisioned.
pub fn can_manage(caller_id: i64, caller_role: Role, target: &Account) -> bool {
    match caller_role {
        Role::SuperAdmin => true,
        Role::Admin | Role::SubAdmin => target.created_by == Some(caller_id),
        Role::User => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(created_by: Option<i64>) -> Account {
        Account {
            account_id: 42,
            username: "player1".to_string(),
            role: Role::User,
            balance: Decimal::ZERO,
            created_by,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_id_roundtrip() {
        for role in [Role::SuperAdmin, Role::Admin, Role::SubAdmin, Role::User] {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(99), None);
    }

    #[test]
    fn test_role_serde_names() {
        assert_eq!(
            serde_json::to_string(&Role::SubAdmin).unwrap(),
            r#""sub_admin""#
        );
        let parsed: Role = serde_json::from_str(r#""super_admin""#).unwrap();
        assert_eq!(parsed, Role::SuperAdmin);
    }

    #[test]
    fn test_unlimited_roles() {
        assert!(Role::SuperAdmin.is_unlimited());
        assert!(Role::Admin.is_unlimited());
        assert!(!Role::SubAdmin.is_unlimited());
        assert!(!Role::User.is_unlimited());
    }

    #[test]
    fn test_may_create_only_below_own_tier() {
        assert!(Role::SuperAdmin.may_create(Role::Admin));
        assert!(Role::SuperAdmin.may_create(Role::User));
        assert!(Role::Admin.may_create(Role::SubAdmin));
        assert!(!Role::Admin.may_create(Role::Admin));
        assert!(!Role::SubAdmin.may_create(Role::SubAdmin));
        assert!(Role::SubAdmin.may_create(Role::User));
        assert!(!Role::User.may_create(Role::User));
    }

    #[test]
    fn test_authority_matrix() {
        let owned = account(Some(7));
        let foreign = account(Some(8));
        let root = account(None);

        assert!(can_manage(1, Role::SuperAdmin, &foreign));
        assert!(can_manage(1, Role::SuperAdmin, &root));

        assert!(can_manage(7, Role::Admin, &owned));
        assert!(!can_manage(7, Role::Admin, &foreign));

        assert!(can_manage(7, Role::SubAdmin, &owned));
        assert!(!can_manage(7, Role::SubAdmin, &root));

        assert!(!can_manage(42, Role::User, &owned));
    }
}
