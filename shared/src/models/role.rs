//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven fixed roles
///
/// Parsed only through [`Role::from_str`], which accepts the canonical
/// snake_case spelling and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum Role {
    SuperAdmin,
    RestaurantOwner,
    Manager,
    BranchManager,
    Chef,
    Waiter,
    RestaurantStaff,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::RestaurantOwner,
        Role::Manager,
        Role::BranchManager,
        Role::Chef,
        Role::Waiter,
        Role::RestaurantStaff,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::RestaurantOwner => "restaurant_owner",
            Role::Manager => "manager",
            Role::BranchManager => "branch_manager",
            Role::Chef => "chef",
            Role::Waiter => "waiter",
            Role::RestaurantStaff => "restaurant_staff",
        }
    }

    /// The single role exempt from tenant scoping
    pub const fn is_super(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Privilege rank used by hierarchy checks (higher is more privileged)
    pub const fn rank(&self) -> u8 {
        match self {
            Role::SuperAdmin => 6,
            Role::RestaurantOwner => 5,
            Role::Manager => 4,
            Role::BranchManager => 3,
            Role::Chef => 2,
            Role::Waiter => 1,
            Role::RestaurantStaff => 0,
        }
    }

    /// True when this role ranks at or above `other`
    pub const fn at_least(&self, other: Role) -> bool {
        self.rank() >= other.rank()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role spelling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_parse_rejects_aliases() {
        assert!("branchmanager".parse::<Role>().is_err());
        assert!("Super_Admin".parse::<Role>().is_err());
        assert!("owner".parse::<Role>().is_err());
        assert_eq!(
            "admin".parse::<Role>().unwrap_err().to_string(),
            "Invalid role: admin"
        );
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::BranchManager).unwrap();
        assert_eq!(json, "\"branch_manager\"");
        let role: Role = serde_json::from_str("\"restaurant_staff\"").unwrap();
        assert_eq!(role, Role::RestaurantStaff);
    }

    #[test]
    fn test_hierarchy() {
        assert!(Role::SuperAdmin.at_least(Role::RestaurantOwner));
        assert!(Role::Manager.at_least(Role::BranchManager));
        assert!(!Role::Waiter.at_least(Role::Chef));
        assert!(Role::Chef.at_least(Role::Chef));
        assert!(Role::SuperAdmin.is_super());
        assert!(!Role::RestaurantOwner.is_super());
    }
}
