//! Role model.
//!
//! Roles form a closed set: bearer credentials carry one of these values and
//! nothing else. Keeping the set as an enum (rather than free-form strings)
//! gives exhaustiveness checking whenever a new role is added.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A caller's role within the platform.
///
/// Tenant staff roles operate inside a school's menu namespace. The platform
/// operator role (`PlatformAdmin`) and end-customer roles (`Student`,
/// `Parent`) live outside it and never see entitlement-driven navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator; uses a disjoint admin menu namespace.
    PlatformAdmin,
    /// School administrator.
    SchoolAdmin,
    Teacher,
    Accountant,
    Librarian,
    Student,
    Parent,
}

/// Error returned when a role string is not in the closed set.
#[derive(Debug, Error)]
#[error("unknown role {0:?}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Whether this role belongs to the tenant staff set.
    ///
    /// Only tenant staff may trigger menu resolution; see
    /// [`crate::menu::gate`].
    pub fn is_tenant_staff(self) -> bool {
        matches!(
            self,
            Role::SchoolAdmin | Role::Teacher | Role::Accountant | Role::Librarian
        )
    }

    /// The wire representation carried in bearer credentials.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::PlatformAdmin => "platform_admin",
            Role::SchoolAdmin => "school_admin",
            Role::Teacher => "teacher",
            Role::Accountant => "accountant",
            Role::Librarian => "librarian",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform_admin" => Ok(Role::PlatformAdmin),
            "school_admin" => Ok(Role::SchoolAdmin),
            "teacher" => Ok(Role::Teacher),
            "accountant" => Ok(Role::Accountant),
            "librarian" => Ok(Role::Librarian),
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn staff_set_covers_school_roles_only() {
        assert!(Role::SchoolAdmin.is_tenant_staff());
        assert!(Role::Teacher.is_tenant_staff());
        assert!(Role::Accountant.is_tenant_staff());
        assert!(Role::Librarian.is_tenant_staff());
        assert!(!Role::PlatformAdmin.is_tenant_staff());
        assert!(!Role::Student.is_tenant_staff());
        assert!(!Role::Parent.is_tenant_staff());
    }

    #[test]
    fn round_trips_through_wire_form() {
        for role in [
            Role::PlatformAdmin,
            Role::SchoolAdmin,
            Role::Teacher,
            Role::Accountant,
            Role::Librarian,
            Role::Student,
            Role::Parent,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("janitor".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
        // Matching is exact; no case folding on the wire form.
        assert!("Teacher".parse::<Role>().is_err());
    }
}
