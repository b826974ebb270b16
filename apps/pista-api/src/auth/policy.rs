//! Role and capability policy.
//!
//! Every authorization decision goes through [`authorize`] with a named
//! capability instead of comparing raw role ids at each call site. Ownership
//! checks (a user acting on their own reservation or comment) are layered on
//! top by the handlers that need them.

use serde::Serialize;

/// User role, decoded from the persisted role id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Regular,
}

impl Role {
    /// Any id other than the two privileged ones is a regular account.
    pub fn from_id(role_id: i64) -> Self {
        match role_id {
            1 => Role::Admin,
            2 => Role::Moderator,
            _ => Role::Regular,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Moderator => 2,
            Role::Regular => 3,
        }
    }
}

/// Named capabilities gating the mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, edit, and delete courts.
    ManageCourts,
    /// Edit, delete, and toggle other accounts.
    ManageUsers,
    /// Issue moderation warnings.
    IssueWarnings,
    /// List and inspect all user accounts.
    ViewUsers,
    /// List every reservation in the system.
    ViewAllReservations,
    /// Delete other users' comments.
    ModerateComments,
}

/// Decide whether a role grants a capability.
pub fn authorize(role: Role, capability: Capability) -> bool {
    match capability {
        Capability::ManageCourts | Capability::ManageUsers | Capability::ViewAllReservations => {
            role == Role::Admin
        }
        Capability::IssueWarnings | Capability::ViewUsers | Capability::ModerateComments => {
            matches!(role, Role::Admin | Role::Moderator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ids_round_trip() {
        assert_eq!(Role::from_id(1), Role::Admin);
        assert_eq!(Role::from_id(2), Role::Moderator);
        assert_eq!(Role::from_id(3), Role::Regular);
        assert_eq!(Role::from_id(0), Role::Regular);
        assert_eq!(Role::from_id(42), Role::Regular);
    }

    #[test]
    fn admin_only_capabilities() {
        for capability in [
            Capability::ManageCourts,
            Capability::ManageUsers,
            Capability::ViewAllReservations,
        ] {
            assert!(authorize(Role::Admin, capability));
            assert!(!authorize(Role::Moderator, capability));
            assert!(!authorize(Role::Regular, capability));
        }
    }

    #[test]
    fn moderator_capabilities() {
        for capability in [
            Capability::IssueWarnings,
            Capability::ViewUsers,
            Capability::ModerateComments,
        ] {
            assert!(authorize(Role::Admin, capability));
            assert!(authorize(Role::Moderator, capability));
            assert!(!authorize(Role::Regular, capability));
        }
    }
}
