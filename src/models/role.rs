// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Roles and the static permission table.
//!
//! The table in [`Role::permissions`] is the only place capabilities are
//! defined. Every authorization decision goes through it, either directly or
//! via the predicate helpers below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A user's role. Exactly one per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Moderator, Role::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::User => "user",
        }
    }

    /// Fixed capability set of this role.
    pub fn permissions(self) -> Permissions {
        match self {
            Role::Admin => Permissions {
                can_manage_users: true,
                can_manage_camps: true,
                can_manage_events: true,
                can_view_admin_panel: true,
                can_delete_camps: true,
                can_edit_all_camps: true,
            },
            Role::Moderator => Permissions {
                can_manage_users: false,
                can_manage_camps: true,
                can_manage_events: true,
                can_view_admin_panel: true,
                can_delete_camps: false,
                can_edit_all_camps: true,
            },
            Role::User => Permissions {
                can_manage_users: false,
                can_manage_camps: false,
                // Own events only; events are always scoped to their owner.
                can_manage_events: true,
                can_view_admin_panel: false,
                can_delete_camps: false,
                can_edit_all_camps: false,
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "moderator" => Ok(Role::Moderator),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A single capability from the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    ManageUsers,
    ManageCamps,
    ManageEvents,
    ViewAdminPanel,
    DeleteCamps,
    EditAllCamps,
}

impl Permission {
    pub const ALL: [Permission; 6] = [
        Permission::ManageUsers,
        Permission::ManageCamps,
        Permission::ManageEvents,
        Permission::ViewAdminPanel,
        Permission::DeleteCamps,
        Permission::EditAllCamps,
    ];
}

/// Boolean capability set, serialized the way the client expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_manage_users: bool,
    pub can_manage_camps: bool,
    pub can_manage_events: bool,
    pub can_view_admin_panel: bool,
    pub can_delete_camps: bool,
    pub can_edit_all_camps: bool,
}

impl Permissions {
    /// No capabilities at all; what an identity without a role gets.
    pub const NONE: Permissions = Permissions {
        can_manage_users: false,
        can_manage_camps: false,
        can_manage_events: false,
        can_view_admin_panel: false,
        can_delete_camps: false,
        can_edit_all_camps: false,
    };

    pub fn of(role: Option<Role>) -> Self {
        role.map(Role::permissions).unwrap_or(Self::NONE)
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::ManageUsers => self.can_manage_users,
            Permission::ManageCamps => self.can_manage_camps,
            Permission::ManageEvents => self.can_manage_events,
            Permission::ViewAdminPanel => self.can_view_admin_panel,
            Permission::DeleteCamps => self.can_delete_camps,
            Permission::EditAllCamps => self.can_edit_all_camps,
        }
    }
}

pub fn has_role(current: Option<Role>, role: Role) -> bool {
    current == Some(role)
}

pub fn has_any_role(current: Option<Role>, roles: &[Role]) -> bool {
    current.is_some_and(|r| roles.contains(&r))
}

pub fn has_permission(current: Option<Role>, permission: Permission) -> bool {
    Permissions::of(current).allows(permission)
}

/// All of `permissions` (AND). Without a role this is always false.
pub fn has_all_permissions(current: Option<Role>, permissions: &[Permission]) -> bool {
    let Some(role) = current else {
        return false;
    };
    let granted = role.permissions();
    permissions.iter().all(|p| granted.allows(*p))
}

/// Any of `permissions` (OR). Without a role this is always false.
pub fn has_any_permission(current: Option<Role>, permissions: &[Permission]) -> bool {
    let Some(role) = current else {
        return false;
    };
    let granted = role.permissions();
    permissions.iter().any(|p| granted.allows(*p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted(role: Role) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| role.permissions().allows(*p))
            .collect()
    }

    #[test]
    fn test_admin_has_every_capability() {
        assert_eq!(granted(Role::Admin), Permission::ALL.to_vec());
    }

    #[test]
    fn test_moderator_capabilities() {
        assert_eq!(
            granted(Role::Moderator),
            vec![
                Permission::ManageCamps,
                Permission::ManageEvents,
                Permission::ViewAdminPanel,
                Permission::EditAllCamps,
            ]
        );
    }

    #[test]
    fn test_user_capabilities() {
        assert_eq!(granted(Role::User), vec![Permission::ManageEvents]);
    }

    #[test]
    fn test_missing_role_has_no_permissions() {
        assert_eq!(Permissions::of(None), Permissions::NONE);
        for permission in Permission::ALL {
            assert!(!has_permission(None, permission));
        }
        assert!(!has_all_permissions(None, &[]));
        assert!(!has_any_permission(None, &Permission::ALL));
    }

    #[test]
    fn test_role_predicates() {
        assert!(has_role(Some(Role::Admin), Role::Admin));
        assert!(!has_role(Some(Role::Moderator), Role::Admin));
        assert!(!has_role(None, Role::User));

        assert!(has_any_role(
            Some(Role::Moderator),
            &[Role::Admin, Role::Moderator]
        ));
        assert!(!has_any_role(Some(Role::User), &[Role::Admin, Role::Moderator]));
        assert!(!has_any_role(None, &Role::ALL));
    }

    #[test]
    fn test_permission_combinators() {
        let moderator = Some(Role::Moderator);
        assert!(has_all_permissions(
            moderator,
            &[Permission::ManageCamps, Permission::EditAllCamps]
        ));
        assert!(!has_all_permissions(
            moderator,
            &[Permission::ManageCamps, Permission::DeleteCamps]
        ));
        assert!(has_any_permission(
            moderator,
            &[Permission::DeleteCamps, Permission::ViewAdminPanel]
        ));
        assert!(!has_any_permission(
            Some(Role::User),
            &[Permission::DeleteCamps, Permission::ManageUsers]
        ));
    }

    #[test]
    fn test_permissions_serialize_with_client_names() {
        let json = serde_json::to_value(Role::Moderator.permissions()).unwrap();
        assert_eq!(json["canManageCamps"], true);
        assert_eq!(json["canDeleteCamps"], false);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("owner".parse::<Role>().is_err());
    }
}
