//! Role-based access control.
//!
//! A closed permission set and a static role-to-permission table. The
//! table is the single source of truth for authorization decisions; the
//! enforcement point is the `require_permission!` extractors in
//! [`crate::middleware::auth`].

use crate::modules::auth::model::UserRole;

/// Every permission the API checks. `resource:action` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ServicesCreate,
    ServicesRead,
    ServicesUpdate,
    ServicesDelete,
    BlogCreate,
    BlogRead,
    BlogUpdate,
    BlogDelete,
    TrainingCreate,
    TrainingRead,
    TrainingUpdate,
    TrainingDelete,
    ContactCreate,
    ContactRead,
    ContactUpdate,
    ContactDelete,
    UsersCreate,
    UsersUpdate,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ServicesCreate => "services:create",
            Self::ServicesRead => "services:read",
            Self::ServicesUpdate => "services:update",
            Self::ServicesDelete => "services:delete",
            Self::BlogCreate => "blog:create",
            Self::BlogRead => "blog:read",
            Self::BlogUpdate => "blog:update",
            Self::BlogDelete => "blog:delete",
            Self::TrainingCreate => "training:create",
            Self::TrainingRead => "training:read",
            Self::TrainingUpdate => "training:update",
            Self::TrainingDelete => "training:delete",
            Self::ContactCreate => "contact:create",
            Self::ContactRead => "contact:read",
            Self::ContactUpdate => "contact:update",
            Self::ContactDelete => "contact:delete",
            Self::UsersCreate => "users:create",
            Self::UsersUpdate => "users:update",
        }
    }
}

/// What a role is granted: everything, or an explicit list.
pub enum RoleGrant {
    All,
    Only(&'static [Permission]),
}

const ADMIN_GRANTS: &[Permission] = &[
    Permission::ServicesCreate,
    Permission::ServicesRead,
    Permission::ServicesUpdate,
    Permission::ServicesDelete,
    Permission::BlogCreate,
    Permission::BlogRead,
    Permission::BlogUpdate,
    Permission::BlogDelete,
    Permission::TrainingCreate,
    Permission::TrainingRead,
    Permission::TrainingUpdate,
    Permission::TrainingDelete,
    Permission::ContactRead,
    Permission::ContactUpdate,
    Permission::ContactDelete,
];

const EDITOR_GRANTS: &[Permission] = &[
    Permission::ServicesCreate,
    Permission::ServicesRead,
    Permission::ServicesUpdate,
    Permission::BlogCreate,
    Permission::BlogRead,
    Permission::BlogUpdate,
    Permission::TrainingCreate,
    Permission::TrainingRead,
    Permission::TrainingUpdate,
    Permission::ContactRead,
];

const USER_GRANTS: &[Permission] = &[
    Permission::ServicesRead,
    Permission::BlogRead,
    Permission::TrainingRead,
    Permission::ContactCreate,
];

/// The role-to-permission table.
///
/// `users:create` and `users:update` appear in no explicit grant list,
/// so only the super admin wildcard reaches them.
pub fn grants_for(role: UserRole) -> RoleGrant {
    match role {
        UserRole::SuperAdmin => RoleGrant::All,
        UserRole::Admin => RoleGrant::Only(ADMIN_GRANTS),
        UserRole::Editor => RoleGrant::Only(EDITOR_GRANTS),
        UserRole::User => RoleGrant::Only(USER_GRANTS),
    }
}

pub fn is_allowed(role: UserRole, permission: Permission) -> bool {
    match grants_for(role) {
        RoleGrant::All => true,
        RoleGrant::Only(grants) => grants.contains(&permission),
    }
}
