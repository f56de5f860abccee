//! `mallhub-auth`: the role/permission assignment model.
//!
//! No HTTP or rendering lives here. The crate holds the
//! records served by the role store, groups permissions by module, and keeps
//! the in-progress selection of a role editor consistent.

pub mod catalog;
pub mod permissions;
pub mod roles;
pub mod selection;

pub use catalog::{ModuleGroup, PermissionCatalog};
pub use permissions::{Action, Permission, module_label};
pub use roles::{AssignPermissions, PermissionRef, Role, RolePermission, RoleStatus, RoleUpsert};
pub use selection::{ModuleSelection, ModuleState, PermissionSelection, SelectionSnapshot};
