//! The role/permission store boundary consumed by the role editor.

use async_trait::async_trait;
use serde::Deserialize;

use mallhub_auth::{AssignPermissions, Permission, Role, RoleUpsert};
use mallhub_core::{PermissionId, RoleId};

use crate::{ApiClient, ClientResult};

/// Role and permission persistence, as seen by the dashboard.
///
/// Implementations report a duplicate role name as
/// [`ClientError::Conflict`](crate::ClientError::Conflict).
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn list_permissions(&self) -> ClientResult<Vec<Permission>>;

    async fn get_permission(&self, id: PermissionId) -> ClientResult<Permission>;

    async fn list_roles(&self) -> ClientResult<Vec<Role>>;

    async fn get_role(&self, id: RoleId) -> ClientResult<Role>;

    async fn create_role(&self, payload: &RoleUpsert) -> ClientResult<Role>;

    async fn update_role(&self, id: RoleId, payload: &RoleUpsert) -> ClientResult<Role>;

    async fn delete_role(&self, id: RoleId) -> ClientResult<()>;

    async fn assign_permissions(&self, id: RoleId, permission_ids: &[PermissionId]) -> ClientResult<()>;
}

// Collections come back bare, or wrapped in `{"data": [...]}` by some
// deployments.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

#[async_trait]
impl RoleStore for ApiClient {
    async fn list_permissions(&self) -> ClientResult<Vec<Permission>> {
        let body: ListBody<Permission> = self.get("permissions").await?;
        Ok(body.into_vec())
    }

    async fn get_permission(&self, id: PermissionId) -> ClientResult<Permission> {
        self.get(&format!("permissions/{id}")).await
    }

    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        let body: ListBody<Role> = self.get("roles").await?;
        Ok(body.into_vec())
    }

    async fn get_role(&self, id: RoleId) -> ClientResult<Role> {
        self.get(&format!("roles/{id}")).await
    }

    async fn create_role(&self, payload: &RoleUpsert) -> ClientResult<Role> {
        self.post("roles", payload).await
    }

    async fn update_role(&self, id: RoleId, payload: &RoleUpsert) -> ClientResult<Role> {
        self.patch(&format!("roles/{id}"), payload).await
    }

    async fn delete_role(&self, id: RoleId) -> ClientResult<()> {
        self.delete(&format!("roles/{id}")).await
    }

    async fn assign_permissions(&self, id: RoleId, permission_ids: &[PermissionId]) -> ClientResult<()> {
        let body = AssignPermissions {
            permission_ids: permission_ids.to_vec(),
        };
        self.post_discard(&format!("roles/{id}/permissions"), &body).await
    }
}
