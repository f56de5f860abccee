//! In-memory [`RoleStore`] for unit tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use mallhub_auth::{Action, Permission, Role, RolePermission, RoleUpsert};
use mallhub_client::{ClientError, ClientResult, RoleStore};
use mallhub_core::{PermissionId, RoleId};

#[derive(Default)]
pub struct MockStore {
    pub permissions: Mutex<Vec<Permission>>,
    pub roles: Mutex<Vec<Role>>,
    pub last_payload: Mutex<Option<RoleUpsert>>,
    pub assigned: Mutex<Vec<(RoleId, Vec<PermissionId>)>>,
    pub writes: AtomicUsize,
    pub role_reads: AtomicUsize,
    /// Returned by the next write instead of succeeding.
    pub fail_writes: Mutex<Option<ClientError>>,
    /// Returned by list/get calls instead of succeeding.
    pub fail_reads: Mutex<Option<ClientError>>,
    /// When set, writes signal `entered` and then wait on `release`.
    pub gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

pub fn catalog_permissions() -> Vec<Permission> {
    vec![
        Permission::new(1, Action::Create, "mall"),
        Permission::new(2, Action::Read, "mall"),
        Permission::new(3, Action::Create, "tenant"),
        Permission::new(5, Action::Delete, "tenant"),
    ]
}

pub fn role(id: i64, name: &str, permission_ids: &[i64]) -> Role {
    Role {
        id: RoleId::new(id),
        name: name.to_string(),
        status: Default::default(),
        permissions: permission_ids
            .iter()
            .map(|&pid| RolePermission {
                id: PermissionId::new(pid),
                name: None,
                module: None,
            })
            .collect(),
        created_at: None,
        updated_at: None,
    }
}

fn clone_error(err: &ClientError) -> ClientError {
    match err {
        ClientError::Network(m) => ClientError::Network(m.clone()),
        ClientError::Conflict(m) => ClientError::Conflict(m.clone()),
        ClientError::NotFound(m) => ClientError::NotFound(m.clone()),
        ClientError::Unauthorized => ClientError::Unauthorized,
        other => ClientError::Server {
            status: 500,
            message: other.to_string(),
        },
    }
}

impl MockStore {
    pub fn seeded() -> Self {
        Self {
            permissions: Mutex::new(catalog_permissions()),
            roles: Mutex::new(vec![role(1, "Admin", &[1, 2, 3, 5]), role(2, "Manager", &[2])]),
            ..Self::default()
        }
    }

    pub fn gated(entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            gate: Some((entered, release)),
            ..Self::seeded()
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read_failure(&self) -> ClientResult<()> {
        match self.fail_reads.lock().unwrap().as_ref() {
            Some(err) => Err(clone_error(err)),
            None => Ok(()),
        }
    }

    async fn begin_write(&self) -> ClientResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        match self.fail_writes.lock().unwrap().as_ref() {
            Some(err) => Err(clone_error(err)),
            None => Ok(()),
        }
    }

    fn store_role(&self, id: RoleId, payload: &RoleUpsert) -> ClientResult<Role> {
        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == payload.name && r.id != id) {
            return Err(ClientError::Conflict(
                "Unique constraint failed on the fields: (`name`)".into(),
            ));
        }
        let ids: Vec<i64> = payload.permissions.iter().map(|p| p.id.get()).collect();
        let saved = Role {
            status: payload.status,
            ..role(id.get(), &payload.name, &ids)
        };
        roles.retain(|r| r.id != id);
        roles.push(saved.clone());
        *self.last_payload.lock().unwrap() = Some(payload.clone());
        Ok(saved)
    }
}

#[async_trait]
impl RoleStore for MockStore {
    async fn list_permissions(&self) -> ClientResult<Vec<Permission>> {
        self.read_failure()?;
        Ok(self.permissions.lock().unwrap().clone())
    }

    async fn get_permission(&self, id: PermissionId) -> ClientResult<Permission> {
        self.read_failure()?;
        self.permissions
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Permission not found".into()))
    }

    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.read_failure()?;
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn get_role(&self, id: RoleId) -> ClientResult<Role> {
        self.role_reads.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        self.roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Role not found".into()))
    }

    async fn create_role(&self, payload: &RoleUpsert) -> ClientResult<Role> {
        self.begin_write().await?;
        let next = self
            .roles
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.id.get())
            .max()
            .unwrap_or(0)
            + 1;
        self.store_role(RoleId::new(next), payload)
    }

    async fn update_role(&self, id: RoleId, payload: &RoleUpsert) -> ClientResult<Role> {
        self.begin_write().await?;
        self.store_role(id, payload)
    }

    async fn delete_role(&self, id: RoleId) -> ClientResult<()> {
        self.begin_write().await?;
        let mut roles = self.roles.lock().unwrap();
        let before = roles.len();
        roles.retain(|r| r.id != id);
        if roles.len() == before {
            return Err(ClientError::NotFound("Role not found".into()));
        }
        Ok(())
    }

    async fn assign_permissions(&self, id: RoleId, permission_ids: &[PermissionId]) -> ClientResult<()> {
        self.begin_write().await?;
        self.assigned.lock().unwrap().push((id, permission_ids.to_vec()));
        Ok(())
    }
}
