//! Role create/edit session: form fields, permission selection and submit.

use std::sync::atomic::{AtomicBool, Ordering};

use mallhub_auth::{
    PermissionCatalog, PermissionSelection, Role, RoleStatus, RoleUpsert, SelectionSnapshot,
};
use mallhub_client::{ClientError, RoleStore};
use mallhub_core::{DomainResult, PermissionId, RoleId};

use crate::errors::{CONFLICT_MESSAGE, SubmitError};

/// Expected results of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The store accepted the role.
    Saved(Role),
    /// A local precondition failed; nothing was sent.
    Invalid(String),
    /// The store rejected the name as a duplicate.
    Conflict(String),
    /// Another submit from this editor is still in flight; nothing was sent.
    Busy,
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Clears the busy flag however the submit ends (return, error, drop).
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One editing session. Each session owns its own selection.
#[derive(Debug)]
pub struct RoleEditor {
    role_id: Option<RoleId>,
    name: String,
    status: RoleStatus,
    selection: PermissionSelection,
    busy: AtomicBool,
}

impl RoleEditor {
    /// Blank form for a new role.
    pub fn create() -> Self {
        Self {
            role_id: None,
            name: String::new(),
            status: RoleStatus::Active,
            selection: PermissionSelection::new(),
            busy: AtomicBool::new(false),
        }
    }

    /// Form pre-filled from an existing role.
    pub fn edit(role: &Role) -> Self {
        Self {
            role_id: Some(role.id),
            name: role.name.clone(),
            status: role.status,
            selection: PermissionSelection::from_role(role),
            busy: AtomicBool::new(false),
        }
    }

    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    pub fn is_new(&self) -> bool {
        self.role_id.is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn status(&self) -> RoleStatus {
        self.status
    }

    pub fn set_status(&mut self, status: RoleStatus) {
        self.status = status;
    }

    pub fn selection(&self) -> &PermissionSelection {
        &self.selection
    }

    pub fn toggle_permission(&mut self, id: PermissionId, checked: bool) {
        self.selection.toggle_individual(id, checked);
    }

    pub fn toggle_module(&mut self, catalog: &PermissionCatalog, module: &str, checked: bool) {
        self.selection.toggle_module(catalog, module, checked);
    }

    pub fn snapshot(&self, catalog: &PermissionCatalog) -> SelectionSnapshot {
        self.selection.snapshot(catalog)
    }

    /// True while a submit is waiting on the store; the submit control should
    /// be disabled.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The request body the next submit would send.
    pub fn payload(&self) -> DomainResult<RoleUpsert> {
        self.selection.validate_non_empty()?;
        RoleUpsert::new(self.name.as_str(), self.status, self.selection.ids().iter().copied())
    }

    /// Validate, then create or update the role through `store`.
    ///
    /// The editor's fields and selection are left as they were whatever the
    /// result, so a failed attempt can be retried as-is.
    pub async fn submit<S>(&self, store: &S) -> Result<SubmitOutcome, SubmitError>
    where
        S: RoleStore + ?Sized,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(role_id = ?self.role_id, "submit ignored; previous submit still running");
            return Ok(SubmitOutcome::Busy);
        }
        let _guard = BusyGuard(&self.busy);

        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "role form rejected locally");
                return Ok(SubmitOutcome::Invalid(err.message().to_string()));
            }
        };

        let result = match self.role_id {
            None => store.create_role(&payload).await,
            Some(id) => store.update_role(id, &payload).await,
        };

        match result {
            Ok(role) => {
                tracing::info!(
                    role_id = %role.id,
                    name = %role.name,
                    permissions = payload.permissions.len(),
                    created = self.is_new(),
                    "role saved"
                );
                Ok(SubmitOutcome::Saved(role))
            }
            Err(ClientError::Conflict(detail)) => {
                tracing::warn!(name = %payload.name, %detail, "role name already taken");
                Ok(SubmitOutcome::Conflict(CONFLICT_MESSAGE.to_string()))
            }
            Err(err) => {
                tracing::warn!(error = %err, "role save failed");
                Err(err.into())
            }
        }
    }
}
