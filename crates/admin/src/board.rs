//! Role management board: the role list, the permission catalog and at most
//! one open editor.

use std::sync::Arc;

use mallhub_auth::{PermissionCatalog, Role};
use mallhub_client::RoleStore;
use mallhub_core::{PermissionId, RoleId};

use crate::editor::{RoleEditor, SubmitOutcome};
use crate::errors::{BoardAction, BoardError, SubmitError};

pub struct RoleBoard<S: RoleStore + ?Sized> {
    store: Arc<S>,
    roles: Vec<Role>,
    catalog: PermissionCatalog,
    search: String,
    editor: Option<RoleEditor>,
    viewing: Option<Role>,
}

impl<S: RoleStore + ?Sized> RoleBoard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            roles: Vec::new(),
            catalog: PermissionCatalog::default(),
            search: String::new(),
            editor: None,
            viewing: None,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Fetch roles and the permission catalog.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        self.refresh_permissions().await?;
        self.refresh_roles().await
    }

    /// Replace the role list; on failure the previous list stays.
    pub async fn refresh_roles(&mut self) -> Result<(), BoardError> {
        let roles = self
            .store
            .list_roles()
            .await
            .map_err(|e| BoardError::new(BoardAction::FetchRoles, e))?;
        tracing::debug!(count = roles.len(), "roles refreshed");
        self.roles = roles;
        Ok(())
    }

    /// Rebuild the catalog; on failure the previous catalog stays.
    pub async fn refresh_permissions(&mut self) -> Result<(), BoardError> {
        let permissions = self
            .store
            .list_permissions()
            .await
            .map_err(|e| BoardError::new(BoardAction::FetchPermissions, e))?;
        self.catalog = PermissionCatalog::new(permissions);
        Ok(())
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Roles whose name contains the search text, ignoring case.
    pub fn filtered_roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter().filter(|r| r.matches_search(&self.search))
    }

    /// Open a blank editor, replacing any open one.
    pub fn open_create(&mut self) -> &mut RoleEditor {
        self.editor.insert(RoleEditor::create())
    }

    /// Open an editor hydrated from the store's current copy of the role.
    pub async fn open_edit(&mut self, id: RoleId) -> Result<&mut RoleEditor, BoardError> {
        let role = self
            .store
            .get_role(id)
            .await
            .map_err(|e| BoardError::new(BoardAction::FetchRole, e))?;
        Ok(self.editor.insert(RoleEditor::edit(&role)))
    }

    pub fn editor(&self) -> Option<&RoleEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut RoleEditor> {
        self.editor.as_mut()
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Fetch one role for read-only display.
    pub async fn view_role(&mut self, id: RoleId) -> Result<&Role, BoardError> {
        let role = self
            .store
            .get_role(id)
            .await
            .map_err(|e| BoardError::new(BoardAction::FetchRole, e))?;
        Ok(self.viewing.insert(role))
    }

    pub fn viewing(&self) -> Option<&Role> {
        self.viewing.as_ref()
    }

    pub fn close_view(&mut self) {
        self.viewing = None;
    }

    /// Submit the open editor. A saved role closes the editor and refreshes
    /// the list; every other outcome leaves the editor open as it was.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let editor = self.editor.as_ref().ok_or(SubmitError::NoEditor)?;
        let outcome = editor.submit(self.store.as_ref()).await?;

        if outcome.is_saved() {
            self.editor = None;
            self.refresh_after_write("role saved").await;
        }
        Ok(outcome)
    }

    // The write already happened; a failed refetch must not report it as
    // failed.
    async fn refresh_after_write(&mut self, change: &'static str) {
        if let Err(err) = self.refresh_roles().await {
            tracing::warn!(error = %err, change, "list refresh failed after a successful write");
        }
    }

    pub async fn delete_role(&mut self, id: RoleId) -> Result<(), BoardError> {
        self.store
            .delete_role(id)
            .await
            .map_err(|e| BoardError::new(BoardAction::DeleteRole, e))?;
        tracing::info!(role_id = %id, "role deleted");

        if self.viewing.as_ref().is_some_and(|r| r.id == id) {
            self.viewing = None;
        }
        self.refresh_after_write("role deleted").await;
        Ok(())
    }

    /// Attach permissions to a role without going through the editor.
    pub async fn assign_permissions(
        &mut self,
        id: RoleId,
        permission_ids: &[PermissionId],
    ) -> Result<(), BoardError> {
        self.store
            .assign_permissions(id, permission_ids)
            .await
            .map_err(|e| BoardError::new(BoardAction::AssignPermissions, e))?;
        tracing::info!(role_id = %id, count = permission_ids.len(), "permissions assigned");
        self.refresh_after_write("permissions assigned").await;
        Ok(())
    }
}
