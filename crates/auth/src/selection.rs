//! In-progress permission selection for a role being created or edited.
//!
//! The selection owns nothing but a set of permission ids. Module-level
//! operations take the [`PermissionCatalog`] on every call and recompute the
//! module's id set from it, so a catalog refresh is picked up immediately.
//!
//! An empty (or unknown) module is reported as neither fully nor partially
//! selected: a module without permissions has nothing to be "all selected".

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use mallhub_core::{DomainError, DomainResult, PermissionId};

use crate::catalog::PermissionCatalog;
use crate::roles::{PermissionRef, Role};

/// Tri-state of a module checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleSelection {
    None,
    Partial,
    Full,
}

/// Per-module flags handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleState {
    pub full: bool,
    pub partial: bool,
}

/// Everything a renderer needs to paint checkboxes and indeterminate marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub selected: BTreeSet<PermissionId>,
    pub modules: BTreeMap<String, ModuleState>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSelection {
    selected: BTreeSet<PermissionId>,
}

impl PermissionSelection {
    /// Empty selection, used when creating a role.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection hydrated from an existing role, used when editing.
    pub fn from_role(role: &Role) -> Self {
        Self {
            selected: role.permission_ids(),
        }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = PermissionId>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    pub fn toggle_individual(&mut self, id: PermissionId, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    pub fn toggle_module(&mut self, catalog: &PermissionCatalog, module: &str, checked: bool) {
        let ids = catalog.module_permission_ids(module);
        if checked {
            self.selected.extend(ids);
        } else {
            self.selected.retain(|id| !ids.contains(id));
        }
    }

    pub fn is_module_fully_selected(&self, catalog: &PermissionCatalog, module: &str) -> bool {
        let ids = catalog.module_permission_ids(module);
        !ids.is_empty() && ids.is_subset(&self.selected)
    }

    pub fn is_module_partially_selected(&self, catalog: &PermissionCatalog, module: &str) -> bool {
        let ids = catalog.module_permission_ids(module);
        ids.iter().any(|id| self.selected.contains(id)) && !ids.is_subset(&self.selected)
    }

    pub fn module_selection(&self, catalog: &PermissionCatalog, module: &str) -> ModuleSelection {
        if self.is_module_fully_selected(catalog, module) {
            ModuleSelection::Full
        } else if self.is_module_partially_selected(catalog, module) {
            ModuleSelection::Partial
        } else {
            ModuleSelection::None
        }
    }

    /// Submission precondition: a role needs at least one permission.
    pub fn validate_non_empty(&self) -> DomainResult<()> {
        if self.selected.is_empty() {
            return Err(DomainError::validation("Role must have at least one permission."));
        }
        Ok(())
    }

    pub fn contains(&self, id: PermissionId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> &BTreeSet<PermissionId> {
        &self.selected
    }

    /// Selected ids as `{id}` references for an upsert payload.
    pub fn to_payload_refs(&self) -> Vec<PermissionRef> {
        self.selected.iter().map(|&id| PermissionRef { id }).collect()
    }

    pub fn snapshot(&self, catalog: &PermissionCatalog) -> SelectionSnapshot {
        let modules = catalog
            .modules()
            .map(|group| {
                let state = ModuleState {
                    full: self.is_module_fully_selected(catalog, group.module()),
                    partial: self.is_module_partially_selected(catalog, group.module()),
                };
                (group.module().to_string(), state)
            })
            .collect();

        SelectionSnapshot {
            selected: self.selected.clone(),
            modules,
        }
    }
}
