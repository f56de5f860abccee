//! Permission catalog: the authoritative module → permissions mapping.
//!
//! The catalog groups the store's permission list by `module`, keeping modules
//! in first-appearance order and ordering each module's permissions by the
//! CRUD vocabulary. Every module reserves one slot per [`Action`] so a matrix
//! renderer can keep its columns aligned when a module lacks an action.

use std::collections::{BTreeSet, HashMap};

use mallhub_core::{PermissionId, dedupe_by_id};

use crate::permissions::{Action, Permission, module_label};

/// All permissions of one module, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGroup {
    module: String,
    permissions: Vec<Permission>,
    slots: [Option<usize>; 4],
}

impl ModuleGroup {
    fn new(module: String, mut permissions: Vec<Permission>) -> Self {
        // Stable sort: among equal keys the store's order is kept.
        permissions.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

        let mut slots = [None; 4];
        for (idx, perm) in permissions.iter().enumerate() {
            let Some(action) = perm.action() else {
                continue;
            };
            match slots[action.slot()] {
                None => slots[action.slot()] = Some(idx),
                Some(first) => tracing::warn!(
                    module = %module,
                    action = %action,
                    kept = %permissions[first].id,
                    ignored = %perm.id,
                    "module has more than one permission for an action"
                ),
            }
        }

        Self {
            module,
            permissions,
            slots,
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Heading shown above the module's checkboxes.
    pub fn label(&self) -> String {
        module_label(&self.module)
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Every permission id belonging to the module, including ids whose name
    /// falls outside the CRUD vocabulary.
    pub fn permission_ids(&self) -> BTreeSet<PermissionId> {
        self.permissions.iter().map(|p| p.id).collect()
    }

    /// The permission occupying an action slot, if the module defines one.
    pub fn slot(&self, action: Action) -> Option<&Permission> {
        self.slots[action.slot()].map(|idx| &self.permissions[idx])
    }

    /// The four action slots in vocabulary order; absent actions yield `None`.
    pub fn slots(&self) -> impl Iterator<Item = (Action, Option<&Permission>)> + '_ {
        Action::ALL.into_iter().map(move |action| (action, self.slot(action)))
    }
}

fn sort_key(perm: &Permission) -> (usize, String) {
    match perm.action() {
        Some(action) => (action.slot(), String::new()),
        None => (Action::ALL.len(), perm.name.clone()),
    }
}

/// Permissions grouped by module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionCatalog {
    groups: Vec<ModuleGroup>,
    index: HashMap<String, usize>,
}

impl PermissionCatalog {
    pub fn new(permissions: Vec<Permission>) -> Self {
        let permissions = dedupe_by_id(permissions);

        let mut order: Vec<String> = Vec::new();
        let mut buckets: HashMap<String, Vec<Permission>> = HashMap::new();
        for perm in permissions {
            if !buckets.contains_key(&perm.module) {
                order.push(perm.module.clone());
            }
            buckets.entry(perm.module.clone()).or_default().push(perm);
        }

        let mut groups = Vec::with_capacity(order.len());
        let mut index = HashMap::with_capacity(order.len());
        for module in order {
            let perms = buckets.remove(&module).unwrap_or_default();
            index.insert(module.clone(), groups.len());
            groups.push(ModuleGroup::new(module, perms));
        }

        tracing::debug!(modules = groups.len(), "built permission catalog");

        Self { groups, index }
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleGroup> {
        self.groups.iter()
    }

    pub fn module(&self, module: &str) -> Option<&ModuleGroup> {
        self.index.get(module).map(|&idx| &self.groups[idx])
    }

    /// Permission ids of `module`; empty when the module is unknown.
    pub fn module_permission_ids(&self, module: &str) -> BTreeSet<PermissionId> {
        self.module(module)
            .map(ModuleGroup::permission_ids)
            .unwrap_or_default()
    }

    pub fn permission(&self, id: PermissionId) -> Option<&Permission> {
        self.groups
            .iter()
            .flat_map(|g| g.permissions.iter())
            .find(|p| p.id == id)
    }

    pub fn permission_count(&self) -> usize {
        self.groups.iter().map(|g| g.permissions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<Permission> for PermissionCatalog {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(id: i64, action: Action, module: &str) -> Permission {
        Permission::new(id, action, module)
    }

    #[test]
    fn groups_by_module_in_first_appearance_order() {
        let catalog = PermissionCatalog::new(vec![
            perm(1, Action::Read, "tenant"),
            perm(2, Action::Create, "mall"),
            perm(3, Action::Create, "tenant"),
        ]);

        let modules: Vec<&str> = catalog.modules().map(ModuleGroup::module).collect();
        assert_eq!(modules, vec!["tenant", "mall"]);
        assert_eq!(catalog.permission_count(), 3);
    }

    #[test]
    fn orders_permissions_by_action_vocabulary() {
        let catalog = PermissionCatalog::new(vec![
            perm(4, Action::Delete, "floor"),
            perm(2, Action::Read, "floor"),
            perm(3, Action::Update, "floor"),
            perm(1, Action::Create, "floor"),
        ]);

        let floor = catalog.module("floor").unwrap();
        let names: Vec<&str> = floor.permissions().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["CREATE", "READ", "UPDATE", "DELETE"]);
    }

    #[test]
    fn reserves_a_slot_per_action_even_when_missing() {
        let catalog = PermissionCatalog::new(vec![
            perm(1, Action::Create, "mall"),
            perm(2, Action::Delete, "mall"),
        ]);

        let slots: Vec<(Action, Option<PermissionId>)> = catalog
            .module("mall")
            .unwrap()
            .slots()
            .map(|(a, p)| (a, p.map(|p| p.id)))
            .collect();

        assert_eq!(
            slots,
            vec![
                (Action::Create, Some(PermissionId::new(1))),
                (Action::Read, None),
                (Action::Update, None),
                (Action::Delete, Some(PermissionId::new(2))),
            ]
        );
    }

    #[test]
    fn first_permission_wins_a_contested_slot_but_both_belong_to_module() {
        let catalog = PermissionCatalog::new(vec![
            perm(7, Action::Read, "unit"),
            perm(8, Action::Read, "unit"),
        ]);

        let unit = catalog.module("unit").unwrap();
        assert_eq!(unit.slot(Action::Read).map(|p| p.id), Some(PermissionId::new(7)));
        assert_eq!(unit.permission_ids().len(), 2);
    }

    #[test]
    fn unknown_actions_sort_last_and_take_no_slot() {
        let export = Permission {
            name: "EXPORT".to_string(),
            ..perm(5, Action::Read, "report")
        };
        let catalog = PermissionCatalog::new(vec![export, perm(6, Action::Read, "report")]);

        let report = catalog.module("report").unwrap();
        assert_eq!(report.permissions()[1].name, "EXPORT");
        assert_eq!(report.slots().filter(|(_, p)| p.is_some()).count(), 1);
        assert!(report.permission_ids().contains(&PermissionId::new(5)));
    }

    #[test]
    fn duplicate_ids_are_collapsed() {
        let catalog = PermissionCatalog::new(vec![
            perm(1, Action::Create, "mall"),
            perm(1, Action::Create, "mall"),
        ]);
        assert_eq!(catalog.permission_count(), 1);
    }

    #[test]
    fn unknown_module_has_no_ids() {
        let catalog = PermissionCatalog::new(vec![perm(1, Action::Create, "mall")]);
        assert!(catalog.module("tenant").is_none());
        assert!(catalog.module_permission_ids("tenant").is_empty());
        assert_eq!(
            catalog.permission(PermissionId::new(1)).map(|p| p.module.as_str()),
            Some("mall")
        );
    }
}
