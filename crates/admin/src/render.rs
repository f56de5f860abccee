//! Plain-text rendering of roles and the permission matrix.

use mallhub_auth::{
    ModuleGroup, ModuleSelection, Permission, PermissionCatalog, PermissionSelection, Role,
};

const CELL_WIDTH: usize = 18;

fn module_mark(state: ModuleSelection) -> &'static str {
    match state {
        ModuleSelection::Full => "[x]",
        ModuleSelection::Partial => "[-]",
        ModuleSelection::None => "[ ]",
    }
}

fn check(selection: &PermissionSelection, perm: &Permission) -> &'static str {
    if selection.contains(perm.id) { "[x]" } else { "[ ]" }
}

fn module_rows(group: &ModuleGroup, catalog: &PermissionCatalog, selection: &PermissionSelection) -> Vec<String> {
    let state = selection.module_selection(catalog, group.module());
    let mut lines = vec![format!("{} {}", module_mark(state), group.label())];

    let cells: String = group
        .slots()
        .map(|(action, perm)| {
            let cell = match perm {
                Some(perm) => format!("{} {} ({})", check(selection, perm), action.label(), perm.id),
                None => format!(" -  {}", action.label()),
            };
            format!("{cell:<width$}", width = CELL_WIDTH)
        })
        .collect();
    lines.push(format!("    {}", cells.trim_end()));

    // Permissions outside the CRUD vocabulary, and any that lost a contested
    // slot, are listed under the grid.
    let slotted: Vec<_> = group.slots().filter_map(|(_, p)| p.map(|p| p.id)).collect();
    for perm in group.permissions().iter().filter(|p| !slotted.contains(&p.id)) {
        lines.push(format!("    {} {} ({})", check(selection, perm), perm.name, perm.id));
    }
    lines
}

/// Checkbox grid: one heading per module with its tri-state mark, then one
/// cell per action slot.
pub fn render_matrix(catalog: &PermissionCatalog, selection: &PermissionSelection) -> String {
    if catalog.is_empty() {
        return "No permissions available.".to_string();
    }
    catalog
        .modules()
        .flat_map(|group| module_rows(group, catalog, selection))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every permission, grouped by module.
pub fn render_catalog(catalog: &PermissionCatalog) -> String {
    if catalog.is_empty() {
        return "No permissions available.".to_string();
    }
    let mut lines = Vec::new();
    for group in catalog.modules() {
        lines.push(format!("{} ({})", group.label(), group.module()));
        for perm in group.permissions() {
            match &perm.description {
                Some(desc) => lines.push(format!("  {:>5}  {:<8} {desc}", perm.id, perm.name)),
                None => lines.push(format!("  {:>5}  {}", perm.id, perm.name)),
            }
        }
    }
    lines.join("\n")
}

fn permission_summary(role: &Role, catalog: &PermissionCatalog) -> String {
    let ids = role.permission_ids();
    let modules: Vec<&str> = catalog
        .modules()
        .filter(|g| g.permission_ids().iter().any(|id| ids.contains(id)))
        .map(|g| g.module())
        .collect();

    if modules.is_empty() {
        ids.len().to_string()
    } else {
        format!("{} ({})", ids.len(), modules.join(", "))
    }
}

/// Role list as a fixed-width table.
pub fn render_role_table<'a>(
    roles: impl IntoIterator<Item = &'a Role>,
    catalog: &PermissionCatalog,
) -> String {
    let rows: Vec<[String; 4]> = roles
        .into_iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.status.to_string(),
                permission_summary(r, catalog),
            ]
        })
        .collect();

    if rows.is_empty() {
        return "No roles found.".to_string();
    }

    let id_w = rows.iter().map(|r| r[0].len()).max().unwrap_or(0).max(2);
    let name_w = rows.iter().map(|r| r[1].len()).max().unwrap_or(0).max(4);
    let status_w = 8;

    let mut lines = vec![format!(
        "{:<id_w$}  {:<name_w$}  {:<status_w$}  PERMISSIONS",
        "ID", "NAME", "STATUS"
    )];
    for [id, name, status, perms] in rows {
        lines.push(format!("{id:<id_w$}  {name:<name_w$}  {status:<status_w$}  {perms}"));
    }
    lines.join("\n")
}

/// Detail view of one role with its permissions laid over the catalog.
pub fn render_role(role: &Role, catalog: &PermissionCatalog) -> String {
    let selection = PermissionSelection::from_role(role);
    let mut out = format!("Role #{} {}\nStatus: {}\n", role.id, role.name, role.status);
    if let Some(created) = role.created_at {
        out.push_str(&format!("Created: {}\n", created.format("%Y-%m-%d %H:%M")));
    }
    out.push('\n');
    out.push_str(&render_matrix(catalog, &selection));
    out
}
