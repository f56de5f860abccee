use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use mallhub_core::{DomainError, DomainResult, Entity, PermissionId, RoleId};

/// Role lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleStatus {
    #[default]
    Active,
    Inactive,
}

impl RoleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleStatus::Active => "ACTIVE",
            RoleStatus::Inactive => "INACTIVE",
        }
    }
}

impl core::fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for RoleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(RoleStatus::Active),
            "INACTIVE" => Ok(RoleStatus::Inactive),
            other => Err(DomainError::validation(format!("unknown role status '{other}'"))),
        }
    }
}

/// A permission as embedded in a role record.
///
/// Only the id is authoritative; `name` and `module` are display hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePermission {
    pub id: PermissionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

#[derive(Deserialize)]
struct PermissionSummary {
    id: PermissionId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    module: Option<String>,
}

// The role store embeds permissions either directly or through the
// role/permission join record. A join record may carry its own `id`, so the
// nested shape is tried first.
#[derive(Deserialize)]
#[serde(untagged)]
enum RolePermissionWire {
    Joined { permission: PermissionSummary },
    Direct(PermissionSummary),
}

impl<'de> Deserialize<'de> for RolePermission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let summary = match RolePermissionWire::deserialize(deserializer)? {
            RolePermissionWire::Joined { permission } => permission,
            RolePermissionWire::Direct(s) => s,
        };
        Ok(Self {
            id: summary.id,
            name: summary.name,
            module: summary.module,
        })
    }
}

/// A role record as served by the role store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub status: RoleStatus,
    #[serde(default)]
    pub permissions: Vec<RolePermission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
    /// The role's permission ids as a set; repeated references collapse.
    pub fn permission_ids(&self) -> BTreeSet<PermissionId> {
        self.permissions.iter().map(|p| p.id).collect()
    }

    /// Case-insensitive substring match on the role name (role list search).
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Reference to a permission in an upsert payload (`{"id": 3}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionRef {
    pub id: PermissionId,
}

/// Body of a role create/update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpsert {
    pub name: String,
    pub status: RoleStatus,
    pub permissions: Vec<PermissionRef>,
}

impl RoleUpsert {
    /// Build a payload, enforcing the submission preconditions:
    /// a non-blank name and at least one permission.
    pub fn new(
        name: impl Into<String>,
        status: RoleStatus,
        permissions: impl IntoIterator<Item = PermissionId>,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Role name is required"));
        }

        let ids: BTreeSet<PermissionId> = permissions.into_iter().collect();
        if ids.is_empty() {
            return Err(DomainError::validation("Role must have at least one permission."));
        }

        Ok(Self {
            name,
            status,
            permissions: ids.into_iter().map(|id| PermissionRef { id }).collect(),
        })
    }

    pub fn permission_ids(&self) -> BTreeSet<PermissionId> {
        self.permissions.iter().map(|p| p.id).collect()
    }
}

/// Body of `POST /roles/{id}/permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPermissions {
    pub permission_ids: Vec<PermissionId>,
}
