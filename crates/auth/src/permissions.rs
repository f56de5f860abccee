use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mallhub_core::{DomainError, Entity, PermissionId};

/// The fixed CRUD vocabulary a permission name is drawn from.
///
/// Declaration order is the rendering order of a module's action slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Read => "READ",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }

    /// Checkbox label ("Create", "Read", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Read => "Read",
            Action::Update => "Update",
            Action::Delete => "Delete",
        }
    }

    /// Position of the action's slot within a module row.
    pub fn slot(&self) -> usize {
        *self as usize
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Action::Create),
            "READ" => Ok(Action::Read),
            "UPDATE" => Ok(Action::Update),
            "DELETE" => Ok(Action::Delete),
            other => Err(DomainError::validation(format!("unknown action '{other}'"))),
        }
    }
}

/// A permission record as served by the permission store.
///
/// `name` is kept verbatim so that a permission outside the CRUD vocabulary
/// still round-trips and still counts as a member of its module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: PermissionId,
    pub name: String,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Permission {
    pub fn new(id: impl Into<PermissionId>, action: Action, module: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: action.as_str().to_string(),
            module: module.into(),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// The CRUD action this permission grants, if its name is in the vocabulary.
    pub fn action(&self) -> Option<Action> {
        self.name.parse().ok()
    }
}

impl Entity for Permission {
    type Id = PermissionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Human-readable module heading: `mall_floor` → `Mall Floor Management`.
pub fn module_label(module: &str) -> String {
    let words: Vec<String> = module
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Management".to_string()
    } else {
        format!("{} Management", words.join(" "))
    }
}
