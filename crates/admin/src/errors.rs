//! Failures surfaced by the role screens.

use mallhub_client::ClientError;
use thiserror::Error;

/// Shown when the store rejects a duplicate role name.
pub const CONFLICT_MESSAGE: &str = "A role with this name already exists.";

/// Generic notification for any other failed save.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save role";

/// Unexpected submission failure.
///
/// Validation and name conflicts are not errors; they come back as
/// [`SubmitOutcome`](crate::editor::SubmitOutcome) variants.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("network error while saving role: {0}")]
    Network(#[source] ClientError),

    #[error("failed to save role: {0}")]
    Unknown(#[source] ClientError),

    #[error("no role editor is open")]
    NoEditor,
}

impl SubmitError {
    pub fn user_message(&self) -> &'static str {
        SAVE_FAILED_MESSAGE
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        if err.is_network() {
            Self::Network(err)
        } else {
            Self::Unknown(err)
        }
    }
}

/// What the board was doing when the store failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAction {
    FetchRoles,
    FetchPermissions,
    FetchRole,
    DeleteRole,
    AssignPermissions,
}

impl BoardAction {
    pub fn user_message(&self) -> &'static str {
        match self {
            BoardAction::FetchRoles => "Failed to fetch roles",
            BoardAction::FetchPermissions => "Failed to fetch permissions",
            BoardAction::FetchRole => "Failed to fetch role details",
            BoardAction::DeleteRole => "Failed to delete role",
            BoardAction::AssignPermissions => "Failed to assign permissions",
        }
    }
}

impl core::fmt::Display for BoardAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.user_message())
    }
}

/// A list/get/delete failure; the board keeps whatever it showed before.
#[derive(Debug, Error)]
#[error("{action}: {source}")]
pub struct BoardError {
    pub action: BoardAction,
    #[source]
    pub source: ClientError,
}

impl BoardError {
    pub fn new(action: BoardAction, source: ClientError) -> Self {
        Self { action, source }
    }

    pub fn user_message(&self) -> &'static str {
        self.action.user_message()
    }
}
