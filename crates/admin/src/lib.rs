//! Role and permission administration for the mall dashboard.
//!
//! [`RoleBoard`] holds the role list and the permission catalog; a
//! [`RoleEditor`] carries one create/edit session through validation and
//! submission against any [`RoleStore`](mallhub_client::RoleStore).

pub mod board;
pub mod cli;
pub mod editor;
pub mod errors;
pub mod render;

#[cfg(test)]
mod testing;

pub use board::RoleBoard;
pub use editor::{RoleEditor, SubmitOutcome};
pub use errors::{BoardAction, BoardError, SubmitError};
