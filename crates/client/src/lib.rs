//! `mallhub-client`: typed REST client for the role/permission store.
//!
//! The credential used to authorize calls is injected into [`ApiClient`];
//! nothing here reads process-global auth state.

pub mod config;
pub mod credential;
pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use config::ClientConfig;
pub use credential::Credential;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use session::{LoginRequest, Session, SessionUser, UserProfile};
pub use store::RoleStore;
