//! Login: exchange admin credentials for a bearer token.

use serde::{Deserialize, Serialize};

use mallhub_core::UserId;

use crate::{ApiClient, ClientResult, Credential};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// The authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub profile: UserProfile,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: SessionUser,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub credential: Credential,
    pub user: SessionUser,
}

impl ApiClient {
    /// `POST /auth/login`.
    ///
    /// The returned credential is not installed on `self`; callers inject it
    /// with [`ApiClient::with_credential`].
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post("auth/login", &request).await?;
        tracing::info!(user_id = %response.user.id, role = %response.user.role, "logged in");

        Ok(Session {
            credential: Credential::new(response.token),
            user: response.user,
        })
    }
}
