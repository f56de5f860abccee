//! HTTP transport for the dashboard API.

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ClientConfig, ClientError, ClientResult, Credential};

/// Network client for the dashboard REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credential: Option<Credential>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credential: config.token.as_deref().map(Credential::new),
        })
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");

        let request = self.client.request(method, url);
        match &self.credential {
            Some(cred) => request.header(reqwest::header::AUTHORIZATION, cred.bearer()),
            None => request,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.request(Method::GET, path).send().await?;
        Self::decode(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        Self::decode(response).await
    }

    /// POST whose response body (if any) is not needed.
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<()> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::check(response).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::check(response).await.map(|_| ())
    }

    /// Turn a non-success response into a classified error; pass others through.
    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::debug!(status = status.as_u16(), %url, error = %err, "could not read error body");
                String::new()
            }
        };
        let err = ClientError::from_response(status, &body);
        tracing::warn!(status = status.as_u16(), %url, error = %err, "request failed");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::check(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_without_double_slashes() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:3000/api/")).unwrap();
        assert_eq!(client.url("/roles"), "http://localhost:3000/api/roles");
        assert_eq!(client.url("roles/3"), "http://localhost:3000/api/roles/3");
    }

    #[test]
    fn token_from_config_becomes_credential() {
        let config = ClientConfig::default().with_token("abc");
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.credential().map(Credential::token), Some("abc"));

        let client = client.with_credential(Credential::new("xyz"));
        assert_eq!(client.credential().map(Credential::token), Some("xyz"));
    }
}
