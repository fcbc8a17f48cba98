//! Dashboard API Client
//!
//! The operator endpoints of the registry API, as consumed by the dashboard.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::domain::models::application::ApplicationStatus;
use crate::infrastructure::driving_adapters::api_rest::dto::{
    ApplicationListResponseDto, ApplicationStatsDto, BankConnectionListResponseDto, LoginResponseDto,
    UpdateStatusResponseDto,
};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Invalid status: {0}")]
    InvalidStatus(String),
}

impl DashboardError {
    /// Whether the server answered with 404
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

/// Operator-side view of the registry API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn fetch_applications(&self, page: u32, limit: u32) -> Result<ApplicationListResponseDto, DashboardError>;

    async fn fetch_bank_connections(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<BankConnectionListResponseDto, DashboardError>;

    async fn fetch_stats(&self) -> Result<ApplicationStatsDto, DashboardError>;

    async fn update_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<UpdateStatusResponseDto, DashboardError>;

    async fn delete_application(&self, id: &str) -> Result<(), DashboardError>;

    async fn delete_bank_connection(&self, id: &str) -> Result<(), DashboardError>;
}

/// `reqwest` implementation authenticated with an operator bearer token
#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpDashboardApi {
    /// Log in as an operator and keep the issued token
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` with status 401 for bad credentials, or
    /// `DashboardError::Http` if the server cannot be reached.
    pub async fn login(base_url: &str, username: &str, password: &str) -> Result<Self, DashboardError> {
        let client = Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();

        let response = client
            .post(format!("{base_url}/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let login: LoginResponseDto = decode(response).await?;

        tracing::debug!(expires_in = login.expires_in, "Dashboard session established");
        Ok(Self {
            client,
            base_url,
            token: login.access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

/// Turn non-2xx responses into `DashboardError::Api`, carrying the server's message
async fn check(response: Response) -> Result<Response, DashboardError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);
    Err(DashboardError::Api { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DashboardError> {
    Ok(check(response).await?.json::<T>().await?)
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn fetch_applications(&self, page: u32, limit: u32) -> Result<ApplicationListResponseDto, DashboardError> {
        let response = self
            .authorized(self.client.get(self.url("/applications")))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        decode(response).await
    }

    async fn fetch_bank_connections(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<BankConnectionListResponseDto, DashboardError> {
        let response = self
            .authorized(self.client.get(self.url("/bank-connections")))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;
        decode(response).await
    }

    async fn fetch_stats(&self) -> Result<ApplicationStatsDto, DashboardError> {
        let response = self
            .authorized(self.client.get(self.url("/applications/stats")))
            .send()
            .await?;
        decode(response).await
    }

    async fn update_status(
        &self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<UpdateStatusResponseDto, DashboardError> {
        let response = self
            .authorized(self.client.put(self.url(&format!("/applications/{id}"))))
            .json(&json!({ "status": status }))
            .send()
            .await?;
        decode(response).await
    }

    async fn delete_application(&self, id: &str) -> Result<(), DashboardError> {
        let response = self
            .authorized(self.client.delete(self.url(&format!("/applications/{id}"))))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }

    async fn delete_bank_connection(&self, id: &str) -> Result<(), DashboardError> {
        let response = self
            .authorized(self.client.delete(self.url(&format!("/bank-connections/{id}"))))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn logged_in(server: &MockServer) -> HttpDashboardApi {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({ "username": "ops", "password": "correct horse battery" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "token-123",
                "tokenType": "Bearer",
                "expiresIn": 3600
            })))
            .mount(server)
            .await;

        HttpDashboardApi::login(&server.uri(), "ops", "correct horse battery")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn sends_bearer_token_and_paging() {
        let server = MockServer::start().await;
        let api = logged_in(&server).await;

        Mock::given(method("GET"))
            .and(path("/applications"))
            .and(header("authorization", "Bearer token-123"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "applications": [],
                "total": 0,
                "page": 2,
                "totalPages": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = api.fetch_applications(2, 50).await.unwrap();
        assert_eq!(page.page, 2);
        assert!(page.applications.is_empty());
    }

    #[tokio::test]
    async fn surfaces_server_error_message() {
        let server = MockServer::start().await;
        let api = logged_in(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/applications/abc"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "code": "NOT_FOUND", "message": "LoanApplication with id 'abc' not found" },
                "timestamp": "2024-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let err = api.delete_application("abc").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn update_status_sends_canonical_value() {
        let server = MockServer::start().await;
        let api = logged_in(&server).await;

        Mock::given(method("PUT"))
            .and(path("/applications/abc"))
            .and(body_json(json!({ "status": "pending" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Application status updated",
                "status": "pending",
                "changed": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = api.update_status("abc", ApplicationStatus::Pending).await.unwrap();
        assert!(response.changed);
        assert!(response.bank_connection_id.is_none());
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": { "code": "UNAUTHORIZED", "message": "Unauthorized: Invalid username or password" },
                "timestamp": "2024-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let err = HttpDashboardApi::login(&server.uri(), "ops", "nope").await.unwrap_err();
        assert!(matches!(err, DashboardError::Api { status, .. } if status == StatusCode::UNAUTHORIZED));
    }
}
