//! reqwest implementation of the admin API

use super::{
    endpoint, AdminApi, ApiError, DashboardStats, LoginRequest, LoginResponse, StatsEnvelope,
    DASHBOARD_STATS_PATH, LOGIN_PATH,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

/// Admin API client over HTTP
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: Client,
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct AdminClientConfig {
    /// Request timeout
    pub request_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for AdminClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: format!("backoffice/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AdminClient {
    pub fn new(config: AdminClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Turn a non-2xx answer into `ApiError::Status`
    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl AdminApi for AdminClient {
    async fn login(
        &self,
        base_url: &str,
        request: &LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        let url = endpoint(base_url, LOGIN_PATH);
        tracing::debug!(%url, "Submitting admin login");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::from_send)?;

        let response = Self::check_status(response).await?;
        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn dashboard_stats(
        &self,
        base_url: &str,
        token: Option<&str>,
    ) -> Result<DashboardStats, ApiError> {
        let url = endpoint(base_url, DASHBOARD_STATS_PATH);
        tracing::debug!(%url, authorized = token.is_some(), "Fetching dashboard stats");

        let mut request = self.client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::from_send)?;
        let response = Self::check_status(response).await?;

        let envelope: StatsEnvelope = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(envelope.into_stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AdminClientConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("backoffice/"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let client = AdminClient::new(AdminClientConfig {
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        })
        .unwrap();

        // port 9 (discard) on loopback is closed on test machines
        let err = client
            .dashboard_stats("http://127.0.0.1:9", Some("t"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unavailable | ApiError::Timeout | ApiError::Request(_)
        ));
        assert!(!err.is_unauthorized());
    }
}
