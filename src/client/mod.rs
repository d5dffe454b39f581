//! Admin API Client
//!
//! HTTP access to the two admin endpoints the flows consume:
//!
//! - `POST /api/admin/login`
//! - `GET /api/admin/dashboard_stats`
//!
//! Flows talk to the [`AdminApi`] trait so tests can swap the network out.

mod dto;
mod error;
mod http;

pub use dto::{DashboardStats, LoginRequest, LoginResponse, StatsEnvelope, Subscriptions};
pub use error::ApiError;
pub use http::{AdminClient, AdminClientConfig};

use async_trait::async_trait;

/// Path of the login endpoint
pub const LOGIN_PATH: &str = "/api/admin/login";

/// Path of the dashboard statistics endpoint
pub const DASHBOARD_STATS_PATH: &str = "/api/admin/dashboard_stats";

/// The admin endpoints used by the login and dashboard flows
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Exchange a phone number and password for a token and role list
    async fn login(&self, base_url: &str, request: &LoginRequest)
        -> Result<LoginResponse, ApiError>;

    /// Fetch the dashboard counters.
    ///
    /// `token` becomes an `Authorization: Bearer` header; with `None` the
    /// header is left off entirely.
    async fn dashboard_stats(
        &self,
        base_url: &str,
        token: Option<&str>,
    ) -> Result<DashboardStats, ApiError>;
}

/// Join an API base URL and an endpoint path, dropping trailing slashes
/// from the base
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
