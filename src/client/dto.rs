//! Request/Response DTOs for the admin endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/admin/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

/// Successful login answer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Missing or null roles read as an empty list
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<String>,
}

impl LoginResponse {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a counter, turning anything that is not a whole non-negative
/// number into `None` so one odd field does not sink the whole payload.
///
/// Integral floats (`1250.0`) and numeric strings (`"1250"`) are accepted.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Null => None,
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    if count.is_none() && !value.is_null() {
        tracing::debug!(%value, "Ignoring non-count value in stats payload");
    }
    Ok(count)
}

fn lenient_subscriptions<'de, D>(deserializer: D) -> Result<Option<Subscriptions>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(subscribed) => Ok(Some(subscribed)),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed subscribed block");
            Ok(None)
        }
    }
}

/// Dashboard counters.
///
/// Every field is optional: the dashboard applies what is present and
/// skips the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub active_users: Option<u64>,
    #[serde(default, deserialize_with = "lenient_subscriptions")]
    pub subscribed: Option<Subscriptions>,
}

/// Subscription counts by plan length
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriptions {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub monthly: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub six_months: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub annual: Option<u64>,
}

/// Stats payload as served: either wrapped in `data` or at the top level.
///
/// A `data` field that is null or not an object falls through to the
/// top-level reading.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatsEnvelope {
    Wrapped { data: DashboardStats },
    Bare(DashboardStats),
}

impl StatsEnvelope {
    pub fn into_stats(self) -> DashboardStats {
        match self {
            StatsEnvelope::Wrapped { data } => data,
            StatsEnvelope::Bare(stats) => stats,
        }
    }
}
