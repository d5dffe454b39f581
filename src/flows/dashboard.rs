//! Dashboard statistics flow
//!
//! `Idle → Loading → {Rendered | SessionExpired | Failed}`. Only a 401
//! changes stored state: the whole session is wiped and the view goes back
//! to the login page. Anything else leaves the dashboard as it was.

use super::{LoadingPolicy, Ports};
use crate::client::{ApiError, DashboardStats};
use crate::session::{stored_token, SessionResult, URL_KEY};
use crate::ui::{Counter, Page};

/// How a dashboard load ended
#[derive(Debug)]
pub enum DashboardState {
    /// Counters were applied
    Rendered(DashboardStats),
    /// The server refused the token; the session is gone
    SessionExpired,
    /// Any other failure; logged, nothing changed
    Failed(ApiError),
}

/// Counter values of a stats payload in dashboard order
pub fn counter_values(stats: &DashboardStats) -> [(Counter, Option<u64>); 5] {
    let subscribed = stats.subscribed.clone().unwrap_or_default();
    [
        (Counter::ActiveUsers, stats.active_users),
        (Counter::TotalSubscriptions, subscribed.total),
        (Counter::MonthlySubscriptions, subscribed.monthly),
        (Counter::SixMonthSubscriptions, subscribed.six_months),
        (Counter::AnnualSubscriptions, subscribed.annual),
    ]
}

/// Loads the dashboard counters
pub struct DashboardFlow<'a> {
    ports: Ports<'a>,
    /// Used when the session carries no base URL
    default_base_url: String,
    loading: LoadingPolicy,
}

impl<'a> DashboardFlow<'a> {
    pub fn new(
        ports: Ports<'a>,
        default_base_url: impl Into<String>,
        loading: LoadingPolicy,
    ) -> Self {
        Self {
            ports,
            default_base_url: default_base_url.into(),
            loading,
        }
    }

    pub async fn load(&self) -> SessionResult<DashboardState> {
        let store = self.ports.store;
        let token = stored_token(store)?;
        let base_url = match store.get(URL_KEY)? {
            Some(url) => url,
            None => {
                tracing::debug!("No base URL in session, using configured default");
                self.default_base_url.clone()
            }
        };

        self.ports.presenter.show_loading();
        let result = self
            .ports
            .api
            .dashboard_stats(&base_url, token.as_deref())
            .await;
        let state = self.apply(result);
        self.loading.settle(self.ports.presenter).await;

        state
    }

    fn apply(&self, result: Result<DashboardStats, ApiError>) -> SessionResult<DashboardState> {
        match result {
            Ok(stats) => {
                self.render(&stats);
                Ok(DashboardState::Rendered(stats))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Session rejected by the API, clearing stored session");
                self.ports.store.clear()?;
                self.ports.navigator.navigate(Page::Login);
                Ok(DashboardState::SessionExpired)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching dashboard stats");
                Ok(DashboardState::Failed(e))
            }
        }
    }

    fn render(&self, stats: &DashboardStats) {
        for (counter, value) in counter_values(stats) {
            match value {
                Some(value) => self.ports.presenter.animate_counter(counter, value),
                None => tracing::debug!(counter = counter.element_id(), "No value in payload"),
            }
        }
    }
}
