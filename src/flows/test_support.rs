//! Test doubles for the flow ports

use crate::client::{
    AdminApi, ApiError, DashboardStats, LoginRequest, LoginResponse, Subscriptions,
};
use crate::ui::{Counter, Field, Navigator, Page, Presenter};
use async_trait::async_trait;
use std::sync::Mutex;

/// Something the flows did to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    ShowLoading,
    HideLoading,
    FieldError(Field, String),
    Counter(Counter, u64),
    Navigate(Page),
}

/// Presenter and navigator that records every call
#[derive(Debug, Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Latest non-empty error text on a field, `None` once cleared
    pub fn field_error(&self, field: Field) -> Option<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::FieldError(f, message) if f == field => Some(message),
                _ => None,
            })
            .last()
            .filter(|message| !message.is_empty())
    }

    pub fn navigations(&self) -> Vec<Page> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Navigate(page) => Some(page),
                _ => None,
            })
            .collect()
    }

    pub fn counters(&self) -> Vec<(Counter, u64)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Counter(counter, value) => Some((counter, value)),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for RecordingView {
    fn show_loading(&self) {
        self.push(ViewEvent::ShowLoading);
    }

    fn hide_loading(&self) {
        self.push(ViewEvent::HideLoading);
    }

    fn set_field_error(&self, field: Field, message: &str) {
        self.push(ViewEvent::FieldError(field, message.to_string()));
    }

    fn animate_counter(&self, counter: Counter, value: u64) {
        self.push(ViewEvent::Counter(counter, value));
    }
}

impl Navigator for RecordingView {
    fn navigate(&self, page: Page) {
        self.push(ViewEvent::Navigate(page));
    }
}

#[derive(Debug, Clone)]
enum Reply<T> {
    Ok(T),
    Status(u16),
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(ApiError::Status {
                status: *status,
                message: String::new(),
            }),
        }
    }
}

#[derive(Debug, Default)]
struct Calls {
    logins: Vec<LoginRequest>,
    stats: Vec<(String, Option<String>)>,
}

/// Canned admin API
#[derive(Debug)]
pub struct StubApi {
    login: Reply<LoginResponse>,
    stats: Reply<DashboardStats>,
    calls: Mutex<Calls>,
}

impl StubApi {
    pub fn with_roles(roles: &[&str]) -> Self {
        let token = if roles.contains(&"ROLE_ADMIN") {
            "admin-token"
        } else {
            "user-token"
        };
        Self {
            login: Reply::Ok(LoginResponse {
                access_token: token.to_string(),
                roles: roles.iter().map(|r| r.to_string()).collect(),
            }),
            stats: Reply::Ok(DashboardStats::default()),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn admin() -> Self {
        Self::with_roles(&["ROLE_ADMIN"])
    }

    /// Login answers with the given HTTP status
    pub fn failing(status: u16) -> Self {
        Self {
            login: Reply::Status(status),
            ..Self::admin()
        }
    }

    pub fn stats(mut self, stats: DashboardStats) -> Self {
        self.stats = Reply::Ok(stats);
        self
    }

    pub fn stats_status(mut self, status: u16) -> Self {
        self.stats = Reply::Status(status);
        self
    }

    pub fn sample_stats() -> DashboardStats {
        DashboardStats {
            active_users: Some(42),
            subscribed: Some(Subscriptions {
                total: Some(30),
                monthly: Some(20),
                six_months: Some(6),
                annual: Some(4),
            }),
        }
    }

    pub fn login_calls(&self) -> usize {
        self.calls.lock().unwrap().logins.len()
    }

    pub fn last_login(&self) -> Option<LoginRequest> {
        self.calls.lock().unwrap().logins.last().cloned()
    }

    /// Token of the last stats call; `Some(None)` means no header was sent
    pub fn last_token(&self) -> Option<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .stats
            .last()
            .map(|(_, token)| token.clone())
    }

    pub fn last_base_url(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .stats
            .last()
            .map(|(url, _)| url.clone())
    }
}

#[async_trait]
impl AdminApi for StubApi {
    async fn login(
        &self,
        _base_url: &str,
        request: &LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        self.calls.lock().unwrap().logins.push(request.clone());
        self.login.produce()
    }

    async fn dashboard_stats(
        &self,
        base_url: &str,
        token: Option<&str>,
    ) -> Result<DashboardStats, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .stats
            .push((base_url.to_string(), token.map(str::to_string)));
        self.stats.produce()
    }
}
