//! Page Flows
//!
//! The three behaviours of the back-office pages, written against ports:
//!
//! - **guard**: protected pages bounce to the login page without a token
//! - **login**: validate the form, exchange credentials, admit admins only
//! - **dashboard**: fetch counters, wipe the session on 401
//!
//! Flows never touch the network, storage or screen directly. They go
//! through [`Ports`], so the same code drives the CLI and the tests.

mod dashboard;
mod guard;
mod loading;
mod login;

#[cfg(test)]
pub(crate) mod test_support;

pub use dashboard::{counter_values, DashboardFlow, DashboardState};
pub use guard::{ensure_authenticated, logout, redirect_if_authenticated, GuardOutcome, LoginPage};
pub use loading::LoadingPolicy;
pub use login::{
    validate, LoginError, LoginFlow, LoginSettings, ValidationError, DEFAULT_ADMIN_ROLE,
};

use crate::client::AdminApi;
use crate::session::SessionStore;
use crate::ui::{Navigator, Presenter};

/// Everything a flow is allowed to touch
#[derive(Clone, Copy)]
pub struct Ports<'a> {
    pub api: &'a dyn AdminApi,
    pub store: &'a dyn SessionStore,
    pub presenter: &'a dyn Presenter,
    pub navigator: &'a dyn Navigator,
}

impl<'a> Ports<'a> {
    pub fn new(
        api: &'a dyn AdminApi,
        store: &'a dyn SessionStore,
        presenter: &'a dyn Presenter,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            api,
            store,
            presenter,
            navigator,
        }
    }
}
