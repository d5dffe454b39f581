//! Session guard, login-page redirect and logout

use crate::session::{stored_token, SessionResult, SessionStore};
use crate::ui::{Navigator, Page};

/// Result of guarding a protected page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// A token is stored; the page may render
    Authenticated,
    /// No token; the view was sent to the login page and the caller must stop
    Redirected,
}

/// Result of opening the login page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPage {
    /// No session yet; show the form
    ShowForm,
    /// Already signed in; the view was sent to the dashboard
    AlreadyAuthenticated,
}

/// Send the view to the login page unless a token is stored.
///
/// Only the presence of the token is checked. An expired token is caught
/// by the next authenticated request instead.
pub fn ensure_authenticated(
    store: &dyn SessionStore,
    navigator: &dyn Navigator,
) -> SessionResult<GuardOutcome> {
    if stored_token(store)?.is_some() {
        return Ok(GuardOutcome::Authenticated);
    }

    tracing::debug!("No session token, redirecting to login");
    navigator.navigate(Page::Login);
    Ok(GuardOutcome::Redirected)
}

/// Skip the login form when a session already exists
pub fn redirect_if_authenticated(
    store: &dyn SessionStore,
    navigator: &dyn Navigator,
) -> SessionResult<LoginPage> {
    if stored_token(store)?.is_none() {
        return Ok(LoginPage::ShowForm);
    }

    tracing::debug!("Session token present, redirecting to dashboard");
    navigator.navigate(Page::Dashboard);
    Ok(LoginPage::AlreadyAuthenticated)
}

/// Drop the whole session and return to the login page
pub fn logout(store: &dyn SessionStore, navigator: &dyn Navigator) -> SessionResult<()> {
    store.clear()?;
    tracing::info!("Logged out");
    navigator.navigate(Page::Login);
    Ok(())
}
