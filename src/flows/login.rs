//! Login form flow

use super::{LoadingPolicy, Ports};
use crate::client::{ApiError, LoginRequest};
use crate::session::{SessionCredential, SessionError};
use crate::ui::{Field, Page};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Role that must be present in the login answer
pub const DEFAULT_ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Problems with the form caught before anything is sent
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Phone number must be exactly 10 digits.")]
    InvalidPhoneNumber,

    #[error("Password is required.")]
    MissingPassword,
}

impl ValidationError {
    /// Field the message belongs under
    pub fn field(self) -> Field {
        match self {
            ValidationError::InvalidPhoneNumber => Field::PhoneNumber,
            ValidationError::MissingPassword => Field::Password,
        }
    }
}

/// Ways a login attempt can fail.
///
/// The display text of each variant is exactly what the form shows.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Please correct the highlighted fields.")]
    Invalid(Vec<ValidationError>),

    /// Authenticated, but without the admin role
    #[error("Only admin accounts can log in.")]
    NotAdmin { roles: Vec<String> },

    /// Network failure or the server refused the credentials
    #[error("Invalid credentials.")]
    Rejected(#[source] ApiError),

    #[error("Could not save session: {0}")]
    Session(#[from] SessionError),
}

/// Exactly ten ASCII digits; `\d` would also accept other scripts' digits
static PHONE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Check the form and build the request.
///
/// Both fields are checked on every call so all problems surface together.
/// Surrounding whitespace is trimmed first.
pub fn validate(phone_number: &str, password: &str) -> Result<LoginRequest, Vec<ValidationError>> {
    let phone_number = phone_number.trim();
    let password = password.trim();

    let mut errors = Vec::new();
    if !PHONE_NUMBER_REGEX.is_match(phone_number) {
        errors.push(ValidationError::InvalidPhoneNumber);
    }
    if password.is_empty() {
        errors.push(ValidationError::MissingPassword);
    }

    if errors.is_empty() {
        Ok(LoginRequest {
            phone_number: phone_number.to_string(),
            password: password.to_string(),
        })
    } else {
        Err(errors)
    }
}

/// Where to log in and who may
#[derive(Debug, Clone)]
pub struct LoginSettings {
    /// API base URL; stored with the session for later requests
    pub base_url: String,
    /// Role required to be let in
    pub admin_role: String,
}

impl LoginSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            admin_role: DEFAULT_ADMIN_ROLE.to_string(),
        }
    }
}

/// Handles a submission of the login form
pub struct LoginFlow<'a> {
    ports: Ports<'a>,
    settings: LoginSettings,
    loading: LoadingPolicy,
}

impl<'a> LoginFlow<'a> {
    pub fn new(ports: Ports<'a>, settings: LoginSettings, loading: LoadingPolicy) -> Self {
        Self {
            ports,
            settings,
            loading,
        }
    }

    /// Validate, authenticate and, for admins, store the session and open
    /// the dashboard. Failures are also written to the form.
    pub async fn submit(
        &self,
        phone_number: &str,
        password: &str,
    ) -> Result<SessionCredential, LoginError> {
        let presenter = self.ports.presenter;
        presenter.clear_field_error(Field::PhoneNumber);
        presenter.clear_field_error(Field::Password);

        let request = match validate(phone_number, password) {
            Ok(request) => request,
            Err(errors) => {
                for error in &errors {
                    presenter.set_field_error(error.field(), &error.to_string());
                }
                return Err(LoginError::Invalid(errors));
            }
        };

        presenter.show_loading();
        let result = self.authenticate(&request).await;
        match &result {
            Ok(_) => self.ports.navigator.navigate(Page::Dashboard),
            Err(error @ (LoginError::NotAdmin { .. } | LoginError::Rejected(_))) => {
                presenter.set_field_error(Field::Password, &error.to_string());
            }
            Err(_) => {}
        }
        self.loading.settle(presenter).await;

        result
    }

    async fn authenticate(&self, request: &LoginRequest) -> Result<SessionCredential, LoginError> {
        let response = match self.ports.api.login(&self.settings.base_url, request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Login request failed");
                return Err(LoginError::Rejected(e));
            }
        };

        if !response.has_role(&self.settings.admin_role) {
            tracing::warn!(roles = ?response.roles, "Login refused: account is not an admin");
            return Err(LoginError::NotAdmin {
                roles: response.roles,
            });
        }

        let credential = SessionCredential::new(
            response.access_token,
            response.roles,
            self.settings.base_url.clone(),
        );
        credential.persist(self.ports.store)?;

        tracing::info!("Admin logged in");
        Ok(credential)
    }
}
