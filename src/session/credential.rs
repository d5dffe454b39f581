//! Typed view over the persisted session keys

use super::{SessionResult, SessionStore, ROLES_KEY, TOKEN_KEY, URL_KEY};

/// Token, roles and API base URL of an authenticated admin session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    pub token: String,
    pub roles: Vec<String>,
    pub base_url: String,
}

impl SessionCredential {
    pub fn new(token: impl Into<String>, roles: Vec<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            roles,
            base_url: base_url.into(),
        }
    }

    /// Write all three keys in one store operation
    pub fn persist(&self, store: &dyn SessionStore) -> SessionResult<()> {
        let roles = serde_json::to_string(&self.roles)?;
        store.set_all(&[
            (TOKEN_KEY, self.token.as_str()),
            (ROLES_KEY, roles.as_str()),
            (URL_KEY, self.base_url.as_str()),
        ])
    }

    /// Load the credential.
    ///
    /// Returns `None` unless all three keys are present and the role list
    /// decodes; a partial credential is logged and treated as absent.
    pub fn load(store: &dyn SessionStore) -> SessionResult<Option<Self>> {
        let token = store.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let roles = store.get(ROLES_KEY)?;
        let base_url = store.get(URL_KEY)?;

        match (token, roles, base_url) {
            (Some(token), Some(roles), Some(base_url)) => {
                match serde_json::from_str::<Vec<String>>(&roles) {
                    Ok(roles) => Ok(Some(Self::new(token, roles, base_url))),
                    Err(e) => {
                        tracing::warn!("Stored role list is not a JSON string array: {}", e);
                        Ok(None)
                    }
                }
            }
            (None, None, None) => Ok(None),
            (token, roles, base_url) => {
                tracing::warn!(
                    token = token.is_some(),
                    roles = roles.is_some(),
                    url = base_url.is_some(),
                    "Partial session credential in store"
                );
                Ok(None)
            }
        }
    }

    /// Token with everything but the first and last four characters hidden
    pub fn masked_token(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
