//! # Management API Configuration
//!
//! Configuration for the management web context: the context alias
//! controllers register into, the listen port, and the optional bearer
//! secret. Loaded from the environment by the binary; tests construct it
//! directly.

use crate::auth::SecretToken;

/// Environment variable naming the management context alias.
pub const ENV_MANAGEMENT_ALIAS: &str = "IDHUB_MANAGEMENT_ALIAS";
/// Environment variable naming the listen port.
pub const ENV_MANAGEMENT_PORT: &str = "IDHUB_MANAGEMENT_PORT";
/// Environment variable carrying the bearer secret.
pub const ENV_API_TOKEN: &str = "IDHUB_API_TOKEN";

const DEFAULT_CONTEXT_ALIAS: &str = "management";
const DEFAULT_PORT: u16 = 8585;

/// Configuration of the management API context.
///
/// `Debug` stays safe to log: the token type redacts itself.
#[derive(Debug, Clone)]
pub struct ManagementApiConfig {
    context_alias: String,
    port: u16,
    auth_token: Option<SecretToken>,
}

impl ManagementApiConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// An unparsable port is logged and replaced by the default rather
    /// than aborting startup.
    pub fn from_env() -> Self {
        let context_alias = std::env::var(ENV_MANAGEMENT_ALIAS)
            .ok()
            .map(|alias| alias.trim().to_string())
            .filter(|alias| !alias.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTEXT_ALIAS.to_string());

        let port = match std::env::var(ENV_MANAGEMENT_PORT) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    value = %raw,
                    "invalid {ENV_MANAGEMENT_PORT}, using default {DEFAULT_PORT}"
                );
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let auth_token = std::env::var(ENV_API_TOKEN).ok().map(SecretToken::new);
        if auth_token.is_none() {
            tracing::warn!(
                "{ENV_API_TOKEN} not set — authentication disabled, all requests run as admin"
            );
        }

        Self {
            context_alias,
            port,
            auth_token,
        }
    }

    /// The alias controllers register into.
    pub fn context_alias(&self) -> &str {
        &self.context_alias
    }

    /// The listen port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The configured bearer secret, if authentication is enabled.
    pub fn auth_token(&self) -> Option<&SecretToken> {
        self.auth_token.as_ref()
    }

    /// Replace the context alias.
    pub fn with_context_alias(mut self, alias: impl Into<String>) -> Self {
        self.context_alias = alias.into();
        self
    }

    /// Enable authentication with the given secret.
    pub fn with_auth_token(mut self, token: SecretToken) -> Self {
        self.auth_token = Some(token);
        self
    }
}

impl Default for ManagementApiConfig {
    fn default() -> Self {
        Self {
            context_alias: DEFAULT_CONTEXT_ALIAS.to_string(),
            port: DEFAULT_PORT,
            auth_token: None,
        }
    }
}
