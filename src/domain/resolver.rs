use std::sync::Arc;

use super::{AuthConfig, Result, StepError, DEFAULT_REGISTRY};
use crate::ports::SettingsPort;

pub const EMAIL_PROPERTY: &str = "email";

/// Turns a configured server id into registry credentials
#[derive(Clone)]
pub struct AuthConfigResolver {
    settings: Arc<dyn SettingsPort>,
}

impl AuthConfigResolver {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    /// Resolve the credentials for `server_id`.
    ///
    /// Returns `Ok(None)` when no server id is configured. Any missing part of
    /// the credential fails the whole resolution; credentials are never used
    /// partially.
    pub fn resolve(&self, server_id: Option<&str>, registry_url: Option<&str>) -> Result<Option<AuthConfig>> {
        let server_id = match server_id {
            Some(id) => id,
            None => return Ok(None),
        };

        let server = self.settings.get_server(server_id);
        if server.is_none() {
            log::warn!("No server with id {} in settings", server_id);
        }
        let server = server.unwrap_or_default();

        let username = server
            .username
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StepError::incomplete_authorization("username"))?;
        let password = server
            .password
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StepError::incomplete_authorization("password"))?;
        let configuration = server
            .configuration
            .ok_or_else(|| StepError::incomplete_authorization("configuration"))?;
        let email = configuration
            .child(EMAIL_PROPERTY)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StepError::incomplete_authorization(EMAIL_PROPERTY))?
            .to_string();

        let server_address = registry_url.unwrap_or(DEFAULT_REGISTRY).to_string();
        log::debug!("Using credentials of server {} for {}", server_id, server_address);

        Ok(Some(AuthConfig {
            username,
            password,
            email,
            server_address,
        }))
    }
}
