use crate::domain::{Result, ServerCredential, StepError};
use crate::ports::SettingsPort;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// On-disk layout of the settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub servers: Vec<ServerCredential>,
}

/// Settings store keyed by server id
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    servers: HashMap<String, ServerCredential>,
}

impl SettingsStore {
    pub fn new(servers: Vec<ServerCredential>) -> Self {
        let mut by_id = HashMap::new();

        for server in servers {
            if by_id.contains_key(&server.id) {
                log::warn!("Duplicate server id {} in settings, keeping the first entry", server.id);
                continue;
            }
            by_id.insert(server.id.clone(), server);
        }

        Self { servers: by_id }
    }

    /// Load the store from a TOML settings file; a missing file is an empty store
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let file: SettingsFile = confy::load_path(path)
            .map_err(|e| StepError::Settings(format!("Cannot load {}: {}", path.display(), e)))?;
        log::debug!("Loaded {} server(s) from {}", file.servers.len(), path.display());

        Ok(Self::new(file.servers))
    }

    /// Default settings location (~/.config/dockstep/settings.toml)
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StepError::Settings("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("dockstep").join("settings.toml"))
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl SettingsPort for SettingsStore {
    fn get_server(&self, id: &str) -> Option<ServerCredential> {
        self.servers.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources").join(name)
    }

    #[test]
    fn test_load_settings_file() {
        let store = SettingsStore::load_from_path(&fixture("settings.toml")).unwrap();
        assert_eq!(store.len(), 2);

        let server = store.get_server("docker-hub").unwrap();
        assert_eq!(server.username.as_deref(), Some("username"));
        assert_eq!(server.password.as_deref(), Some("password"));
        assert_eq!(server.configuration.unwrap().child("email"), Some("user@host.domain"));

        let partial = store.get_server("no-email").unwrap();
        let configuration = partial.configuration.expect("no-email entry has a configuration block");
        assert_eq!(configuration.child("team"), Some("build"));
        assert!(configuration.child("email").is_none());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = SettingsStore::load_from_path(&fixture("does-not-exist.toml")).unwrap();
        assert!(store.is_empty());
        assert!(store.get_server("docker-hub").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let store = SettingsStore::new(vec![
            ServerCredential::new("dup").with_username("first"),
            ServerCredential::new("dup").with_username("second"),
        ]);
        assert_eq!(store.get_server("dup").unwrap().username.as_deref(), Some("first"));
    }
}
