use crate::domain::ServerCredential;

/// Port for looking up named registry credentials
pub trait SettingsPort: Send + Sync {
    /// Get the server credential registered under `id`
    ///
    /// Returns None if the store has no entry for this id
    fn get_server(&self, id: &str) -> Option<ServerCredential>;
}
