mod store;

pub use store::{SettingsFile, SettingsStore};
