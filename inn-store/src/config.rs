use std::path::PathBuf;

use inn_core::InnConfigSnapshot;

pub const ROOT_KEY: &str = "storage.root";
pub const PRETTY_KEY: &str = "storage.pretty";

/// Configuration for a JSON store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding `hotels.json`, `customers.json` and `reservations.json`
    pub root: PathBuf,

    /// Indent written files (2 spaces); compact output when false
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./data"),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Create a config rooted at `root` with defaults otherwise
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Read `storage.root` and `storage.pretty`, falling back to defaults
    pub fn from_snapshot(snapshot: &InnConfigSnapshot) -> Self {
        let defaults = Self::default();
        Self {
            root: snapshot
                .get_string(ROOT_KEY)
                .map(PathBuf::from)
                .unwrap_or(defaults.root),
            pretty: snapshot.get_bool(PRETTY_KEY).unwrap_or(defaults.pretty),
        }
    }

    /// Set the storage root
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = root.into();
        self
    }

    /// Write compact single-line JSON
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inn_core::InnConfig;

    #[test]
    fn snapshot_overrides_defaults() {
        let mut config = InnConfig::new();
        config.set(ROOT_KEY, "/srv/inn");
        config.set(PRETTY_KEY, "false");

        let store = StoreConfig::from_snapshot(&config.snapshot());
        assert_eq!(store.root, PathBuf::from("/srv/inn"));
        assert!(!store.pretty);
    }

    #[test]
    fn missing_or_garbled_keys_use_defaults() {
        let mut config = InnConfig::new();
        config.set(PRETTY_KEY, "sometimes");

        let store = StoreConfig::from_snapshot(&config.snapshot());
        assert_eq!(store.root, PathBuf::from("./data"));
        assert!(store.pretty);
        assert!(!StoreConfig::new("x").compact().pretty);
    }
}
