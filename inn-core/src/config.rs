//! # innkeep Configuration
//!
//! A minimal configuration system based on a string key/value store.
//! Crates read the keys they own from an immutable snapshot, e.g. the
//! storage crate reads `storage.root` and `storage.pretty`.
//!
//! ## Setting and reading values
//! ```rust
//! use inn_core::InnConfig;
//! let mut config = InnConfig::new();
//!
//! config.set("storage.root", "/var/lib/innkeep");
//! config.set("storage.pretty", "false");
//!
//! let snapshot = config.snapshot();
//! assert_eq!(snapshot.get("storage.root"), Some("/var/lib/innkeep"));
//! assert_eq!(snapshot.get_bool("storage.pretty"), Some(false));
//! ```
//!
//! ## Environment overrides
//! [`InnConfig::from_env`] maps prefixed variables onto dotted keys:
//!
//! ```bash
//! export INNKEEP__STORAGE__ROOT=/tmp/inn   # -> storage.root
//! ```

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct InnConfig {
    values: HashMap<String, String>,
}

impl InnConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Build a config from the process environment.
    ///
    /// `INNKEEP__STORAGE__ROOT` with prefix `INNKEEP__` becomes `storage.root`.
    pub fn from_env(prefix: &str) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Same as [`InnConfig::from_env`] over an explicit set of variables.
    pub fn from_vars<I>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::new();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                config.set(normalized, value);
            }
        }
        config
    }

    /// Set a configuration key to a string value.
    ///
    /// Example: config.set("storage.root", "./data")
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Get a configuration value by key.
    ///
    /// Returns None if the key is not present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Check whether a key is present.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn snapshot(&self) -> InnConfigSnapshot {
        InnConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InnConfigSnapshot {
    map: HashMap<String, String>,
}

impl InnConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse::<bool>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_become_dotted_keys() {
        let vars = vec![
            ("INNKEEP__STORAGE__ROOT".to_string(), "/tmp/inn".to_string()),
            ("INNKEEP__STORAGE__PRETTY".to_string(), "false".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ];
        let config = InnConfig::from_vars("INNKEEP__", vars);

        assert_eq!(config.get("storage.root"), Some("/tmp/inn"));
        assert!(config.has("storage.pretty"));
        assert!(!config.has("path"));
    }

    #[test]
    fn snapshot_parses_typed_values() {
        let mut config = InnConfig::new();
        config.set("storage.pretty", "true");
        config.set("storage.broken", "maybe");

        let snapshot = config.snapshot();
        config.set("storage.pretty", "false");

        assert_eq!(snapshot.get_bool("storage.pretty"), Some(true));
        assert_eq!(snapshot.get_bool("storage.broken"), None);
        assert_eq!(snapshot.get_string("missing"), None);
    }
}
