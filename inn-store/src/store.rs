use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use inn_model::{Customer, Hotel, Reservation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{StoreConfig, StoreError, StoreResult};

/// The three independent collections, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Hotels,
    Customers,
    Reservations,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Hotels, Collection::Customers, Collection::Reservations];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Hotels => "hotels",
            Collection::Customers => "customers",
            Collection::Reservations => "reservations",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Hotels => "hotels.json",
            Collection::Customers => "customers.json",
            Collection::Reservations => "reservations.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity that lives in one of the collections.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;
}

impl Record for Hotel {
    const COLLECTION: Collection = Collection::Hotels;
}

impl Record for Customer {
    const COLLECTION: Collection = Collection::Customers;
}

impl Record for Reservation {
    const COLLECTION: Collection = Collection::Reservations;
}

/// JSON-array-per-collection storage under one root directory.
///
/// `load` is tolerant and never fails; `save` replaces the whole file
/// through a temporary sibling and an atomic rename. The store knows
/// nothing about references between collections.
#[derive(Debug)]
pub struct JsonStore {
    config: StoreConfig,
}

impl JsonStore {
    /// Open (and initialise) the store described by `config`.
    ///
    /// Creates the root directory and writes `[]` to every collection file
    /// that does not exist yet.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.root).map_err(|e| StoreError::io(&config.root, e))?;
        let store = Self { config };

        for collection in Collection::ALL {
            let path = store.path(collection);
            if !path.exists() {
                store.write_atomic(&path, b"[]")?;
                info!(%collection, path = %path.display(), "initialised empty collection");
            }
        }

        Ok(store)
    }

    /// Shorthand for [`JsonStore::open`] with default settings at `root`.
    pub fn open_at<P: Into<PathBuf>>(root: P) -> StoreResult<Self> {
        Self::open(StoreConfig::new(root))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// File backing `collection`.
    pub fn path(&self, collection: Collection) -> PathBuf {
        self.config.root.join(collection.file_name())
    }

    /// Load every well-formed record of `T`'s collection, in file order.
    ///
    /// Missing, empty, non-array or unparsable files read as empty; array
    /// elements that do not form a valid `T` are skipped. Both cases are
    /// logged.
    pub fn load<T: Record>(&self) -> Vec<T> {
        let collection = T::COLLECTION;
        let path = self.path(collection);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(%collection, path = %path.display(), "collection file missing, reading as empty");
                return Vec::new();
            }
            Err(e) => {
                error!(%collection, path = %path.display(), error = %e, "could not read collection file");
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            debug!(%collection, "collection file is empty");
            return Vec::new();
        }

        let items = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            Ok(_) => {
                error!(%collection, path = %path.display(), "collection file is not a JSON array, ignoring it");
                return Vec::new();
            }
            Err(e) => {
                error!(%collection, path = %path.display(), error = %e, "collection file is not valid JSON, ignoring it");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(%collection, index, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect()
    }

    /// Replace `T`'s collection with `records`.
    ///
    /// On error the previous file is left untouched and no temporary file
    /// remains.
    pub fn save<T: Record>(&self, records: &[T]) -> StoreResult<()> {
        let collection = T::COLLECTION;
        let bytes = if self.config.pretty {
            serde_json::to_vec_pretty(records)?
        } else {
            serde_json::to_vec(records)?
        };

        self.write_atomic(&self.path(collection), &bytes)?;
        debug!(%collection, count = records.len(), "saved collection");
        Ok(())
    }

    fn write_atomic(&self, target: &Path, bytes: &[u8]) -> StoreResult<()> {
        let prefix = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        // NamedTempFile deletes itself when dropped, so every early return
        // below cleans up.
        let mut tmp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(&self.config.root)
            .map_err(|e| StoreError::io(&self.config.root, e))?;

        tmp.write_all(bytes).map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file().sync_all().map_err(|e| StoreError::io(tmp.path(), e))?;

        tmp.persist(target)
            .map_err(|e| StoreError::persist(target, e.error))?;

        // The rename is only durable once the directory entry is on disk.
        // Not every platform can open a directory for syncing.
        if let Err(e) = sync_dir(&self.config.root) {
            debug!(root = %self.config.root.display(), error = %e, "could not sync storage root");
        }
        Ok(())
    }
}

fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}
