//! # inn-store: crash-safe JSON collections
//!
//! Each entity kind lives in its own file under a storage root, as a JSON
//! array of flat objects:
//!
//! ```text
//! <root>/hotels.json        [{ "id", "name", "total_rooms" }, ...]
//! <root>/customers.json     [{ "id", "name", "email" }, ...]
//! <root>/reservations.json  [{ "id", "customer_id", "hotel_id", "check_in", "check_out" }, ...]
//! ```
//!
//! - **Tolerant reads**: a missing, empty or corrupt file reads as an empty
//!   collection, and records that fail to deserialize are skipped. Both are
//!   logged through `tracing`, never returned as errors.
//! - **Atomic writes**: the whole collection is written to a temporary file
//!   in the same directory, synced, then renamed over the target.
//!
//! ```rust
//! use inn_store::prelude::*;
//! use inn_model::Hotel;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let store = JsonStore::open(StoreConfig::new(dir.path()))?;
//!
//! let mut hotels: Vec<Hotel> = store.load();
//! hotels.push(Hotel::create("Seaside", 12)?);
//! store.save(&hotels)?;
//!
//! assert_eq!(store.load::<Hotel>().len(), 1);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod store;

pub use config::{StoreConfig, PRETTY_KEY, ROOT_KEY};
pub use error::{StoreError, StoreResult};
pub use store::{Collection, JsonStore, Record};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Collection, JsonStore, Record, StoreConfig, StoreError, StoreResult};
}
