//! inn-core: shared foundation for innkeep.
//!
//! Holds what every other crate agrees on: the error taxonomy, the
//! key/value configuration store and the CRUD service contract.

pub mod config;
pub mod errors;
pub mod service;

pub use config::{InnConfig, InnConfigSnapshot};
pub use errors::{ErrorKind, InnError};
pub use service::{InnService, ServiceCapabilities, ServiceMethodKind};
