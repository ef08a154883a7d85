use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use inn_core::{ErrorKind, InnConfig, InnError};
use inn_model::{parse_date, Reservation};
use inn_services::{InnServices, ReservationRequest};
use inn_store::{JsonStore, StoreConfig};
use serde_json::Value;
use tracing::info;

/// Environment prefix, e.g. `INNKEEP__STORAGE__ROOT=/tmp/inn`.
pub const ENV_PREFIX: &str = "INNKEEP__";

/// What happened to one booking attempt.
#[derive(Debug)]
pub enum Attempt {
    Booked(Reservation),
    Rejected(Value),
}

impl Attempt {
    pub fn is_booked(&self) -> bool {
        matches!(self, Attempt::Booked(_))
    }
}

/// Open the store described by `config` and wire the services to it.
pub fn build(config: &InnConfig) -> Result<InnServices> {
    let store_config = StoreConfig::from_snapshot(&config.snapshot());
    info!(root = %store_config.root.display(), pretty = store_config.pretty, "opening store");

    let store = JsonStore::open(store_config).map_err(InnError::from)?;
    Ok(InnServices::new(Arc::new(store)))
}

fn stay(services: &InnServices, customer: &str, hotel: &str, from: &str, to: &str) -> Result<Attempt> {
    let check_in: NaiveDate = parse_date(from)?;
    let check_out: NaiveDate = parse_date(to)?;

    match services
        .reservations
        .create(ReservationRequest::new(customer, hotel, check_in, check_out))
    {
        Ok(reservation) => Ok(Attempt::Booked(reservation)),
        Err(err) if InnError::kind_of(&err) == ErrorKind::CapacityExceeded => {
            Ok(Attempt::Rejected(InnError::normalize(err).sanitize_for_client().to_json()))
        }
        Err(err) => Err(err),
    }
}

/// A one-room hotel, two guests, three attempts: the overlapping one is
/// turned away, the back-to-back one goes through.
pub fn run_capacity_scenario(services: &InnServices) -> Result<Vec<Attempt>> {
    let cap = services.hotels.create("Cap", 1)?;
    let c1 = services.customers.create("C1", "c1@example.com")?;
    let c2 = services.customers.create("C2", "c2@example.com")?;

    let hotel = cap.id().as_str();
    Ok(vec![
        stay(services, c1.id().as_str(), hotel, "2024-06-01", "2024-06-03")?,
        stay(services, c2.id().as_str(), hotel, "2024-06-02", "2024-06-04")?,
        stay(services, c2.id().as_str(), hotel, "2024-06-03", "2024-06-04")?,
    ])
}
