//! # inn-services: the only layer that mutates stored state
//!
//! Every operation reads the full collection(s) it needs from the injected
//! [`JsonStore`], computes, and writes the full collection(s) back. The
//! services enforce what the store cannot see:
//!
//! - reservations may only reference existing hotels and customers
//! - a hotel is never booked beyond its room count
//! - deleting a hotel or customer deletes the reservations that reference it
//!
//! There is no locking. Two writers racing on the same storage root can lose
//! an update even though each save is atomic, so callers must serialise
//! access to a root themselves.

pub mod customers;
pub mod hotels;
pub mod reservations;

use std::sync::Arc;

use inn_store::JsonStore;

pub use customers::{CustomerPatch, CustomerService, NewCustomer};
pub use hotels::{HotelPatch, HotelService, NewHotel};
pub use reservations::{ReservationRequest, ReservationService};

/// The three services wired to one store.
#[derive(Clone)]
pub struct InnServices {
    pub hotels: HotelService,
    pub customers: CustomerService,
    pub reservations: ReservationService,
}

impl InnServices {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self {
            hotels: HotelService::new(Arc::clone(&store)),
            customers: CustomerService::new(Arc::clone(&store)),
            reservations: ReservationService::new(store),
        }
    }
}
