//! # inn-model: validated domain values
//!
//! `Hotel`, `Customer` and `Reservation` are immutable values. They are
//! built through their `create` factories (which assign a fresh id), the
//! `with_*` replacement builders (which keep the id), or deserialization;
//! every path runs the same invariant checks, so holding a value means it
//! is valid.
//!
//! ```rust
//! use inn_model::prelude::*;
//!
//! let hotel = Hotel::create("Cap", 1)?;
//! let alice = Customer::create("Alice", "alice@example.com")?;
//! let stay = Reservation::create(
//!     alice.id().clone(),
//!     hotel.id().clone(),
//!     parse_date("2024-06-01")?,
//!     parse_date("2024-06-03")?,
//! )?;
//! assert_eq!(stay.nights(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod customer;
pub mod dates;
pub mod hotel;
pub mod ids;
pub mod reservation;

pub use customer::Customer;
pub use dates::{format_date, parse_date, ranges_overlap, ISO_DATE_FORMAT};
pub use hotel::Hotel;
pub use ids::{CustomerId, HotelId, ReservationId};
pub use reservation::{overlaps, Reservation};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        format_date, overlaps, parse_date, Customer, CustomerId, Hotel, HotelId, Reservation,
        ReservationId,
    };
}
