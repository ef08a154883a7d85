use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{format_date, ranges_overlap};
use crate::ids::{CustomerId, HotelId, ReservationId};

const INVALID_RESERVATION: &str = "Reservation is invalid";

/// A stay of one customer at one hotel over `[check_in, check_out)`.
///
/// `customer_id` and `hotel_id` are weak references: plain ids whose
/// existence is checked by the reservation service, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReservationRecord")]
pub struct Reservation {
    id: ReservationId,
    customer_id: CustomerId,
    hotel_id: HotelId,
    #[serde(with = "crate::dates::iso")]
    check_in: NaiveDate,
    #[serde(with = "crate::dates::iso")]
    check_out: NaiveDate,
}

#[derive(Deserialize)]
struct ReservationRecord {
    id: ReservationId,
    customer_id: CustomerId,
    hotel_id: HotelId,
    #[serde(with = "crate::dates::iso")]
    check_in: NaiveDate,
    #[serde(with = "crate::dates::iso")]
    check_out: NaiveDate,
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = anyhow::Error;

    fn try_from(r: ReservationRecord) -> Result<Self> {
        Reservation::build(r.id, r.customer_id, r.hotel_id, r.check_in, r.check_out)
    }
}

impl Reservation {
    pub fn create(
        customer_id: CustomerId,
        hotel_id: HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Self> {
        Self::build(ReservationId::new(), customer_id, hotel_id, check_in, check_out)
    }

    fn build(
        id: ReservationId,
        customer_id: CustomerId,
        hotel_id: HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Self> {
        let mut errors = inn_schema::SchemaErrors::default();
        if check_in >= check_out {
            errors.push_field(
                "check_out",
                format!(
                    "check_out ({}) must be after check_in ({})",
                    format_date(check_out),
                    format_date(check_in)
                ),
            );
        }
        if customer_id.is_blank() {
            errors.push_field("customer_id", "customer_id is required");
        }
        if hotel_id.is_blank() {
            errors.push_field("hotel_id", "hotel_id is required");
        }
        if id.is_blank() {
            errors.push_field("id", "id must not be blank");
        }
        errors.into_result(INVALID_RESERVATION)?;

        Ok(Self {
            id,
            customer_id,
            hotel_id,
            check_in,
            check_out,
        })
    }

    /// Whether two stays share at least one night. Only meaningful for
    /// reservations of the same hotel; callers filter by hotel first.
    pub fn overlaps(&self, other: &Reservation) -> bool {
        ranges_overlap(self.check_in, self.check_out, other.check_in, other.check_out)
    }

    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn hotel_id(&self) -> &HotelId {
        &self.hotel_id
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }
}

/// Free-function form of [`Reservation::overlaps`].
pub fn overlaps(a: &Reservation, b: &Reservation) -> bool {
    a.overlaps(b)
}
