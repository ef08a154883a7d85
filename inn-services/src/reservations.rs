use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use inn_core::{bail_inn, InnError, InnService, ServiceCapabilities, ServiceMethodKind};
use inn_model::{format_date, ranges_overlap, Customer, CustomerId, Hotel, HotelId, Reservation};
use inn_store::JsonStore;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

/// Input for [`ReservationService::create`].
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationRequest {
    pub customer_id: CustomerId,
    pub hotel_id: HotelId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl ReservationRequest {
    pub fn new(
        customer_id: impl Into<CustomerId>,
        hotel_id: impl Into<HotelId>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            hotel_id: hotel_id.into(),
            check_in,
            check_out,
        }
    }
}

/// Books stays while keeping every hotel within its room count.
///
/// A reservation is either active (stored) or cancelled (removed); there
/// is no status flag and no way back from cancellation.
#[derive(Clone)]
pub struct ReservationService {
    store: Arc<JsonStore>,
    capabilities: ServiceCapabilities,
}

impl ReservationService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        use ServiceMethodKind::*;
        Self {
            store,
            capabilities: ServiceCapabilities::from_methods(vec![Find, Get, Create, Remove]),
        }
    }

    /// Book a stay.
    ///
    /// Fails with `NotFound` if the hotel or customer is unknown, with
    /// `Validation` if the request itself is invalid, and with
    /// `CapacityExceeded` when the stay overlaps as many existing
    /// reservations of the hotel as it has rooms. Nothing is written on
    /// failure.
    pub fn create(&self, request: ReservationRequest) -> Result<Reservation> {
        let hotels: Vec<Hotel> = self.store.load();
        let Some(hotel) = hotels.into_iter().find(|h| h.id() == &request.hotel_id) else {
            bail_inn!(not_found, "hotel {} does not exist", request.hotel_id);
        };

        let customers: Vec<Customer> = self.store.load();
        if !customers.iter().any(|c| c.id() == &request.customer_id) {
            bail_inn!(not_found, "customer {} does not exist", request.customer_id);
        }

        let candidate = Reservation::create(
            request.customer_id,
            request.hotel_id,
            request.check_in,
            request.check_out,
        )?;

        let mut reservations: Vec<Reservation> = self.store.load();
        let overlapping = reservations
            .iter()
            .filter(|r| r.hotel_id() == hotel.id())
            .filter(|r| r.overlaps(&candidate))
            .count();

        if overlapping >= hotel.total_rooms() as usize {
            warn!(
                hotel_id = %hotel.id(),
                total_rooms = hotel.total_rooms(),
                overlapping,
                "rejecting reservation over capacity"
            );
            return Err(InnError::capacity_exceeded(format!(
                "hotel {} has no free room between {} and {}",
                hotel.id(),
                format_date(candidate.check_in()),
                format_date(candidate.check_out())
            ))
            .with_data(json!({
                "hotel_id": hotel.id(),
                "total_rooms": hotel.total_rooms(),
                "overlapping": overlapping,
                "check_in": format_date(candidate.check_in()),
                "check_out": format_date(candidate.check_out()),
            }))
            .into_anyhow());
        }

        reservations.push(candidate.clone());
        self.store.save(&reservations).map_err(InnError::from)?;

        info!(
            reservation_id = %candidate.id(),
            hotel_id = %candidate.hotel_id(),
            customer_id = %candidate.customer_id(),
            nights = candidate.nights(),
            "created reservation"
        );
        Ok(candidate)
    }

    pub fn get(&self, id: &str) -> Option<Reservation> {
        self.store.load::<Reservation>().into_iter().find(|r| r.id() == id)
    }

    pub fn find(&self) -> Vec<Reservation> {
        self.store.load()
    }

    pub fn find_by_hotel(&self, hotel_id: &str) -> Vec<Reservation> {
        let mut reservations: Vec<Reservation> = self.store.load();
        reservations.retain(|r| r.hotel_id() == hotel_id);
        reservations
    }

    pub fn find_by_customer(&self, customer_id: &str) -> Vec<Reservation> {
        let mut reservations: Vec<Reservation> = self.store.load();
        reservations.retain(|r| r.customer_id() == customer_id);
        reservations
    }

    /// Rooms still bookable for `[check_in, check_out)`, counted the same
    /// way `create` counts them. `None` if the hotel does not exist.
    pub fn available_rooms(
        &self,
        hotel_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Option<u32>> {
        if check_in >= check_out {
            bail_inn!(
                validation,
                "check_out ({}) must be after check_in ({})",
                format_date(check_out),
                format_date(check_in)
            );
        }

        let hotels: Vec<Hotel> = self.store.load();
        let Some(hotel) = hotels.into_iter().find(|h| h.id() == hotel_id) else {
            return Ok(None);
        };

        let overlapping = self
            .find_by_hotel(hotel_id)
            .iter()
            .filter(|r| ranges_overlap(r.check_in(), r.check_out(), check_in, check_out))
            .count();
        let overlapping = u32::try_from(overlapping).unwrap_or(u32::MAX);

        Ok(Some(hotel.total_rooms().saturating_sub(overlapping)))
    }

    /// Remove the reservation. `false` (and no write) if nothing matched,
    /// which makes a repeated cancel a no-op.
    pub fn cancel(&self, id: &str) -> Result<bool> {
        let mut reservations: Vec<Reservation> = self.store.load();
        let before = reservations.len();
        reservations.retain(|r| r.id() != id);
        if reservations.len() == before {
            return Ok(false);
        }

        self.store.save(&reservations).map_err(InnError::from)?;
        info!(reservation_id = id, "cancelled reservation");
        Ok(true)
    }
}

impl InnService<Reservation> for ReservationService {
    type Draft = ReservationRequest;
    type Patch = ();

    fn capabilities(&self) -> ServiceCapabilities {
        self.capabilities.clone()
    }

    fn find(&self) -> Result<Vec<Reservation>> {
        Ok(ReservationService::find(self))
    }

    fn get(&self, id: &str) -> Result<Option<Reservation>> {
        Ok(ReservationService::get(self, id))
    }

    fn create(&self, data: ReservationRequest) -> Result<Reservation> {
        ReservationService::create(self, data)
    }

    fn patch(&self, _id: &str, _data: ()) -> Result<Option<Reservation>> {
        bail_inn!(method_not_allowed, "reservations cannot be patched; cancel and book again");
    }

    fn remove(&self, id: &str) -> Result<bool> {
        ReservationService::cancel(self, id)
    }
}
