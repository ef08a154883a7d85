use std::sync::Arc;

use anyhow::Result;
use inn_core::{InnError, InnService, ServiceCapabilities};
use inn_model::{Hotel, Reservation};
use inn_store::JsonStore;
use serde::Deserialize;
use tracing::{debug, info};

/// Input for [`HotelService::create`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub total_rooms: u32,
}

/// Partial update for a hotel.
///
/// Fields that are absent, or present but invalid on their own (blank
/// name, zero rooms), keep the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub total_rooms: Option<u32>,
}

impl HotelPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn total_rooms(mut self, total_rooms: u32) -> Self {
        self.total_rooms = Some(total_rooms);
        self
    }

    /// Replacement for `current`, sharing its id.
    pub fn apply(&self, current: &Hotel) -> Hotel {
        let mut next = current.clone();

        if let Some(name) = &self.name {
            match next.with_name(name) {
                Ok(renamed) => next = renamed,
                Err(e) => debug!(hotel_id = %current.id(), error = %e, "keeping previous hotel name"),
            }
        }
        if let Some(total_rooms) = self.total_rooms {
            match next.with_total_rooms(total_rooms) {
                Ok(resized) => next = resized,
                Err(e) => debug!(hotel_id = %current.id(), error = %e, "keeping previous room count"),
            }
        }

        next
    }
}

#[derive(Clone)]
pub struct HotelService {
    store: Arc<JsonStore>,
    capabilities: ServiceCapabilities,
}

impl HotelService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self {
            store,
            capabilities: ServiceCapabilities::standard_crud(),
        }
    }

    pub fn create(&self, name: &str, total_rooms: u32) -> Result<Hotel> {
        let mut hotels: Vec<Hotel> = self.store.load();
        let hotel = Hotel::create(name, total_rooms)?;
        hotels.push(hotel.clone());
        self.store.save(&hotels).map_err(InnError::from)?;

        info!(hotel_id = %hotel.id(), total_rooms, "created hotel");
        Ok(hotel)
    }

    pub fn get(&self, id: &str) -> Option<Hotel> {
        self.store.load::<Hotel>().into_iter().find(|h| h.id() == id)
    }

    pub fn find(&self) -> Vec<Hotel> {
        self.store.load()
    }

    /// Replace the hotel in place, keeping collection order.
    /// `None` (and no write) when the id is unknown.
    pub fn update(&self, id: &str, patch: HotelPatch) -> Result<Option<Hotel>> {
        let mut hotels: Vec<Hotel> = self.store.load();
        let Some(slot) = hotels.iter_mut().find(|h| h.id() == id) else {
            return Ok(None);
        };

        let updated = patch.apply(slot);
        *slot = updated.clone();
        self.store.save(&hotels).map_err(InnError::from)?;

        Ok(Some(updated))
    }

    /// Remove the hotel and every reservation that references it.
    /// `false` (and no write) when the id is unknown.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut hotels: Vec<Hotel> = self.store.load();
        let before = hotels.len();
        hotels.retain(|h| h.id() != id);
        if hotels.len() == before {
            return Ok(false);
        }

        let mut reservations: Vec<Reservation> = self.store.load();
        let booked = reservations.len();
        reservations.retain(|r| r.hotel_id() != id);
        let cascaded = booked - reservations.len();

        self.store.save(&reservations).map_err(InnError::from)?;
        self.store.save(&hotels).map_err(InnError::from)?;

        info!(hotel_id = id, cascaded, "deleted hotel");
        Ok(true)
    }
}

impl InnService<Hotel> for HotelService {
    type Draft = NewHotel;
    type Patch = HotelPatch;

    fn capabilities(&self) -> ServiceCapabilities {
        self.capabilities.clone()
    }

    fn find(&self) -> Result<Vec<Hotel>> {
        Ok(HotelService::find(self))
    }

    fn get(&self, id: &str) -> Result<Option<Hotel>> {
        Ok(HotelService::get(self, id))
    }

    fn create(&self, data: NewHotel) -> Result<Hotel> {
        HotelService::create(self, &data.name, data.total_rooms)
    }

    fn patch(&self, id: &str, data: HotelPatch) -> Result<Option<Hotel>> {
        HotelService::update(self, id, data)
    }

    fn remove(&self, id: &str) -> Result<bool> {
        HotelService::delete(self, id)
    }
}
