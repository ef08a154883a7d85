use anyhow::Result;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::HotelId;

const INVALID_HOTEL: &str = "Hotel is invalid";

/// A hotel with a finite number of rooms.
///
/// Values only come out of [`Hotel::create`], the `with_*` replacement
/// builders, or deserialization, all of which enforce a non-blank name
/// and `total_rooms > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HotelRecord")]
pub struct Hotel {
    id: HotelId,
    name: String,
    total_rooms: u32,
}

#[derive(Debug, Validate)]
struct HotelDraft {
    #[validate(length(min = 1, message = "name must not be blank"))]
    name: String,

    #[validate(range(min = 1, message = "total_rooms must be greater than 0"))]
    total_rooms: u32,
}

/// Wire shape, checked before it becomes a `Hotel`.
#[derive(Deserialize)]
struct HotelRecord {
    id: HotelId,
    name: String,
    total_rooms: u32,
}

impl TryFrom<HotelRecord> for Hotel {
    type Error = anyhow::Error;

    fn try_from(record: HotelRecord) -> Result<Self> {
        Hotel::build(record.id, &record.name, record.total_rooms)
    }
}

impl Hotel {
    pub fn create(name: &str, total_rooms: u32) -> Result<Self> {
        Self::build(HotelId::new(), name, total_rooms)
    }

    fn build(id: HotelId, name: &str, total_rooms: u32) -> Result<Self> {
        let draft = HotelDraft {
            name: name.trim().to_string(),
            total_rooms,
        };
        let mut errors = inn_schema::collect(&draft);
        if id.is_blank() {
            errors.push_field("id", "id must not be blank");
        }
        errors.into_result(INVALID_HOTEL)?;

        Ok(Self {
            id,
            name: draft.name,
            total_rooms: draft.total_rooms,
        })
    }

    /// Same hotel under a new name.
    pub fn with_name(&self, name: &str) -> Result<Self> {
        Self::build(self.id.clone(), name, self.total_rooms)
    }

    /// Same hotel with a new room count.
    pub fn with_total_rooms(&self, total_rooms: u32) -> Result<Self> {
        Self::build(self.id.clone(), &self.name, total_rooms)
    }

    pub fn id(&self) -> &HotelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_rooms(&self) -> u32 {
        self.total_rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inn_core::errors::{ErrorKind, InnError};
    use serde_json::json;

    #[test]
    fn create_trims_and_assigns_an_id() {
        let h = Hotel::create("  Hotel Test ", 3).unwrap();
        assert_eq!(h.name(), "Hotel Test");
        assert_eq!(h.total_rooms(), 3);
        assert!(!h.id().is_blank());
    }

    #[test]
    fn blank_name_and_zero_rooms_are_rejected() {
        let err = Hotel::create("   ", 0).unwrap_err();
        let inn = InnError::from_anyhow(&err).unwrap();
        let errors = inn.errors.as_ref().unwrap();

        assert_eq!(inn.kind, ErrorKind::Validation);
        assert_eq!(errors["name"][0], "name must not be blank");
        assert_eq!(errors["total_rooms"][0], "total_rooms must be greater than 0");

        assert!(Hotel::create("X", 0).is_err());
        assert!(Hotel::create("", 1).is_err());
    }

    #[test]
    fn replacements_keep_the_id() {
        let h = Hotel::create("Old", 2).unwrap();
        let renamed = h.with_name("New").unwrap();
        let grown = renamed.with_total_rooms(5).unwrap();

        assert_eq!(grown.id(), h.id());
        assert_eq!(grown.name(), "New");
        assert_eq!(grown.total_rooms(), 5);
        assert!(h.with_total_rooms(0).is_err());
    }

    #[test]
    fn deserialization_enforces_invariants() {
        let ok: Hotel =
            serde_json::from_value(json!({"id": "h1", "name": "H1", "total_rooms": 2})).unwrap();
        assert_eq!(ok.id(), &HotelId::from("h1"));

        let zero = serde_json::from_value::<Hotel>(json!({"id": "h1", "name": "H1", "total_rooms": 0}));
        assert!(zero.is_err());
        let missing = serde_json::from_value::<Hotel>(json!({"id": "x"}));
        assert!(missing.is_err());
        let negative = serde_json::from_value::<Hotel>(json!({"id": "h", "name": "H", "total_rooms": -1}));
        assert!(negative.is_err());
    }

    #[test]
    fn serializes_as_a_flat_object() {
        let h = Hotel::create("Flat", 4).unwrap();
        let value = serde_json::to_value(&h).unwrap();
        assert_eq!(value, json!({"id": h.id().as_str(), "name": "Flat", "total_rooms": 4}));
    }
}
