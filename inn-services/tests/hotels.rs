use std::fs;
use std::sync::Arc;

use inn_core::{ErrorKind, InnError, InnService};
use inn_model::{parse_date, Hotel};
use inn_services::{HotelPatch, InnServices, NewHotel, ReservationRequest};
use inn_store::{Collection, JsonStore};
use tempfile::TempDir;

/// Test factory functions
fn setup() -> (TempDir, Arc<JsonStore>, InnServices) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonStore::open_at(dir.path()).unwrap());
    let services = InnServices::new(Arc::clone(&store));
    (dir, store, services)
}

fn book(services: &InnServices, hotel: &Hotel, customer_id: &str, check_in: &str, check_out: &str) {
    services
        .reservations
        .create(ReservationRequest::new(
            customer_id,
            hotel.id().clone(),
            parse_date(check_in).unwrap(),
            parse_date(check_out).unwrap(),
        ))
        .unwrap();
}

#[test]
fn hotel_crud() {
    let (_dir, _store, services) = setup();

    let h = services.hotels.create("Hotel X", 2).unwrap();
    assert_eq!(services.hotels.get(h.id().as_str()), Some(h.clone()));

    let updated = services
        .hotels
        .update(h.id().as_str(), HotelPatch::new().name("Hotel Y").total_rooms(3))
        .unwrap()
        .unwrap();
    assert_eq!(updated.id(), h.id());
    assert_eq!(updated.name(), "Hotel Y");
    assert_eq!(updated.total_rooms(), 3);

    assert!(services.hotels.delete(h.id().as_str()).unwrap());
    assert!(services.hotels.get(h.id().as_str()).is_none());
}

#[test]
fn create_rejects_invalid_hotels_without_writing() {
    let (_dir, store, services) = setup();
    let before = fs::read(store.path(Collection::Hotels)).unwrap();

    for (name, rooms) in [("", 1), ("   ", 2), ("Zero", 0)] {
        let err = services.hotels.create(name, rooms).unwrap_err();
        assert_eq!(InnError::kind_of(&err), ErrorKind::Validation);
    }
    assert_eq!(fs::read(store.path(Collection::Hotels)).unwrap(), before);
}

#[test]
fn invalid_update_fields_fall_back_to_previous_values() {
    let (_dir, _store, services) = setup();
    let h = services.hotels.create("Original", 4).unwrap();

    let updated = services
        .hotels
        .update(h.id().as_str(), HotelPatch::new().name("   ").total_rooms(0))
        .unwrap()
        .unwrap();
    assert_eq!(updated, h);

    let half = services
        .hotels
        .update(h.id().as_str(), HotelPatch::new().name("").total_rooms(6))
        .unwrap()
        .unwrap();
    assert_eq!(half.name(), "Original");
    assert_eq!(half.total_rooms(), 6);

    let untouched = services.hotels.update(h.id().as_str(), HotelPatch::new()).unwrap().unwrap();
    assert_eq!(untouched, half);
}

#[test]
fn update_replaces_in_place_and_keeps_order() {
    let (_dir, _store, services) = setup();
    let a = services.hotels.create("A", 1).unwrap();
    let b = services.hotels.create("B", 1).unwrap();
    let c = services.hotels.create("C", 1).unwrap();

    services.hotels.update(b.id().as_str(), HotelPatch::new().name("B2")).unwrap();

    let names: Vec<String> = services.hotels.find().iter().map(|h| h.name().to_string()).collect();
    assert_eq!(names, vec!["A", "B2", "C"]);
    assert_eq!(services.hotels.get(a.id().as_str()), Some(a));
    assert_eq!(services.hotels.get(c.id().as_str()), Some(c));
}

#[test]
fn update_and_delete_of_unknown_ids_write_nothing() {
    let (_dir, store, services) = setup();
    services.hotels.create("Only", 1).unwrap();
    let before = fs::read(store.path(Collection::Hotels)).unwrap();

    assert!(services.hotels.update("ghost", HotelPatch::new().name("New")).unwrap().is_none());
    assert!(!services.hotels.delete("ghost").unwrap());
    assert_eq!(fs::read(store.path(Collection::Hotels)).unwrap(), before);
}

#[test]
fn delete_cascades_only_into_the_hotels_reservations() {
    let (_dir, _store, services) = setup();
    let doomed = services.hotels.create("Doomed", 2).unwrap();
    let kept = services.hotels.create("Kept", 2).unwrap();
    let guest = services.customers.create("Guest", "guest@example.com").unwrap();
    let guest_id = guest.id().as_str();

    book(&services, &doomed, guest_id, "2024-02-01", "2024-02-03");
    book(&services, &doomed, guest_id, "2024-02-05", "2024-02-06");
    book(&services, &kept, guest_id, "2024-02-01", "2024-02-03");

    assert!(services.hotels.delete(doomed.id().as_str()).unwrap());

    let remaining = services.reservations.find();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].hotel_id(), kept.id());
    assert!(services.reservations.find_by_hotel(doomed.id().as_str()).is_empty());
    assert!(services.customers.get(guest_id).is_some());
}

#[test]
fn failed_save_surfaces_as_a_storage_error() {
    let (_dir, store, services) = setup();
    let target = store.path(Collection::Hotels);
    fs::remove_file(&target).unwrap();
    fs::create_dir(&target).unwrap();
    fs::write(target.join("blocker"), "x").unwrap();

    let err = services.hotels.create("Blocked", 1).unwrap_err();
    assert_eq!(InnError::kind_of(&err), ErrorKind::Storage);
}

/// Works for any service, the way a generic front end would call it.
fn count_all<R, S: InnService<R>>(service: &S) -> usize {
    service.find().map(|all| all.len()).unwrap_or(0)
}

#[test]
fn hotels_are_reachable_through_the_service_trait() {
    let (_dir, _store, services) = setup();
    let svc = &services.hotels;

    let created = InnService::create(svc, NewHotel { name: "Via trait".into(), total_rooms: 5 }).unwrap();
    let patched = InnService::patch(svc, created.id().as_str(), HotelPatch::new().total_rooms(7))
        .unwrap()
        .unwrap();

    assert_eq!(patched.total_rooms(), 7);
    assert_eq!(count_all::<Hotel, _>(svc), 1);
    assert!(InnService::remove(svc, created.id().as_str()).unwrap());
    assert_eq!(count_all::<Hotel, _>(svc), 0);
}
