//! Tests for the JSON round-trip copy strategy and queue serialization.

mod common;

use std::collections::HashMap;

use common::Address;
use immutable_queue::prelude::*;
use immutable_queue::copy::copy_via_json;
use rstest::rstest;
use serde::{Deserialize, Serialize};

/// A payload that only knows how to serialize itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Parcel {
    id: u64,
    destination: String,
    tags: Vec<String>,
}

immutable_queue::impl_deep_copy_via_serde!(Parcel);

fn parcel(id: u64, destination: &str) -> Parcel {
    Parcel {
        id,
        destination: destination.to_string(),
        tags: vec!["fragile".to_string()],
    }
}

#[rstest]
fn test_serde_copy_is_equal_and_disjoint() {
    let original = parcel(1, "Berlin");
    let copy = original.deep_copy().unwrap();
    assert_eq!(copy, original);
    assert_ne!(copy.destination.as_ptr(), original.destination.as_ptr());
}

#[rstest]
fn test_serde_payload_isolated_in_queue() {
    let mut original = parcel(7, "Tokyo");
    let queue = PersistentQueue::new().enqueue(&original).unwrap();
    original.tags.push("express".to_string());

    assert_eq!(queue.head().unwrap().unwrap().tags, vec!["fragile".to_string()]);
}

#[rstest]
fn test_json_wrapper_in_queue() {
    let wrapped = Json::new(vec![("London".to_string(), 2468)]);
    let queue = PersistentQueue::new().enqueue(&wrapped).unwrap();
    assert_eq!(queue.head().unwrap(), Some(wrapped));
}

#[rstest]
fn test_unserializable_payload_surfaces_copy_failure() {
    let mut by_coordinates: HashMap<(i32, i32), String> = HashMap::new();
    by_coordinates.insert((52, 13), "Berlin".to_string());

    let queue = PersistentQueue::new();
    let error = queue.enqueue(&Json::new(by_coordinates)).unwrap_err();

    assert!(matches!(
        error,
        QueueError::CopyFailure(CopyError::Serialization(_))
    ));
    assert!(queue.is_empty());
}

#[rstest]
fn test_copy_via_json_matches_derived_copy() {
    let values = vec!["Germany".to_string(), "France".to_string()];
    assert_eq!(copy_via_json(&values).unwrap(), values.deep_copy().unwrap());
}

#[rstest]
fn test_queue_json_round_trip() {
    let queue = PersistentQueue::try_from_values(vec![parcel(1, "Paris"), parcel(2, "Rome")]).unwrap();
    let json = serde_json::to_string(&queue).unwrap();
    let decoded: PersistentQueue<Parcel> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, queue);
    assert_eq!(decoded.head().unwrap().map(|parcel| parcel.id), Some(1));
}

#[rstest]
fn test_queue_deserialization_respects_default_capacity() {
    let too_many = vec![0u8; immutable_queue::queue::DEFAULT_MAX_ELEMENTS.get() + 1];
    let json = serde_json::to_string(&too_many).unwrap();
    let result: Result<PersistentQueue<u8>, _> = serde_json::from_str(&json);
    assert!(result.is_err());
}

#[rstest]
fn test_derived_and_serde_payloads_mix() {
    let queue = PersistentQueue::new()
        .enqueue(&(Address::new("USA", "New York", 1234), parcel(3, "Boston")))
        .unwrap();
    let (address, parcel) = queue.head().unwrap().unwrap();
    assert_eq!(address.city.as_deref(), Some("New York"));
    assert_eq!(parcel.destination, "Boston");
}
