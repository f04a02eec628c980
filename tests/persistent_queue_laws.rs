//! Property-based tests for PersistentQueue.
//!
//! A `VecDeque` serves as the reference model: any sequence of operations
//! applied to both must leave them holding the same elements, and every
//! intermediate queue must still hold what it held when it was created.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use immutable_queue::queue::{PersistentQueue, QueueConfig, QueueError};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone)]
enum Operation {
    Enqueue(String),
    Dequeue,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => "[a-z]{0,8}".prop_map(Operation::Enqueue),
        2 => Just(Operation::Dequeue),
    ]
}

fn queue_strategy(max_size: usize) -> impl Strategy<Value = PersistentQueue<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size)
        .prop_map(|values| PersistentQueue::try_from_values(values).unwrap())
}

fn small_queue() -> impl Strategy<Value = PersistentQueue<i32>> {
    queue_strategy(20)
}

proptest! {
    // =========================================================================
    // Model Conformance
    // =========================================================================

    #[test]
    fn prop_operations_match_vec_deque(operations in prop::collection::vec(operation(), 0..40)) {
        let mut model: VecDeque<String> = VecDeque::new();
        let mut snapshots: Vec<(PersistentQueue<String>, Vec<String>)> =
            vec![(PersistentQueue::new(), Vec::new())];

        for operation in operations {
            let current = &snapshots[snapshots.len() - 1].0;
            let next = match operation {
                Operation::Enqueue(value) => {
                    let next = current.enqueue(&value).unwrap();
                    model.push_back(value);
                    next
                }
                Operation::Dequeue => match current.dequeue() {
                    Ok(next) => {
                        model.pop_front();
                        next
                    }
                    Err(error) => {
                        prop_assert!(
                            matches!(error, QueueError::Underflow),
                            "expected underflow, got {:?}",
                            error
                        );
                        prop_assert!(model.is_empty());
                        continue;
                    }
                },
            };

            prop_assert_eq!(next.len(), model.len());
            prop_assert_eq!(next.head().unwrap(), model.front().cloned());
            snapshots.push((next, model.iter().cloned().collect()));
        }

        // Every intermediate queue still holds what it held when built.
        for (snapshot, expected) in &snapshots {
            prop_assert_eq!(&snapshot.to_vec().unwrap(), expected);
        }
    }

    // =========================================================================
    // Immutability
    // =========================================================================

    #[test]
    fn prop_enqueue_leaves_receiver_unchanged(queue in small_queue(), element: i32) {
        let before = queue.to_vec().unwrap();
        let extended = queue.enqueue(&element).unwrap();
        prop_assert_eq!(queue.to_vec().unwrap(), before);
        prop_assert_eq!(extended.len(), queue.len() + 1);
    }

    #[test]
    fn prop_dequeue_leaves_receiver_unchanged(queue in small_queue()) {
        let before = queue.to_vec().unwrap();
        let _ = queue.dequeue();
        prop_assert_eq!(queue.to_vec().unwrap(), before);
    }

    // =========================================================================
    // FIFO Properties
    // =========================================================================

    #[test]
    fn prop_enqueue_keeps_head_of_non_empty_queue(
        queue in queue_strategy(20).prop_filter("non-empty", |queue| !queue.is_empty()),
        element: i32,
    ) {
        let extended = queue.enqueue(&element).unwrap();
        prop_assert_eq!(extended.head().unwrap(), queue.head().unwrap());
    }

    #[test]
    fn prop_enqueue_on_empty_sets_head(element: i32) {
        let queue = PersistentQueue::new().enqueue(&element).unwrap();
        prop_assert_eq!(queue.head().unwrap(), Some(element));
    }

    #[test]
    fn prop_dequeue_drops_exactly_the_front(
        queue in queue_strategy(20).prop_filter("non-empty", |queue| !queue.is_empty()),
    ) {
        let values = queue.to_vec().unwrap();
        let rest = queue.dequeue().unwrap();
        prop_assert_eq!(rest.to_vec().unwrap(), values[1..].to_vec());
    }

    #[test]
    fn prop_draining_yields_insertion_order(values in prop::collection::vec(any::<i32>(), 0..20)) {
        let mut queue = PersistentQueue::try_from_values(values.clone()).unwrap();
        let mut drained = Vec::new();
        while let Some(head) = queue.head().unwrap() {
            drained.push(head);
            queue = queue.dequeue().unwrap();
        }
        prop_assert_eq!(drained, values);
    }

    #[test]
    fn prop_is_empty_matches_len_zero(queue in small_queue()) {
        prop_assert_eq!(queue.is_empty(), queue.len() == 0);
    }

    #[test]
    fn prop_chain_walk_matches_len(queue in small_queue()) {
        prop_assert_eq!(queue.iter_from_back().count(), queue.len());
    }

    // =========================================================================
    // Capacity
    // =========================================================================

    #[test]
    fn prop_capacity_is_never_exceeded(max_elements in 1usize..16, attempts in 0usize..32) {
        let config = QueueConfig::new(NonZeroUsize::new(max_elements).unwrap());
        let mut queue = PersistentQueue::with_config(config);
        for attempt in 0..attempts {
            match queue.enqueue(&attempt) {
                Ok(next) => queue = next,
                Err(error) => {
                    prop_assert!(
                        matches!(error, QueueError::Overflow { .. }),
                        "expected overflow, got {:?}",
                        error
                    );
                    prop_assert_eq!(queue.len(), max_elements);
                }
            }
        }
        prop_assert!(queue.len() <= max_elements);
        prop_assert_eq!(queue.len(), attempts.min(max_elements));
    }
}
