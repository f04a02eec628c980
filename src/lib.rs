//! # immutable-queue
//!
//! A persistent (immutable) FIFO queue that guarantees snapshot isolation by
//! deep-copying its node chain on every operation.
//!
//! ## Overview
//!
//! Every `enqueue` and `dequeue` returns a new queue and leaves the receiver,
//! and every other queue value, exactly as it was. Instead of sharing
//! structure between versions, each queue owns a private chain of nodes
//! built from deep copies of its values. The crate provides:
//!
//! - **Deep copy**: the [`DeepCopy`](copy::DeepCopy) capability, with
//!   implementations for std types, a derive macro and a serde round-trip
//!   strategy
//! - **Persistent queue**: [`PersistentQueue`](queue::PersistentQueue) and
//!   the immutable [`Node`](queue::Node) chain it is built from
//!
//! ## Feature Flags
//!
//! - `derive`: `#[derive(DeepCopy)]` (enabled by default)
//! - `serde`: JSON round-trip copying and serde support for queues
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use immutable_queue::prelude::*;
//!
//! #[derive(Debug, PartialEq, DeepCopy)]
//! struct Address {
//!     country: String,
//!     city: String,
//!     zip_code: u32,
//! }
//!
//! let mut address = Address {
//!     country: "USA".into(),
//!     city: "New York".into(),
//!     zip_code: 1234,
//! };
//!
//! let empty = PersistentQueue::new();
//! let queue = empty.enqueue(&address).unwrap();
//!
//! // Changing the original does not reach the queue.
//! address.city = "Boston".into();
//! assert_eq!(queue.head().unwrap().unwrap().city, "New York");
//! assert!(empty.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

// Lets code generated by `#[derive(DeepCopy)]` name this crate from inside it.
extern crate self as immutable_queue;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use immutable_queue::prelude::*;
/// ```
pub mod prelude {
    pub use crate::copy::{CopyError, DeepCopy};

    #[cfg(feature = "derive")]
    pub use immutable_queue_derive::DeepCopy;

    #[cfg(feature = "serde")]
    pub use crate::copy::Json;

    pub use crate::queue::{Chain, Node, PersistentQueue, Queue, QueueConfig, QueueError};
}

pub mod copy;
pub mod queue;

#[cfg(feature = "derive")]
pub use immutable_queue_derive::DeepCopy;
