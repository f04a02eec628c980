//! Persistent (immutable) FIFO queues.
//!
//! This module provides a queue whose snapshots never change once built:
//!
//! - [`PersistentQueue`]: the queue itself
//! - [`Node`]: the immutable links of its chain
//! - [`Chain`]: the front/back pair accepted by
//!   [`PersistentQueue::from_chain`]
//! - [`QueueConfig`]: capacity settings
//! - [`QueueError`]: failures reported by queue operations
//! - [`Queue`]: the operations shared by immutable queue implementations
//!
//! # Full Duplication
//!
//! Every queue owns a private copy of its node chain. `enqueue` and
//! `dequeue` copy the values they keep into a new chain instead of sharing
//! nodes with the receiver:
//!
//! ```text
//! q1 = [X]
//! q2 = q1.enqueue(Y): [X' <- Y']          // X' is a fresh copy of X
//! q3 = q2.dequeue():  [Y'']               // Y'' is a fresh copy of Y'
//! ```
//!
//! This makes each operation O(n), in exchange for the guarantee that no
//! two snapshots share storage.
//!
//! # Examples
//!
//! ```rust
//! use immutable_queue::queue::{PersistentQueue, Queue};
//!
//! fn drain<Q: Queue<Item = i32>>(mut queue: Q) -> Result<Vec<i32>, Q::Error> {
//!     let mut drained = Vec::new();
//!     while let Some(head) = queue.head()? {
//!         drained.push(head);
//!         queue = queue.dequeue()?;
//!     }
//!     Ok(drained)
//! }
//!
//! let queue = PersistentQueue::try_from_values(vec![1, 2, 3]).unwrap();
//! assert_eq!(drain(queue).unwrap(), vec![1, 2, 3]);
//! ```

mod config;
mod error;
mod node;
mod persistent;

pub use config::DEFAULT_MAX_ELEMENTS;
pub use config::QueueConfig;
pub use error::QueueError;
pub use node::Node;
pub use node::NodeIterator;
pub use persistent::Chain;
pub use persistent::PersistentQueue;

use crate::copy::DeepCopy;

/// Operations of an immutable FIFO queue.
///
/// Every operation leaves `self` unchanged; `enqueue` and `dequeue` return
/// the resulting queue as a new value.
pub trait Queue: Sized {
    /// The element type.
    type Item;
    /// The error reported by failed operations.
    type Error;

    /// Returns a new queue with `value` added at the back.
    ///
    /// # Errors
    ///
    /// Implementation defined; typically a capacity or copy failure.
    fn enqueue(&self, value: &Self::Item) -> Result<Self, Self::Error>;

    /// Returns a new queue without the element at the front.
    ///
    /// # Errors
    ///
    /// Implementation defined; must fail on an empty queue.
    fn dequeue(&self) -> Result<Self, Self::Error>;

    /// Returns a copy of the element at the front, or `None` if empty.
    ///
    /// # Errors
    ///
    /// Implementation defined; typically a copy failure.
    fn head(&self) -> Result<Option<Self::Item>, Self::Error>;

    /// Returns `true` if the queue holds no elements.
    fn is_empty(&self) -> bool;
}

impl<T: DeepCopy> Queue for PersistentQueue<T> {
    type Item = T;
    type Error = QueueError;

    #[inline]
    fn enqueue(&self, value: &T) -> Result<Self, QueueError> {
        Self::enqueue(self, value)
    }

    #[inline]
    fn dequeue(&self) -> Result<Self, QueueError> {
        Self::dequeue(self)
    }

    #[inline]
    fn head(&self) -> Result<Option<T>, QueueError> {
        Self::head(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn enqueue_all<Q: Queue>(queue: &Q, values: &[Q::Item]) -> Result<Q, Q::Error> {
        let mut current = queue.enqueue(&values[0])?;
        for value in &values[1..] {
            current = current.enqueue(value)?;
        }
        Ok(current)
    }

    #[rstest]
    fn test_trait_dispatch_reaches_persistent_queue() {
        let empty: PersistentQueue<u8> = PersistentQueue::new();
        let queue = enqueue_all(&empty, &[1, 2, 3]).unwrap();
        assert!(Queue::is_empty(&empty));
        assert_eq!(Queue::head(&queue).unwrap(), Some(1));
        assert_eq!(Queue::head(&Queue::dequeue(&queue).unwrap()).unwrap(), Some(2));
    }
}
