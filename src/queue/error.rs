//! Error types for queue operations.

use crate::copy::CopyError;

/// Errors reported by [`PersistentQueue`](super::PersistentQueue) operations.
///
/// A failed operation never leaves a partially built queue behind: the
/// receiver and every other queue value are unaffected.
///
/// # Examples
///
/// ```rust
/// use immutable_queue::queue::{PersistentQueue, QueueError};
///
/// let queue: PersistentQueue<i32> = PersistentQueue::new();
/// let error = queue.dequeue().unwrap_err();
/// assert!(matches!(error, QueueError::Underflow));
/// assert_eq!(error.to_string(), "Immutable queue underflow");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// `dequeue` was called on an empty queue.
    #[error("Immutable queue underflow")]
    Underflow,

    /// `enqueue` was called on a queue already holding its maximum number of
    /// elements.
    #[error("Immutable queue overflow: at most {max_elements} elements are allowed")]
    Overflow {
        /// The configured capacity.
        max_elements: usize,
    },

    /// A payload could not be deep-copied.
    #[error("deep copy failed: {0}")]
    CopyFailure(#[from] CopyError),

    /// A chain handed to [`PersistentQueue::from_chain`](super::PersistentQueue::from_chain)
    /// does not describe a queue.
    #[error("malformed chain: {reason}")]
    MalformedChain {
        /// What is wrong with the chain.
        reason: &'static str,
    },
}
