//! Queue configuration.

use std::num::NonZeroUsize;

/// Default capacity of a queue when no [`QueueConfig`] is given.
pub const DEFAULT_MAX_ELEMENTS: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(value) => value,
    None => unreachable!(),
};

/// Configuration carried by every [`PersistentQueue`](super::PersistentQueue).
///
/// Queues derived through `enqueue` or `dequeue` inherit the configuration
/// of the queue they came from.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use immutable_queue::queue::{PersistentQueue, QueueConfig};
///
/// let config = QueueConfig::default().with_max_elements(NonZeroUsize::new(2).unwrap());
/// let queue = PersistentQueue::with_config(config)
///     .enqueue(&1)
///     .and_then(|queue| queue.enqueue(&2))
///     .unwrap();
/// assert!(queue.enqueue(&3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QueueConfig {
    /// Maximum number of elements a queue may hold.
    pub max_elements: NonZeroUsize,
}

impl QueueConfig {
    /// Creates a configuration with the given capacity.
    #[inline]
    #[must_use]
    pub const fn new(max_elements: NonZeroUsize) -> Self {
        Self { max_elements }
    }

    /// Returns a copy of this configuration with a different capacity.
    #[inline]
    #[must_use]
    pub const fn with_max_elements(self, max_elements: NonZeroUsize) -> Self {
        Self { max_elements }
    }
}

impl Default for QueueConfig {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ELEMENTS)
    }
}
