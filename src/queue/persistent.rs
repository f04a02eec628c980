//! Persistent FIFO queue built on fully duplicated node chains.
//!
//! This module provides [`PersistentQueue`], a queue whose `enqueue` and
//! `dequeue` return new queues and never touch the receiver.
//!
//! # Overview
//!
//! Unlike the structures in most persistent collection libraries,
//! `PersistentQueue` does not share structure between versions. Every
//! operation deep-copies the values it keeps and rebuilds a private node
//! chain for the new queue:
//!
//! - O(n) `enqueue`
//! - O(n) `dequeue`
//! - O(1) `head` (plus the cost of copying one value)
//! - O(1) `is_empty` and `len`
//!
//! The payoff is that no two queue values, and no caller, ever hold a
//! reference into the same storage. A queue can be handed to another thread
//! without any synchronization.
//!
//! # Examples
//!
//! ```rust
//! use immutable_queue::queue::PersistentQueue;
//!
//! let empty: PersistentQueue<&str> = PersistentQueue::new();
//! let one = empty.enqueue(&"a").unwrap();
//! let two = one.enqueue(&"b").unwrap();
//! let rest = two.dequeue().unwrap();
//!
//! assert!(empty.is_empty());                     // never changed
//! assert_eq!(one.head().unwrap(), Some("a"));    // never changed
//! assert_eq!(two.to_vec().unwrap(), vec!["a", "b"]);
//! assert_eq!(rest.head().unwrap(), Some("b"));
//! ```

use std::fmt;

use super::config::QueueConfig;
use super::error::QueueError;
use super::node::{Node, NodeIterator};
use crate::copy::{CopyError, DeepCopy};

/// The two ends of a non-empty node chain.
///
/// A single-element chain is its own variant instead of being detected by
/// comparing node identities. In the multi-element case `front` is an
/// independently owned copy of the oldest value; it is never a reference into
/// `back`'s chain.
///
/// # Examples
///
/// ```rust
/// use immutable_queue::queue::{Chain, Node, PersistentQueue};
///
/// let front = Node::new(&1).unwrap();
/// let back = Node::with_previous(&2, &front).unwrap();
/// let chain = Chain::Multiple { front, back };
///
/// let queue = PersistentQueue::from_chain(&chain).unwrap();
/// assert_eq!(queue.to_vec().unwrap(), vec![1, 2]);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub enum Chain<T> {
    /// Exactly one element: the node is both front and back.
    Single(Node<T>),
    /// Two or more elements.
    Multiple {
        /// Terminal node holding the oldest element.
        front: Node<T>,
        /// Newest node; its chain reaches the oldest element.
        back: Node<T>,
    },
}

impl<T> Chain<T> {
    /// Returns the node holding the oldest element.
    #[inline]
    #[must_use]
    pub const fn front(&self) -> &Node<T> {
        match self {
            Self::Single(node) | Self::Multiple { front: node, .. } => node,
        }
    }

    /// Returns the node holding the newest element.
    #[inline]
    #[must_use]
    pub const fn back(&self) -> &Node<T> {
        match self {
            Self::Single(node) | Self::Multiple { back: node, .. } => node,
        }
    }
}

impl<T: DeepCopy> DeepCopy for Chain<T> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        match self {
            Self::Single(node) => Ok(Self::Single(node.deep_copy()?)),
            Self::Multiple { front, back } => Ok(Self::Multiple {
                front: front.deep_copy()?,
                back: back.deep_copy()?,
            }),
        }
    }
}

/// A persistent (immutable) FIFO queue.
///
/// Every queue owns a private, fully duplicated node chain. Values enter the
/// queue as deep copies and leave it as deep copies, so neither later changes
/// to an enqueued value nor changes to a value returned by [`head`] can reach
/// the stored data.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `new`      | O(1)       |
/// | `enqueue`  | O(n)       |
/// | `dequeue`  | O(n)       |
/// | `head`     | O(1)       |
/// | `is_empty` | O(1)       |
/// | `len`      | O(1)       |
///
/// Each O(n) operation also deep-copies n values.
///
/// # Examples
///
/// ```rust
/// use immutable_queue::queue::PersistentQueue;
///
/// let queue = PersistentQueue::new()
///     .enqueue(&String::from("New York"))
///     .and_then(|queue| queue.enqueue(&String::from("Tokyo")))
///     .unwrap();
///
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.head().unwrap().as_deref(), Some("New York"));
/// assert_eq!(format!("{queue}"), "[New York, Tokyo]");
/// ```
///
/// [`head`]: PersistentQueue::head
pub struct PersistentQueue<T> {
    chain: Option<Chain<T>>,
    /// Cached element count.
    length: usize,
    config: QueueConfig,
}

static_assertions::assert_impl_all!(PersistentQueue<String>: Send, Sync);
static_assertions::assert_impl_all!(PersistentQueue<Vec<u8>>: Send, Sync);

impl<T> PersistentQueue<T> {
    /// Creates an empty queue with the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_queue::queue::PersistentQueue;
    ///
    /// let queue: PersistentQueue<i32> = PersistentQueue::new();
    /// assert!(queue.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    /// Creates an empty queue with the given configuration.
    #[inline]
    #[must_use]
    pub const fn with_config(config: QueueConfig) -> Self {
        Self {
            chain: None,
            length: 0,
            config,
        }
    }

    /// Returns `true` if the queue holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chain.is_none()
    }

    /// Returns the number of elements in the queue.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns the configuration this queue was built with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> QueueConfig {
        self.config
    }

    /// Returns the maximum number of elements this queue may hold.
    #[inline]
    #[must_use]
    pub const fn max_elements(&self) -> usize {
        self.config.max_elements.get()
    }

    /// Returns the node holding the element due to be dequeued next.
    #[inline]
    #[must_use]
    pub fn front(&self) -> Option<&Node<T>> {
        self.chain.as_ref().map(Chain::front)
    }

    /// Returns the node holding the most recently enqueued element.
    #[inline]
    #[must_use]
    pub fn back(&self) -> Option<&Node<T>> {
        self.chain.as_ref().map(Chain::back)
    }

    /// Returns an iterator over borrowed elements, from the back (newest)
    /// to the front (oldest).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_queue::queue::PersistentQueue;
    ///
    /// let queue = PersistentQueue::try_from_values(1..=3).unwrap();
    /// let collected: Vec<&i32> = queue.iter_from_back().collect();
    /// assert_eq!(collected, vec![&3, &2, &1]);
    /// ```
    #[inline]
    #[must_use]
    pub fn iter_from_back(&self) -> NodeIterator<'_, T> {
        NodeIterator {
            current: self.back(),
        }
    }

    /// Borrows the elements in queue order, front first.
    fn ordered(&self) -> Vec<&T> {
        let mut elements: Vec<&T> = self.iter_from_back().collect();
        elements.reverse();
        elements
    }
}

impl<T: DeepCopy> PersistentQueue<T> {
    /// Creates a queue from a pre-built chain using the default
    /// configuration.
    ///
    /// See [`PersistentQueue::from_chain_with_config`].
    ///
    /// # Errors
    ///
    /// See [`PersistentQueue::from_chain_with_config`].
    pub fn from_chain(chain: &Chain<T>) -> Result<Self, QueueError> {
        Self::from_chain_with_config(chain, QueueConfig::default())
    }

    /// Creates a queue from a pre-built chain.
    ///
    /// The queue deep-copies `chain`. In the [`Chain::Multiple`] case the
    /// back node's entire chain is copied and the new front holds a separate
    /// copy of that chain's oldest value, so the caller's `front` only has
    /// to be a terminal node and its value is not read. Nothing the caller
    /// holds is shared with the new queue.
    ///
    /// # Errors
    ///
    /// - [`QueueError::MalformedChain`] if a `Single` node or a `Multiple`
    ///   front node links to a previous node, or if a `Multiple` back node
    ///   has no previous node
    /// - [`QueueError::Overflow`] if the chain is longer than the configured
    ///   capacity
    /// - [`QueueError::CopyFailure`] if any value cannot be deep-copied
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_queue::queue::{Chain, Node, PersistentQueue, QueueConfig};
    ///
    /// let node = Node::new(&"only").unwrap();
    /// let queue = PersistentQueue::from_chain_with_config(
    ///     &Chain::Single(node),
    ///     QueueConfig::default(),
    /// )
    /// .unwrap();
    /// assert!(queue.dequeue().unwrap().is_empty());
    /// ```
    pub fn from_chain_with_config(
        chain: &Chain<T>,
        config: QueueConfig,
    ) -> Result<Self, QueueError> {
        let (length, chain) = match chain {
            Chain::Single(node) => {
                if !node.is_terminal() {
                    return Err(malformed(
                        "a single-element chain must not link to a previous node",
                    ));
                }
                ensure_capacity(1, config)?;
                let node = node.deep_copy().inspect_err(log_copy_failure)?;
                (1, Chain::Single(node))
            }
            Chain::Multiple { front, back } => {
                if !front.is_terminal() {
                    return Err(malformed(
                        "the front node must not link to a previous node",
                    ));
                }
                let Some(oldest) = back.iter().skip(1).last() else {
                    return Err(malformed(
                        "a multi-element chain needs a back node with a previous node",
                    ));
                };
                let length = back.chain_len();
                ensure_capacity(length, config)?;
                let chain = Chain::Multiple {
                    front: Node::new(oldest).inspect_err(log_copy_failure)?,
                    back: back.deep_copy().inspect_err(log_copy_failure)?,
                };
                (length, chain)
            }
        };

        Ok(Self {
            chain: Some(chain),
            length,
            config,
        })
    }

    /// Creates a queue holding `values` in iteration order (first value at
    /// the front) using the default configuration.
    ///
    /// # Errors
    ///
    /// See [`PersistentQueue::try_from_values_with_config`].
    pub fn try_from_values<I>(values: I) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::try_from_values_with_config(values, QueueConfig::default())
    }

    /// Creates a queue holding `values` in iteration order (first value at
    /// the front).
    ///
    /// The values are moved into the queue; since the caller gives them up,
    /// no copy is needed to isolate them.
    ///
    /// # Errors
    ///
    /// - [`QueueError::Overflow`] if there are more values than the
    ///   configured capacity
    /// - [`QueueError::CopyFailure`] if the front value cannot be
    ///   deep-copied
    pub fn try_from_values_with_config<I>(values: I, config: QueueConfig) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.len() > config.max_elements.get() {
            return Err(overflow(config));
        }
        Self::assemble(values, config)
    }

    /// Returns a new queue with a deep copy of `value` added at the back.
    ///
    /// The receiver is left unchanged. The whole chain is copied into the
    /// new queue, so the cost is linear in the queue's length.
    ///
    /// # Errors
    ///
    /// - [`QueueError::Overflow`] if the queue already holds
    ///   [`max_elements`](Self::max_elements) elements
    /// - [`QueueError::CopyFailure`] if any value cannot be deep-copied
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_queue::queue::PersistentQueue;
    ///
    /// let original = PersistentQueue::new().enqueue(&1).unwrap();
    /// let extended = original.enqueue(&2).unwrap();
    ///
    /// assert_eq!(original.len(), 1); // Original unchanged
    /// assert_eq!(extended.len(), 2); // New queue
    /// ```
    pub fn enqueue(&self, value: &T) -> Result<Self, QueueError> {
        let Some(chain) = &self.chain else {
            let node = Node::new(value).inspect_err(log_copy_failure)?;
            return Ok(Self {
                chain: Some(Chain::Single(node)),
                length: 1,
                config: self.config,
            });
        };

        let mut values = copy_values(chain.back().iter())?;
        if values.len() >= self.max_elements() {
            tracing::debug!(
                max_elements = self.max_elements(),
                "rejecting enqueue: queue is at capacity"
            );
            return Err(overflow(self.config));
        }

        values.reverse();
        values.push(value.deep_copy().inspect_err(log_copy_failure)?);
        Self::assemble(values, self.config)
    }

    /// Returns a new queue without the element at the front.
    ///
    /// The receiver is left unchanged. A single-element queue yields an
    /// empty queue.
    ///
    /// # Errors
    ///
    /// - [`QueueError::Underflow`] if the queue is empty
    /// - [`QueueError::CopyFailure`] if any value cannot be deep-copied
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_queue::queue::PersistentQueue;
    ///
    /// let queue = PersistentQueue::try_from_values(vec!['a', 'b']).unwrap();
    /// let rest = queue.dequeue().unwrap();
    ///
    /// assert_eq!(queue.head().unwrap(), Some('a')); // Original unchanged
    /// assert_eq!(rest.head().unwrap(), Some('b'));
    /// ```
    pub fn dequeue(&self) -> Result<Self, QueueError> {
        let back = match &self.chain {
            None => {
                tracing::debug!("rejecting dequeue: queue is empty");
                return Err(QueueError::Underflow);
            }
            Some(Chain::Single(_)) => return Ok(Self::with_config(self.config)),
            Some(Chain::Multiple { back, .. }) => back,
        };

        let mut values = copy_values(back.iter().take(self.length - 1))?;
        values.reverse();
        Self::assemble(values, self.config)
    }

    /// Returns a deep copy of the element at the front, or `None` if the
    /// queue is empty.
    ///
    /// Each call returns a new value; mutating it does not affect the queue.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::CopyFailure`] if the value cannot be
    /// deep-copied.
    pub fn head(&self) -> Result<Option<T>, QueueError> {
        self.front()
            .map(Node::value)
            .transpose()
            .inspect_err(log_copy_failure)
            .map_err(QueueError::from)
    }

    /// Returns deep copies of all elements, front first.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::CopyFailure`] if any value cannot be
    /// deep-copied.
    pub fn to_vec(&self) -> Result<Vec<T>, QueueError> {
        let mut values = copy_values(self.iter_from_back())?;
        values.reverse();
        Ok(values)
    }

    /// Builds a queue that takes ownership of `values` (front first).
    ///
    /// The front node gets its own copy of the first value so that it never
    /// aliases the back chain.
    fn assemble(mut values: Vec<T>, config: QueueConfig) -> Result<Self, QueueError> {
        let length = values.len();
        let Some(newest) = values.pop() else {
            return Ok(Self::with_config(config));
        };

        let chain = match values.first() {
            None => Chain::Single(Node::terminal(newest)),
            Some(oldest) => {
                let front = Node::terminal(oldest.deep_copy().inspect_err(log_copy_failure)?);
                Chain::Multiple {
                    front,
                    back: Node::rebuild(values, newest),
                }
            }
        };

        tracing::trace!(length, "rebuilt node chain");
        Ok(Self {
            chain: Some(chain),
            length,
            config,
        })
    }
}

/// Deep-copies every value yielded by `values`, preserving order.
fn copy_values<'a, T, I>(values: I) -> Result<Vec<T>, QueueError>
where
    T: DeepCopy + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values
        .into_iter()
        .map(DeepCopy::deep_copy)
        .collect::<Result<Vec<T>, CopyError>>()
        .inspect_err(log_copy_failure)
        .map_err(QueueError::from)
}

fn log_copy_failure(error: &CopyError) {
    tracing::debug!(%error, "deep copy of a queue element failed");
}

fn ensure_capacity(length: usize, config: QueueConfig) -> Result<(), QueueError> {
    if length > config.max_elements.get() {
        tracing::debug!(
            length,
            max_elements = config.max_elements.get(),
            "rejecting chain longer than capacity"
        );
        return Err(overflow(config));
    }
    Ok(())
}

fn overflow(config: QueueConfig) -> QueueError {
    QueueError::Overflow {
        max_elements: config.max_elements.get(),
    }
}

fn malformed(reason: &'static str) -> QueueError {
    tracing::debug!(reason, "rejecting malformed chain");
    QueueError::MalformedChain { reason }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentQueue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeepCopy> DeepCopy for PersistentQueue<T> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        Ok(Self {
            chain: self.chain.deep_copy()?,
            length: self.length,
            config: self.config,
        })
    }
}

/// Queues are equal when they hold equal elements in the same order.
/// Configuration is not compared.
impl<T: PartialEq> PartialEq for PersistentQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        // The front always mirrors the oldest value of the back chain, so
        // walking the back chain covers every element.
        self.length == other.length && self.iter_from_back().eq(other.iter_from_back())
    }
}

impl<T: Eq> Eq for PersistentQueue<T> {}

impl<T: fmt::Debug> fmt::Debug for PersistentQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.ordered()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self.ordered() {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentQueue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self.ordered() {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentQueueVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for PersistentQueueVisitor<T>
where
    T: serde::Deserialize<'de> + DeepCopy,
{
    type Value = PersistentQueue<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut elements = Vec::with_capacity(capacity);
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        PersistentQueue::try_from_values(elements).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for PersistentQueue<T>
where
    T: serde::Deserialize<'de> + DeepCopy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentQueueVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_serialize_front_to_back() {
        let queue = PersistentQueue::try_from_values(1..=3).unwrap();
        assert_eq!(serde_json::to_string(&queue).unwrap(), "[1,2,3]");
    }

    #[rstest]
    fn test_deserialize_builds_queue_in_order() {
        let queue: PersistentQueue<i32> = serde_json::from_str("[4,5,6]").unwrap();
        assert_eq!(queue.head().unwrap(), Some(4));
        assert_eq!(queue.len(), 3);
    }

    #[rstest]
    fn test_deserialize_empty() {
        let queue: PersistentQueue<i32> = serde_json::from_str("[]").unwrap();
        assert!(queue.is_empty());
    }
}
