//! Immutable chain links.
//!
//! A [`Node`] holds one queue element and owns the node that was enqueued
//! immediately before it:
//!
//! ```text
//!     back                                  front
//!      |                                      |
//!  +--------+     +--------+             +--------+
//!  | value  |     | value  |             | value  |
//!  | prev --+---->| prev --+---> ... --->| prev --+---> None
//!  +--------+     +--------+             +--------+
//!      ^                                      ^
//!   enqueue                                dequeue
//! ```
//!
//! Both public constructors deep-copy their inputs, including the whole
//! `previous` chain, so a node never shares storage with anything its caller
//! still holds.

use std::fmt;

use crate::copy::{CopyError, DeepCopy};

/// An immutable link of a queue's node chain.
///
/// Once constructed a node never changes. The value is only handed out as a
/// fresh deep copy ([`Node::value`]) or as a shared borrow
/// ([`Node::value_ref`]).
///
/// # Examples
///
/// ```rust
/// use immutable_queue::queue::Node;
///
/// let front = Node::new(&String::from("Berlin")).unwrap();
/// let back = Node::with_previous(&String::from("Paris"), &front).unwrap();
///
/// assert_eq!(back.value().unwrap(), "Paris");
/// assert_eq!(back.previous().map(|node| node.value_ref().as_str()), Some("Berlin"));
/// assert_eq!(back.chain_len(), 2);
/// ```
pub struct Node<T> {
    value: T,
    previous: Option<Box<Self>>,
}

impl<T: DeepCopy> Node<T> {
    /// Creates a terminal node (one with no previous node) holding a deep
    /// copy of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if `value` cannot be deep-copied.
    pub fn new(value: &T) -> Result<Self, CopyError> {
        Ok(Self::terminal(value.deep_copy()?))
    }

    /// Creates a node holding a deep copy of `value`, linked to a deep copy
    /// of the entire chain starting at `previous`.
    ///
    /// `previous` itself is left untouched and shares nothing with the new
    /// node.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if `value` or any value in the `previous` chain
    /// cannot be deep-copied.
    pub fn with_previous(value: &T, previous: &Self) -> Result<Self, CopyError> {
        let value = value.deep_copy()?;
        let previous = previous.deep_copy()?;
        Ok(Self::link(value, Some(Box::new(previous))))
    }

    /// Returns a fresh deep copy of the stored value.
    ///
    /// Every call returns a new, independently owned value.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if the stored value cannot be deep-copied.
    pub fn value(&self) -> Result<T, CopyError> {
        self.value.deep_copy()
    }
}

impl<T> Node<T> {
    /// Creates a terminal node that takes ownership of an already copied
    /// value.
    pub(crate) fn terminal(value: T) -> Self {
        Self {
            value,
            previous: None,
        }
    }

    /// Links an already copied value to an already owned chain.
    pub(crate) fn link(value: T, previous: Option<Box<Self>>) -> Self {
        Self { value, previous }
    }

    /// Builds a chain whose oldest values come from `older` (front first)
    /// and whose back node holds `newest`.
    ///
    /// The values are moved into the chain as they are; callers pass values
    /// they already own exclusively.
    pub(crate) fn rebuild<I>(older: I, newest: T) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let previous = older.into_iter().fold(None, |previous, value| {
            Some(Box::new(Self::link(value, previous)))
        });
        Self::link(newest, previous)
    }

    /// Borrows the stored value.
    #[inline]
    #[must_use]
    pub const fn value_ref(&self) -> &T {
        &self.value
    }

    /// Returns the node enqueued immediately before this one, if any.
    #[inline]
    #[must_use]
    pub fn previous(&self) -> Option<&Self> {
        self.previous.as_deref()
    }

    /// Returns `true` if no node precedes this one.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.previous.is_none()
    }

    /// Returns the number of nodes in the chain starting at this node.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn chain_len(&self) -> usize {
        self.iter().count()
    }

    /// Returns an iterator over the values of the chain, starting with this
    /// node's value and walking towards the terminal node.
    #[inline]
    #[must_use]
    pub const fn iter(&self) -> NodeIterator<'_, T> {
        NodeIterator {
            current: Some(self),
        }
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// An iterator over the values of a node chain, from the newest node to the
/// terminal one.
pub struct NodeIterator<'a, T> {
    pub(crate) current: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for NodeIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.previous();
            &node.value
        })
    }
}

impl<T> std::iter::FusedIterator for NodeIterator<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: DeepCopy> DeepCopy for Node<T> {
    /// Copies the whole chain starting at this node.
    fn deep_copy(&self) -> Result<Self, CopyError> {
        let mut older = Vec::new();
        for value in self.iter().skip(1) {
            older.push(value.deep_copy()?);
        }
        let newest = self.value.deep_copy()?;
        Ok(Self::rebuild(older.into_iter().rev(), newest))
    }
}

/// Unlinks the chain one node at a time so that dropping a long chain does
/// not recurse once per node.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut link = self.previous.take();
        while let Some(mut node) = link {
            link = node.previous.take();
        }
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Node<T> {}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Node")
            .field("value", &self.value)
            .field("previous", &self.previous)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Address {
        country: String,
        city: String,
        zip_code: u32,
    }

    impl DeepCopy for Address {
        fn deep_copy(&self) -> Result<Self, CopyError> {
            Ok(Self {
                country: self.country.deep_copy()?,
                city: self.city.deep_copy()?,
                zip_code: self.zip_code,
            })
        }
    }

    fn address(country: &str, city: &str, zip_code: u32) -> Address {
        Address {
            country: country.to_string(),
            city: city.to_string(),
            zip_code,
        }
    }

    #[rstest]
    fn test_new_is_terminal() {
        let node = Node::new(&1).unwrap();
        assert!(node.is_terminal());
        assert_eq!(node.chain_len(), 1);
    }

    #[rstest]
    fn test_value_is_not_affected_by_later_mutation() {
        let mut berlin = address("Germany", "Berlin", 1111);
        let node = Node::new(&berlin).unwrap();
        berlin.city = "Frankfurt".to_string();
        assert_eq!(node.value().unwrap().city, "Berlin");
    }

    #[rstest]
    fn test_value_returns_distinct_copies() {
        let node = Node::new(&String::from("Tokyo")).unwrap();
        let first = node.value().unwrap();
        let second = node.value().unwrap();
        assert_eq!(first, second);
        assert_ne!(first.as_ptr(), second.as_ptr());
        assert_ne!(first.as_ptr(), node.value_ref().as_ptr());
    }

    #[rstest]
    fn test_with_previous_copies_whole_chain() {
        let front = Node::new(&address("Germany", "Berlin", 1111)).unwrap();
        let middle = Node::with_previous(&address("France", "Paris", 2222), &front).unwrap();
        let back = Node::with_previous(&address("Japan", "Tokyo", 3333), &middle).unwrap();

        let copied_middle = back.previous().unwrap();
        assert!(!std::ptr::eq(copied_middle, &middle));
        assert!(!std::ptr::eq(copied_middle.previous().unwrap(), &front));
        assert_eq!(copied_middle, &middle);

        let cities: Vec<&str> = back.iter().map(|value| value.city.as_str()).collect();
        assert_eq!(cities, vec!["Tokyo", "Paris", "Berlin"]);
    }

    #[rstest]
    fn test_previous_can_be_reused_in_another_chain() {
        let front = Node::new(&1).unwrap();
        let left = Node::with_previous(&2, &front).unwrap();
        let right = Node::with_previous(&3, &front).unwrap();
        assert_eq!(left.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(right.iter().copied().collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(front.chain_len(), 1);
    }

    #[rstest]
    fn test_deep_copy_preserves_order() {
        let chain = Node::rebuild(vec![1, 2, 3], 4);
        let copy = chain.deep_copy().unwrap();
        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
        assert_eq!(copy, chain);
    }

    #[rstest]
    fn test_rebuild_without_older_values_is_terminal() {
        let node = Node::rebuild(Vec::new(), 'a');
        assert!(node.is_terminal());
    }

    #[rstest]
    fn test_dropping_long_chain_does_not_overflow_stack() {
        let chain = Node::rebuild(0..200_000, 200_000);
        assert_eq!(chain.chain_len(), 200_001);
        drop(chain);
    }

    #[rstest]
    fn test_debug_shows_chain() {
        let chain = Node::rebuild(vec![1], 2);
        assert_eq!(
            format!("{chain:?}"),
            "Node { value: 2, previous: Some(Node { value: 1, previous: None }) }"
        );
    }
}
