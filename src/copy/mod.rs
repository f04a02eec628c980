//! Deep value duplication.
//!
//! This module provides [`DeepCopy`], the capability every payload stored in a
//! [`PersistentQueue`](crate::queue::PersistentQueue) must have. A deep copy
//! is a value that is structurally equal to the original but shares no
//! storage with it at any depth: mutating the original afterwards can never
//! be observed through the copy, and vice versa.
//!
//! # Overview
//!
//! - Primitive leaves (`i32`, `bool`, `char`, ...) are copied bitwise.
//! - Owned containers (`String`, `Vec`, `Box`, `HashMap`, ...) duplicate
//!   their storage and deep-copy every element.
//! - User types either derive the capability with `#[derive(DeepCopy)]`
//!   (feature `derive`), implement it by hand, or route through a JSON round
//!   trip (feature `serde`, see [`copy_via_json`]).
//!
//! Shared-ownership types such as `Rc`, `Arc` and `RefCell` deliberately have
//! no implementation: a clone of an `Rc<RefCell<T>>` still aliases the same
//! cell, so a queue holding one could be mutated behind its back. Trying to
//! store such a type is a compile-time error rather than a runtime surprise.
//!
//! # Examples
//!
//! ```rust
//! use immutable_queue::copy::DeepCopy;
//!
//! let original = vec![String::from("Berlin"), String::from("Paris")];
//! let copy = original.deep_copy().unwrap();
//!
//! assert_eq!(original, copy);
//! assert_ne!(original[0].as_ptr(), copy[0].as_ptr());
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::time::Duration;

#[cfg(feature = "serde")]
mod json;

#[cfg(feature = "serde")]
pub use json::{Json, copy_via_json};

/// Error returned when a value cannot be duplicated.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// The value's type has no meaningful deep copy.
    #[error("values of type `{type_name}` cannot be deep-copied")]
    Unsupported {
        /// Name of the type that refused to be copied.
        type_name: &'static str,
    },

    /// The JSON round trip used by [`copy_via_json`] failed.
    #[cfg(feature = "serde")]
    #[error("serialization round trip failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CopyError {
    /// Creates an [`CopyError::Unsupported`] error naming `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use immutable_queue::copy::CopyError;
    ///
    /// struct FileHandle;
    ///
    /// let error = CopyError::unsupported::<FileHandle>();
    /// assert!(error.to_string().contains("FileHandle"));
    /// ```
    #[must_use]
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::Unsupported {
            type_name: std::any::type_name::<T>(),
        }
    }
}

/// Produces a storage-disjoint duplicate of a value.
///
/// Implementations must return a value equal in structure to `self` that
/// shares no mutable storage with it. When a value cannot be duplicated the
/// implementation returns an error instead of an alias.
///
/// # Examples
///
/// ```rust
/// use immutable_queue::copy::{CopyError, DeepCopy};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl DeepCopy for Point {
///     fn deep_copy(&self) -> Result<Self, CopyError> {
///         Ok(Self {
///             x: self.x.deep_copy()?,
///             y: self.y.deep_copy()?,
///         })
///     }
/// }
///
/// let point = Point { x: 1, y: 2 };
/// let copy = point.deep_copy().unwrap();
/// assert_eq!((copy.x, copy.y), (1, 2));
/// ```
pub trait DeepCopy: Sized {
    /// Returns a deep copy of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`CopyError`] if any part of the value cannot be duplicated.
    fn deep_copy(&self) -> Result<Self, CopyError>;
}

// =============================================================================
// Leaf Implementations
// =============================================================================

macro_rules! impl_deep_copy_for_copy_types {
    ($($type:ty),* $(,)?) => {
        $(
            impl DeepCopy for $type {
                #[inline]
                fn deep_copy(&self) -> Result<Self, CopyError> {
                    Ok(*self)
                }
            }
        )*
    };
}

impl_deep_copy_for_copy_types!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    Duration,
    &'static str,
);

impl DeepCopy for String {
    #[inline]
    fn deep_copy(&self) -> Result<Self, CopyError> {
        Ok(self.clone())
    }
}

// =============================================================================
// Container Implementations
// =============================================================================

impl<T: DeepCopy> DeepCopy for Box<T> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        (**self).deep_copy().map(Box::new)
    }
}

impl<T: DeepCopy> DeepCopy for Option<T> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        self.as_ref().map(DeepCopy::deep_copy).transpose()
    }
}

impl<T: DeepCopy, E: DeepCopy> DeepCopy for Result<T, E> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        match self {
            Ok(value) => value.deep_copy().map(Ok),
            Err(error) => error.deep_copy().map(Err),
        }
    }
}

impl<T: DeepCopy> DeepCopy for Vec<T> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        self.iter().map(DeepCopy::deep_copy).collect()
    }
}

impl<T: DeepCopy> DeepCopy for VecDeque<T> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        self.iter().map(DeepCopy::deep_copy).collect()
    }
}

impl<T: DeepCopy, const N: usize> DeepCopy for [T; N] {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        let copies: Vec<T> = self.iter().map(DeepCopy::deep_copy).collect::<Result<_, _>>()?;
        copies
            .try_into()
            .map_err(|_| CopyError::unsupported::<Self>())
    }
}

impl<K, V, S> DeepCopy for HashMap<K, V, S>
where
    K: DeepCopy + Eq + Hash,
    V: DeepCopy,
    S: BuildHasher + Clone,
{
    fn deep_copy(&self) -> Result<Self, CopyError> {
        let mut copy = Self::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (key, value) in self {
            copy.insert(key.deep_copy()?, value.deep_copy()?);
        }
        Ok(copy)
    }
}

impl<T, S> DeepCopy for HashSet<T, S>
where
    T: DeepCopy + Eq + Hash,
    S: BuildHasher + Clone,
{
    fn deep_copy(&self) -> Result<Self, CopyError> {
        let mut copy = Self::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for element in self {
            copy.insert(element.deep_copy()?);
        }
        Ok(copy)
    }
}

impl<K: DeepCopy + Ord, V: DeepCopy> DeepCopy for BTreeMap<K, V> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        self.iter()
            .map(|(key, value)| Ok::<_, CopyError>((key.deep_copy()?, value.deep_copy()?)))
            .collect()
    }
}

impl<T: DeepCopy + Ord> DeepCopy for BTreeSet<T> {
    fn deep_copy(&self) -> Result<Self, CopyError> {
        self.iter().map(DeepCopy::deep_copy).collect()
    }
}

macro_rules! impl_deep_copy_for_tuples {
    ($(($($name:ident : $index:tt),+)),+ $(,)?) => {
        $(
            impl<$($name: DeepCopy),+> DeepCopy for ($($name,)+) {
                fn deep_copy(&self) -> Result<Self, CopyError> {
                    Ok(($(self.$index.deep_copy()?,)+))
                }
            }
        )+
    };
}

impl_deep_copy_for_tuples!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
    (A: 0, B: 1, C: 2, D: 3, E: 4),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5),
);

// =============================================================================
// Tests
// =============================================================================
