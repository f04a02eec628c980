//! JSON round-trip duplication.
//!
//! Any `Serialize + DeserializeOwned` value can be deep-copied by encoding it
//! to JSON and decoding the result: the decoded value is built from scratch
//! and cannot share storage with the original. This is slower than a derived
//! [`DeepCopy`] and can fail at runtime (for example, maps whose keys do not
//! serialize to strings), which is reported as
//! [`CopyError::Serialization`].

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::{CopyError, DeepCopy};

/// Deep-copies `value` by serializing it to JSON and deserializing it back.
///
/// # Errors
///
/// Returns [`CopyError::Serialization`] if either direction of the round trip
/// fails.
///
/// # Examples
///
/// ```rust
/// use immutable_queue::copy::copy_via_json;
///
/// let original = vec![("Germany".to_string(), 1111)];
/// let copy = copy_via_json(&original).unwrap();
/// assert_eq!(original, copy);
/// ```
pub fn copy_via_json<T>(value: &T) -> Result<T, CopyError>
where
    T: Serialize + DeserializeOwned,
{
    let encoded = serde_json::to_string(value)?;
    Ok(serde_json::from_str(&encoded)?)
}

/// Wrapper that gives any serde-compatible type a [`DeepCopy`]
/// implementation through [`copy_via_json`].
///
/// Serializes transparently as the wrapped value.
///
/// # Examples
///
/// ```rust
/// use immutable_queue::copy::{DeepCopy, Json};
///
/// let wrapped = Json::new(vec![1, 2, 3]);
/// let copy = wrapped.deep_copy().unwrap();
/// assert_eq!(copy.into_inner(), vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Wraps `value`.
    #[inline]
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrows the wrapped value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.0
    }

    /// Unwraps the value.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> DeepCopy for Json<T>
where
    T: Serialize + DeserializeOwned,
{
    fn deep_copy(&self) -> Result<Self, CopyError> {
        copy_via_json(&self.0).map(Self)
    }
}

/// Implements [`DeepCopy`] for the listed types through
/// [`copy_via_json`].
///
/// Each type must implement `Serialize` and `DeserializeOwned`.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Address {
///     city: String,
/// }
///
/// immutable_queue::impl_deep_copy_via_serde!(Address);
///
/// use immutable_queue::copy::DeepCopy;
/// let address = Address { city: "Berlin".into() };
/// assert_eq!(address.deep_copy().unwrap(), address);
/// ```
#[macro_export]
macro_rules! impl_deep_copy_via_serde {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $crate::copy::DeepCopy for $type {
                fn deep_copy(&self) -> ::core::result::Result<Self, $crate::copy::CopyError> {
                    $crate::copy::copy_via_json(self)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[rstest]
    fn test_round_trip_preserves_value() {
        let original = vec![(String::from("USA"), String::from("New York"), 1234)];
        let copy = copy_via_json(&original).unwrap();
        assert_eq!(original, copy);
        assert_ne!(original[0].0.as_ptr(), copy[0].0.as_ptr());
    }

    #[rstest]
    fn test_non_string_map_keys_fail() {
        let mut original: HashMap<(u8, u8), u8> = HashMap::new();
        original.insert((1, 2), 3);
        let error = Json::new(original).deep_copy().unwrap_err();
        assert!(matches!(error, CopyError::Serialization(_)));
    }

    #[rstest]
    fn test_json_wrapper_serializes_transparently() {
        let wrapped = Json::new(vec![1, 2]);
        assert_eq!(serde_json::to_string(&wrapped).unwrap(), "[1,2]");
    }
}
