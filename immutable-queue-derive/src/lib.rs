//! Derive macro for immutable-queue's `DeepCopy` capability.
//!
//! This crate provides `#[derive(DeepCopy)]`, which implements
//! `immutable_queue::copy::DeepCopy` by deep-copying every field.
//!
//! # Example
//!
//! ```rust,ignore
//! use immutable_queue::DeepCopy;
//! use immutable_queue::copy::DeepCopy as _;
//!
//! #[derive(Debug, PartialEq, DeepCopy)]
//! struct User {
//!     name: String,
//!     birth_date: Option<String>,
//!     address: Option<Address>,
//! }
//!
//! #[derive(Debug, PartialEq, DeepCopy)]
//! struct Address {
//!     country: String,
//!     city: Option<String>,
//!     zip_code: u32,
//! }
//!
//! let user = User {
//!     name: "Ana".to_string(),
//!     birth_date: Some("1990-06-15".to_string()),
//!     address: None,
//! };
//! assert_eq!(user.deep_copy().unwrap(), user);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod deep_copy;

use proc_macro::TokenStream;

/// Derive macro implementing `DeepCopy` field by field.
///
/// # Requirements
///
/// - Every field type must implement `DeepCopy`
/// - Unions are not supported
///
/// # Generated Code
///
/// For a struct with fields `a` and `b`, generates:
///
/// ```rust,ignore
/// impl ::immutable_queue::copy::DeepCopy for StructName {
///     fn deep_copy(&self) -> Result<Self, ::immutable_queue::copy::CopyError> {
///         Ok(Self {
///             a: ::immutable_queue::copy::DeepCopy::deep_copy(&self.a)?,
///             b: ::immutable_queue::copy::DeepCopy::deep_copy(&self.b)?,
///         })
///     }
/// }
/// ```
///
/// Enums copy whichever variant `self` holds. Tuple and unit structs and
/// variants are supported.
///
/// # Generics
///
/// Every type parameter gets a `DeepCopy` bound:
///
/// ```rust,ignore
/// #[derive(DeepCopy)]
/// struct Labeled<T> {
///     label: String,
///     value: T,
/// }
///
/// // impl<T: DeepCopy> DeepCopy for Labeled<T> { ... }
/// ```
#[proc_macro_derive(DeepCopy)]
pub fn derive_deep_copy(input: TokenStream) -> TokenStream {
    deep_copy::derive_deep_copy_impl(input)
}
