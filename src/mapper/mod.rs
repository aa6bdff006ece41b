//! Pure translation between [`crate::wire`] shapes and [`crate::models`].
//!
//! Read mapping is total over absent input: a missing response maps to the
//! entity's empty value and a missing collection to an empty `Vec`. Enumerated
//! fields are matched by name, ignoring case, and unknown names fail with
//! [`crate::Error::UnknownEnumValue`].
//!
//! Write mapping leaves out every field whose local value is unset.

pub mod membership;
pub mod project;
pub mod story;

use crate::error::Result;

/// Map an optional wire collection element-wise, keeping server order.
fn collect<W, E>(items: Option<Vec<W>>, map: impl FnMut(W) -> Result<E>) -> Result<Vec<E>> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(map)
        .collect()
}

/// `Some(value)` unless `value` is empty.
fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// `Some(value)` unless `value` is zero.
fn non_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}
