//! Foundation types for differ.
//!
//! Every input handed to the diff engine is first normalized into a
//! [`Value`], and every comparison produces a [`ChangeMap`]. Both are plain
//! owned data: no references back into the caller's inputs, no interior
//! mutability.
//!
//! # Key Types
//!
//! - [`Value`] / [`ScalarValue`] -- Normalized input (null, scalar, list, map)
//! - [`ValueKind`] -- The four top-level shapes a `Value` can take
//! - [`ChangeField`] / [`ChangeKind`] -- One node of the change tree
//! - [`ChangeMap`] -- All changes at one nesting level, keyed by map key or list index

pub mod change;
pub mod value;

pub use change::{ChangeField, ChangeKind, ChangeMap};
pub use value::{ScalarValue, Value, ValueKind};
