//! Structural diff engine.
//!
//! Compares two normalized [`Value`]s and produces a [`ChangeMap`] that names
//! exactly which keys and list positions were inserted, deleted or changed,
//! at every nesting level. Unchanged keys never appear in the result (unless
//! explicitly requested through [`DiffConfig::include_unchanged`]).
//!
//! The engine is total over the value model: every pair of values has a
//! defined outcome, so nothing here returns an error. It is synchronous,
//! holds no shared state, and never mutates its inputs, so a single
//! [`Differ`] can be used from many threads at once.
//!
//! # Key Types
//!
//! - [`Differ`] -- Orchestrator: dispatches on value kind and assembles the tree
//! - [`DiffConfig`] / [`AlignStrategy`] -- Identity keys, unchanged reporting, list alignment
//! - [`Alignment`] -- Matched / deleted / inserted indices for two sequences
//!
//! [`Value`]: differ_types::Value
//! [`ChangeMap`]: differ_types::ChangeMap

pub mod config;
pub mod differ;
pub mod identity;
pub mod list;
pub mod map;
pub mod scalar;
pub mod sequence;

pub use config::{AlignStrategy, DiffConfig};
pub use differ::{diff, Differ, ROOT_KEY};
pub use identity::Matchable;
pub use list::DISPLACED_PREFIX;
pub use scalar::compare_scalars;
pub use sequence::{align, align_lcs, align_myers, Alignment};
