//! Matchability of list elements.
//!
//! Two list elements correspond when they are structurally equal, or when
//! both are maps carrying the same non-null value under the configured
//! identity field. Identity matching lets an edited record be tracked as a
//! modification instead of a delete plus an insert.

use differ_types::Value;

/// A list element paired with its identity, compared by matchability.
///
/// `PartialEq` on this type is the matchability predicate used by the
/// sequence aligner. It is symmetric but not necessarily transitive.
#[derive(Clone, Copy, Debug)]
pub struct Matchable<'a> {
    value: &'a Value,
    identity: Option<&'a Value>,
}

impl<'a> Matchable<'a> {
    /// Wrap `value`, extracting its identity under `identity_key`.
    pub fn new(value: &'a Value, identity_key: Option<&str>) -> Self {
        let identity = identity_key
            .and_then(|k| value.get(k))
            .filter(|id| !id.is_null());
        Self { value, identity }
    }

    /// Wrap every element of a slice.
    pub fn wrap_all(values: &'a [Value], identity_key: Option<&str>) -> Vec<Self> {
        values.iter().map(|v| Self::new(v, identity_key)).collect()
    }

    /// The wrapped value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// The identity extracted from the value, if any.
    pub fn identity(&self) -> Option<&'a Value> {
        self.identity
    }
}

impl PartialEq for Matchable<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.identity, other.identity) {
            (Some(a), Some(b)) => a == b,
            _ => self.value == other.value,
        }
    }
}
