use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How list elements are aligned before they are diffed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignStrategy {
    /// Full longest-common-subsequence table. O(n·m) time and space, with
    /// no size guard: very long list pairs can exhaust memory.
    Lcs,
    /// Myers' O(ND) edit-script algorithm over the same matchability test.
    Myers,
    /// LCS unless the table would exceed [`DiffConfig::lcs_cell_limit`].
    #[default]
    Auto,
}

/// Configuration for a [`Differ`](crate::Differ).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Field used to correlate map elements of any list, e.g. `"id"`.
    pub identity_key: Option<String>,
    /// Per-list overrides: the key a list lives under -> identity field for
    /// its elements. Takes precedence over `identity_key`.
    pub identity_keys: BTreeMap<String, String>,
    /// Report unchanged entries as [`ChangeKind::Unchanged`] instead of
    /// omitting them.
    ///
    /// [`ChangeKind::Unchanged`]: differ_types::ChangeKind::Unchanged
    pub include_unchanged: bool,
    /// List alignment algorithm. Defaults to [`AlignStrategy::Auto`].
    pub strategy: AlignStrategy,
    /// Largest `(n+1)*(m+1)` table [`AlignStrategy::Auto`] will build before
    /// switching to Myers.
    pub lcs_cell_limit: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            identity_key: None,
            identity_keys: BTreeMap::new(),
            include_unchanged: false,
            strategy: AlignStrategy::Auto,
            lcs_cell_limit: 1_000_000,
        }
    }
}

impl DiffConfig {
    /// Use `key` as the identity field for map elements of every list.
    pub fn with_identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = Some(key.into());
        self
    }

    /// Use `key` as the identity field for the list stored under `container`.
    pub fn with_identity_key_for(mut self, container: impl Into<String>, key: impl Into<String>) -> Self {
        self.identity_keys.insert(container.into(), key.into());
        self
    }

    /// Report unchanged entries too.
    pub fn with_unchanged(mut self, include: bool) -> Self {
        self.include_unchanged = include;
        self
    }

    /// Select the list alignment algorithm.
    pub fn with_strategy(mut self, strategy: AlignStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The identity field for elements of the list stored under `container`.
    pub fn identity_key_for(&self, container: &str) -> Option<&str> {
        self.identity_keys
            .get(container)
            .or(self.identity_key.as_ref())
            .map(String::as_str)
    }
}
