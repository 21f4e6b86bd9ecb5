//! Sequence alignment: which list elements correspond across two versions.
//!
//! The aligner finds a monotonic, order-preserving partial matching between
//! `before` and `after` indices with as many matched pairs as possible.
//! Unmatched `before` indices are deletions, unmatched `after` indices are
//! insertions. Matching uses `PartialEq` on the element type, so callers
//! choose the matchability predicate through the type they align
//! (see [`Matchable`](crate::Matchable)).
//!
//! Two algorithms are available. [`align_lcs`] fills the classic
//! `(n+1) × (m+1)` longest-common-subsequence table and backtracks from the
//! bottom-right corner. [`align_myers`] runs Myers' O(ND) algorithm (via the
//! `similar` crate) for long lists where the full table is too expensive.
//! Both produce a maximum matching; they may pick different pairs when
//! several maximum matchings exist.

use std::convert::Infallible;

use similar::algorithms::{myers, DiffHook};
use tracing::debug;

use crate::config::AlignStrategy;

/// The result of aligning two sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    /// Matched `(before, after)` index pairs, increasing in both indices.
    pub matched: Vec<(usize, usize)>,
    /// `before` indices with no counterpart, ascending.
    pub deleted: Vec<usize>,
    /// `after` indices with no counterpart, ascending.
    pub inserted: Vec<usize>,
}

impl Alignment {
    /// Build an alignment from matched pairs, deriving the unmatched indices.
    pub fn from_matches(mut matched: Vec<(usize, usize)>, before_len: usize, after_len: usize) -> Self {
        matched.sort_unstable();

        let mut before_used = vec![false; before_len];
        let mut after_used = vec![false; after_len];
        for &(i, j) in &matched {
            before_used[i] = true;
            after_used[j] = true;
        }

        let unused = |used: Vec<bool>| -> Vec<usize> {
            used.into_iter()
                .enumerate()
                .filter_map(|(idx, u)| (!u).then_some(idx))
                .collect()
        };

        Self {
            matched,
            deleted: unused(before_used),
            inserted: unused(after_used),
        }
    }

    /// Returns `true` if nothing was inserted or deleted.
    pub fn is_full_match(&self) -> bool {
        self.deleted.is_empty() && self.inserted.is_empty()
    }
}

/// Align two sequences with the configured strategy.
///
/// `cell_limit` only matters for [`AlignStrategy::Auto`].
pub fn align<T: PartialEq>(
    before: &[T],
    after: &[T],
    strategy: AlignStrategy,
    cell_limit: usize,
) -> Alignment {
    let cells = (before.len() + 1).saturating_mul(after.len() + 1);
    let use_myers = match strategy {
        AlignStrategy::Lcs => false,
        AlignStrategy::Myers => true,
        AlignStrategy::Auto => cells > cell_limit,
    };

    let alignment = if use_myers {
        align_myers(before, after)
    } else {
        align_lcs(before, after)
    };

    debug!(
        before = before.len(),
        after = after.len(),
        myers = use_myers,
        matched = alignment.matched.len(),
        "aligned sequences"
    );
    alignment
}

/// Longest-common-subsequence alignment.
///
/// `table[i][j]` holds the length of the longest matching subsequence of
/// `before[..i]` and `after[..j]`. Backtracking starts at `table[n][m]`;
/// on ties the `after` side steps first, so an ambiguous run is always
/// resolved the same way.
pub fn align_lcs<T: PartialEq>(before: &[T], after: &[T]) -> Alignment {
    let (n, m) = (before.len(), after.len());
    let width = m + 1;
    let at = |i: usize, j: usize| i * width + j;

    let mut table = vec![0usize; (n + 1) * width];
    for i in 1..=n {
        for j in 1..=m {
            table[at(i, j)] = if before[i - 1] == after[j - 1] {
                table[at(i - 1, j - 1)] + 1
            } else {
                table[at(i - 1, j)].max(table[at(i, j - 1)])
            };
        }
    }

    let mut matched = Vec::with_capacity(table[at(n, m)]);
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if before[i - 1] == after[j - 1] {
            matched.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[at(i, j - 1)] >= table[at(i - 1, j)] {
            j -= 1;
        } else {
            i -= 1;
        }
    }
    matched.reverse();

    Alignment::from_matches(matched, n, m)
}

/// Myers' O(ND) alignment over the same matchability test.
pub fn align_myers<T: PartialEq>(before: &[T], after: &[T]) -> Alignment {
    let mut hook = MatchCollector::default();
    if let Err(never) = myers::diff(&mut hook, before, 0..before.len(), after, 0..after.len()) {
        match never {}
    }
    Alignment::from_matches(hook.matched, before.len(), after.len())
}

/// Records the equal runs reported by `similar` as index pairs.
#[derive(Default)]
struct MatchCollector {
    matched: Vec<(usize, usize)>,
}

impl DiffHook for MatchCollector {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        self.matched
            .extend((0..len).map(|k| (old_index + k, new_index + k)));
        Ok(())
    }
}
