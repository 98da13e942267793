//! Candidate literal pairings for piece-unifier search.

use crate::Unifier;
use combinatorics::{selected, Combinations};
use itertools::Itertools;
use model::Literal;
use tracing::trace;

/// A map from a subset of the right-hand literals into the left-hand
/// literals: `right[i]` is sent to `left[i]`. Several right literals may
/// share one left literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Pairing {
    pub(crate) left: Vec<usize>,
    pub(crate) right: Vec<usize>,
}

impl Pairing {
    /// Whether literal `index` of the right-hand list takes part.
    pub(crate) fn covers_right(&self, index: usize) -> bool {
        self.right.contains(&index)
    }
}

/// Every map from a non-empty subset of `0..right_len` into `0..left_len`,
/// smallest subsets first. Within one size the subsets follow enumerator
/// order and the images follow the lexicographic order of `m`-tuples.
pub(crate) fn pairings(left_len: usize, right_len: usize) -> impl Iterator<Item = Pairing> {
    (1..=right_len).flat_map(move |m| {
        subsets(right_len, m).flat_map(move |right| {
            itertools::repeat_n(0..left_len, m)
                .multi_cartesian_product()
                .map(move |left| Pairing {
                    left,
                    right: right.clone(),
                })
        })
    })
}

fn subsets(n: usize, k: usize) -> impl Iterator<Item = Vec<usize>> {
    // `k <= n` at every call site, so construction never fails.
    Combinations::new(n, k)
        .into_iter()
        .flatten()
        .map(|mask| selected(&mask))
}

/// Most general unifier of the paired literals, or `None` on a signature
/// mismatch or a clash.
pub(crate) fn unify_pairing(
    left: &[Literal],
    right: &[Literal],
    pairing: &Pairing,
) -> Option<Unifier> {
    let mut unifier = Unifier::new();
    for (&l, &r) in pairing.left.iter().zip(&pairing.right) {
        if !unifier.unify_literals(&left[l], &right[r]) {
            trace!("no unifier for {} ~ {}", left[l], right[r]);
            return None;
        }
    }
    trace!("unifier {:?} ~ {:?}: {}", pairing.left, pairing.right, unifier);
    Some(unifier)
}
