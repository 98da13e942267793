//! `k`-subsets of an `n`-element index set.

use crate::CombinationError;
use std::iter::FusedIterator;

/// Number of `k`-element subsets of an `n`-element set (0 when `k > n`).
///
/// Saturates at `usize::MAX`; the analyses only ever ask for small values.
#[must_use]
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // Exact at every step: acc is C(n, i) before the update.
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

/// Indices of the set bits of `mask`, ascending.
#[must_use]
pub fn selected(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &bit)| bit.then_some(i))
        .collect()
}

#[derive(Debug, Clone)]
enum State {
    Fresh,
    // Ascending positions of the set bits of the last yielded mask.
    Running(Vec<usize>),
    Exhausted,
}

/// Enumerates every `k`-subset of `{0, ..., n-1}` exactly once.
///
/// The first mask has the lowest `k` bits set. Each following mask moves the
/// highest bit that still has room one position up and packs every bit above
/// it directly behind it, so the sequence is deterministic: for `n = 4, k = 2`
/// it is `{0,1} {0,2} {0,3} {1,2} {1,3} {2,3}`.
///
/// An enumerator is a single-pass cursor; create a fresh one per request
/// instead of sharing it. Every item is an owned `Vec<bool>` of length `n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    state: State,
    remaining: usize,
}

impl Combinations {
    /// Fails if `k > n`; no partial sequence is ever produced in that case.
    pub fn new(n: usize, k: usize) -> Result<Self, CombinationError> {
        if k > n {
            return Err(CombinationError::TooManyElements { n, k });
        }
        Ok(Self {
            n,
            k,
            state: State::Fresh,
            remaining: binomial(n, k),
        })
    }

    #[must_use]
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[must_use]
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    fn mask(&self, positions: &[usize]) -> Vec<bool> {
        let mut mask = vec![false; self.n];
        for &p in positions {
            mask[p] = true;
        }
        mask
    }

    /// Advance `positions` to the next subset; `false` once the last one
    /// (`{n-k, ..., n-1}`) has been passed.
    fn advance(&self, positions: &mut [usize]) -> bool {
        let (n, k) = (self.n, self.k);
        let Some(i) = (0..k).rev().find(|&i| positions[i] < n - k + i) else {
            return false;
        };
        positions[i] += 1;
        for j in i + 1..k {
            positions[j] = positions[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = std::mem::replace(&mut self.state, State::Exhausted);
        let positions = match state {
            State::Exhausted => return None,
            State::Fresh => (0..self.k).collect::<Vec<_>>(),
            State::Running(mut positions) => {
                if !self.advance(&mut positions) {
                    return None;
                }
                positions
            }
        };

        let mask = self.mask(&positions);
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            self.state = State::Running(positions);
        }
        Some(mask)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations {}

impl FusedIterator for Combinations {}
