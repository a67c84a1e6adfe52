// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Colex ordered k-subsets of deck positions.
//!
//! Subsets are numbered with the combinatorial number system, the subset
//! `c[0] < c[1] < .. < c[k-1]` has rank `C(c[0], 1) + C(c[1], 2) + ..`, so that
//! a range of ranks can be visited starting from any rank.

/// Largest deck size.
pub(crate) const MAX_N: usize = 53;

/// Largest subset size.
pub(crate) const MAX_K: usize = 7;

type Binomials = [[u32; MAX_K + 1]; MAX_N + 1];

/// Pascal triangle rows 0..=53 truncated at column 7.
const fn pascal() -> Binomials {
    let mut rows = [[0u32; MAX_K + 1]; MAX_N + 1];

    let mut n = 0;
    while n <= MAX_N {
        rows[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n {
            rows[n][k] = rows[n - 1][k - 1] + rows[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    rows
}

const BINOMIALS: Binomials = pascal();

/// Binomial coefficient C(n, k).
#[inline]
pub(crate) fn nck(n: usize, k: usize) -> usize {
    assert!(n <= MAX_N, "n={n} larger than {MAX_N}");
    assert!(k <= MAX_K, "k={k} larger than {MAX_K}");
    BINOMIALS[n][k] as usize
}

/// Returns the positions of the k-subset with the given rank.
pub(crate) fn unrank(mut rank: usize, k: usize) -> [usize; MAX_K] {
    assert!(k <= MAX_K);

    let mut positions = [0; MAX_K];
    for i in (1..=k).rev() {
        // Largest c with C(c, i) <= rank.
        let mut c = i - 1;
        while nck(c + 1, i) <= rank {
            c += 1;
        }

        positions[i - 1] = c;
        rank -= nck(c, i);
    }

    positions
}

/// A cursor over k-subsets of n positions in colex order.
struct KSubsets {
    /// Positions with a sentinel `n` after the last one.
    c: [usize; MAX_K + 1],
    k: usize,
}

impl KSubsets {
    fn starting_at(n: usize, k: usize, rank: usize) -> Self {
        let mut c = [0; MAX_K + 1];
        c[..k].copy_from_slice(&unrank(rank, k)[..k]);
        c[k] = n;
        Self { c, k }
    }

    fn positions(&self) -> &[usize] {
        &self.c[..self.k]
    }

    /// Moves to the next subset, returns false if this was the last one.
    fn advance(&mut self) -> bool {
        let mut j = 0;
        while j < self.k && self.c[j] + 1 == self.c[j + 1] {
            self.c[j] = j;
            j += 1;
        }

        if j == self.k {
            return false;
        }

        self.c[j] += 1;
        true
    }
}

/// Calls `f` with the positions of `count` k-subsets of n positions starting
/// from the subset with rank `start`.
pub(crate) fn for_each_ksubset<F>(n: usize, k: usize, start: usize, count: usize, mut f: F)
where
    F: FnMut(&[usize]),
{
    if count == 0 || k == 0 || k > n {
        return;
    }

    let mut subsets = KSubsets::starting_at(n, k, start);
    for _ in 0..count {
        f(subsets.positions());
        if !subsets.advance() {
            break;
        }
    }
}
