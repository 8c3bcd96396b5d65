//! Restricted candidate list and selection policies.
//!
//! # Membership
//!
//! The fuzzy policies rate each candidate with
//!
//! μ(c) = 1 − score(c) / max_score
//!
//! so that the highest-scoring POI of the instance has membership 0 and a
//! zero-score POI has membership 1. Lower is better.
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::evaluation::Candidate;

/// How one candidate is drawn from the restricted candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Uniform pick over the whole list.
    Random,
    /// Lowest membership (highest score); first one on ties.
    FuzzyBest,
    /// Uniform pick among candidates with membership ≤ `alpha`, or over the
    /// whole list when none qualifies.
    FuzzyAlphaCut {
        /// Membership threshold in `[0, 1]`.
        alpha: f64,
    },
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::FuzzyAlphaCut { alpha: 0.8 }
    }
}

/// Takes the `max_size` cheapest candidates.
///
/// `sorted` must already be ordered by ascending cost.
///
/// # Examples
///
/// ```
/// use u_orienteering::evaluation::Candidate;
/// use u_orienteering::grasp::build_rcl;
///
/// let c = |customer, cost| Candidate { customer, route: 0, predecessor: 9, cost, score: 1.0 };
/// let sorted = vec![c(3, 1.0), c(1, 2.0), c(2, 5.0)];
/// assert_eq!(build_rcl(&sorted, 2).len(), 2);
/// assert_eq!(build_rcl(&sorted, 10).len(), 3);
/// ```
pub fn build_rcl(sorted: &[Candidate], max_size: usize) -> &[Candidate] {
    &sorted[..max_size.min(sorted.len())]
}

/// Fuzzy membership of a candidate score, in `[0, 1]` for valid scores.
///
/// Every candidate gets 1 when `max_score` is not positive.
pub fn membership(score: f64, max_score: f64) -> f64 {
    if max_score > 0.0 {
        1.0 - score / max_score
    } else {
        1.0
    }
}

/// Picks a position in `rcl` according to `policy`.
///
/// Returns `None` only for an empty list.
pub fn select<R: Rng + ?Sized>(
    rcl: &[Candidate],
    policy: SelectionPolicy,
    max_score: f64,
    rng: &mut R,
) -> Option<usize> {
    if rcl.is_empty() {
        return None;
    }
    let picked = match policy {
        SelectionPolicy::Random => rng.random_range(0..rcl.len()),
        SelectionPolicy::FuzzyBest => fuzzy_best(rcl, max_score),
        SelectionPolicy::FuzzyAlphaCut { alpha } => fuzzy_alpha_cut(rcl, alpha, max_score, rng),
    };
    Some(picked)
}

fn fuzzy_best(rcl: &[Candidate], max_score: f64) -> usize {
    let mut best = 0;
    let mut best_membership = f64::INFINITY;
    for (i, c) in rcl.iter().enumerate() {
        let mu = membership(c.score, max_score);
        if mu < best_membership {
            best_membership = mu;
            best = i;
        }
    }
    best
}

fn fuzzy_alpha_cut<R: Rng + ?Sized>(
    rcl: &[Candidate],
    alpha: f64,
    max_score: f64,
    rng: &mut R,
) -> usize {
    let kept: Vec<usize> = rcl
        .iter()
        .enumerate()
        .filter(|(_, c)| membership(c.score, max_score) <= alpha)
        .map(|(i, _)| i)
        .collect();

    if kept.is_empty() {
        rng.random_range(0..rcl.len())
    } else {
        kept[rng.random_range(0..kept.len())]
    }
}
