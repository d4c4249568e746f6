//! Strategy-selectable integer search engine.
//!
//! Each nested parameter of the dual-ball projection (`t`, `s`, `k`) is
//! located by probing candidate integers against an objective that reports
//! which direction the solution lies in. The engine runs either as a
//! bisection over the candidate interval or as a stepwise walk from the
//! configured start value; both consume the same objective, so the nested
//! searches compose by having the outer objective invoke the inner search
//! to evaluate a probe.

use crate::types::SearchStrategy;
use thiserror::Error;

/// Failure of one nested search.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The search exhausted its candidate interval without an accepted probe.
    #[error("{param} search exhausted [{lo}, {hi}] without converging")]
    Exhausted {
        /// Name of the parameter being searched.
        param: &'static str,
        /// Lower bound of the candidate interval.
        lo: usize,
        /// Upper bound of the candidate interval.
        hi: usize,
    },
}

/// Outcome of probing one candidate integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate is too small; the solution lies above it.
    Low,
    /// The candidate is too large; the solution lies below it.
    High,
    /// The candidate satisfies all acceptance conditions.
    Accept,
}

impl SearchStrategy {
    /// Locate the accepted integer in `[lo, hi]`, probing `start` first.
    ///
    /// The objective must be directionally consistent: `Low` below the
    /// accepted candidate, `High` above it. `Binary` bisects the remaining
    /// interval after each probe; `Linear` steps one candidate in the
    /// indicated direction and fails as soon as the verdicts reverse
    /// (no integer can then be accepted).
    ///
    /// # Errors
    ///
    /// [`SearchError::Exhausted`] when the interval is empty, a probe at a
    /// bound points outside it, or a linear walk reverses direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use lrinorm_core::{SearchStrategy, Verdict};
    ///
    /// let probe = |x: usize| match x.cmp(&7) {
    ///     std::cmp::Ordering::Less => Verdict::Low,
    ///     std::cmp::Ordering::Greater => Verdict::High,
    ///     std::cmp::Ordering::Equal => Verdict::Accept,
    /// };
    /// assert_eq!(SearchStrategy::Binary.locate("t", 0, 20, 0, probe), Ok(7));
    /// assert_eq!(SearchStrategy::Linear.locate("t", 0, 20, 4, probe), Ok(7));
    /// ```
    pub fn locate<F>(
        self,
        param: &'static str,
        lo: usize,
        hi: usize,
        start: usize,
        mut objective: F,
    ) -> Result<usize, SearchError>
    where
        F: FnMut(usize) -> Verdict,
    {
        let exhausted = SearchError::Exhausted { param, lo, hi };
        if lo > hi {
            return Err(exhausted);
        }

        let (mut cur_lo, mut cur_hi) = (lo, hi);
        let mut probe = start.clamp(cur_lo, cur_hi);
        let mut last = None;

        loop {
            match objective(probe) {
                Verdict::Accept => return Ok(probe),
                Verdict::Low => {
                    if probe >= cur_hi || last == Some(Verdict::High) {
                        return Err(exhausted);
                    }
                    match self {
                        SearchStrategy::Binary => {
                            cur_lo = probe + 1;
                            probe = cur_lo + (cur_hi - cur_lo) / 2;
                        }
                        SearchStrategy::Linear => {
                            last = Some(Verdict::Low);
                            probe += 1;
                        }
                    }
                }
                Verdict::High => {
                    if probe <= cur_lo || last == Some(Verdict::Low) {
                        return Err(exhausted);
                    }
                    match self {
                        SearchStrategy::Binary => {
                            cur_hi = probe - 1;
                            probe = cur_lo + (cur_hi - cur_lo) / 2;
                        }
                        SearchStrategy::Linear => {
                            last = Some(Verdict::High);
                            probe -= 1;
                        }
                    }
                }
            }
        }
    }
}
