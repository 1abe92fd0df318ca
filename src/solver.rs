// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Searching for the register pair that makes a program produce a given output
//!
//! The search is exhaustive: every `(noun, verb)` pair in [REGISTER_RANGE] × [REGISTER_RANGE] is
//! tried on a fresh copy of the template, in noun-major order, and the first pair in that order
//! whose run leaves the target at address 0 is the answer. The parallel search checks candidates
//! out of order, but still returns the pair the sequential search would have.

use std::fmt::{self, Display};
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use super::{ExecConfig, InterpreterError, run_with_registers};

/// The values each register takes during a search
pub const REGISTER_RANGE: RangeInclusive<i64> = 0..=99;

const REGISTER_VALUES: u32 = (*REGISTER_RANGE.end() - *REGISTER_RANGE.start() + 1) as u32;
const SEARCH_SPACE: u32 = REGISTER_VALUES * REGISTER_VALUES;

/// The two inputs of a program, written into addresses 1 and 2 before it runs
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct RegisterPair {
    /// The value written into address 1
    pub noun: i64,
    /// The value written into address 2
    pub verb: i64,
}

impl RegisterPair {
    /// Create a new pair
    pub const fn new(noun: i64, verb: i64) -> Self {
        Self { noun, verb }
    }

    /// Bundle the pair into a single integer, `100 * noun + verb`
    pub const fn encode(self) -> i64 {
        100 * self.noun + self.verb
    }

    /// The pair at position `index` of the noun-major scan
    fn from_scan_index(index: u32) -> Self {
        Self {
            noun: REGISTER_RANGE.start() + i64::from(index / REGISTER_VALUES),
            verb: REGISTER_RANGE.start() + i64::from(index % REGISTER_VALUES),
        }
    }
}

impl Display for RegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "noun {}, verb {}", self.noun, self.verb)
    }
}

/// The result of [Solver::solve_with_stats]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SearchReport {
    /// The first matching pair in scan order, if any pair matched
    pub found: Option<RegisterPair>,
    /// How many candidate pairs were actually run. A parallel search may run some candidates
    /// past the answer before it stops.
    pub candidates_run: u64,
    /// How many of those runs stopped with an [InterpreterError] instead of halting
    pub faulted: u64,
}

/// A search over register pairs for one template program
///
/// # Example
///
/// ```
/// use gravity_assist::prelude::*;
/// // mem[0] = mem[noun] + mem[verb]
/// let template = [1, 0, 0, 0, 99, 17, 25];
/// let solver = Solver::new(&template).parallel(false);
/// assert_eq!(solver.solve(42), Ok(Some(RegisterPair::new(5, 6))));
/// assert_eq!(solver.solve(-1), Ok(None));
/// ```
#[derive(Debug, Clone)]
pub struct Solver<'a> {
    template: &'a [i64],
    config: ExecConfig,
    parallel: bool,
}

impl<'a> Solver<'a> {
    /// Create a parallel solver for `template` using the default [ExecConfig]
    pub fn new(template: &'a [i64]) -> Self {
        Self {
            template,
            config: ExecConfig::default(),
            parallel: true,
        }
    }

    /// Use `config` for every candidate run
    #[must_use]
    pub fn config(mut self, config: ExecConfig) -> Self {
        self.config = config;
        self
    }

    /// Choose between running candidates on the rayon thread pool, or one after another
    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Find the first pair in noun-major order that makes the template produce `target`.
    ///
    /// Returns `Ok(None)` if no pair does. Fails only if the template can't be run at all; a
    /// candidate whose run faults simply doesn't match.
    pub fn solve(&self, target: i64) -> Result<Option<RegisterPair>, InterpreterError> {
        self.solve_with_stats(target).map(|report| report.found)
    }

    /// Like [Solver::solve], but also reports how much work the search did
    pub fn solve_with_stats(&self, target: i64) -> Result<SearchReport, InterpreterError> {
        self.check_template()?;

        let candidates_run = AtomicU64::new(0);
        let faulted = AtomicU64::new(0);
        let matches = |index: u32| {
            let pair = RegisterPair::from_scan_index(index);
            candidates_run.fetch_add(1, Ordering::Relaxed);
            match run_with_registers(self.template, pair, &self.config) {
                Ok(output) => output == target,
                Err(e) => {
                    faulted.fetch_add(1, Ordering::Relaxed);
                    tracing::debug!(%pair, "candidate faulted: {e}");
                    false
                }
            }
        };

        let found = if self.parallel {
            (0..SEARCH_SPACE).into_par_iter().find_first(|&i| matches(i))
        } else {
            (0..SEARCH_SPACE).find(|&i| matches(i))
        }
        .map(RegisterPair::from_scan_index);

        let report = SearchReport {
            found,
            candidates_run: candidates_run.into_inner(),
            faulted: faulted.into_inner(),
        };
        match report.found {
            Some(pair) => tracing::info!(
                target_value = target,
                candidates = report.candidates_run,
                faulted = report.faulted,
                "found {pair}"
            ),
            None => tracing::info!(
                target_value = target,
                candidates = report.candidates_run,
                faulted = report.faulted,
                "no register pair produces the target"
            ),
        }
        Ok(report)
    }

    /// Make sure the template has somewhere to put both registers
    fn check_template(&self) -> Result<(), InterpreterError> {
        match self.template.len() {
            0 => Err(InterpreterError::InvalidProgram),
            len @ (1 | 2) => Err(InterpreterError::AddressingFault {
                address: len as i64,
                len,
            }),
            _ => Ok(()),
        }
    }
}

/// Find the first pair, in noun-major order, that makes `template` produce `target`, using a
/// parallel [Solver] with the default [ExecConfig].
///
/// `template` itself is never modified.
pub fn solve_for_target(
    template: &[i64],
    target: i64,
) -> Result<Option<RegisterPair>, InterpreterError> {
    Solver::new(template).solve(target)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn parallel_and_sequential_agree(
            data in prop::collection::vec(0i64..16, 5..40),
            target in 0i64..64,
        ) {
            // an ADD or MUL over random data, followed by a HALT
            let mut template = data;
            template[0] = if target % 2 == 0 { 1 } else { 2 };
            template[3] = 0;
            template[4] = 99;
            let sequential = Solver::new(&template).parallel(false).solve(target);
            let parallel = Solver::new(&template).parallel(true).solve(target);
            prop_assert_eq!(sequential, parallel);
        }

        #[test]
        fn found_pairs_really_produce_the_target(
            data in prop::collection::vec(0i64..16, 5..40),
            target in 0i64..64,
        ) {
            let mut template = data;
            template[0] = 1;
            template[3] = 0;
            template[4] = 99;
            if let Some(pair) = solve_for_target(&template, target).unwrap() {
                prop_assert_eq!(
                    run_with_registers(&template, pair, &ExecConfig::default()),
                    Ok(target)
                );
            }
        }
    }
}
