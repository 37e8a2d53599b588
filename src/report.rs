//! Results of a conformance run.

use std::fmt;

use ahash::{HashMap, HashMapExt};
use thiserror::Error;

use crate::oracle::Mismatch;
use crate::stimulus::Stimulus;

/// Validity status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

/// One diverging sequence: the stimuli executed up to and including the
/// failing one, and what went wrong at that last step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed with stimuli {}: {mismatch}", StimuliList(.stimuli))]
pub struct ConformanceFailure<E: fmt::Debug> {
    pub stimuli: Vec<Stimulus>,
    pub mismatch: Mismatch<E>,
}

impl<E: fmt::Debug> ConformanceFailure<E> {
    /// The stimulus whose outcome diverged.
    #[must_use]
    pub fn failing_stimulus(&self) -> Option<Stimulus> {
        self.stimuli.last().copied()
    }
}

struct StimuliList<'a>(&'a [Stimulus]);

impl fmt::Display for StimuliList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, stimulus) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stimulus}")?;
        }
        f.write_str("]")
    }
}

/// Result of a conformance run.
#[derive(Debug, Clone)]
pub struct ConformanceReport<E: fmt::Debug> {
    pub valid: Validity,
    /// Sequences executed, including the failing one in fail-fast mode.
    pub sequence_count: usize,
    /// `|alphabet|^length`.
    pub expected_sequence_count: usize,
    /// Empty when valid; at most one entry in fail-fast mode.
    pub failures: Vec<ConformanceFailure<E>>,
    /// How often each stimulus was the failing step of a sequence.
    pub failing_stimuli: HashMap<Stimulus, usize>,
}

impl<E: fmt::Debug> ConformanceReport<E> {
    pub(crate) fn new(expected_sequence_count: usize) -> Self {
        Self {
            valid: Validity::Valid,
            sequence_count: 0,
            expected_sequence_count,
            failures: Vec::new(),
            failing_stimuli: HashMap::new(),
        }
    }

    pub(crate) fn record_failure(&mut self, failure: ConformanceFailure<E>) {
        if let Some(stimulus) = failure.failing_stimulus() {
            *self.failing_stimuli.entry(stimulus).or_insert(0) += 1;
        }
        self.valid = Validity::Invalid;
        self.failures.push(failure);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid == Validity::Valid
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn first_failure(&self) -> Option<&ConformanceFailure<E>> {
        self.failures.first()
    }

    /// `Err` with the first failure, if any.
    pub fn into_result(self) -> Result<(), ConformanceFailure<E>> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    /// Panic with the first failure. Meant to be called from `#[test]`
    /// functions.
    #[track_caller]
    pub fn assert_conforms(&self) {
        if let Some(failure) = self.first_failure() {
            panic!(
                "cursor does not conform ({} of {} sequences failed): {failure}",
                self.failures.len(),
                self.sequence_count
            );
        }
    }
}
