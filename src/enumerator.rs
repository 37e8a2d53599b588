//! Exhaustive sequence enumeration.
//!
//! The enumerator walks every sequence of `length` stimuli from the active
//! alphabet depth first, writing each position of one shared buffer in
//! turn. At every leaf it builds a fresh candidate through the factory and
//! a fresh reference model from the expected elements, and replays the
//! buffer through the oracle.

use std::fmt;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};

use crate::config::{FailureMode, HarnessError, RunConfig};
use crate::cursor::Cursor;
use crate::oracle::{panic_message, Mismatch, Oracle};
use crate::reference::ReferenceCursor;
use crate::report::{ConformanceFailure, ConformanceReport};
use crate::stimulus::Stimulus;

/// Run every stimulus sequence described by `config`.
///
/// Configuration errors are returned as `Err` before any sequence runs;
/// conformance failures are recorded in the returned report.
pub fn run<E, C, F>(config: RunConfig<E, F>) -> Result<ConformanceReport<E>, HarnessError>
where
    E: Clone + PartialEq + fmt::Debug,
    C: Cursor<E>,
    F: FnMut() -> C,
{
    let expected_sequence_count = config.validate()?;
    tracing::info!(
        length = config.length,
        alphabet = ?config.alphabet,
        ordering = ?config.ordering,
        sequences = expected_sequence_count,
        "starting conformance run"
    );

    let mut buffer = vec![Stimulus::HasNext; config.length];
    let mut enumerator = Enumerator {
        oracle: Oracle::new(config.ordering),
        report: ConformanceReport::new(expected_sequence_count),
        config,
    };
    // Break only signals fail-fast; the failure is already in the report.
    let _ = enumerator.recurse(&mut buffer, 0);

    let report = enumerator.report;
    tracing::info!(
        sequences = report.sequence_count,
        failures = report.failure_count(),
        valid = report.is_valid(),
        "conformance run finished"
    );
    Ok(report)
}

impl<E, C, F> RunConfig<E, F>
where
    E: Clone + PartialEq + fmt::Debug,
    C: Cursor<E>,
    F: FnMut() -> C,
{
    pub fn run(self) -> Result<ConformanceReport<E>, HarnessError> {
        run(self)
    }
}

struct Enumerator<E: fmt::Debug, F> {
    config: RunConfig<E, F>,
    oracle: Oracle,
    report: ConformanceReport<E>,
}

impl<E, C, F> Enumerator<E, F>
where
    E: Clone + PartialEq + fmt::Debug,
    C: Cursor<E>,
    F: FnMut() -> C,
{
    fn recurse(&mut self, buffer: &mut [Stimulus], level: usize) -> ControlFlow<()> {
        if level == buffer.len() {
            return self.run_leaf(buffer);
        }
        for &stimulus in self.config.alphabet.stimuli() {
            buffer[level] = stimulus;
            self.recurse(buffer, level + 1)?;
        }
        ControlFlow::Continue(())
    }

    fn run_leaf(&mut self, stimuli: &[Stimulus]) -> ControlFlow<()> {
        self.report.sequence_count += 1;
        match self.run_sequence(stimuli) {
            Ok(()) => {
                tracing::trace!(stimuli = ?stimuli, "sequence conforms");
                ControlFlow::Continue(())
            }
            Err(failure) => {
                tracing::debug!(
                    stimuli = ?failure.stimuli,
                    mismatch = %failure.mismatch,
                    "sequence diverged"
                );
                self.report.record_failure(failure);
                match self.config.failure_mode {
                    FailureMode::FailFast => ControlFlow::Break(()),
                    FailureMode::CollectAll => ControlFlow::Continue(()),
                }
            }
        }
    }

    /// Replay one sequence against a fresh candidate and a fresh model.
    fn run_sequence(&mut self, stimuli: &[Stimulus]) -> Result<(), ConformanceFailure<E>> {
        let config = &mut self.config;
        let mut reference =
            ReferenceCursor::new(&config.expected, config.start_index, config.features.clone());
        let mut candidate = (config.factory)();
        config.supply.restart();

        let mut next_failed = false;
        for (i, &stimulus) in stimuli.iter().enumerate() {
            if stimulus == Stimulus::Remove && next_failed && config.stop_testing_remove_after_next_error {
                continue;
            }
            let fail = |mismatch| ConformanceFailure {
                stimuli: stimuli[..=i].to_vec(),
                mismatch,
            };

            let candidate_failed = self
                .oracle
                .execute_and_compare(stimulus, &mut reference, &mut candidate, &mut config.supply)
                .map_err(fail)?;

            if let Some(verifier) = config.verifier.as_mut() {
                let elements = reference.elements();
                verify(verifier, &elements).map_err(|message| {
                    fail(Mismatch::VerificationFailed { elements, message })
                })?;
            }

            if candidate_failed {
                match stimulus {
                    Stimulus::Next => next_failed = true,
                    Stimulus::Add if config.stop_sequence_after_add_error => break,
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

/// Run the hook, turning both `Err` and panics (`assert!` inside the hook)
/// into a message.
fn verify<E>(
    verifier: &mut dyn FnMut(&[E]) -> anyhow::Result<()>,
    elements: &[E],
) -> Result<(), String> {
    match panic::catch_unwind(AssertUnwindSafe(|| verifier(elements))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(format!("{err:#}")),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CapabilitySet, ElementSupply, Feature};
    use crate::cursor::{CursorError, CursorResult};

    /// Correct forward cursor over a vector, optionally supporting remove.
    struct Forward {
        items: Vec<i32>,
        pos: usize,
        last: Option<usize>,
        removable: bool,
    }

    impl Forward {
        fn new(items: &[i32], removable: bool) -> Self {
            Self {
                items: items.to_vec(),
                pos: 0,
                last: None,
                removable,
            }
        }
    }

    impl Cursor<i32> for Forward {
        fn has_next(&mut self) -> CursorResult<bool> {
            Ok(self.pos < self.items.len())
        }

        fn next(&mut self) -> CursorResult<i32> {
            let item = *self.items.get(self.pos).ok_or(CursorError::NoSuchElement)?;
            self.last = Some(self.pos);
            self.pos += 1;
            Ok(item)
        }

        fn remove(&mut self) -> CursorResult<()> {
            if !self.removable {
                return Err(CursorError::Unsupported);
            }
            let idx = self.last.take().ok_or(CursorError::IllegalState)?;
            self.items.remove(idx);
            self.pos -= 1;
            Ok(())
        }
    }

    fn supply() -> ElementSupply<i32> {
        ElementSupply::new([42]).unwrap()
    }

    #[test]
    fn test_every_sequence_runs_once() {
        let mut created = 0;
        let report = RunConfig::forward(3, supply(), [1, 2], || {
            created += 1;
            Forward::new(&[1, 2], false)
        })
        .run()
        .unwrap();

        assert!(report.is_valid());
        assert_eq!(report.sequence_count, 27);
        assert_eq!(report.expected_sequence_count, 27);
        assert_eq!(created, 27);
    }

    #[test]
    fn test_zero_length_runs_one_empty_sequence() {
        let report = RunConfig::forward(0, supply(), [1], || Forward::new(&[1], false))
            .run()
            .unwrap();

        assert!(report.is_valid());
        assert_eq!(report.sequence_count, 1);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        // claims to support remove but the run expects none
        let report = RunConfig::forward(2, supply(), [1, 2], || Forward::new(&[1, 2], true))
            .run()
            .unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.failure_count(), 1);
        let failure = report.first_failure().unwrap();
        assert_eq!(failure.stimuli, vec![Stimulus::Next, Stimulus::Remove]);
        assert!(matches!(failure.mismatch, Mismatch::MissingError { .. }));
        // has_next x 3, then next/has_next, next/next, next/remove
        assert_eq!(report.sequence_count, 6);
    }

    #[test]
    fn test_failure_prefix_stops_at_failing_step() {
        let report = RunConfig::forward(3, supply(), [1], || Forward::new(&[2], false))
            .run()
            .unwrap();

        let failure = report.first_failure().unwrap();
        assert_eq!(failure.stimuli, vec![Stimulus::HasNext, Stimulus::HasNext, Stimulus::Next]);
    }

    #[test]
    fn test_start_index_out_of_range_is_config_error() {
        let result = RunConfig::forward(1, supply(), [1], || Forward::new(&[1], false))
            .starting_at(2)
            .run();

        assert_eq!(
            result.unwrap_err(),
            HarnessError::StartIndexOutOfRange {
                start_index: 2,
                len: 1
            }
        );
    }

    #[test]
    fn test_verifier_sees_model_elements() {
        let report = RunConfig::forward(3, supply(), [1, 2], || Forward::new(&[1, 2], true))
            .with_features(CapabilitySet::from_iter([Feature::SupportsRemove]))
            .with_verifier(|elements| {
                anyhow::ensure!(elements.contains(&2), "2 is gone");
                Ok(())
            })
            .run()
            .unwrap();

        let failure = report.first_failure().unwrap();
        assert_eq!(failure.stimuli, vec![Stimulus::Next, Stimulus::Next, Stimulus::Remove]);
        assert_eq!(
            failure.mismatch,
            Mismatch::VerificationFailed {
                elements: vec![1],
                message: "2 is gone".to_owned()
            }
        );
    }

    #[test]
    fn test_panicking_verifier_is_a_failure() {
        let report = RunConfig::forward(1, supply(), [1], || Forward::new(&[1], false))
            .with_verifier(|elements| {
                assert_eq!(elements.len(), 2, "wrong length");
                Ok(())
            })
            .run()
            .unwrap();

        let failure = report.first_failure().unwrap();
        assert_eq!(failure.stimuli, vec![Stimulus::HasNext]);
        assert!(matches!(
            &failure.mismatch,
            Mismatch::VerificationFailed { message, .. } if message.contains("wrong length")
        ));
    }
}
