//! Run configuration.
//!
//! A [`RunConfig`] is built once per cursor implementation under test and
//! consumed by [`RunConfig::run`]. All knobs are set through chained
//! builder methods; nothing is read from files or the environment.

use std::fmt;

use ahash::{HashSet, HashSetExt};
use thiserror::Error;

use crate::stimulus::Alphabet;

/// Configuration errors. These are contract violations by the caller and
/// are reported before any sequence runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error("element supply must contain at least one element")]
    EmptyElementSupply,

    #[error("start index {start_index} is past the end of {len} expected elements")]
    StartIndexOutOfRange { start_index: usize, len: usize },

    #[error("{alphabet_len}^{length} sequences do not fit in usize")]
    SequenceSpaceOverflow { alphabet_len: usize, length: usize },
}

/// An optional cursor behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    SupportsRemove,
    SupportsAdd,
    SupportsSet,
}

impl Feature {
    pub const ALL: [Feature; 3] = [
        Feature::SupportsRemove,
        Feature::SupportsAdd,
        Feature::SupportsSet,
    ];
}

/// The optional behaviours a cursor claims to support.
///
/// Invoking an unsupported operation is expected to report
/// [`CursorError::Unsupported`](crate::CursorError::Unsupported).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    features: HashSet<Feature>,
}

impl CapabilitySet {
    /// Supports `remove`, `add` and `set`.
    #[must_use]
    pub fn modifiable() -> Self {
        Self::from_iter(Feature::ALL)
    }

    /// Supports none of the mutating operations.
    #[must_use]
    pub fn unmodifiable() -> Self {
        Self {
            features: HashSet::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    #[must_use]
    pub fn with(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }
}

impl FromIterator<Feature> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

/// Whether the candidate must return elements in the expected order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderingMode {
    /// `next`/`previous` must match the expected elements position for
    /// position.
    #[default]
    Known,
    /// Iteration order is unspecified (hash-based collections). Each
    /// element the candidate returns from `next` is promoted in the model
    /// before the model is stepped.
    Unknown,
}

/// What to do once a sequence diverges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Stop the whole run at the first failing sequence.
    #[default]
    FailFast,
    /// Abandon the failing sequence and keep enumerating.
    CollectAll,
}

/// Values handed to `add` and `set`, cycled forever.
#[derive(Debug, Clone)]
pub struct ElementSupply<E> {
    pool: Vec<E>,
    position: usize,
}

impl<E: Clone> ElementSupply<E> {
    pub fn new(pool: impl IntoIterator<Item = E>) -> Result<Self, HarnessError> {
        let pool: Vec<E> = pool.into_iter().collect();
        if pool.is_empty() {
            return Err(HarnessError::EmptyElementSupply);
        }
        Ok(Self { pool, position: 0 })
    }

    pub fn next_element(&mut self) -> E {
        let element = self.pool[self.position].clone();
        self.position = (self.position + 1) % self.pool.len();
        element
    }

    pub fn restart(&mut self) {
        self.position = 0;
    }

    #[must_use]
    pub fn pool(&self) -> &[E] {
        &self.pool
    }
}

impl<E: Clone> Iterator for ElementSupply<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        Some(self.next_element())
    }
}

/// Hook invoked with the model's logical sequence after every step.
pub type Verifier<E> = Box<dyn FnMut(&[E]) -> anyhow::Result<()>>;

/// Everything one conformance run needs.
pub struct RunConfig<E, F> {
    pub(crate) length: usize,
    pub(crate) alphabet: Alphabet,
    pub(crate) supply: ElementSupply<E>,
    pub(crate) expected: Vec<E>,
    pub(crate) factory: F,
    pub(crate) features: CapabilitySet,
    pub(crate) ordering: OrderingMode,
    pub(crate) start_index: usize,
    pub(crate) verifier: Option<Verifier<E>>,
    pub(crate) failure_mode: FailureMode,
    pub(crate) stop_testing_remove_after_next_error: bool,
    pub(crate) stop_sequence_after_add_error: bool,
}

impl<E, F> RunConfig<E, F> {
    fn new(
        alphabet: Alphabet,
        length: usize,
        supply: ElementSupply<E>,
        expected: impl IntoIterator<Item = E>,
        factory: F,
    ) -> Self {
        Self {
            length,
            alphabet,
            supply,
            expected: expected.into_iter().collect(),
            factory,
            features: CapabilitySet::default(),
            ordering: OrderingMode::default(),
            start_index: 0,
            verifier: None,
            failure_mode: FailureMode::default(),
            stop_testing_remove_after_next_error: false,
            stop_sequence_after_add_error: false,
        }
    }

    /// Test a forward-only cursor with `has_next`, `next` and `remove`.
    pub fn forward(
        length: usize,
        supply: ElementSupply<E>,
        expected: impl IntoIterator<Item = E>,
        factory: F,
    ) -> Self {
        Self::new(Alphabet::Forward, length, supply, expected, factory)
    }

    /// Test a bidirectional cursor with the full stimulus alphabet.
    pub fn bidirectional(
        length: usize,
        supply: ElementSupply<E>,
        expected: impl IntoIterator<Item = E>,
        factory: F,
    ) -> Self {
        Self::new(Alphabet::Bidirectional, length, supply, expected, factory)
    }

    #[must_use]
    pub fn with_features(mut self, features: CapabilitySet) -> Self {
        self.features = features;
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderingMode) -> Self {
        self.ordering = ordering;
        self
    }

    /// Position of the candidate cursor when the factory returns it.
    #[must_use]
    pub fn starting_at(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    #[must_use]
    pub fn with_verifier(
        mut self,
        verifier: impl FnMut(&[E]) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.verifier = Some(Box::new(verifier));
        self
    }

    #[must_use]
    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }

    /// Skip `remove` stimuli in a sequence once `next` has reported an
    /// error in that sequence.
    #[must_use]
    pub fn stop_testing_remove_after_next_error(mut self) -> Self {
        self.stop_testing_remove_after_next_error = true;
        self
    }

    /// Abandon a sequence once `add` has reported an error in it.
    #[must_use]
    pub fn stop_sequence_after_add_error(mut self) -> Self {
        self.stop_sequence_after_add_error = true;
        self
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Number of sequences a run will execute, `|alphabet|^length`.
    pub fn sequence_count(&self) -> Result<usize, HarnessError> {
        let alphabet_len = self.alphabet.stimuli().len();
        u32::try_from(self.length)
            .ok()
            .and_then(|exp| alphabet_len.checked_pow(exp))
            .ok_or(HarnessError::SequenceSpaceOverflow {
                alphabet_len,
                length: self.length,
            })
    }

    pub(crate) fn validate(&self) -> Result<usize, HarnessError> {
        if self.start_index > self.expected.len() {
            return Err(HarnessError::StartIndexOutOfRange {
                start_index: self.start_index,
                len: self.expected.len(),
            });
        }
        self.sequence_count()
    }
}

impl<E: fmt::Debug, F> fmt::Debug for RunConfig<E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("length", &self.length)
            .field("alphabet", &self.alphabet)
            .field("supply", &self.supply)
            .field("expected", &self.expected)
            .field("features", &self.features)
            .field("ordering", &self.ordering)
            .field("start_index", &self.start_index)
            .field("verifier", &self.verifier.is_some())
            .field("failure_mode", &self.failure_mode)
            .field(
                "stop_testing_remove_after_next_error",
                &self.stop_testing_remove_after_next_error,
            )
            .field(
                "stop_sequence_after_add_error",
                &self.stop_sequence_after_add_error,
            )
            .finish_non_exhaustive()
    }
}
