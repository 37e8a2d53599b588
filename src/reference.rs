//! Reference model of a textbook-correct bidirectional cursor.
//!
//! The model keeps two stacks: `forward` holds the elements a run of
//! `next` calls would return (top = next element), `backward` holds the
//! elements a run of `previous` calls would return (top = previous
//! element). `last_returned` records which stack the most recent
//! `next`/`previous` pushed onto, which is where `remove` and `set` act.
//!
//! Failing operations do not return a single error. They return the
//! [`PermittedErrors`] a correct cursor could report in that state, since
//! for example `remove` on an unmodifiable cursor before any `next` may
//! legitimately report either `Unsupported` or `IllegalState`.

use std::fmt;

use thiserror::Error;

use crate::config::{CapabilitySet, Feature};
use crate::cursor::CursorError;

/// A set of error kinds, any of which a correct cursor may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermittedErrors {
    kinds: &'static [CursorError],
}

impl PermittedErrors {
    pub const UNSUPPORTED_OR_ILLEGAL_STATE: Self = Self {
        kinds: &[CursorError::Unsupported, CursorError::IllegalState],
    };
    pub const UNSUPPORTED: Self = Self {
        kinds: &[CursorError::Unsupported],
    };
    pub const ILLEGAL_STATE: Self = Self {
        kinds: &[CursorError::IllegalState],
    };
    pub const NO_SUCH_ELEMENT: Self = Self {
        kinds: &[CursorError::NoSuchElement],
    };

    #[must_use]
    pub fn contains(&self, kind: CursorError) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = CursorError> + '_ {
        self.kinds.iter().copied()
    }
}

impl fmt::Display for PermittedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.kinds {
            return write!(f, "{only:?}");
        }
        f.write_str("one of {")?;
        for (i, kind) in self.kinds.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind:?}")?;
        }
        f.write_str("}")
    }
}

/// The element passed to [`ReferenceCursor::promote_to_next`] is not among
/// the elements still ahead of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("element is not among the remaining elements")]
pub struct UnknownElement;

/// Which stack the most recent `next`/`previous` pushed onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub type ReferenceResult<T> = Result<T, PermittedErrors>;

/// The trusted model a candidate is compared against.
#[derive(Debug, Clone)]
pub struct ReferenceCursor<E> {
    features: CapabilitySet,
    forward: Vec<E>,
    backward: Vec<E>,
    last_returned: Option<Direction>,
}

impl<E: Clone + PartialEq> ReferenceCursor<E> {
    /// Position a model over `expected` so that `next` returns
    /// `expected[start_index]`.
    ///
    /// `start_index` is clamped to `expected.len()`; the run configuration
    /// rejects out-of-range indices before a model is ever built.
    pub fn new(expected: &[E], start_index: usize, features: CapabilitySet) -> Self {
        let split = start_index.min(expected.len());
        Self {
            features,
            forward: expected[split..].iter().rev().cloned().collect(),
            backward: expected[..split].to_vec(),
            last_returned: None,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.forward.is_empty()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        !self.backward.is_empty()
    }

    pub fn next(&mut self) -> ReferenceResult<E> {
        let element = self.forward.pop().ok_or(PermittedErrors::NO_SUCH_ELEMENT)?;
        self.backward.push(element.clone());
        self.last_returned = Some(Direction::Forward);
        Ok(element)
    }

    pub fn previous(&mut self) -> ReferenceResult<E> {
        let element = self.backward.pop().ok_or(PermittedErrors::NO_SUCH_ELEMENT)?;
        self.forward.push(element.clone());
        self.last_returned = Some(Direction::Backward);
        Ok(element)
    }

    #[must_use]
    pub fn next_index(&self) -> usize {
        self.backward.len()
    }

    #[must_use]
    pub fn previous_index(&self) -> isize {
        self.backward.len() as isize - 1
    }

    pub fn remove(&mut self) -> ReferenceResult<()> {
        let direction = self.check_mutation(Feature::SupportsRemove)?;
        self.stack_mut(direction).pop();
        self.last_returned = None;
        Ok(())
    }

    pub fn set(&mut self, element: E) -> ReferenceResult<()> {
        let direction = self.check_mutation(Feature::SupportsSet)?;
        let stack = self.stack_mut(direction);
        stack.pop();
        stack.push(element);
        Ok(())
    }

    pub fn add(&mut self, element: E) -> ReferenceResult<()> {
        if !self.features.contains(Feature::SupportsAdd) {
            return Err(PermittedErrors::UNSUPPORTED);
        }
        self.backward.push(element);
        self.last_returned = None;
        Ok(())
    }

    /// The logical sequence the model currently represents.
    #[must_use]
    pub fn elements(&self) -> Vec<E> {
        self.backward
            .iter()
            .chain(self.forward.iter().rev())
            .cloned()
            .collect()
    }

    /// Move `element` to the top of the forward stack so the next `next`
    /// returns it. Used when the candidate's iteration order is unspecified.
    pub fn promote_to_next(&mut self, element: &E) -> Result<(), UnknownElement> {
        let pos = self
            .forward
            .iter()
            .rposition(|candidate| candidate == element)
            .ok_or(UnknownElement)?;
        let promoted = self.forward.remove(pos);
        self.forward.push(promoted);
        Ok(())
    }

    /// Errors permitted for `remove`/`set` combine two independent causes:
    /// a missing capability and a missing last-returned element.
    fn check_mutation(&self, feature: Feature) -> ReferenceResult<Direction> {
        match (self.features.contains(feature), self.last_returned) {
            (true, Some(direction)) => Ok(direction),
            (true, None) => Err(PermittedErrors::ILLEGAL_STATE),
            (false, Some(_)) => Err(PermittedErrors::UNSUPPORTED),
            (false, None) => Err(PermittedErrors::UNSUPPORTED_OR_ILLEGAL_STATE),
        }
    }

    fn stack_mut(&mut self, direction: Direction) -> &mut Vec<E> {
        match direction {
            // next() pushed the returned element onto the backward stack
            Direction::Forward => &mut self.backward,
            Direction::Backward => &mut self.forward,
        }
    }
}
