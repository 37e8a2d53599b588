//! The permitted-outcome oracle.
//!
//! For one stimulus the oracle steps the candidate first, then (for
//! unordered candidates) promotes whatever element the candidate returned
//! in the model, then steps the model, and finally compares the two
//! outcomes:
//!
//! | reference | candidate | verdict |
//! |---|---|---|
//! | value | error | [`Mismatch::UnexpectedError`] |
//! | value | value | equal, or [`Mismatch::ValueMismatch`] |
//! | permitted set | value | [`Mismatch::MissingError`] |
//! | permitted set | error | member of the set, or [`Mismatch::WrongError`] |

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use crate::config::{ElementSupply, OrderingMode};
use crate::cursor::{Cursor, CursorError};
use crate::reference::{PermittedErrors, ReferenceCursor};
use crate::stimulus::{Invocation, Returned, Stimulus};

/// Why one step of a sequence did not conform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch<E: fmt::Debug> {
    #[error("target reported {actual:?} when reference returned {expected}")]
    UnexpectedError {
        expected: Returned<E>,
        actual: CursorError,
    },

    #[error("expected {expected} but target returned {actual}")]
    ValueMismatch {
        expected: Returned<E>,
        actual: Returned<E>,
    },

    #[error("target failed to report {permitted}, returned {actual} instead")]
    MissingError {
        permitted: PermittedErrors,
        actual: Returned<E>,
    },

    #[error("target reported {actual:?}, expected {permitted}")]
    WrongError {
        permitted: PermittedErrors,
        actual: CursorError,
    },

    /// Under unknown ordering, `next` returned an element that is not among
    /// the elements still ahead of the cursor: the candidate invented,
    /// duplicated or resurrected it.
    #[error("target returned {element:?}, which is not among the remaining elements")]
    UnknownElement { element: E },

    #[error("target panicked: {message}")]
    Panicked { message: String },

    #[error("verification of {elements:?} failed: {message}")]
    VerificationFailed { elements: Vec<E>, message: String },
}

/// Compares one candidate step against the reference model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oracle {
    pub ordering: OrderingMode,
}

impl Oracle {
    pub fn new(ordering: OrderingMode) -> Self {
        Self { ordering }
    }

    /// Apply `stimulus` to both cursors and compare the outcomes.
    ///
    /// Returns `Ok(true)` when the candidate reported an error that the
    /// model permits, `Ok(false)` when both returned the same value.
    pub fn execute_and_compare<E, C>(
        &self,
        stimulus: Stimulus,
        reference: &mut ReferenceCursor<E>,
        candidate: &mut C,
        supply: &mut ElementSupply<E>,
    ) -> Result<bool, Mismatch<E>>
    where
        E: Clone + PartialEq + fmt::Debug,
        C: Cursor<E> + ?Sized,
    {
        let invocation = Invocation::bind(stimulus, supply);

        let actual = panic::catch_unwind(AssertUnwindSafe(|| {
            invocation.clone().apply_to_candidate(candidate)
        }))
        .map_err(|payload| Mismatch::Panicked {
            message: panic_message(payload.as_ref()),
        })?;

        if stimulus == Stimulus::Next && self.ordering == OrderingMode::Unknown {
            if let Ok(Returned::Element(element)) = &actual {
                reference
                    .promote_to_next(element)
                    .map_err(|_| Mismatch::UnknownElement {
                        element: element.clone(),
                    })?;
            }
        }

        let expected = invocation.apply_to_reference(reference);

        match (expected, actual) {
            (Ok(expected), Err(actual)) => Err(Mismatch::UnexpectedError { expected, actual }),
            (Ok(expected), Ok(actual)) if expected == actual => Ok(false),
            (Ok(expected), Ok(actual)) => Err(Mismatch::ValueMismatch { expected, actual }),
            (Err(permitted), Ok(actual)) => Err(Mismatch::MissingError { permitted, actual }),
            (Err(permitted), Err(actual)) if permitted.contains(actual) => Ok(true),
            (Err(permitted), Err(actual)) => Err(Mismatch::WrongError { permitted, actual }),
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
