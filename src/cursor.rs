//! The interface a candidate cursor exposes to the harness.
//!
//! A cursor sits between two elements of a sequence. Forward-only cursors
//! implement `has_next`, `next` and `remove`; bidirectional cursors also
//! override the provided methods. Every method takes `&mut self` because
//! lazily computing cursors (peeking adapters, generators) advance internal
//! state even on `has_next`.

use thiserror::Error;

/// The kinds of error a cursor operation may report.
///
/// This is a closed set: the reference model describes acceptable failures
/// as sets of these kinds, and the oracle compares kinds, not messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Error)]
pub enum CursorError {
    /// The cursor does not support this operation at all.
    #[error("operation not supported")]
    Unsupported,
    /// The operation is supported but not legal in the current state,
    /// e.g. `remove` without a preceding `next`.
    #[error("illegal state")]
    IllegalState,
    /// `next` or `previous` was called with nothing left in that direction.
    #[error("no such element")]
    NoSuchElement,
    /// The underlying collection changed behind the cursor's back.
    #[error("concurrent modification")]
    ConcurrentModification,
    /// The element passed to `add` or `set` was rejected.
    #[error("illegal argument")]
    IllegalArgument,
    /// A position was outside the bounds of the underlying collection.
    #[error("index out of bounds")]
    IndexOutOfBounds,
}

pub type CursorResult<T> = Result<T, CursorError>;

/// A cursor under test.
pub trait Cursor<E> {
    fn has_next(&mut self) -> CursorResult<bool>;

    fn next(&mut self) -> CursorResult<E>;

    /// Remove the element most recently returned by `next` or `previous`.
    fn remove(&mut self) -> CursorResult<()>;

    fn has_previous(&mut self) -> CursorResult<bool> {
        Err(CursorError::Unsupported)
    }

    fn previous(&mut self) -> CursorResult<E> {
        Err(CursorError::Unsupported)
    }

    /// Index of the element a subsequent `next` would return.
    fn next_index(&mut self) -> CursorResult<usize> {
        Err(CursorError::Unsupported)
    }

    /// Index of the element a subsequent `previous` would return, `-1` at
    /// the start of the sequence.
    fn previous_index(&mut self) -> CursorResult<isize> {
        Err(CursorError::Unsupported)
    }

    /// Insert `element` immediately before the cursor position.
    fn add(&mut self, _element: E) -> CursorResult<()> {
        Err(CursorError::Unsupported)
    }

    /// Replace the element most recently returned by `next` or `previous`.
    fn set(&mut self, _element: E) -> CursorResult<()> {
        Err(CursorError::Unsupported)
    }
}

impl<E, C: Cursor<E> + ?Sized> Cursor<E> for Box<C> {
    fn has_next(&mut self) -> CursorResult<bool> {
        (**self).has_next()
    }

    fn next(&mut self) -> CursorResult<E> {
        (**self).next()
    }

    fn remove(&mut self) -> CursorResult<()> {
        (**self).remove()
    }

    fn has_previous(&mut self) -> CursorResult<bool> {
        (**self).has_previous()
    }

    fn previous(&mut self) -> CursorResult<E> {
        (**self).previous()
    }

    fn next_index(&mut self) -> CursorResult<usize> {
        (**self).next_index()
    }

    fn previous_index(&mut self) -> CursorResult<isize> {
        (**self).previous_index()
    }

    fn add(&mut self, element: E) -> CursorResult<()> {
        (**self).add(element)
    }

    fn set(&mut self, element: E) -> CursorResult<()> {
        (**self).set(element)
    }
}
