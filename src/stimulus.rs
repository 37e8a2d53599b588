//! The stimulus vocabulary.
//!
//! A [`Stimulus`] names one cursor operation. Before it is applied, a
//! stimulus is bound to an [`Invocation`], which carries the argument for
//! `add` and `set` drawn from the [`ElementSupply`]. The same invocation is
//! then applied to the candidate and to the reference model.

use std::fmt;

use crate::config::ElementSupply;
use crate::cursor::{Cursor, CursorResult};
use crate::reference::{ReferenceCursor, ReferenceResult};

/// One cursor operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stimulus {
    HasNext,
    Next,
    Remove,
    HasPrevious,
    NextIndex,
    PreviousIndex,
    Previous,
    Add,
    Set,
}

impl Stimulus {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Stimulus::HasNext => "has_next",
            Stimulus::Next => "next",
            Stimulus::Remove => "remove",
            Stimulus::HasPrevious => "has_previous",
            Stimulus::NextIndex => "next_index",
            Stimulus::PreviousIndex => "previous_index",
            Stimulus::Previous => "previous",
            Stimulus::Add => "add",
            Stimulus::Set => "set",
        }
    }
}

impl fmt::Display for Stimulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const FORWARD: [Stimulus; 3] = [Stimulus::HasNext, Stimulus::Next, Stimulus::Remove];

const BIDIRECTIONAL: [Stimulus; 9] = [
    Stimulus::HasNext,
    Stimulus::Next,
    Stimulus::Remove,
    Stimulus::HasPrevious,
    Stimulus::NextIndex,
    Stimulus::PreviousIndex,
    Stimulus::Previous,
    Stimulus::Add,
    Stimulus::Set,
];

/// The set of stimuli sequences are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `has_next`, `next`, `remove`.
    Forward,
    /// The forward stimuli plus `has_previous`, `next_index`,
    /// `previous_index`, `previous`, `add` and `set`.
    Bidirectional,
}

impl Alphabet {
    #[must_use]
    pub fn stimuli(self) -> &'static [Stimulus] {
        match self {
            Alphabet::Forward => &FORWARD,
            Alphabet::Bidirectional => &BIDIRECTIONAL,
        }
    }
}

/// A successful result of one cursor operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Returned<E> {
    Unit,
    Flag(bool),
    /// `next_index`, which is never negative.
    Position(usize),
    /// `previous_index`, which is `-1` at the start.
    Index(isize),
    Element(E),
}

impl<E: fmt::Debug> fmt::Display for Returned<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Returned::Unit => f.write_str("()"),
            Returned::Flag(flag) => write!(f, "{flag}"),
            Returned::Position(position) => write!(f, "{position}"),
            Returned::Index(index) => write!(f, "{index}"),
            Returned::Element(element) => write!(f, "{element:?}"),
        }
    }
}

/// A stimulus bound to its argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation<E> {
    HasNext,
    Next,
    Remove,
    HasPrevious,
    NextIndex,
    PreviousIndex,
    Previous,
    Add(E),
    Set(E),
}

impl<E: Clone + PartialEq> Invocation<E> {
    /// `add` and `set` consume one element from `supply`; other stimuli
    /// leave it untouched.
    pub fn bind(stimulus: Stimulus, supply: &mut ElementSupply<E>) -> Self {
        match stimulus {
            Stimulus::HasNext => Invocation::HasNext,
            Stimulus::Next => Invocation::Next,
            Stimulus::Remove => Invocation::Remove,
            Stimulus::HasPrevious => Invocation::HasPrevious,
            Stimulus::NextIndex => Invocation::NextIndex,
            Stimulus::PreviousIndex => Invocation::PreviousIndex,
            Stimulus::Previous => Invocation::Previous,
            Stimulus::Add => Invocation::Add(supply.next_element()),
            Stimulus::Set => Invocation::Set(supply.next_element()),
        }
    }

    pub fn apply_to_candidate<C>(self, candidate: &mut C) -> CursorResult<Returned<E>>
    where
        C: Cursor<E> + ?Sized,
    {
        Ok(match self {
            Invocation::HasNext => Returned::Flag(candidate.has_next()?),
            Invocation::Next => Returned::Element(candidate.next()?),
            Invocation::Remove => candidate.remove().map(|()| Returned::Unit)?,
            Invocation::HasPrevious => Returned::Flag(candidate.has_previous()?),
            Invocation::NextIndex => Returned::Position(candidate.next_index()?),
            Invocation::PreviousIndex => Returned::Index(candidate.previous_index()?),
            Invocation::Previous => Returned::Element(candidate.previous()?),
            Invocation::Add(element) => candidate.add(element).map(|()| Returned::Unit)?,
            Invocation::Set(element) => candidate.set(element).map(|()| Returned::Unit)?,
        })
    }

    pub fn apply_to_reference(self, reference: &mut ReferenceCursor<E>) -> ReferenceResult<Returned<E>> {
        Ok(match self {
            Invocation::HasNext => Returned::Flag(reference.has_next()),
            Invocation::Next => Returned::Element(reference.next()?),
            Invocation::Remove => reference.remove().map(|()| Returned::Unit)?,
            Invocation::HasPrevious => Returned::Flag(reference.has_previous()),
            Invocation::NextIndex => Returned::Position(reference.next_index()),
            Invocation::PreviousIndex => Returned::Index(reference.previous_index()),
            Invocation::Previous => Returned::Element(reference.previous()?),
            Invocation::Add(element) => reference.add(element).map(|()| Returned::Unit)?,
            Invocation::Set(element) => reference.set(element).map(|()| Returned::Unit)?,
        })
    }
}
