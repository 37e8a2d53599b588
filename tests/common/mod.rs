//! Shared fixtures: a correct list cursor and deliberate defects.

#![allow(dead_code)]

use cursor_oracle::{CapabilitySet, Cursor, CursorError, CursorResult, Feature};

/// A defect injected into [`VecCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// `remove` deletes the element after the one last returned.
    RemoveWrongElement,
    /// `remove` does not clear the last-returned position.
    RemoveKeepsLastReturned,
    /// `has_next` always answers true.
    HasNextAlwaysTrue,
    /// `next_index` is one too large.
    NextIndexOffByOne,
    /// `add` inserts after the cursor instead of before it.
    AddAfterCursor,
    /// `remove` reports this error unconditionally.
    RemoveFails(CursorError),
    /// `remove` succeeds unconditionally without touching the list.
    RemoveAlwaysOk,
    /// `add` reports `Unsupported` but still moves the cursor forward.
    AddFailsAfterAdvancing,
    /// `next` reports this error once the end is reached instead of
    /// `NoSuchElement`.
    NextPastEndFails(CursorError),
    /// A `next` past the end forgets the element last returned.
    NextPastEndClearsLastReturned,
    /// `previous` does not record the element it returned.
    PreviousForgetsLastReturned,
    /// `set` clears the last-returned position, so a second `set` fails.
    SetClearsLastReturned,
}

/// A list cursor over a vector implementing the full contract.
#[derive(Debug, Clone)]
pub struct VecCursor<E> {
    items: Vec<E>,
    cursor: usize,
    last: Option<usize>,
    features: CapabilitySet,
    mutation: Option<Mutation>,
}

impl<E: Clone> VecCursor<E> {
    pub fn new(items: &[E], features: CapabilitySet) -> Self {
        Self {
            items: items.to_vec(),
            cursor: 0,
            last: None,
            features,
            mutation: None,
        }
    }

    pub fn starting_at(mut self, index: usize) -> Self {
        self.cursor = index;
        self
    }

    pub fn mutated(mut self, mutation: Mutation) -> Self {
        self.mutation = Some(mutation);
        self
    }

    fn require(&self, feature: Feature) -> CursorResult<()> {
        if self.features.contains(feature) {
            Ok(())
        } else {
            Err(CursorError::Unsupported)
        }
    }
}

impl<E: Clone> Cursor<E> for VecCursor<E> {
    fn has_next(&mut self) -> CursorResult<bool> {
        if self.mutation == Some(Mutation::HasNextAlwaysTrue) {
            return Ok(true);
        }
        Ok(self.cursor < self.items.len())
    }

    fn next(&mut self) -> CursorResult<E> {
        let Some(item) = self.items.get(self.cursor).cloned() else {
            match self.mutation {
                Some(Mutation::NextPastEndFails(err)) => return Err(err),
                Some(Mutation::NextPastEndClearsLastReturned) => self.last = None,
                _ => {}
            }
            return Err(CursorError::NoSuchElement);
        };
        self.last = Some(self.cursor);
        self.cursor += 1;
        Ok(item)
    }

    fn remove(&mut self) -> CursorResult<()> {
        match self.mutation {
            Some(Mutation::RemoveFails(err)) => return Err(err),
            Some(Mutation::RemoveAlwaysOk) => return Ok(()),
            _ => {}
        }
        self.require(Feature::SupportsRemove)?;
        let idx = match self.mutation {
            Some(Mutation::RemoveKeepsLastReturned) => self.last,
            _ => self.last.take(),
        }
        .ok_or(CursorError::IllegalState)?;
        let target = match self.mutation {
            Some(Mutation::RemoveWrongElement) => (idx + 1).min(self.items.len() - 1),
            _ => idx,
        };
        if target >= self.items.len() {
            return Err(CursorError::IndexOutOfBounds);
        }
        self.items.remove(target);
        if target < self.cursor {
            self.cursor -= 1;
        }
        Ok(())
    }

    fn has_previous(&mut self) -> CursorResult<bool> {
        Ok(self.cursor > 0)
    }

    fn previous(&mut self) -> CursorResult<E> {
        if self.cursor == 0 {
            return Err(CursorError::NoSuchElement);
        }
        self.cursor -= 1;
        self.last = match self.mutation {
            Some(Mutation::PreviousForgetsLastReturned) => None,
            _ => Some(self.cursor),
        };
        Ok(self.items[self.cursor].clone())
    }

    fn next_index(&mut self) -> CursorResult<usize> {
        if self.mutation == Some(Mutation::NextIndexOffByOne) {
            return Ok(self.cursor + 1);
        }
        Ok(self.cursor)
    }

    fn previous_index(&mut self) -> CursorResult<isize> {
        Ok(self.cursor as isize - 1)
    }

    fn add(&mut self, element: E) -> CursorResult<()> {
        if self.mutation == Some(Mutation::AddFailsAfterAdvancing) {
            self.cursor = (self.cursor + 1).min(self.items.len());
            return Err(CursorError::Unsupported);
        }
        self.require(Feature::SupportsAdd)?;
        self.items.insert(self.cursor, element);
        if self.mutation != Some(Mutation::AddAfterCursor) {
            self.cursor += 1;
        }
        self.last = None;
        Ok(())
    }

    fn set(&mut self, element: E) -> CursorResult<()> {
        self.require(Feature::SupportsSet)?;
        let idx = self.last.ok_or(CursorError::IllegalState)?;
        self.items[idx] = element;
        if self.mutation == Some(Mutation::SetClearsLastReturned) {
            self.last = None;
        }
        Ok(())
    }
}
