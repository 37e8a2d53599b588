//! Exhaustive model-based conformance testing for cursors.
//!
//! cursor-oracle checks that a cursor implementation (an iterator with
//! `has_next`/`next`/`remove`, or a bidirectional list cursor that also
//! supports `previous`, `add`, `set` and index queries) behaves exactly like
//! a reference model for *every* sequence of operations up to a fixed
//! length.
//!
//! # Quick Start
//!
//! ```
//! use cursor_oracle::{
//!     CapabilitySet, Cursor, CursorError, CursorResult, ElementSupply, Feature, RunConfig,
//!     Validity,
//! };
//!
//! struct VecIter {
//!     items: Vec<i32>,
//!     pos: usize,
//!     last: Option<usize>,
//! }
//!
//! impl Cursor<i32> for VecIter {
//!     fn has_next(&mut self) -> CursorResult<bool> {
//!         Ok(self.pos < self.items.len())
//!     }
//!
//!     fn next(&mut self) -> CursorResult<i32> {
//!         let item = *self.items.get(self.pos).ok_or(CursorError::NoSuchElement)?;
//!         self.last = Some(self.pos);
//!         self.pos += 1;
//!         Ok(item)
//!     }
//!
//!     fn remove(&mut self) -> CursorResult<()> {
//!         let idx = self.last.take().ok_or(CursorError::IllegalState)?;
//!         self.items.remove(idx);
//!         self.pos -= 1;
//!         Ok(())
//!     }
//! }
//!
//! let supply = ElementSupply::new([9])?;
//! let report = RunConfig::forward(4, supply, vec![1, 2, 3], || VecIter {
//!     items: vec![1, 2, 3],
//!     pos: 0,
//!     last: None,
//! })
//! .with_features(CapabilitySet::from_iter([Feature::SupportsRemove]))
//! .run()?;
//!
//! assert_eq!(report.valid, Validity::Valid);
//! assert_eq!(report.sequence_count, 81);
//! # Ok::<(), cursor_oracle::HarnessError>(())
//! ```
//!
//! # How a run works
//!
//! - The **enumerator** generates all `|alphabet|^length` stimulus sequences.
//! - For each sequence a fresh candidate (from the factory) and a fresh
//!   [`ReferenceCursor`] are built.
//! - The **oracle** applies each stimulus to the candidate, then to the
//!   model, and compares. When the model fails it yields the *set* of error
//!   kinds a correct cursor may report ([`PermittedErrors`]); the candidate
//!   must report one of them.
//! - With [`OrderingMode::Unknown`] the model is reordered to agree with
//!   whatever element the candidate's `next` returns, so hash-ordered
//!   collections can be checked without knowing their order.
//!
//! A failure carries the stimulus prefix that reproduces it.

pub mod config;
pub mod cursor;
pub mod enumerator;
pub mod oracle;
pub mod reference;
pub mod report;
pub mod stimulus;

pub use config::{
    CapabilitySet, ElementSupply, FailureMode, Feature, HarnessError, OrderingMode, RunConfig,
    Verifier,
};
pub use cursor::{Cursor, CursorError, CursorResult};
pub use enumerator::run;
pub use oracle::{Mismatch, Oracle};
pub use reference::{Direction, PermittedErrors, ReferenceCursor, UnknownElement};
pub use report::{ConformanceFailure, ConformanceReport, Validity};
pub use stimulus::{Alphabet, Invocation, Returned, Stimulus};
