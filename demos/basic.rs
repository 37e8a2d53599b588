//! Basic usage of the conformance tester.
//!
//! Run with: RUST_LOG=cursor_oracle=debug cargo run --example basic

use cursor_oracle::{
    CapabilitySet, Cursor, CursorError, CursorResult, ElementSupply, Feature, FailureMode,
    RunConfig, Validity,
};
use tracing_subscriber::EnvFilter;

/// A forward cursor over a vector that supports `remove`.
struct VecIter {
    items: Vec<char>,
    pos: usize,
    last: Option<usize>,
    // deliberately broken: remove forgets to step the cursor back
    buggy: bool,
}

impl VecIter {
    fn new(items: &[char], buggy: bool) -> Self {
        Self {
            items: items.to_vec(),
            pos: 0,
            last: None,
            buggy,
        }
    }
}

impl Cursor<char> for VecIter {
    fn has_next(&mut self) -> CursorResult<bool> {
        Ok(self.pos < self.items.len())
    }

    fn next(&mut self) -> CursorResult<char> {
        let item = *self.items.get(self.pos).ok_or(CursorError::NoSuchElement)?;
        self.last = Some(self.pos);
        self.pos += 1;
        Ok(item)
    }

    fn remove(&mut self) -> CursorResult<()> {
        let idx = self.last.take().ok_or(CursorError::IllegalState)?;
        self.items.remove(idx);
        if !self.buggy {
            self.pos -= 1;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let expected = ['a', 'b', 'c'];
    let features = CapabilitySet::from_iter([Feature::SupportsRemove]);

    // A correct cursor passes every sequence of up to five operations.
    let report = RunConfig::forward(5, ElementSupply::new(['x'])?, expected, || {
        VecIter::new(&expected, false)
    })
    .with_features(features.clone())
    .run()?;

    println!("Validity: {:?}", report.valid);
    println!("Sequences run: {}", report.sequence_count);
    assert_eq!(report.valid, Validity::Valid);

    println!("\n--- Broken remove ---\n");

    // Collect every failing sequence instead of stopping at the first.
    let report = RunConfig::forward(3, ElementSupply::new(['x'])?, expected, || {
        VecIter::new(&expected, true)
    })
    .with_features(features)
    .with_failure_mode(FailureMode::CollectAll)
    .run()?;

    println!("Validity: {:?}", report.valid);
    println!(
        "Failing sequences: {} of {}",
        report.failure_count(),
        report.sequence_count
    );
    if let Some(failure) = report.first_failure() {
        println!("First failure: {failure}");
    }
    for (stimulus, count) in &report.failing_stimuli {
        println!("  diverged at {stimulus}: {count}");
    }

    assert_eq!(report.valid, Validity::Invalid);

    println!("\nDone!");
    Ok(())
}
