//! Id minting for sections and pages.
//!
//! Ids are `{prefix}-{unix millis}-{random}`; the random part is the first
//! 8 hex digits of a v4 UUID followed by a per-generator counter, so two ids
//! minted in the same millisecond by the same generator can never collide.

use chrono::Utc;
use std::cell::Cell;
use uuid::Uuid;

pub trait IdGenerator {
    /// A fresh id starting with `prefix` (the section type, or `"page"`).
    ///
    /// Fresh relative to this generator only. Commands re-draw when the id
    /// is already in the document.
    fn next_id(&self, prefix: &str) -> String;
}

#[derive(Debug, Default)]
pub struct TimeRandomIds {
    counter: Cell<u64>,
}

impl TimeRandomIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimeRandomIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.get();
        self.counter.set(n.wrapping_add(1));
        let random = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}{:x}",
            prefix,
            Utc::now().timestamp_millis(),
            &random[..8],
            n
        )
    }
}

/// Deterministic ids (`hero-1`, `page-2`, ...) for tests and fixtures.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("{}-{}", prefix, n)
    }
}
