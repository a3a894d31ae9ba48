// src/store/id.rs
//! Identifier generators for new recipes

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of candidate recipe ids
///
/// The store always rejects a candidate held by a live recipe. For a
/// generator that may repeat itself it also remembers every id it has
/// issued, so a deleted recipe's id is never handed out again.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;

    /// Whether this generator is guaranteed never to yield the same id twice
    ///
    /// Returning `true` lets the store skip its history of issued ids.
    fn never_repeats(&self) -> bool {
        false
    }
}

/// Random v4 UUIDs in hyphenated form
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn never_repeats(&self) -> bool {
        true
    }
}

/// Monotonic decimal ids starting at 1
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }

    fn never_repeats(&self) -> bool {
        true
    }
}

/// Id scheme selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Uuid,
    Sequential,
}

impl IdScheme {
    pub fn generator(self) -> Box<dyn IdGenerator> {
        match self {
            Self::Uuid => Box::new(UuidGenerator),
            Self::Sequential => Box::new(SequentialIds::new()),
        }
    }
}
