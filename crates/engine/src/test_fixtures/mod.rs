//! Test fixtures: store fakes, deterministic randomness, and builders.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{catalog_of, engine_with, SequenceRandom, TestStore};
//!
//! let store = Arc::new(TestStore::new());
//! let engine = engine_with(store.clone(), catalog_of(&["A", "B"]), SequenceRandom::new([1]));
//! ```

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Local, TimeZone, Utc};
use tokio::sync::{watch, Notify};
use wordday_domain::{WordCatalog, WordEntry};

use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::memory_store::InMemoryStore;
use crate::infrastructure::ports::{KeyValueStore, RandomPort, StoreError};
use crate::use_cases::SelectionEngine;

// =============================================================================
// Builders
// =============================================================================

/// Catalog whose entries are `word` / `"{word} definition"` / `"{word} example"`.
pub fn catalog_of(words: &[&str]) -> WordCatalog {
    WordCatalog::new(
        words
            .iter()
            .map(|w| {
                WordEntry::new(*w, format!("{w} definition"), format!("{w} example"))
                    .expect("fixture word must be valid")
            })
            .collect(),
    )
    .expect("fixture catalog must be valid")
}

/// Clock pinned to noon local time on 2025-06-15, so records stamp
/// `6/15/2025` whatever the machine's timezone.
pub fn fixed_clock() -> FixedClock {
    FixedClock(
        Local
            .with_ymd_and_hms(2025, 6, 15, 12, 0, 0)
            .single()
            .expect("valid local timestamp")
            .with_timezone(&Utc),
    )
}

pub fn engine_with<S>(store: Arc<S>, catalog: WordCatalog, random: SequenceRandom) -> SelectionEngine
where
    S: KeyValueStore + 'static,
{
    SelectionEngine::new(
        store,
        Arc::new(catalog),
        Arc::new(fixed_clock()),
        Arc::new(random),
    )
}

// =============================================================================
// Randomness
// =============================================================================

/// Returns queued indices in order, then 0. Indices are clamped to the range.
pub struct SequenceRandom {
    picks: Mutex<VecDeque<usize>>,
}

impl SequenceRandom {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: Mutex::new(picks.into_iter().collect()),
        }
    }
}

impl RandomPort for SequenceRandom {
    fn pick(&self, len: usize) -> usize {
        let next = self
            .picks
            .lock()
            .expect("picks lock")
            .pop_front()
            .unwrap_or(0);
        next.min(len.saturating_sub(1))
    }
}

// =============================================================================
// Store
// =============================================================================

/// In-memory store that records writes, injects failures, and can hold
/// calls until released.
pub struct TestStore {
    inner: InMemoryStore,
    writes: Mutex<Vec<String>>,
    failing_reads: Mutex<HashSet<String>>,
    failing_writes: Mutex<HashSet<String>>,
    fail_clear: AtomicBool,
    gate: watch::Sender<bool>,
    blocked: Notify,
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStore {
    pub fn new() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            inner: InMemoryStore::new(),
            writes: Mutex::new(Vec::new()),
            failing_reads: Mutex::new(HashSet::new()),
            failing_writes: Mutex::new(HashSet::new()),
            fail_clear: AtomicBool::new(false),
            gate,
            blocked: Notify::new(),
        }
    }

    /// Keys of every attempted `set`/`remove`, in order (`*` for `clear_all`).
    pub fn write_log(&self) -> Vec<String> {
        self.writes.lock().expect("writes lock").clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().expect("writes lock").len()
    }

    pub fn fail_reads_of(&self, key: &str) {
        self.failing_reads
            .lock()
            .expect("reads lock")
            .insert(key.to_string());
    }

    pub fn fail_writes_of(&self, key: &str) {
        self.failing_writes
            .lock()
            .expect("writes lock")
            .insert(key.to_string());
    }

    pub fn allow_writes_of(&self, key: &str) {
        self.failing_writes.lock().expect("writes lock").remove(key);
    }

    pub fn fail_clear_all(&self) {
        self.fail_clear.store(true, Ordering::SeqCst);
    }

    /// Make every following read or write wait until `open_gate`.
    pub fn close_gate(&self) {
        self.gate.send_replace(false);
    }

    pub fn open_gate(&self) {
        self.gate.send_replace(true);
    }

    /// Resolve once a call is waiting on the closed gate.
    pub async fn wait_until_blocked(&self) {
        self.blocked.notified().await;
    }

    async fn pass_gate(&self) {
        let closed = !*self.gate.borrow();
        if closed {
            self.blocked.notify_one();
            let mut rx = self.gate.subscribe();
            let _ = rx.wait_for(|open| *open).await;
        }
    }

    fn record_write(&self, key: &str) {
        self.writes.lock().expect("writes lock").push(key.to_string());
    }

    fn write_fails(&self, key: &str) -> bool {
        self.failing_writes.lock().expect("writes lock").contains(key)
    }
}

#[async_trait]
impl KeyValueStore for TestStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.pass_gate().await;
        let fails = self.failing_reads.lock().expect("reads lock").contains(key);
        if fails {
            return Err(StoreError::read(key, "injected read failure"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.pass_gate().await;
        self.record_write(key);
        if self.write_fails(key) {
            return Err(StoreError::write(key, "injected write failure"));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.pass_gate().await;
        self.record_write(key);
        if self.write_fails(key) {
            return Err(StoreError::write(key, "injected write failure"));
        }
        self.inner.remove(key).await
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        self.pass_gate().await;
        self.record_write("*");
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("injected clear failure"));
        }
        self.inner.clear_all().await
    }
}
