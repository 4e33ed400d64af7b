//! TTL cache for LLM-derived results.
//!
//! Entries expire `ttl` after insertion. There is no background sweep: an
//! expired entry reads as a miss and is overwritten by the next `put`.
//! The clock is injected so expiry can be tested without sleeping.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct CacheEntry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Returns a copy of the value if present and younger than the TTL.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if self.clock.now() - entry.inserted_at < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn put(&mut self, key: String, value: V) {
        let inserted_at = self.clock.now();
        self.entries.insert(key, CacheEntry { value, inserted_at });
    }

    /// Number of stored entries, expired ones included.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Key builders
// ────────────────────────────────────────────────────────────────────────────

const RESUME_KEY_PREFIX_CHARS: usize = 50;
/// ASCII unit separator; never typed by users, so joined parts stay distinct.
const KEY_SEPARATOR: char = '\u{1f}';

pub fn feedback_key(question: &str, answer: &str, role_id: u32) -> String {
    format!("feedback:{question}{KEY_SEPARATOR}{answer}{KEY_SEPARATOR}{role_id}")
}

/// Only the first 50 characters of the resume take part in the key.
pub fn questions_key(resume_text: Option<&str>, role_id: u32) -> String {
    let prefix: String = resume_text
        .unwrap_or_default()
        .chars()
        .take(RESUME_KEY_PREFIX_CHARS)
        .collect();
    format!("questions:{prefix}{KEY_SEPARATOR}{role_id}")
}

/// Every question then every answer, separator-joined. The question count
/// fixes where the questions end.
pub fn report_key(questions: &[String], answers: &[String], role_id: u32) -> String {
    let parts = questions
        .iter()
        .chain(answers)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&KEY_SEPARATOR.to_string());
    format!(
        "report:{role_id}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{parts}",
        questions.len()
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Test clock
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: std::sync::Mutex::new(Utc::now()),
        })
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
