//! Record identifiers.
//!
//! Generated identifiers use the 12-byte object-id layout rendered as 24 hex chars:
//! 4-byte big-endian Unix seconds, 5 per-process random bytes, 3-byte counter.

use super::Collection;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

static PROCESS_RANDOM: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Identifier of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh identifier, unique within this process.
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let random = PROCESS_RANDOM.get_or_init(|| rand::thread_rng().gen());
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..0x0100_0000)))
            .fetch_add(1, Ordering::Relaxed)
            & 0x00FF_FFFF;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(random);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        RecordId(hex::encode(bytes))
    }

    /// Wraps a caller-supplied identifier as-is.
    pub fn from_raw(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Logical key to assigned identifier, for one collection.
///
/// Built while seeding so later steps can wire references by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdMap {
    collection: Collection,
    ids: BTreeMap<String, RecordId>,
}

impl IdMap {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            ids: BTreeMap::new(),
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Records the identifier for `key`, returning the previous one if the key was reused.
    pub fn insert(&mut self, key: impl Into<String>, id: RecordId) -> Option<RecordId> {
        self.ids.insert(key.into(), id)
    }

    pub fn get(&self, key: &str) -> Option<&RecordId> {
        self.ids.get(key)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
