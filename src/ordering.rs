//! Ordering relation over queue entries
//!
//! Entries are ordered by priority score (higher first), then by arrival order
//! (earlier first). Arrival orders are unique, so the order is total. The head
//! of the queue is the minimum under this order.
//!
//! `QueuePosition::to_key` encodes a position so that byte-wise comparison of
//! keys agrees with `Ord`, which lets the store keep the queue sorted by key.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Length of an encoded position key: 4 bytes of inverted score + 8 bytes of arrival order.
pub const POSITION_KEY_LEN: usize = 12;

/// A queue entry's place in the total order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueuePosition {
    pub priority_score: u32,
    pub arrival_order: u64,
}

impl QueuePosition {
    pub fn new(priority_score: u32, arrival_order: u64) -> Self {
        Self {
            priority_score,
            arrival_order,
        }
    }

    /// Encode as a big-endian key whose lexicographic order matches `Ord`.
    pub fn to_key(&self) -> [u8; POSITION_KEY_LEN] {
        let mut key = [0u8; POSITION_KEY_LEN];
        key[..4].copy_from_slice(&(u32::MAX - self.priority_score).to_be_bytes());
        key[4..].copy_from_slice(&self.arrival_order.to_be_bytes());
        key
    }

    pub fn from_key(key: &[u8]) -> Option<Self> {
        if key.len() != POSITION_KEY_LEN {
            return None;
        }
        let inverted = u32::from_be_bytes(key[..4].try_into().ok()?);
        let arrival_order = u64::from_be_bytes(key[4..].try_into().ok()?);
        Some(Self::new(u32::MAX - inverted, arrival_order))
    }
}

impl Ord for QueuePosition {
    /// Higher score sorts first; on equal score, smaller arrival order sorts first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority_score
            .cmp(&self.priority_score)
            .then_with(|| self.arrival_order.cmp(&other.arrival_order))
    }
}

impl PartialOrd for QueuePosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
