//! Queue Store
//!
//! Durable tables for the queue, backed by sled trees:
//!
//! - `patients`: canonical patient records, keyed by PatientId bytes
//! - `queue`: waiting entries, keyed by `QueuePosition::to_key`
//! - `queue_index`: PatientId bytes -> position key, for removal by id
//! - `queue_history`: append-only audit records, keyed by history sequence
//! - `queue_meta`: store-managed sequences (arrival order, history) and the
//!   queue version, bumped by every commit that changes `queue`

pub mod persistence;
pub mod transaction;

pub use persistence::{QueuedPatient, SledQueueStore};
pub use transaction::QueueTransaction;

use crate::error::StorageError;
use crate::ordering::QueuePosition;
use crate::patient::{Age, Name, Patient, PatientId};
use crate::priority::PriorityLevel;
use serde::{Deserialize, Serialize};
use std::io;

pub(crate) const TREE_PATIENTS: &str = "patients";
pub(crate) const TREE_QUEUE: &str = "queue";
pub(crate) const TREE_QUEUE_INDEX: &str = "queue_index";
pub(crate) const TREE_HISTORY: &str = "queue_history";
pub(crate) const TREE_META: &str = "queue_meta";

pub(crate) const ARRIVAL_SEQ_KEY: &[u8] = b"arrival_seq";
pub(crate) const HISTORY_SEQ_KEY: &[u8] = b"history_seq";
pub(crate) const QUEUE_VERSION_KEY: &[u8] = b"queue_version";

/// Canonical patient record; persists after the patient leaves the queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: PatientId,
    pub name: Name,
    pub age: Age,
    pub priority: PriorityLevel,
    pub arrival_order: u64,
}

impl PatientRecord {
    pub fn new(patient: &Patient, arrival_order: u64) -> Self {
        Self {
            id: patient.id,
            name: patient.name.clone(),
            age: patient.age,
            priority: patient.priority,
            arrival_order,
        }
    }

    pub fn into_patient(self) -> Patient {
        Patient {
            id: self.id,
            name: self.name,
            age: self.age,
            priority: self.priority,
            arrival_order: Some(self.arrival_order),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, StorageError> {
        bincode::serialize(self).map_err(to_storage_codec)
    }

    pub fn decode(raw: &[u8]) -> Result<Self, StorageError> {
        bincode::deserialize(raw).map_err(to_storage_codec)
    }
}

/// Waiting-state entry: present only while the patient is queued
///
/// `priority_score` is fixed at admission and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub patient_id: PatientId,
    pub priority_score: u32,
    pub arrival_order: u64,
}

impl QueueEntry {
    pub fn position(&self) -> QueuePosition {
        QueuePosition::new(self.priority_score, self.arrival_order)
    }

    pub fn encode(&self) -> Result<Vec<u8>, StorageError> {
        bincode::serialize(self).map_err(to_storage_codec)
    }

    pub fn decode(raw: &[u8]) -> Result<Self, StorageError> {
        bincode::deserialize(raw).map_err(to_storage_codec)
    }
}

pub(crate) fn decode_sequence(raw: &[u8]) -> Result<u64, StorageError> {
    let bytes: [u8; 8] = raw
        .try_into()
        .map_err(|_| StorageError::Corrupt(format!("sequence value has {} bytes", raw.len())))?;
    Ok(u64::from_be_bytes(bytes))
}

pub(crate) fn to_storage_io(err: sled::Error) -> StorageError {
    StorageError::Io(io::Error::new(io::ErrorKind::Other, err.to_string()))
}

pub(crate) fn to_storage_codec(err: bincode::Error) -> StorageError {
    StorageError::Codec(err.to_string())
}

pub(crate) fn to_storage_data(err: serde_json::Error) -> StorageError {
    StorageError::Codec(err.to_string())
}
