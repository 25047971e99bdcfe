//! Audit log
//!
//! Append-only history of admissions and calls. Records are written inside the
//! same transaction as the queue mutation they describe (see
//! `store::QueueTransaction::record_audit`); this module owns the record type
//! and the read side used for verification.

use crate::error::StorageError;
use crate::patient::PatientId;
use crate::store::{to_storage_data, to_storage_io};
use serde::{Deserialize, Serialize};
use sled::Tree;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Admitted,
    Called,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::Admitted => "ADMITTED",
            AuditAction::Called => "CALLED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub sequence: u64,
    pub patient_id: PatientId,
    pub action: AuditAction,
    pub recorded_at_ms: i64,
}

impl AuditRecord {
    pub fn new(sequence: u64, patient_id: PatientId, action: AuditAction) -> Self {
        Self {
            sequence,
            patient_id,
            action,
            recorded_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn key(&self) -> [u8; 8] {
        self.sequence.to_be_bytes()
    }

    pub fn encode(&self) -> Result<Vec<u8>, StorageError> {
        serde_json::to_vec(self).map_err(to_storage_data)
    }

    pub fn decode(raw: &[u8]) -> Result<Self, StorageError> {
        serde_json::from_slice(raw).map_err(to_storage_data)
    }

    /// RFC 3339 rendering of `recorded_at_ms`.
    pub fn recorded_at(&self) -> String {
        chrono::DateTime::<chrono::Utc>::from_timestamp_millis(self.recorded_at_ms)
            .map(|ts| ts.to_rfc3339())
            .unwrap_or_else(|| self.recorded_at_ms.to_string())
    }
}

/// Read-only view over the history tree
#[derive(Clone)]
pub struct AuditLog {
    history: Tree,
}

impl AuditLog {
    pub fn new(history: Tree) -> Self {
        Self { history }
    }

    /// All records in append order.
    pub fn entries(&self) -> Result<Vec<AuditRecord>, StorageError> {
        let mut out = Vec::new();
        for result in self.history.iter() {
            let (_, value) = result.map_err(to_storage_io)?;
            out.push(AuditRecord::decode(&value)?);
        }
        Ok(out)
    }

    /// Records for one patient in append order.
    pub fn entries_for(&self, patient_id: &PatientId) -> Result<Vec<AuditRecord>, StorageError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|record| record.patient_id == *patient_id)
            .collect())
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
