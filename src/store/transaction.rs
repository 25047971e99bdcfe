//! Transactional view over the queue trees
//!
//! Every composite queue operation runs as one sled multi-tree transaction.
//! sled transactions are serializable: a conflicting concurrent commit causes
//! the closure to be re-run, so nothing here may have effects outside the
//! transactional trees.

use crate::audit::{AuditAction, AuditRecord};
use crate::error::{QueueError, StorageError};
use crate::ordering::QueuePosition;
use crate::patient::{Patient, PatientId};
use crate::store::{
    decode_sequence, PatientRecord, QueueEntry, ARRIVAL_SEQ_KEY, HISTORY_SEQ_KEY,
    QUEUE_VERSION_KEY,
};
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionalTree,
};

pub type TxResult<T> = ConflictableTransactionResult<T, QueueError>;

/// Abort the enclosing transaction with the given error.
pub fn abort<T>(err: impl Into<QueueError>) -> TxResult<T> {
    Err(ConflictableTransactionError::Abort(err.into()))
}

fn storage<T>(result: Result<T, StorageError>) -> TxResult<T> {
    result.map_err(|err| ConflictableTransactionError::Abort(QueueError::Storage(err)))
}

pub struct QueueTransaction<'a> {
    pub(crate) patients: &'a TransactionalTree,
    pub(crate) queue: &'a TransactionalTree,
    pub(crate) queue_index: &'a TransactionalTree,
    pub(crate) history: &'a TransactionalTree,
    pub(crate) meta: &'a TransactionalTree,
}

impl QueueTransaction<'_> {
    /// Current maximum arrival order + 1 (1 for an empty store), consumed immediately.
    pub fn next_arrival_order(&self) -> TxResult<u64> {
        self.next_sequence(ARRIVAL_SEQ_KEY)
    }

    fn next_sequence(&self, key: &[u8]) -> TxResult<u64> {
        let current = match self.meta.get(key)? {
            Some(raw) => storage(decode_sequence(&raw))?,
            None => 0,
        };
        let next = current + 1;
        self.meta.insert(key.to_vec(), next.to_be_bytes().to_vec())?;
        Ok(next)
    }

    /// Persist the canonical record and a queue entry.
    ///
    /// Aborts with `QueueError::Conflict` if the id already exists.
    pub fn insert(&self, patient: &Patient, priority_score: u32, arrival_order: u64) -> TxResult<()> {
        let id_key = patient.id.to_bytes().to_vec();
        if self.patients.get(&id_key)?.is_some() {
            return abort(QueueError::Conflict(patient.id));
        }

        let record = PatientRecord::new(patient, arrival_order);
        self.patients.insert(id_key.clone(), storage(record.encode())?)?;

        let entry = QueueEntry {
            patient_id: patient.id,
            priority_score,
            arrival_order,
        };
        let position_key = entry.position().to_key().to_vec();
        self.queue.insert(position_key.clone(), storage(entry.encode())?)?;
        self.queue_index.insert(id_key, position_key)?;
        self.next_sequence(QUEUE_VERSION_KEY)?;
        Ok(())
    }

    /// Delete the queue entry for `id`. Returns false if it was not queued.
    pub fn remove_from_queue(&self, id: &PatientId) -> TxResult<bool> {
        let id_key = id.to_bytes().to_vec();
        let Some(position_key) = self.queue_index.remove(id_key)? else {
            return Ok(false);
        };
        if QueuePosition::from_key(&position_key).is_none() {
            return abort(StorageError::Corrupt(format!(
                "queue index for {} holds a malformed position key",
                id
            )));
        }
        let removed = self.queue.remove(position_key)?.is_some();
        self.next_sequence(QUEUE_VERSION_KEY)?;
        Ok(removed)
    }

    /// Append an audit record under the next history sequence.
    pub fn record_audit(&self, id: &PatientId, action: AuditAction) -> TxResult<AuditRecord> {
        let sequence = self.next_sequence(HISTORY_SEQ_KEY)?;
        let record = AuditRecord::new(sequence, *id, action);
        self.history
            .insert(record.key().to_vec(), storage(record.encode())?)?;
        Ok(record)
    }
}
