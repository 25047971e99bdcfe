//! Persistence layer for the Queue Store

use crate::audit::AuditLog;
use crate::error::{QueueError, StorageError};
use crate::patient::{Patient, PatientId};
use crate::store::transaction::{QueueTransaction, TxResult};
use crate::store::{
    decode_sequence, to_storage_io, PatientRecord, QueueEntry, ARRIVAL_SEQ_KEY,
    QUEUE_VERSION_KEY, TREE_HISTORY, TREE_META, TREE_PATIENTS, TREE_QUEUE, TREE_QUEUE_INDEX,
};
use serde::Serialize;
use sled::transaction::{TransactionError, Transactional};
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;

/// A waiting patient with the score fixed at admission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedPatient {
    #[serde(flatten)]
    pub patient: Patient,
    pub priority_score: u32,
}

/// Sled-based queue store
///
/// Clones share the same underlying database.
#[derive(Clone)]
pub struct SledQueueStore {
    db: Db,
    patients: Tree,
    queue: Tree,
    queue_index: Tree,
    history: Tree,
    meta: Tree,
}

impl SledQueueStore {
    /// Open (or create) a store at the given directory
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path.as_ref()).map_err(|e| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to open sled database: {}", e),
            ))
        })?;
        Self::from_db(db)
    }

    pub fn from_db(db: Db) -> Result<Self, StorageError> {
        let patients = db.open_tree(TREE_PATIENTS).map_err(to_storage_io)?;
        let queue = db.open_tree(TREE_QUEUE).map_err(to_storage_io)?;
        let queue_index = db.open_tree(TREE_QUEUE_INDEX).map_err(to_storage_io)?;
        let history = db.open_tree(TREE_HISTORY).map_err(to_storage_io)?;
        let meta = db.open_tree(TREE_META).map_err(to_storage_io)?;
        Ok(Self {
            db,
            patients,
            queue,
            queue_index,
            history,
            meta,
        })
    }

    pub fn audit_log(&self) -> AuditLog {
        AuditLog::new(self.history.clone())
    }

    /// Run `f` as one serializable transaction over every queue tree.
    ///
    /// An aborted transaction leaves no trace; sled re-runs `f` on conflict.
    pub fn transaction<T, F>(&self, f: F) -> Result<T, QueueError>
    where
        F: Fn(&QueueTransaction<'_>) -> TxResult<T>,
    {
        let trees = (
            &self.patients,
            &self.queue,
            &self.queue_index,
            &self.history,
            &self.meta,
        );
        trees
            .transaction(|(patients, queue, queue_index, history, meta)| {
                let txn = QueueTransaction {
                    patients,
                    queue,
                    queue_index,
                    history,
                    meta,
                };
                f(&txn)
            })
            .map_err(|err| match err {
                TransactionError::Abort(e) => e,
                TransactionError::Storage(e) => QueueError::Storage(to_storage_io(e)),
            })
    }

    /// The queued patient that sorts first under the ordering relation, without removing it
    pub fn select_highest(&self) -> Result<Option<Patient>, StorageError> {
        let Some((_, value)) = self.queue.first().map_err(to_storage_io)? else {
            return Ok(None);
        };
        let entry = QueueEntry::decode(&value)?;
        self.queued_patient(&entry).map(Some)
    }

    /// Delete the queue entry for `id` in its own transaction. No-op if not queued.
    pub fn remove_from_queue(&self, id: &PatientId) -> Result<bool, QueueError> {
        let removed = self.transaction(|txn| txn.remove_from_queue(id))?;
        debug!(patient_id = %id, removed, "Queue entry removal");
        Ok(removed)
    }

    /// Look up the canonical record regardless of queue membership
    pub fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, StorageError> {
        match self.patients.get(id.to_bytes()).map_err(to_storage_io)? {
            Some(raw) => Ok(Some(PatientRecord::decode(&raw)?.into_patient())),
            None => Ok(None),
        }
    }

    /// Check whether a patient is currently waiting
    pub fn is_queued(&self, id: &PatientId) -> Result<bool, StorageError> {
        self.queue_index
            .contains_key(id.to_bytes())
            .map_err(to_storage_io)
    }

    /// All queued patients, sorted by the ordering relation
    pub fn list_all(&self) -> Result<Vec<Patient>, StorageError> {
        Ok(self
            .list_entries()?
            .into_iter()
            .map(|queued| queued.patient)
            .collect())
    }

    /// Queued patients with their stored scores, as of a single committed state.
    ///
    /// Every commit that touches `queue` bumps the queue version under sled's
    /// transaction write lock. A scan bracketed by two equal version reads
    /// therefore saw no partial or interleaved commit; otherwise it is repeated.
    pub fn list_entries(&self) -> Result<Vec<QueuedPatient>, StorageError> {
        loop {
            let before = self.queue_version()?;
            let mut listed = Vec::new();
            for result in self.queue.iter() {
                let (_, value) = result.map_err(to_storage_io)?;
                let entry = QueueEntry::decode(&value)?;
                listed.push(QueuedPatient {
                    patient: self.queued_patient(&entry)?,
                    priority_score: entry.priority_score,
                });
            }
            let after = self.queue_version()?;
            if before == after {
                return Ok(listed);
            }
            debug!(before, after, "Queue changed during scan, rescanning");
        }
    }

    /// Number of committed changes to the queue so far
    pub fn queue_version(&self) -> Result<u64, StorageError> {
        self.read_sequence(QUEUE_VERSION_KEY)
    }

    pub fn count(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Highest arrival order ever assigned (0 if none)
    pub fn last_arrival_order(&self) -> Result<u64, StorageError> {
        self.read_sequence(ARRIVAL_SEQ_KEY)
    }

    fn read_sequence(&self, key: &[u8]) -> Result<u64, StorageError> {
        match self.meta.get(key).map_err(to_storage_io)? {
            Some(raw) => decode_sequence(&raw),
            None => Ok(0),
        }
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush().map_err(to_storage_io)?;
        Ok(())
    }

    fn queued_patient(&self, entry: &QueueEntry) -> Result<Patient, StorageError> {
        self.find_by_id(&entry.patient_id)?.ok_or_else(|| {
            StorageError::Corrupt(format!(
                "queue entry references missing patient {}",
                entry.patient_id
            ))
        })
    }
}
