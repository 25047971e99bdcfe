//! Queue Service
//!
//! Orchestrates the Queue Store and the Audit Log into two atomic composite
//! operations, `admit` and `call_next`, plus read-only queries. Each composite
//! operation is a single transaction: either every step commits or none does.
//! The service does not retry failed operations; because they are atomic, a
//! caller-level retry is always safe.

use crate::audit::{AuditAction, AuditRecord};
use crate::error::QueueError;
use crate::patient::{Patient, PatientId};
use crate::priority;
use crate::store::{QueuedPatient, SledQueueStore};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct QueueService {
    store: SledQueueStore,
}

impl QueueService {
    pub fn new(store: SledQueueStore) -> Self {
        Self { store }
    }

    /// Open a service over the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, QueueError> {
        Ok(Self::new(SledQueueStore::open(path)?))
    }

    pub fn store(&self) -> &SledQueueStore {
        &self.store
    }

    /// Admit a patient: assign arrival order, compute score, insert, audit.
    ///
    /// Returns the patient carrying its assigned arrival order. Fails with
    /// `QueueError::Conflict` if the id already exists; nothing is persisted
    /// on failure.
    pub fn admit(&self, patient: Patient) -> Result<Patient, QueueError> {
        let admitted = self.store.transaction(|txn| {
            let arrival_order = txn.next_arrival_order()?;
            let score = priority::score(patient.priority, patient.is_eligible());
            txn.insert(&patient, score, arrival_order)?;
            txn.record_audit(&patient.id, AuditAction::Admitted)?;
            Ok((arrival_order, score))
        });

        let (arrival_order, score) = match admitted {
            Ok(assigned) => assigned,
            Err(QueueError::Conflict(id)) => {
                warn!(patient_id = %id, "Rejected admission of existing patient");
                return Err(QueueError::Conflict(id));
            }
            Err(e) => return Err(e),
        };

        info!(
            patient_id = %patient.id,
            name = %patient.name,
            priority = %patient.priority,
            age = patient.age.years(),
            score,
            arrival_order,
            "Patient admitted"
        );

        Ok(Patient {
            arrival_order: Some(arrival_order),
            ..patient
        })
    }

    /// Remove and return the highest-priority patient, or `None` if the queue is empty.
    ///
    /// Select-then-remove is optimistic: if another caller removes the selected
    /// entry first, the removal reports nothing removed and the select is
    /// repeated. A patient is therefore delivered at most once.
    pub fn call_next(&self) -> Result<Option<Patient>, QueueError> {
        loop {
            let Some(candidate) = self.store.select_highest()? else {
                debug!("Queue empty, no patient to call");
                return Ok(None);
            };

            let called = self.store.transaction(|txn| {
                if !txn.remove_from_queue(&candidate.id)? {
                    return Ok(false);
                }
                txn.record_audit(&candidate.id, AuditAction::Called)?;
                Ok(true)
            })?;

            if called {
                info!(
                    patient_id = %candidate.id,
                    name = %candidate.name,
                    priority = %candidate.priority,
                    age = candidate.age.years(),
                    "Patient called"
                );
                return Ok(Some(candidate));
            }

            warn!(patient_id = %candidate.id, "Lost race for queue head, reselecting");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn size(&self) -> usize {
        self.store.count()
    }

    /// Queued patients in call order, as of one committed state
    pub fn snapshot(&self) -> Result<Vec<Patient>, QueueError> {
        Ok(self.store.list_all()?)
    }

    /// Like `snapshot`, with each patient's score as fixed at admission
    pub fn snapshot_entries(&self) -> Result<Vec<QueuedPatient>, QueueError> {
        Ok(self.store.list_entries()?)
    }

    pub fn find_by_id(&self, id: &PatientId) -> Result<Option<Patient>, QueueError> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Full audit trail in append order
    pub fn history(&self) -> Result<Vec<AuditRecord>, QueueError> {
        Ok(self.store.audit_log().entries()?)
    }

    pub fn history_for(&self, id: &PatientId) -> Result<Vec<AuditRecord>, QueueError> {
        Ok(self.store.audit_log().entries_for(id)?)
    }

    pub fn flush(&self) -> Result<(), QueueError> {
        Ok(self.store.flush()?)
    }
}
