//! Integration tests for durability across store reopen

use tempfile::TempDir;
use triage_queue::audit::AuditAction;
use triage_queue::store::SledQueueStore;
use triage_queue::{Age, Name, Patient, PriorityLevel, QueueError, QueueService};

fn patient(name: &str, age: i64, priority: PriorityLevel) -> Patient {
    Patient::new(Name::new(name).unwrap(), Age::new(age).unwrap(), priority)
}

#[test]
fn test_queue_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let (low, high) = {
        let service = QueueService::open(temp_dir.path()).unwrap();
        let low = service.admit(patient("Rafael", 19, PriorityLevel::Low)).unwrap();
        let high = service.admit(patient("Joao", 45, PriorityLevel::High)).unwrap();
        service.flush().unwrap();
        (low, high)
    };

    let service = QueueService::open(temp_dir.path()).unwrap();
    assert_eq!(service.size(), 2);
    assert_eq!(service.call_next().unwrap().unwrap().id, high.id);
    assert_eq!(service.call_next().unwrap().unwrap().id, low.id);
}

#[test]
fn test_arrival_order_never_reused_after_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let service = QueueService::open(temp_dir.path()).unwrap();
        service.admit(patient("Ana", 70, PriorityLevel::Extreme)).unwrap();
        service.admit(patient("Maria", 65, PriorityLevel::Medium)).unwrap();
        // Draining the queue must not rewind the sequence.
        while service.call_next().unwrap().is_some() {}
        service.flush().unwrap();
    }

    let service = QueueService::open(temp_dir.path()).unwrap();
    let next = service.admit(patient("Eva", 33, PriorityLevel::Low)).unwrap();
    assert_eq!(next.arrival_order, Some(3));
}

#[test]
fn test_history_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let id = {
        let service = QueueService::open(temp_dir.path()).unwrap();
        let p = service.admit(patient("Ana", 70, PriorityLevel::Extreme)).unwrap();
        service.call_next().unwrap();
        service.flush().unwrap();
        p.id
    };

    let store = SledQueueStore::open(temp_dir.path()).unwrap();
    let actions: Vec<AuditAction> = store
        .audit_log()
        .entries_for(&id)
        .unwrap()
        .into_iter()
        .map(|r| r.action)
        .collect();
    assert_eq!(actions, vec![AuditAction::Admitted, AuditAction::Called]);
}

#[test]
fn test_conflict_after_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let original = patient("Maria", 65, PriorityLevel::Medium);
    {
        let service = QueueService::open(temp_dir.path()).unwrap();
        service.admit(original.clone()).unwrap();
        service.call_next().unwrap();
        service.flush().unwrap();
    }

    // The canonical record outlives the queue entry, so the id stays taken.
    let service = QueueService::open(temp_dir.path()).unwrap();
    let err = service.admit(original.clone()).unwrap_err();
    assert!(matches!(err, QueueError::Conflict(id) if id == original.id));
    assert!(service.is_empty());
}
