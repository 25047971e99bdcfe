//! Integration tests for admission and call-next ordering

use super::test_utils::{open_service, patient};
use triage_queue::audit::AuditAction;
use triage_queue::PriorityLevel;

/// Scores 10, 25, 30, 45: eligibility lifts MEDIUM(65) and EXTREME(70).
#[test]
fn test_mixed_priorities_called_by_score() {
    let (_dir, service) = open_service();

    let rafael = service.admit(patient("Rafael", 19, PriorityLevel::Low)).unwrap();
    let maria = service.admit(patient("Maria", 65, PriorityLevel::Medium)).unwrap();
    let joao = service.admit(patient("Joao", 45, PriorityLevel::High)).unwrap();
    let ana = service.admit(patient("Ana", 70, PriorityLevel::Extreme)).unwrap();

    let scores: Vec<u32> = [&rafael, &maria, &joao, &ana]
        .iter()
        .map(|p| p.priority_score())
        .collect();
    assert_eq!(scores, vec![10, 25, 30, 45]);

    let mut called = Vec::new();
    while let Some(next) = service.call_next().unwrap() {
        called.push(next.id);
    }
    assert_eq!(called, vec![ana.id, joao.id, maria.id, rafael.id]);
    assert!(service.is_empty());
}

#[test]
fn test_equal_priority_called_in_arrival_order() {
    let (_dir, service) = open_service();

    let a = service.admit(patient("Alice", 30, PriorityLevel::High)).unwrap();
    let b = service.admit(patient("Bruno", 31, PriorityLevel::High)).unwrap();

    assert_eq!(service.call_next().unwrap().unwrap().id, a.id);
    assert_eq!(service.call_next().unwrap().unwrap().id, b.id);
}

#[test]
fn test_higher_score_wins_regardless_of_arrival() {
    let (_dir, service) = open_service();

    let early_low = service.admit(patient("Carla", 20, PriorityLevel::Low)).unwrap();
    let late_eligible = service.admit(patient("Dario", 80, PriorityLevel::Low)).unwrap();

    assert!(early_low.arrival_order < late_eligible.arrival_order);
    assert_eq!(service.call_next().unwrap().unwrap().id, late_eligible.id);
    assert_eq!(service.call_next().unwrap().unwrap().id, early_low.id);
}

#[test]
fn test_snapshot_matches_call_order_and_is_read_only() {
    let (_dir, service) = open_service();

    for (name, age, level) in [
        ("Rafael", 19, PriorityLevel::Low),
        ("Maria", 65, PriorityLevel::Medium),
        ("Joao", 45, PriorityLevel::High),
        ("Ana", 70, PriorityLevel::Extreme),
        ("Eva", 50, PriorityLevel::High),
    ] {
        service.admit(patient(name, age, level)).unwrap();
    }

    let snapshot = service.snapshot().unwrap();
    assert_eq!(snapshot.len(), 5);
    assert_eq!(service.size(), 5);

    let mut called = Vec::new();
    while let Some(next) = service.call_next().unwrap() {
        called.push(next);
    }
    assert_eq!(snapshot, called);
}

#[test]
fn test_n_admissions_n_calls_drains_exactly() {
    let (_dir, service) = open_service();

    let mut admitted: Vec<_> = (0..12)
        .map(|i| {
            let level = PriorityLevel::ALL[i % 4];
            service
                .admit(patient("Paciente", 20 + (i as i64) * 5, level))
                .unwrap()
                .id
        })
        .collect();

    let mut called: Vec<_> = (0..12)
        .map(|_| service.call_next().unwrap().unwrap().id)
        .collect();

    assert!(service.is_empty());
    assert!(service.call_next().unwrap().is_none());

    admitted.sort();
    called.sort();
    assert_eq!(admitted, called);
}

#[test]
fn test_empty_call_next_does_not_touch_state() {
    let (_dir, service) = open_service();
    let p = service.admit(patient("Maria", 65, PriorityLevel::Medium)).unwrap();
    service.call_next().unwrap();

    let history_before = service.history().unwrap();
    assert!(service.call_next().unwrap().is_none());
    assert!(service.call_next().unwrap().is_none());
    assert_eq!(service.history().unwrap(), history_before);
    assert!(service.find_by_id(&p.id).unwrap().is_some());
}

#[test]
fn test_find_by_id_round_trip_while_queued_and_after_call() {
    let (_dir, service) = open_service();
    let original = patient("João Silva", 65, PriorityLevel::Medium);
    let admitted = service.admit(original.clone()).unwrap();

    let queued = service.find_by_id(&original.id).unwrap().unwrap();
    assert_eq!(queued.id, original.id);
    assert_eq!(queued.name, original.name);
    assert_eq!(queued.age, original.age);
    assert_eq!(queued.priority, original.priority);
    assert_eq!(queued.arrival_order, admitted.arrival_order);

    service.call_next().unwrap();
    let after = service.find_by_id(&original.id).unwrap().unwrap();
    assert_eq!(after, queued);
    assert!(!service.store().is_queued(&original.id).unwrap());
}

#[test]
fn test_audit_trail_interleaves_actions() {
    let (_dir, service) = open_service();
    let a = service.admit(patient("Alice", 30, PriorityLevel::Low)).unwrap();
    let b = service.admit(patient("Bruno", 30, PriorityLevel::High)).unwrap();
    service.call_next().unwrap();

    let trail: Vec<_> = service
        .history()
        .unwrap()
        .into_iter()
        .map(|r| (r.patient_id, r.action))
        .collect();
    assert_eq!(
        trail,
        vec![
            (a.id, AuditAction::Admitted),
            (b.id, AuditAction::Admitted),
            (b.id, AuditAction::Called),
        ]
    );
}
