//! Concurrent admit / call-next against one shared store

use super::test_utils::{open_service, patient};
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use triage_queue::{PatientId, PriorityLevel};

const THREADS: usize = 8;
const PER_THREAD: usize = 25;

#[test]
fn test_concurrent_admissions_get_unique_arrival_orders() {
    let (_dir, service) = open_service();
    let service = Arc::new(service);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut orders = Vec::with_capacity(PER_THREAD);
                for i in 0..PER_THREAD {
                    let level = PriorityLevel::ALL[(t + i) % 4];
                    let admitted = service.admit(patient("Worker", 40, level)).unwrap();
                    orders.push(admitted.arrival_order.unwrap());
                }
                orders
            })
        })
        .collect();

    let mut all_orders = Vec::new();
    for handle in handles {
        let orders = handle.join().unwrap();
        // Within one caller, arrival order is strictly increasing in call order.
        assert!(orders.windows(2).all(|w| w[0] < w[1]));
        all_orders.extend(orders);
    }

    let total = THREADS * PER_THREAD;
    let unique: HashSet<u64> = all_orders.iter().copied().collect();
    assert_eq!(unique.len(), total);
    assert_eq!(*all_orders.iter().max().unwrap(), total as u64);
    assert_eq!(service.size(), total);
    assert_eq!(service.history().unwrap().len(), total);
}

#[test]
fn test_concurrent_call_next_delivers_each_patient_once() {
    let (_dir, service) = open_service();
    let total = THREADS * PER_THREAD;

    let mut admitted: Vec<PatientId> = (0..total)
        .map(|i| {
            let level = PriorityLevel::ALL[i % 4];
            service.admit(patient("Waiting", 30, level)).unwrap().id
        })
        .collect();

    let service = Arc::new(service);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut called = Vec::new();
                while let Some(p) = service.call_next().unwrap() {
                    called.push(p.id);
                }
                called
            })
        })
        .collect();

    let mut called: Vec<PatientId> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert_eq!(called.len(), total, "every patient delivered exactly once");
    let unique: HashSet<PatientId> = called.iter().copied().collect();
    assert_eq!(unique.len(), total);

    admitted.sort();
    called.sort();
    assert_eq!(admitted, called);
    assert!(service.is_empty());

    let calls = service
        .history()
        .unwrap()
        .into_iter()
        .filter(|r| r.action == triage_queue::audit::AuditAction::Called)
        .count();
    assert_eq!(calls, total);
}

#[test]
fn test_mixed_admit_and_call_next() {
    let (_dir, service) = open_service();
    let service = Arc::new(service);
    let barrier = Arc::new(Barrier::new(2 * THREADS));

    let producers: Vec<_> = (0..THREADS)
        .map(|t| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .map(|i| {
                        let level = PriorityLevel::ALL[(t * i) % 4];
                        service.admit(patient("Mixed", 70, level)).unwrap().id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let consumers: Vec<_> = (0..THREADS)
        .map(|_| {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .filter_map(|_| service.call_next().unwrap())
                    .map(|p| p.id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let admitted: HashSet<PatientId> = producers
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let mut called: Vec<PatientId> = consumers
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    // Drain whatever the consumers did not reach.
    while let Some(p) = service.call_next().unwrap() {
        called.push(p.id);
    }

    let unique: HashSet<PatientId> = called.iter().copied().collect();
    assert_eq!(unique.len(), called.len(), "no patient called twice");
    assert_eq!(unique, admitted);
}

#[test]
fn test_snapshot_never_mixes_states_across_a_call() {
    const BACKLOG: usize = 200;
    const ROUNDS: usize = 100;

    let (_dir, service) = open_service();
    for _ in 0..BACKLOG {
        service.admit(patient("Backlog", 40, PriorityLevel::High)).unwrap();
    }
    let service = Arc::new(service);

    for _ in 0..ROUNDS {
        let head = service.admit(patient("Head", 40, PriorityLevel::Extreme)).unwrap().id;
        let barrier = Arc::new(Barrier::new(2));

        let writer = {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let called = service.call_next().unwrap().unwrap();
                assert_eq!(called.id, head);
                service.admit(patient("Late", 65, PriorityLevel::Medium)).unwrap().id
            })
        };

        barrier.wait();
        let snapshot = service.snapshot().unwrap();
        let late = writer.join().unwrap();

        let ids: HashSet<PatientId> = snapshot.iter().map(|p| p.id).collect();
        assert!(
            !(ids.contains(&head) && ids.contains(&late)),
            "snapshot lists a called patient together with one admitted after the call"
        );
        assert!(snapshot.windows(2).all(|w| w[0].priority_score() >= w[1].priority_score()));
    }
}
