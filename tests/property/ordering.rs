//! Property-based tests for scoring and ordering

use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use tempfile::TempDir;
use triage_queue::ordering::QueuePosition;
use triage_queue::priority::{score, ELIGIBILITY_BONUS};
use triage_queue::{Age, Name, Patient, PriorityLevel, QueueService};

fn level_strategy() -> impl Strategy<Value = PriorityLevel> {
    prop::sample::select(PriorityLevel::ALL.to_vec())
}

/// score is deterministic, increasing in weight, and offset by the bonus exactly when eligible
#[test]
fn test_score_properties() {
    let mut runner = TestRunner::default();

    runner
        .run(
            &(level_strategy(), level_strategy(), any::<bool>()),
            |(a, b, eligible)| {
                assert_eq!(score(a, eligible), score(a, eligible));
                assert_eq!(score(a, true), score(a, false) + ELIGIBILITY_BONUS);
                if a.weight() < b.weight() {
                    prop_assert!(score(a, eligible) < score(b, eligible));
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Position key byte order agrees with the ordering relation
#[test]
fn test_position_key_order_matches_ord() {
    let mut runner = TestRunner::default();

    runner
        .run(
            &(any::<u32>(), any::<u64>(), any::<u32>(), any::<u64>()),
            |(s1, a1, s2, a2)| {
                let p1 = QueuePosition::new(s1, a1);
                let p2 = QueuePosition::new(s2, a2);
                prop_assert_eq!(p1.cmp(&p2), p1.to_key().cmp(&p2.to_key()));
                prop_assert_eq!(QueuePosition::from_key(&p1.to_key()), Some(p1));
                Ok(())
            },
        )
        .unwrap();
}

/// Draining the queue yields patients sorted by (score desc, arrival asc)
#[test]
fn test_call_next_follows_ordering_relation() {
    let mut runner = TestRunner::new(Config::with_cases(24));

    runner
        .run(
            &prop::collection::vec((level_strategy(), 0i64..=130), 0..20),
            |arrivals| {
                let temp_dir = TempDir::new().unwrap();
                let service = QueueService::open(temp_dir.path()).unwrap();

                let mut expected = Vec::new();
                for (level, age) in &arrivals {
                    let p = Patient::new(
                        Name::new("Prop").unwrap(),
                        Age::new(*age).unwrap(),
                        *level,
                    );
                    let admitted = service.admit(p).unwrap();
                    let order = admitted.arrival_order.unwrap();
                    expected.push((QueuePosition::new(admitted.priority_score(), order), admitted.id));
                }
                expected.sort_by_key(|(position, _)| *position);

                let mut called = Vec::new();
                while let Some(p) = service.call_next().unwrap() {
                    called.push(p.id);
                }

                let expected_ids: Vec<_> = expected.into_iter().map(|(_, id)| id).collect();
                prop_assert_eq!(called, expected_ids);
                prop_assert!(service.is_empty());
                Ok(())
            },
        )
        .unwrap();
}
