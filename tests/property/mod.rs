//! Property-based tests for scoring and ordering guarantees

mod ordering;
