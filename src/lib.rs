//! Triage Queue: durable priority admission queue
//!
//! Patients are ordered by a priority score (class weight plus an eligibility
//! bonus), ties broken by arrival order. Admission and call-next are atomic
//! transactions over the queue store and its audit log.

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod ordering;
pub mod patient;
pub mod priority;
pub mod service;
pub mod store;

pub use error::{QueueError, StorageError, ValidationError};
pub use patient::{Age, Name, Patient, PatientId};
pub use priority::PriorityLevel;
pub use service::QueueService;
