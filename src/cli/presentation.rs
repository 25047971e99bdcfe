//! CLI presentation: text and JSON rendering of queue results.

use crate::audit::AuditRecord;
use crate::error::QueueError;
use crate::patient::Patient;
use crate::priority::PriorityLevel;
use crate::store::QueuedPatient;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, QueueError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| QueueError::Storage(crate::store::to_storage_data(e)))
}

fn arrival(patient: &Patient) -> String {
    patient
        .arrival_order
        .map(|order| order.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn colored_priority(level: PriorityLevel) -> String {
    match level {
        PriorityLevel::Extreme => level.red().bold().to_string(),
        PriorityLevel::High => level.yellow().to_string(),
        PriorityLevel::Medium => level.cyan().to_string(),
        PriorityLevel::Low => level.to_string(),
    }
}

pub fn format_admitted(patient: &Patient, format: &str) -> Result<String, QueueError> {
    if format == "json" {
        return to_json(patient);
    }
    Ok(format!(
        "Patient added: {} | Priority: {} | Age: {} | Arrival: {} | Id: {}",
        patient.name,
        colored_priority(patient.priority),
        patient.age,
        arrival(patient),
        patient.id
    ))
}

pub fn format_called(patient: Option<&Patient>, format: &str) -> Result<String, QueueError> {
    if format == "json" {
        return to_json(&patient);
    }
    Ok(match patient {
        Some(p) => format!(
            "Next patient: {} | Priority: {} | Age: {}",
            p.name,
            colored_priority(p.priority),
            p.age
        ),
        None => "No patients in the queue.".to_string(),
    })
}

pub fn format_queue(entries: &[QueuedPatient], format: &str) -> Result<String, QueueError> {
    if format == "json" {
        return to_json(entries);
    }
    if entries.is_empty() {
        return Ok("No patients in the queue.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Name", "Priority", "Age", "Score", "Arrival", "Id"]);
    for (position, queued) in entries.iter().enumerate() {
        let p = &queued.patient;
        table.add_row(vec![
            (position + 1).to_string(),
            p.name.to_string(),
            p.priority.to_string(),
            p.age.to_string(),
            queued.priority_score.to_string(),
            arrival(p),
            p.id.to_string(),
        ]);
    }
    Ok(table.to_string())
}

#[derive(Serialize)]
struct PatientView<'a> {
    #[serde(flatten)]
    patient: &'a Patient,
    queued: bool,
}

pub fn format_patient(patient: &Patient, queued: bool, format: &str) -> Result<String, QueueError> {
    if format == "json" {
        return to_json(&PatientView { patient, queued });
    }
    let status = if queued { "waiting" } else { "called" };
    Ok(format!(
        "{} | Priority: {} | Age: {} | Arrival: {} | Status: {} | Id: {}",
        patient.name,
        patient.priority,
        patient.age,
        arrival(patient),
        status,
        patient.id
    ))
}

pub fn format_history(records: &[AuditRecord], format: &str) -> Result<String, QueueError> {
    if format == "json" {
        return to_json(records);
    }
    if records.is_empty() {
        return Ok("No queue history.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Seq", "Patient Id", "Action", "Recorded At"]);
    for r in records {
        table.add_row(vec![
            r.sequence.to_string(),
            r.patient_id.to_string(),
            r.action.to_string(),
            r.recorded_at(),
        ]);
    }
    Ok(table.to_string())
}
