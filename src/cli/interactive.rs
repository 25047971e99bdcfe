//! Interactive menu session: add patient, call next, show queue, exit.

use crate::cli::presentation::{format_admitted, format_called, format_queue};
use crate::error::QueueError;
use crate::patient::{Age, Name, Patient};
use crate::priority::PriorityLevel;
use crate::service::QueueService;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tracing::info;

const MENU: [&str; 4] = [
    "Add patient",
    "Call next patient",
    "Show current queue",
    "Exit",
];

fn prompt_error(err: dialoguer::Error) -> QueueError {
    QueueError::Input(err.to_string())
}

/// Run the menu loop until the operator picks Exit.
pub fn run(service: &QueueService) -> Result<String, QueueError> {
    let theme = ColorfulTheme::default();
    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("HOSPITAL QUEUE SYSTEM")
            .items(&MENU[..])
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match choice {
            0 => {
                let patient = prompt_patient(&theme)?;
                let admitted = service.admit(patient)?;
                service.flush()?;
                println!("{}", format_admitted(&admitted, "text")?);
            }
            1 => {
                let called = service.call_next()?;
                service.flush()?;
                println!("{}", format_called(called.as_ref(), "text")?);
            }
            2 => println!("{}", format_queue(&service.snapshot_entries()?, "text")?),
            _ => {
                info!("Interactive session ended");
                return Ok("Exiting...".to_string());
            }
        }
    }
}

fn prompt_patient(theme: &ColorfulTheme) -> Result<Patient, QueueError> {
    let name: String = Input::with_theme(theme)
        .with_prompt("Name")
        .validate_with(|input: &String| -> Result<(), String> {
            Name::new(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;

    let age: i64 = Input::with_theme(theme)
        .with_prompt("Age")
        .validate_with(|input: &i64| -> Result<(), String> {
            Age::new(*input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_error)?;

    let labels: Vec<String> = PriorityLevel::ALL
        .iter()
        .map(|level| format!("{} - {}", level.weight(), level))
        .collect();
    let level = Select::with_theme(theme)
        .with_prompt("Priority")
        .items(labels.as_slice())
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    Ok(Patient::new(
        Name::new(&name)?,
        Age::new(age)?,
        PriorityLevel::ALL[level],
    ))
}
