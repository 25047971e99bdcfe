//! CLI route: single route table and run context. Dispatches to the queue service and presentation.

use crate::cli::help::{command_name, is_mutating};
use crate::cli::interactive;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_admitted, format_called, format_history, format_patient, format_queue,
};
use crate::config::{ConfigLoader, TriageConfig};
use crate::error::{QueueError, StorageError, ValidationError};
use crate::patient::{Age, Name, Patient, PatientId};
use crate::priority::PriorityLevel;
use crate::service::QueueService;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Runtime context for CLI execution: resolved config and the queue service.
pub struct RunContext {
    service: QueueService,
    config: TriageConfig,
    store_path: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, QueueError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::from_config(config, &workspace_root)
    }

    pub fn from_config(config: TriageConfig, workspace_root: &Path) -> Result<Self, QueueError> {
        let store_path = config.storage.resolve_path(workspace_root);
        std::fs::create_dir_all(&store_path)
            .map_err(|e| QueueError::Storage(StorageError::Io(e)))?;
        let service = QueueService::open(&store_path)?;
        debug!(store_path = %store_path.display(), "Queue store opened");
        Ok(Self {
            service,
            config,
            store_path,
        })
    }

    pub fn service(&self) -> &QueueService {
        &self.service
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, QueueError> {
        debug!(command = command_name(command), "Executing command");
        let output = self.execute_inner(command)?;
        if is_mutating(command) {
            self.service.flush()?;
        }
        Ok(output)
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, QueueError> {
        match command {
            Commands::Admit {
                name,
                age,
                priority,
                format,
            } => {
                let patient = parse_patient(name, *age, priority)?;
                let admitted = self.service.admit(patient)?;
                format_admitted(&admitted, format)
            }
            Commands::Next { format } => {
                let called = self.service.call_next()?;
                format_called(called.as_ref(), format)
            }
            Commands::List { format } => {
                format_queue(&self.service.snapshot_entries()?, format)
            }
            Commands::Show { id, format } => {
                let id: PatientId = id.parse()?;
                let patient = self
                    .service
                    .find_by_id(&id)?
                    .ok_or(QueueError::NotFound(id))?;
                let queued = self.service.store().is_queued(&id)?;
                format_patient(&patient, queued, format)
            }
            Commands::Size => Ok(self.service.size().to_string()),
            Commands::History { id, format } => {
                let records = match id {
                    Some(raw) => {
                        let id: PatientId = raw.parse()?;
                        self.service.history_for(&id)?
                    }
                    None => self.service.history()?,
                };
                format_history(&records, format)
            }
            Commands::Config => self.config.to_toml_string(),
            Commands::Interactive => interactive::run(&self.service),
        }
    }
}

/// Validate raw CLI input into a not-yet-admitted patient.
pub fn parse_patient(name: &str, age: i64, priority: &str) -> Result<Patient, ValidationError> {
    let name = Name::new(name)?;
    let age = Age::new(age)?;
    let priority: PriorityLevel = priority.parse()?;
    Ok(Patient::new(name, age, priority))
}
