//! Payroll service facade.
//!
//! [`PayrollService`] ties the parser, the event store and the report
//! views together. It is the single entry point transport adapters call.

use tracing::{info, warn};

use crate::config::ConfigLoader;
use crate::error::{EngineResult, ErrorCode};
use crate::ingest::{UploadedFile, parse_payload};
use crate::models::{
    EXIT, EmployeeFinancialReport, Event, EventsByMonth, MonthlyAmountReport,
    MonthlySalaryReport, ONBOARD, YearlyFinancialEntry,
};
use crate::reports;
use crate::store::EventStore;

/// Outcome of ingesting a single uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Events parsed from the file and durably stored.
    pub stored: Vec<Event>,
    /// Descriptions of every reportable problem in the file.
    pub error_descriptions: Vec<String>,
}

impl FileOutcome {
    /// Returns true when every line parsed and the events were stored.
    pub fn is_success(&self) -> bool {
        self.error_descriptions.is_empty()
    }
}

/// Outcome of ingesting every file of one upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestionOutcome {
    /// True only if every line of every file parsed and was stored.
    pub success: bool,
    /// Stored events across all files; populated on full success only.
    pub events: Vec<Event>,
    /// Accumulated problem descriptions; populated on failure only.
    pub error_descriptions: Vec<String>,
}

/// Ingestion and reporting over one event store.
#[derive(Debug, Clone, Default)]
pub struct PayrollService {
    store: EventStore,
}

impl PayrollService {
    /// Creates a service over `store`.
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Creates a service over the store named by the configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(EventStore::new(config.data_file()))
    }

    /// Returns the underlying event store.
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Parses one file and appends its valid events to the store.
    ///
    /// Valid events are stored even when other lines of the file are
    /// rejected. A file that is not UTF-8 or cannot be stored contributes a
    /// single description and stores nothing.
    pub fn process_file(&self, file: &UploadedFile) -> FileOutcome {
        let content = match std::str::from_utf8(&file.bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %file.name, error = %e, "Upload is not valid UTF-8");
                return FileOutcome {
                    stored: Vec::new(),
                    error_descriptions: vec![format!(
                        "{}: {}: content is not valid UTF-8",
                        file.name,
                        ErrorCode::ErrorProcessingFile.description()
                    )],
                };
            }
        };

        let parsed = parse_payload(content);
        let mut error_descriptions: Vec<String> = parsed
            .rejections
            .iter()
            .map(|rejection| format!("{}: {}", file.name, rejection))
            .collect();

        let stored = match self.store.append(&parsed.events) {
            Ok(total) => {
                info!(
                    file = %file.name,
                    parsed = parsed.events.len(),
                    rejected = parsed.rejections.len(),
                    total,
                    "Processed upload"
                );
                parsed.events
            }
            Err(err) => {
                warn!(file = %file.name, error = %err, "Failed to store upload");
                error_descriptions.push(format!(
                    "{}: {}: {}",
                    file.name,
                    ErrorCode::ErrorProcessingFile.description(),
                    err
                ));
                Vec::new()
            }
        };

        FileOutcome {
            stored,
            error_descriptions,
        }
    }

    /// Ingests every file of one upload, in order.
    ///
    /// The outcome reports success only if every file succeeded. Events
    /// stored from clean files stay stored when another file fails.
    pub fn ingest(&self, files: &[UploadedFile]) -> IngestionOutcome {
        let mut events = Vec::new();
        let mut error_descriptions = Vec::new();

        for file in files {
            let outcome = self.process_file(file);
            info!(file = %file.name, success = outcome.is_success(), "File processed");
            events.extend(outcome.stored);
            error_descriptions.extend(outcome.error_descriptions);
        }

        let success = error_descriptions.is_empty();
        info!(files = files.len(), success, "Ingestion finished");

        if !success {
            events.clear();
        }

        IngestionOutcome {
            success,
            events,
            error_descriptions,
        }
    }

    /// Number of distinct employees in the history.
    pub fn total_employees(&self) -> usize {
        reports::count_total_employees(&self.store.read_all())
    }

    /// Salary totals per month name.
    pub fn monthly_salary_report(&self) -> EngineResult<Vec<MonthlySalaryReport>> {
        reports::monthly_salary_report(&self.store.read_all())
    }

    /// One row per stored event.
    pub fn yearly_financial_report(&self) -> Vec<YearlyFinancialEntry> {
        reports::yearly_financial_report(&self.store.read_all())
    }

    /// Payment totals per employee.
    pub fn employee_financial_report(&self) -> EngineResult<Vec<EmployeeFinancialReport>> {
        reports::employee_financial_report(&self.store.read_all())
    }

    /// Payment totals per two-digit month number.
    pub fn monthly_amount_report(&self) -> EngineResult<Vec<MonthlyAmountReport>> {
        reports::monthly_amount_report(&self.store.read_all())
    }

    /// Events of `event_type` grouped by two-digit month number.
    pub fn events_by_month(&self, event_type: &str) -> EventsByMonth {
        reports::events_by_month(&self.store.read_all(), event_type)
    }

    /// Onboarding events grouped by month.
    pub fn monthly_joins(&self) -> EventsByMonth {
        self.events_by_month(ONBOARD)
    }

    /// Exit events grouped by month.
    pub fn monthly_exits(&self) -> EventsByMonth {
        self.events_by_month(EXIT)
    }
}
