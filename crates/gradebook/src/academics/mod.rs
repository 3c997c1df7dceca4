//! Report-card tracking: subject records per term, weighted averages and the
//! insights derived from them.

pub mod catalog;
pub mod domain;
pub mod engine;
pub mod import;
pub mod report;
pub mod router;
pub mod service;
mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogError, EducationLevel, SubjectTemplate, YearLevel};
pub use domain::{GradebookError, SubjectId, SubjectRecord, Term};
pub use import::{GradesheetImportError, GradesheetImporter};
pub use report::{GradebookReport, ReportSummary, TermAverage};
pub use router::{gradebook_router, GradebookView};
pub use service::{FieldInput, GradebookService, GradebookServiceError, SubjectUpdate};
pub use state::{GradebookState, TermSheets};
pub use store::{InMemoryStore, JsonFileStore, SnapshotStore, StoreError};
