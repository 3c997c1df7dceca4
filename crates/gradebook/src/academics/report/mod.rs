mod summary;
pub mod views;

pub use summary::{GradebookReport, TermAverage};
pub use views::ReportSummary;
