use super::super::domain::{SubjectId, Term};
use super::super::engine::Mention;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TermAverageView {
    pub term: Term,
    pub term_label: &'static str,
    pub average: f64,
    pub average_display: String,
    pub has_data: bool,
    pub graded_subjects: usize,
    pub total_subjects: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalView {
    pub target_average: f64,
    pub ratio_percent: f64,
    pub reached: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopSubjectView {
    pub id: SubjectId,
    pub name: String,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub top_subject: Option<TopSubjectView>,
    pub point_impact: Option<f64>,
    pub point_impact_display: Option<String>,
}

/// Radar/bar chart point; ungraded subjects plot at zero.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectChartPoint {
    pub name: String,
    pub grade: f64,
    pub full_mark: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub active_term: Term,
    pub active_term_label: &'static str,
    pub terms: Vec<TermAverageView>,
    pub current_average: f64,
    pub current_average_display: String,
    pub annual_average: f64,
    pub annual_average_display: String,
    pub mention: Mention,
    pub goal: GoalView,
    pub total_coefficient: f64,
    pub recommendation: RecommendationView,
    pub chart: Vec<SubjectChartPoint>,
    pub share_message: String,
}

pub fn format_average(value: f64) -> String {
    format!("{value:.2}")
}

pub fn format_point_impact(value: f64) -> String {
    format!("{value:.3}")
}
