use super::super::domain::{SubjectRecord, Term, MAX_GRADE};
use super::super::engine::{
    annual_average, classify, compute_average, progress, recommend, term_has_data,
    total_coefficient, GoalProgress, ImpactRecommendation, Mention,
};
use super::super::state::GradebookState;
use super::views::{
    format_average, format_point_impact, GoalView, RecommendationView, ReportSummary,
    SubjectChartPoint, TermAverageView, TopSubjectView,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TermAverage {
    pub term: Term,
    pub average: f64,
    pub has_data: bool,
    pub graded_subjects: usize,
    pub total_subjects: usize,
}

impl TermAverage {
    pub fn of(term: Term, subjects: &[SubjectRecord]) -> Self {
        Self {
            term,
            average: compute_average(subjects),
            has_data: term_has_data(subjects),
            graded_subjects: subjects.iter().filter(|s| s.is_graded()).count(),
            total_subjects: subjects.len(),
        }
    }
}

/// Every derived figure for one gradebook snapshot, recomputed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct GradebookReport<'a> {
    pub active_term: Term,
    pub first: TermAverage,
    pub second: TermAverage,
    pub current_average: f64,
    pub annual_average: f64,
    pub mention: Mention,
    pub target_average: f64,
    pub goal: GoalProgress,
    pub total_coefficient: f64,
    pub recommendation: ImpactRecommendation<'a>,
    pub subjects: &'a [SubjectRecord],
}

impl<'a> GradebookReport<'a> {
    pub fn from_state(state: &'a GradebookState) -> Self {
        let first = TermAverage::of(Term::First, state.subjects(Term::First));
        let second = TermAverage::of(Term::Second, state.subjects(Term::Second));
        let annual = annual_average(
            first.average,
            first.has_data,
            second.average,
            second.has_data,
        );

        let current_average = match state.active_term {
            Term::First => first.average,
            Term::Second => second.average,
        };

        let subjects = state.active_subjects();
        let total = total_coefficient(subjects);

        Self {
            active_term: state.active_term,
            current_average,
            annual_average: annual,
            mention: classify(current_average),
            target_average: state.target_average,
            goal: progress(current_average, state.target_average),
            total_coefficient: total,
            recommendation: recommend(subjects, total),
            subjects,
            first,
            second,
        }
    }

    pub fn term(&self, term: Term) -> &TermAverage {
        match term {
            Term::First => &self.first,
            Term::Second => &self.second,
        }
    }

    pub fn summary(&self) -> ReportSummary {
        let terms = Term::ordered()
            .into_iter()
            .map(|term| {
                let entry = self.term(term);
                TermAverageView {
                    term,
                    term_label: term.label(),
                    average: entry.average,
                    average_display: format_average(entry.average),
                    has_data: entry.has_data,
                    graded_subjects: entry.graded_subjects,
                    total_subjects: entry.total_subjects,
                }
            })
            .collect();

        let chart = self
            .subjects
            .iter()
            .map(|subject| SubjectChartPoint {
                name: subject.name.clone(),
                grade: subject.grade.unwrap_or(0.0),
                full_mark: MAX_GRADE,
            })
            .collect();

        let recommendation = RecommendationView {
            top_subject: self.recommendation.top_subject.map(|subject| TopSubjectView {
                id: subject.id.clone(),
                name: subject.name.clone(),
                coefficient: subject.coefficient,
            }),
            point_impact: self.recommendation.point_impact,
            point_impact_display: self.recommendation.point_impact.map(format_point_impact),
        };

        ReportSummary {
            active_term: self.active_term,
            active_term_label: self.active_term.label(),
            terms,
            current_average: self.current_average,
            current_average_display: format_average(self.current_average),
            annual_average: self.annual_average,
            annual_average_display: format_average(self.annual_average),
            mention: self.mention.clone(),
            goal: GoalView {
                target_average: self.target_average,
                ratio_percent: self.goal.ratio_percent,
                reached: self.goal.reached,
            },
            total_coefficient: self.total_coefficient,
            recommendation,
            chart,
            share_message: self.share_message(),
        }
    }

    pub fn share_message(&self) -> String {
        format!(
            "Finished the term with an average of {}",
            format_average(self.current_average)
        )
    }
}
