use super::super::domain::SubjectRecord;
use serde::Serialize;

/// Subject with the most weight, plus the average gain of one extra point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactRecommendation<'a> {
    pub top_subject: Option<&'a SubjectRecord>,
    /// `None` when the total coefficient is not positive.
    pub point_impact: Option<f64>,
}

/// Picks the first subject holding the maximal coefficient.
///
/// `point_impact` is `1 / total_coefficient`: under a weighted mean a single
/// extra point is worth the same for every subject, so the value does not
/// depend on which subject is recommended.
pub fn recommend(subjects: &[SubjectRecord], total_coefficient: f64) -> ImpactRecommendation<'_> {
    let top_subject = subjects.iter().fold(None, |best: Option<&SubjectRecord>, subject| {
        match best {
            Some(current) if subject.coefficient <= current.coefficient => Some(current),
            _ => Some(subject),
        }
    });

    let point_impact = if total_coefficient > 0.0 && total_coefficient.is_finite() {
        Some(1.0 / total_coefficient)
    } else {
        None
    };

    ImpactRecommendation {
        top_subject,
        point_impact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academics::engine::total_coefficient;

    #[test]
    fn first_maximal_coefficient_wins_ties() {
        let subjects = vec![
            SubjectRecord::new("A", 2.0),
            SubjectRecord::new("B", 3.0),
            SubjectRecord::new("C", 3.0),
        ];
        let total = total_coefficient(&subjects);
        let recommendation = recommend(&subjects, total);

        let top = recommendation.top_subject.expect("top subject");
        assert_eq!(top.name, "B");
        assert_eq!(recommendation.point_impact, Some(0.125));
    }

    #[test]
    fn empty_list_has_no_recommendation() {
        let recommendation = recommend(&[], 0.0);
        assert!(recommendation.top_subject.is_none());
        assert!(recommendation.point_impact.is_none());
    }

    #[test]
    fn ungraded_subjects_are_still_candidates() {
        let subjects = vec![
            SubjectRecord::new("Graded", 1.0).with_grade(18.0),
            SubjectRecord::new("Heavy", 7.0),
        ];
        let recommendation = recommend(&subjects, 8.0);
        assert_eq!(recommendation.top_subject.map(|s| s.name.as_str()), Some("Heavy"));
    }

    #[test]
    fn impact_is_unrounded() {
        let subjects = vec![SubjectRecord::new("A", 3.0)];
        let recommendation = recommend(&subjects, 3.0);
        assert_eq!(recommendation.point_impact, Some(1.0 / 3.0));
    }
}
