use super::super::domain::{SubjectRecord, MAX_GRADE, MIN_GRADE};

/// Coefficient-weighted mean over graded subjects.
///
/// Returns `0.0` when nothing is graded yet; that value means "no data", not
/// a true zero average.
pub fn compute_average(subjects: &[SubjectRecord]) -> f64 {
    let graded = || {
        subjects
            .iter()
            .filter_map(|subject| subject.grade.map(|grade| (grade, subject.coefficient)))
    };

    let (weighted_sum, coefficient_sum) = weighted_sums(graded(), 1.0);
    if weighted_sum.is_finite() && coefficient_sum.is_finite() {
        return mean(weighted_sum, coefficient_sum);
    }

    // Huge coefficients overflow the plain sums; relative weights keep them finite.
    let largest = graded().fold(0.0, |largest: f64, (_, coefficient)| largest.max(coefficient));
    let (weighted_sum, coefficient_sum) = weighted_sums(graded(), largest);
    mean(weighted_sum, coefficient_sum).clamp(MIN_GRADE, MAX_GRADE)
}

fn weighted_sums(graded: impl Iterator<Item = (f64, f64)>, scale: f64) -> (f64, f64) {
    graded.fold((0.0, 0.0), |(sum, coefs), (grade, coefficient)| {
        let weight = coefficient / scale;
        (sum + grade * weight, coefs + weight)
    })
}

fn mean(weighted_sum: f64, coefficient_sum: f64) -> f64 {
    if coefficient_sum > 0.0 {
        weighted_sum / coefficient_sum
    } else {
        0.0
    }
}

/// A term is populated once any of its subjects carries a grade.
pub fn term_has_data(subjects: &[SubjectRecord]) -> bool {
    subjects.iter().any(SubjectRecord::is_graded)
}

/// Sum of every coefficient in the list, graded or not.
pub fn total_coefficient(subjects: &[SubjectRecord]) -> f64 {
    subjects.iter().map(|subject| subject.coefficient).sum()
}

/// Yearly estimate from the two term averages.
///
/// A term without data never drags the estimate toward zero: the populated
/// term is returned as-is, and the plain mean applies only when both terms
/// have grades.
pub fn annual_average(
    first_average: f64,
    first_has_data: bool,
    second_average: f64,
    second_has_data: bool,
) -> f64 {
    match (first_has_data, second_has_data) {
        (false, false) => 0.0,
        (true, false) => first_average,
        (false, true) => second_average,
        (true, true) => (first_average + second_average) / 2.0,
    }
}
