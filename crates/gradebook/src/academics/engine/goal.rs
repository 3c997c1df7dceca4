use serde::Serialize;

/// Completion of the current average toward the chosen target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub ratio_percent: f64,
    pub reached: bool,
}

/// `ratio_percent` is `current / target` in whole percent, capped at 100.
///
/// A non-positive target cannot come from the target selector; it saturates
/// at 100% instead of dividing by zero.
pub fn progress(current: f64, target: f64) -> GoalProgress {
    let reached = current >= target;
    let ratio_percent = if target > 0.0 {
        (current / target * 100.0).round().min(100.0)
    } else {
        100.0
    };

    GoalProgress {
        ratio_percent,
        reached,
    }
}
