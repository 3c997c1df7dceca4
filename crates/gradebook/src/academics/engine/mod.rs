//! Pure computations over subject records: averages, mention tiers, goal
//! progress and the point-impact recommendation.
//!
//! Nothing here caches or mutates; callers recompute on every state change.

mod averaging;
mod goal;
mod impact;
mod mention;

pub use averaging::{annual_average, compute_average, term_has_data, total_coefficient};
pub use goal::{progress, GoalProgress};
pub use impact::{recommend, ImpactRecommendation};
pub use mention::{classify, Mention, MentionTier};
