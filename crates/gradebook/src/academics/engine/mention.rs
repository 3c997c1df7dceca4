use serde::{Deserialize, Serialize};

/// Qualitative classification of an average, highest tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionTier {
    VeryGood,
    Good,
    FairlyGood,
    Passing,
    NearPass,
    NotMet,
}

impl MentionTier {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::VeryGood,
            Self::Good,
            Self::FairlyGood,
            Self::Passing,
            Self::NearPass,
            Self::NotMet,
        ]
    }

    /// Inclusive lower bound; `None` for the fallback tier.
    pub const fn threshold(self) -> Option<f64> {
        match self {
            Self::VeryGood => Some(16.0),
            Self::Good => Some(14.0),
            Self::FairlyGood => Some(12.0),
            Self::Passing => Some(10.0),
            Self::NearPass => Some(9.5),
            Self::NotMet => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::FairlyGood => "Fairly Good",
            Self::Passing => "Passing",
            Self::NearPass => "Near Pass",
            Self::NotMet => "Not Met",
        }
    }

    /// Label as printed on Moroccan report cards.
    pub const fn local_label(self) -> &'static str {
        match self {
            Self::VeryGood => "حسن جداً",
            Self::Good => "حسن",
            Self::FairlyGood => "مستحسن",
            Self::Passing => "مقبول",
            Self::NearPass => "قريب جداً",
            Self::NotMet => "غير مستوف",
        }
    }

    pub const fn is_passing(self) -> bool {
        !matches!(self, Self::NearPass | Self::NotMet)
    }

    pub const fn messages(self) -> &'static [&'static str] {
        match self {
            Self::VeryGood => &[
                "Outstanding work, you are among the best of your class.",
                "Keep this rhythm and the top honours are yours.",
                "Excellence is a habit and you are building it.",
            ],
            Self::Good => &[
                "Great results, the next tier is within reach.",
                "Solid and consistent, push a little more on your strongest subjects.",
                "You are well above the bar, aim higher.",
            ],
            Self::FairlyGood => &[
                "Good progress, keep working steadily.",
                "A few more points in the heavy subjects will lift your mention.",
                "You are on the right track.",
            ],
            Self::Passing => &[
                "You passed, now build a comfortable margin.",
                "Focus on the subjects with the largest coefficients.",
                "Every extra point counts from here.",
            ],
            Self::NearPass => &[
                "So close, a small effort gets you over the line.",
                "Half a point separates you from passing, do not give up.",
                "Target one high-coefficient subject and you are there.",
            ],
            Self::NotMet => &[
                "This term is not over, plan your revision subject by subject.",
                "Ask for help early and tackle one subject at a time.",
                "Set a realistic goal and move toward it every week.",
            ],
        }
    }
}

/// Classification record handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mention {
    pub tier: MentionTier,
    pub label: &'static str,
    pub local_label: &'static str,
    pub messages: &'static [&'static str],
}

impl From<MentionTier> for Mention {
    fn from(tier: MentionTier) -> Self {
        Self {
            tier,
            label: tier.label(),
            local_label: tier.local_label(),
            messages: tier.messages(),
        }
    }
}

/// Maps any average onto a tier. Total over all `f64`: values below 9.5,
/// negatives and NaN fall through to [`MentionTier::NotMet`].
pub fn classify(average: f64) -> Mention {
    let tier = MentionTier::ordered()
        .into_iter()
        .find(|tier| tier.threshold().is_some_and(|bound| average >= bound))
        .unwrap_or(MentionTier::NotMet);
    Mention::from(tier)
}
