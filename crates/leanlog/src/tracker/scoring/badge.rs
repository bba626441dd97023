use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTier {
    Elite,
    GoalMet,
    AlmostThere,
    AdjustCourse,
    Reorganize,
}

impl BadgeTier {
    /// Highest tier first; the first floor at or below the score wins.
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Elite,
            Self::GoalMet,
            Self::AlmostThere,
            Self::AdjustCourse,
            Self::Reorganize,
        ]
    }

    pub const fn floor(self) -> u8 {
        match self {
            Self::Elite => 90,
            Self::GoalMet => 80,
            Self::AlmostThere => 65,
            Self::AdjustCourse => 45,
            Self::Reorganize => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Elite => "Elite",
            Self::GoalMet => "Meta batida",
            Self::AlmostThere => "Quase lá",
            Self::AdjustCourse => "Ajustar rota",
            Self::Reorganize => "Reorganizar",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Elite => "🏅",
            Self::GoalMet => "✅",
            Self::AlmostThere => "🟡",
            Self::AdjustCourse => "🛠️",
            Self::Reorganize => "🚨",
        }
    }
}

/// Qualitative label for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub tier: BadgeTier,
    pub label: &'static str,
    pub icon: &'static str,
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.icon, self.label)
    }
}

pub fn classify(total: u8) -> Badge {
    let tier = BadgeTier::ordered()
        .into_iter()
        .find(|tier| total >= tier.floor())
        .unwrap_or(BadgeTier::Reorganize);

    Badge {
        tier,
        label: tier.label(),
        icon: tier.icon(),
    }
}
