mod badge;
mod rules;

pub use badge::{classify, Badge, BadgeTier};
pub use rules::{Bound, Tier, CARDIO_TIERS, MEAL_TIERS, SLEEP_TIERS, STEP_TIERS};

use super::domain::DailyRecord;
use super::goals::GoalConfig;
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies one goal configuration to a day.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    goals: GoalConfig,
}

impl ScoreEngine {
    pub fn new(goals: GoalConfig) -> Self {
        Self { goals }
    }

    pub fn goals(&self) -> &GoalConfig {
        &self.goals
    }

    pub fn score(&self, record: &DailyRecord) -> ScoreResult {
        rules::score_record(record, &self.goals)
    }
}

/// Daily adherence score with its per-component breakdown.
///
/// `total` is the clamped sum of the components; the components are always
/// produced together by [`ScoreEngine::score`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreResult {
    pub total: u8,
    #[serde(rename = "pCardio")]
    pub cardio: u8,
    #[serde(rename = "pSteps")]
    pub steps: u8,
    #[serde(rename = "pProt")]
    pub protein: u8,
    #[serde(rename = "pWater")]
    pub water: u8,
    #[serde(rename = "pStrength")]
    pub strength: u8,
    #[serde(rename = "pSleep")]
    pub sleep: u8,
    #[serde(rename = "pMeals")]
    pub meals: u8,
    #[serde(rename = "pPenalty")]
    pub penalty: i8,
}

impl ScoreResult {
    pub const MAX: u8 = 100;

    pub fn badge(&self) -> Badge {
        classify(self.total)
    }

    /// One-line summary; the penalty only appears when it applied.
    pub fn breakdown(&self) -> String {
        let mut line = format!(
            "Cardio {} • Passos {} • Prot {} • Água {} • Força {} • Sono {} • Refeições {}",
            self.cardio, self.steps, self.protein, self.water, self.strength, self.sleep, self.meals
        );
        if self.penalty != 0 {
            line.push_str(&format!(" • Penalidade {}", self.penalty));
        }
        line
    }
}
