use serde::{Deserialize, Serialize};

use super::domain::lenient;

/// Tunable thresholds the scoring rubric measures each day against.
///
/// Missing keys in a stored blob are filled from [`GoalConfig::default`].
/// Numeric goals are read leniently (numbers, numeric strings, fractions);
/// [`GoalConfig::sanitized`] repairs whatever that leaves at zero.
/// The value is always replaced as a whole, never patched field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalConfig {
    #[serde(deserialize_with = "lenient::goal_whole")]
    pub steps_goal: u32,
    #[serde(deserialize_with = "lenient::goal_whole")]
    pub cardio_goal: u32,
    #[serde(deserialize_with = "lenient::goal_decimal")]
    pub sleep_goal: f64,
    #[serde(deserialize_with = "lenient::goal_whole")]
    pub clean_meals_goal: u32,
    /// A rest day earns full strength points instead of zero.
    pub neutral_strength: bool,
    pub penalize_snacks: bool,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            steps_goal: 10_000,
            cardio_goal: 60,
            sleep_goal: 7.0,
            clean_meals_goal: 3,
            neutral_strength: true,
            penalize_snacks: false,
        }
    }
}

impl GoalConfig {
    pub fn validate(&self) -> Result<(), GoalConfigError> {
        if self.steps_goal == 0 {
            return Err(GoalConfigError::NotPositive { field: "stepsGoal" });
        }
        if self.cardio_goal == 0 {
            return Err(GoalConfigError::NotPositive {
                field: "cardioGoal",
            });
        }
        if !(self.sleep_goal.is_finite() && self.sleep_goal > 0.0) {
            return Err(GoalConfigError::NotPositive { field: "sleepGoal" });
        }
        Ok(())
    }

    /// Replace any field that breaks the positivity invariant with its default.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            steps_goal: if self.steps_goal == 0 {
                defaults.steps_goal
            } else {
                self.steps_goal
            },
            cardio_goal: if self.cardio_goal == 0 {
                defaults.cardio_goal
            } else {
                self.cardio_goal
            },
            sleep_goal: if self.sleep_goal.is_finite() && self.sleep_goal > 0.0 {
                self.sleep_goal
            } else {
                defaults.sleep_goal
            },
            ..self
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GoalConfigError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_blob_merges_missing_keys_from_defaults() {
        let goals: GoalConfig =
            serde_json::from_str(r#"{"stepsGoal":8000,"penalizeSnacks":true}"#)
                .expect("partial goals parse");

        assert_eq!(goals.steps_goal, 8000);
        assert!(goals.penalize_snacks);
        assert_eq!(goals.cardio_goal, 60);
        assert_eq!(goals.sleep_goal, 7.0);
        assert_eq!(goals.clean_meals_goal, 3);
        assert!(goals.neutral_strength);
    }

    #[test]
    fn fractional_and_text_goals_are_read_leniently() {
        let goals: GoalConfig = serde_json::from_str(
            r#"{"cardioGoal":45.5,"stepsGoal":"8000","sleepGoal":"7.5","cleanMealsGoal":2.5}"#,
        )
        .expect("goals parse");

        assert_eq!(goals.cardio_goal, 46);
        assert_eq!(goals.steps_goal, 8000);
        assert_eq!(goals.sleep_goal, 7.5);
        assert_eq!(goals.clean_meals_goal, 3);
    }

    #[test]
    fn unreadable_goals_fall_back_once_sanitized() {
        let goals: GoalConfig =
            serde_json::from_str(r#"{"cardioGoal":"lots","stepsGoal":null,"sleepGoal":-2}"#)
                .expect("goals parse");
        let goals = goals.sanitized();

        assert_eq!(goals.cardio_goal, 60);
        assert_eq!(goals.steps_goal, 10_000);
        assert_eq!(goals.sleep_goal, 7.0);
    }

    #[test]
    fn validate_names_the_offending_field() {
        let goals = GoalConfig {
            cardio_goal: 0,
            ..GoalConfig::default()
        };
        assert_eq!(
            goals.validate(),
            Err(GoalConfigError::NotPositive {
                field: "cardioGoal"
            })
        );
    }

    #[test]
    fn clean_meals_goal_may_be_zero() {
        let goals = GoalConfig {
            clean_meals_goal: 0,
            ..GoalConfig::default()
        };
        assert!(goals.validate().is_ok());
    }

    #[test]
    fn sanitized_restores_defaults_for_invalid_fields() {
        let goals = GoalConfig {
            steps_goal: 0,
            sleep_goal: -1.0,
            cardio_goal: 45,
            ..GoalConfig::default()
        }
        .sanitized();

        assert_eq!(goals.steps_goal, 10_000);
        assert_eq!(goals.sleep_goal, 7.0);
        assert_eq!(goals.cardio_goal, 45);
    }
}
