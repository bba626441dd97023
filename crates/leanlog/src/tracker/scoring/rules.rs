use super::super::domain::DailyRecord;
use super::super::goals::GoalConfig;
use super::ScoreResult;

/// Lower bound a tier admits, relative to the component's goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `value >= goal * ratio`
    GoalRatio(f64),
    /// `value >= goal + offset`
    GoalOffset(f64),
    /// `value > 0`
    AnyActivity,
}

impl Bound {
    fn admits(self, value: f64, goal: f64) -> bool {
        match self {
            Bound::GoalRatio(ratio) => value >= goal * ratio,
            Bound::GoalOffset(offset) => value >= goal + offset,
            Bound::AnyActivity => value > 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub bound: Bound,
    pub points: u8,
}

const fn tier(bound: Bound, points: u8) -> Tier {
    Tier { bound, points }
}

pub const CARDIO_TIERS: [Tier; 4] = [
    tier(Bound::GoalRatio(1.0), 25),
    tier(Bound::GoalRatio(0.75), 20),
    tier(Bound::GoalRatio(0.5), 15),
    tier(Bound::AnyActivity, 10),
];

pub const STEP_TIERS: [Tier; 3] = [
    tier(Bound::GoalRatio(1.0), 15),
    tier(Bound::GoalRatio(0.7), 10),
    tier(Bound::AnyActivity, 5),
];

pub const SLEEP_TIERS: [Tier; 2] = [
    tier(Bound::GoalOffset(0.0), 10),
    tier(Bound::GoalOffset(-1.0), 5),
];

pub const MEAL_TIERS: [Tier; 2] = [
    tier(Bound::GoalOffset(0.0), 5),
    tier(Bound::GoalOffset(-1.0), 3),
];

const PROTEIN_POINTS: u8 = 20;
const WATER_POINTS: u8 = 10;
const STRENGTH_POINTS: u8 = 20;
const SNACK_PENALTY: i8 = -5;

/// Points of the first tier whose bound admits `value`, top-down.
pub(crate) fn tier_points(tiers: &[Tier], value: f64, goal: f64) -> u8 {
    tiers
        .iter()
        .find(|tier| tier.bound.admits(value, goal))
        .map_or(0, |tier| tier.points)
}

fn flag_points(flag: bool, points: u8) -> u8 {
    if flag {
        points
    } else {
        0
    }
}

fn strength_points(record: &DailyRecord, goals: &GoalConfig) -> u8 {
    if record.strength_day {
        flag_points(record.strength_done, STRENGTH_POINTS)
    } else {
        flag_points(goals.neutral_strength, STRENGTH_POINTS)
    }
}

pub(crate) fn score_record(record: &DailyRecord, goals: &GoalConfig) -> ScoreResult {
    let cardio = tier_points(
        &CARDIO_TIERS,
        f64::from(record.cardio_minutes()),
        f64::from(goals.cardio_goal),
    );
    let steps = tier_points(
        &STEP_TIERS,
        f64::from(record.step_count()),
        f64::from(goals.steps_goal),
    );
    let protein = flag_points(record.protein, PROTEIN_POINTS);
    let water = flag_points(record.water, WATER_POINTS);
    let strength = strength_points(record, goals);
    let sleep = tier_points(&SLEEP_TIERS, record.sleep_hours(), goals.sleep_goal);
    let meals = tier_points(
        &MEAL_TIERS,
        f64::from(record.clean_meals),
        f64::from(goals.clean_meals_goal),
    );
    let penalty = if goals.penalize_snacks && record.snacks {
        SNACK_PENALTY
    } else {
        0
    };

    let sum = [cardio, steps, protein, water, strength, sleep, meals]
        .into_iter()
        .map(i16::from)
        .sum::<i16>()
        + i16::from(penalty);
    let total = sum.clamp(0, i16::from(ScoreResult::MAX)) as u8;

    ScoreResult {
        total,
        cardio,
        steps,
        protein,
        water,
        strength,
        sleep,
        meals,
        penalty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_evaluated_top_down() {
        assert_eq!(tier_points(&CARDIO_TIERS, 60.0, 60.0), 25);
        assert_eq!(tier_points(&CARDIO_TIERS, 45.0, 60.0), 20);
        assert_eq!(tier_points(&CARDIO_TIERS, 44.0, 60.0), 15);
        assert_eq!(tier_points(&CARDIO_TIERS, 30.0, 60.0), 15);
        assert_eq!(tier_points(&CARDIO_TIERS, 1.0, 60.0), 10);
        assert_eq!(tier_points(&CARDIO_TIERS, 0.0, 60.0), 0);
    }

    #[test]
    fn step_tiers_match_rubric() {
        assert_eq!(tier_points(&STEP_TIERS, 10_000.0, 10_000.0), 15);
        assert_eq!(tier_points(&STEP_TIERS, 7_000.0, 10_000.0), 10);
        assert_eq!(tier_points(&STEP_TIERS, 6_999.0, 10_000.0), 5);
        assert_eq!(tier_points(&STEP_TIERS, 0.0, 10_000.0), 0);
    }

    #[test]
    fn offset_tiers_allow_one_unit_short() {
        assert_eq!(tier_points(&SLEEP_TIERS, 7.0, 7.0), 10);
        assert_eq!(tier_points(&SLEEP_TIERS, 6.0, 7.0), 5);
        assert_eq!(tier_points(&SLEEP_TIERS, 5.9, 7.0), 0);
        assert_eq!(tier_points(&MEAL_TIERS, 2.0, 3.0), 3);
        assert_eq!(tier_points(&MEAL_TIERS, 0.0, 0.0), 5);
    }
}
