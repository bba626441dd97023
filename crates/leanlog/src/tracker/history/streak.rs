use super::super::calendar;
use super::super::domain::EntryMap;

/// Minimum stored total for a day to extend the streak.
pub const STREAK_THRESHOLD: u8 = 80;

/// Consecutive qualifying days ending at the newest record. A failing score
/// or a missing calendar day ends the walk.
pub(crate) fn current_streak(entries: &EntryMap) -> u32 {
    let mut streak = 0;
    let mut previous = None;

    for (date, record) in entries.iter().rev() {
        if record.score.total < STREAK_THRESHOLD {
            break;
        }
        if let Some(previous) = previous {
            if calendar::days_between(previous, *date) != 1 {
                break;
            }
        }
        streak += 1;
        previous = Some(*date);
    }

    streak
}
