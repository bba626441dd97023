use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, Weekday};
use serde::Serialize;

use super::calendar;

/// Administered flags keyed by scheduled dose date. Absent means not given.
pub type DoseLog = BTreeMap<NaiveDate, bool>;

/// One step of the titration ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoseStep {
    /// Last 1-indexed occurrence on this step; `None` for the maintenance dose.
    pub through_occurrence: Option<u32>,
    pub milligrams: f64,
    pub label: &'static str,
}

const fn step(through: u32, milligrams: f64, label: &'static str) -> DoseStep {
    DoseStep {
        through_occurrence: Some(through),
        milligrams,
        label,
    }
}

pub const DOSE_RAMP: [DoseStep; 5] = [
    step(4, 0.25, "0,25 mg"),
    step(8, 0.5, "0,5 mg"),
    step(12, 1.0, "1,0 mg"),
    step(16, 1.7, "1,7 mg"),
    DoseStep {
        through_occurrence: None,
        milligrams: 2.4,
        label: "2,4 mg",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledDose {
    pub occurrence: u32,
    pub date: NaiveDate,
    pub milligrams: f64,
    pub dose_label: &'static str,
    pub administered: bool,
}

impl ScheduledDose {
    pub fn status_label(&self) -> &'static str {
        if self.administered {
            "aplicada"
        } else {
            "pendente"
        }
    }
}

/// Weekly dosing calendar anchored on a fixed weekday.
pub struct DoseScheduler;

impl DoseScheduler {
    pub const DOSE_WEEKDAY: Weekday = Weekday::Fri;
    /// Ten years of weekly doses.
    pub const MAX_OCCURRENCES: u32 = 520;

    /// First dose day on or after `start`.
    pub fn anchor(start: NaiveDate) -> Option<NaiveDate> {
        calendar::next_on_or_after(start, Self::DOSE_WEEKDAY)
    }

    pub fn step_for(occurrence: u32) -> &'static DoseStep {
        DOSE_RAMP
            .iter()
            .find(|step| {
                step.through_occurrence
                    .map_or(true, |through| occurrence <= through)
            })
            .unwrap_or(&DOSE_RAMP[DOSE_RAMP.len() - 1])
    }

    /// Up to `count` weekly doses (at most [`Self::MAX_OCCURRENCES`]). The
    /// list stops early at the last representable date.
    pub fn schedule(start: NaiveDate, count: u32, doses: &DoseLog) -> Vec<ScheduledDose> {
        let Some(anchor) = Self::anchor(start) else {
            return Vec::new();
        };

        (1..=count.min(Self::MAX_OCCURRENCES))
            .map_while(|occurrence| {
                let offset = Days::new(7 * u64::from(occurrence - 1));
                let date = anchor.checked_add_days(offset)?;
                let step = Self::step_for(occurrence);
                Some(ScheduledDose {
                    occurrence,
                    date,
                    milligrams: step.milligrams,
                    dose_label: step.label,
                    administered: doses.get(&date).copied().unwrap_or(false),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_never_decreases() {
        let amounts: Vec<f64> = (1..=24)
            .map(|occurrence| DoseScheduler::step_for(occurrence).milligrams)
            .collect();
        assert!(amounts.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(DoseScheduler::step_for(4).label, "0,25 mg");
        assert_eq!(DoseScheduler::step_for(5).label, "0,5 mg");
        assert_eq!(DoseScheduler::step_for(12).label, "1,0 mg");
        assert_eq!(DoseScheduler::step_for(16).label, "1,7 mg");
        assert_eq!(DoseScheduler::step_for(17).label, "2,4 mg");
        assert_eq!(DoseScheduler::step_for(60).label, "2,4 mg");
    }

    #[test]
    fn zero_count_yields_empty_schedule() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 16).expect("valid date");
        assert!(DoseScheduler::schedule(start, 0, &DoseLog::new()).is_empty());
    }

    #[test]
    fn schedule_length_is_capped() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 16).expect("valid date");
        let doses = DoseScheduler::schedule(start, u32::MAX, &DoseLog::new());
        assert_eq!(doses.len(), DoseScheduler::MAX_OCCURRENCES as usize);
    }

    #[test]
    fn schedule_stops_at_the_last_representable_date() {
        let start = NaiveDate::MAX
            .checked_sub_days(Days::new(30))
            .expect("valid date");
        let doses = DoseScheduler::schedule(start, 10, &DoseLog::new());

        assert!(!doses.is_empty());
        assert!(doses.len() < 10);
        assert!(doses.windows(2).all(|pair| pair[0].date < pair[1].date));
        assert!(DoseScheduler::schedule(NaiveDate::MAX, 4, &DoseLog::new()).len() <= 1);
    }
}
