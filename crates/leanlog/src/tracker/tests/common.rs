use std::sync::Arc;

use chrono::NaiveDate;

use crate::tracker::domain::{DailyRecord, EntryMap};
use crate::tracker::goals::GoalConfig;
use crate::tracker::repository::InMemoryStore;
use crate::tracker::service::TrackerService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// A date in January 2026.
pub(super) fn jan(day: u32) -> NaiveDate {
    date(2026, 1, day)
}

pub(super) fn goals() -> GoalConfig {
    GoalConfig::default()
}

/// Every rubric component at its maximum under default goals.
pub(super) fn full_day(on: NaiveDate) -> DailyRecord {
    DailyRecord {
        weight: Some(82.0),
        sleep: Some(7.5),
        cardio_min: Some(60),
        steps: Some(10_000),
        protein: true,
        water: true,
        strength_day: true,
        strength_done: true,
        clean_meals: 3,
        ..DailyRecord::new(on)
    }
}

/// A record whose frozen score total is `total`.
pub(super) fn scored(on: NaiveDate, total: u8) -> DailyRecord {
    let mut record = DailyRecord::new(on);
    record.score.total = total;
    record
}

pub(super) fn entries_from<I>(records: I) -> EntryMap
where
    I: IntoIterator<Item = DailyRecord>,
{
    records
        .into_iter()
        .map(|record| (record.date, record))
        .collect()
}

pub(super) fn service() -> (Arc<InMemoryStore>, TrackerService<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let service = TrackerService::new(Arc::clone(&store));
    (store, service)
}
