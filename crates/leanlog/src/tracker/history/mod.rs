//! Aggregates over the saved-day collection: streak, rolling KPIs, chart
//! series, and the weekly report. Windows count the most recent dates
//! present in the collection, not calendar days.

mod streak;
pub mod views;
mod weekly;

pub use streak::STREAK_THRESHOLD;
pub use views::{ChartSeries, DashboardKpis, DashboardView, HistoryItemView, SeriesPoint};
pub use weekly::WeeklyReport;

use super::calendar;
use super::domain::{DailyRecord, EntryMap};

/// Records averaged by the dashboard and the weekly report.
pub const KPI_WINDOW: usize = 7;
/// Records plotted on the trend chart and used for the dashboard weight delta.
pub const CHART_WINDOW: usize = 14;
/// Rows shown in the recent-history list.
pub const RECENT_LIMIT: usize = 10;

pub struct HistoryAggregator<'a> {
    entries: &'a EntryMap,
}

impl<'a> HistoryAggregator<'a> {
    pub fn new(entries: &'a EntryMap) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&'a DailyRecord> {
        self.entries.values().next_back()
    }

    pub fn streak(&self) -> u32 {
        streak::current_streak(self.entries)
    }

    /// The `size` most recent records, oldest first.
    pub fn window(&self, size: usize) -> Vec<&'a DailyRecord> {
        let mut window: Vec<&DailyRecord> = self.entries.values().rev().take(size).collect();
        window.reverse();
        window
    }

    pub fn kpis(&self) -> DashboardKpis {
        let week = self.window(KPI_WINDOW);
        let chart = self.window(CHART_WINDOW);

        DashboardKpis {
            latest_weight: self.latest().and_then(DailyRecord::recorded_weight),
            weight_delta: weight_delta(&chart),
            average_score: average_score(&week),
            cardio_days: cardio_days(&week),
            window_days: week.len(),
            streak: self.streak(),
        }
    }

    pub fn chart_series(&self) -> ChartSeries {
        let points: Vec<SeriesPoint> = self
            .window(CHART_WINDOW)
            .into_iter()
            .map(|record| SeriesPoint {
                date: record.date,
                weight: record.recorded_weight(),
                score: record.score.total,
            })
            .collect();

        let caption = match (points.first(), points.last()) {
            (Some(first), Some(last)) => format!(
                "De {} até {} • {} registros",
                calendar::display(first.date),
                calendar::display(last.date),
                points.len()
            ),
            _ => "Sem dados para gráfico ainda".to_string(),
        };

        ChartSeries { points, caption }
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> Vec<HistoryItemView> {
        self.entries
            .values()
            .rev()
            .take(limit)
            .map(HistoryItemView::from_record)
            .collect()
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView {
            kpis: self.kpis(),
            chart: self.chart_series(),
            recent: self.recent(RECENT_LIMIT),
        }
    }

    /// `None` when nothing has been saved yet.
    pub fn weekly_report(&self) -> Option<WeeklyReport> {
        weekly::build(&self.window(KPI_WINDOW))
    }
}

/// Rounds half away from zero (2.5 -> 3, 3.5 -> 4), never to even.
pub fn round_half_away_from_zero(value: f64) -> f64 {
    value.round()
}

/// Mean of the stored totals, `None` for an empty window.
pub(crate) fn average_score(window: &[&DailyRecord]) -> Option<u8> {
    if window.is_empty() {
        return None;
    }
    let sum: u32 = window
        .iter()
        .map(|record| u32::from(record.score.total))
        .sum();
    let mean = f64::from(sum) / window.len() as f64;
    Some(round_half_away_from_zero(mean) as u8)
}

/// Last minus first weight of the window, when both endpoints were weighed.
pub(crate) fn weight_delta(window: &[&DailyRecord]) -> Option<f64> {
    let first = window.first()?.recorded_weight()?;
    let last = window.last()?.recorded_weight()?;
    Some(last - first)
}

pub(crate) fn cardio_days(window: &[&DailyRecord]) -> usize {
    window
        .iter()
        .filter(|record| record.cardio_minutes() > 0)
        .count()
}

/// `+1.2 kg`, `-0.8 kg`, `0.0 kg`.
pub fn format_weight_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{delta:.1} kg")
    } else {
        format!("{delta:.1} kg")
    }
}
