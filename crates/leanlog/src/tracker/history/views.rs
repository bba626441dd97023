use super::super::domain::DailyRecord;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardKpis {
    pub latest_weight: Option<f64>,
    pub weight_delta: Option<f64>,
    pub average_score: Option<u8>,
    pub cardio_days: usize,
    pub window_days: usize,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<SeriesPoint>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItemView {
    pub date: NaiveDate,
    pub score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub cardio_min: u32,
    pub steps: u32,
}

impl HistoryItemView {
    pub fn from_record(record: &DailyRecord) -> Self {
        Self {
            date: record.date,
            score: record.score.total,
            weight: record.recorded_weight(),
            cardio_min: record.cardio_minutes(),
            steps: record.step_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub kpis: DashboardKpis,
    pub chart: ChartSeries,
    pub recent: Vec<HistoryItemView>,
}
