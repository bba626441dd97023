//! Scoring, history aggregation, dose scheduling, and persistence for the
//! daily log.

pub mod calendar;
pub mod domain;
pub mod dosing;
pub mod export;
mod file_store;
pub mod goals;
pub mod history;
pub mod repository;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{DailyRecord, EntryMap, Intensity, Theme};
pub use dosing::{DoseLog, DoseScheduler, DoseStep, ScheduledDose, DOSE_RAMP};
pub use export::{BackupDocument, ExportError, RestorePlan, BACKUP_VERSION};
pub use file_store::FileStore;
pub use goals::{GoalConfig, GoalConfigError};
pub use history::{
    DashboardKpis, DashboardView, HistoryAggregator, WeeklyReport, KPI_WINDOW, STREAK_THRESHOLD,
};
pub use repository::{
    InMemoryStore, JsonRepository, KeyValueStore, RepositoryError, StateRepository,
};
pub use scoring::{classify, Badge, BadgeTier, ScoreEngine, ScoreResult};
pub use service::{RestoreSummary, ScoredDay, TrackerError, TrackerService};
