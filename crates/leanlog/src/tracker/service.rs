use std::io::{Read, Write};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use super::domain::{DailyRecord, EntryMap, Theme};
use super::dosing::{DoseLog, DoseScheduler, ScheduledDose};
use super::export::{self, BackupDocument, ExportError, RestorePlan};
use super::goals::{GoalConfig, GoalConfigError};
use super::history::{DashboardView, HistoryAggregator, WeeklyReport};
use super::repository::{JsonRepository, KeyValueStore, RepositoryError, StateRepository};
use super::scoring::{Badge, ScoreEngine};

/// A day together with the badge its frozen score earns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDay {
    pub record: DailyRecord,
    pub badge: Badge,
}

impl ScoredDay {
    fn new(record: DailyRecord) -> Self {
        let badge = record.score.badge();
        Self { record, badge }
    }
}

/// What a restore replaced, for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RestoreSummary {
    pub entries: usize,
    pub doses: usize,
    pub goals_replaced: bool,
    pub theme_replaced: bool,
}

/// Service composing the persisted resources with the scoring rubric.
///
/// Every method runs to completion before returning; views are computed from
/// freshly loaded state on each call.
pub struct TrackerService<S> {
    goals: JsonRepository<S, GoalConfig>,
    entries: JsonRepository<S, EntryMap>,
    doses: JsonRepository<S, DoseLog>,
    theme: JsonRepository<S, Theme>,
}

impl<S> TrackerService<S>
where
    S: KeyValueStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            goals: JsonRepository::new(Arc::clone(&store)),
            entries: JsonRepository::new(Arc::clone(&store)),
            doses: JsonRepository::new(Arc::clone(&store)),
            theme: JsonRepository::new(store),
        }
    }

    pub fn goals(&self) -> GoalConfig {
        self.goals.load()
    }

    /// Replace the goals wholesale. Stored day scores are left untouched.
    pub fn update_goals(&self, goals: GoalConfig) -> Result<GoalConfig, TrackerError> {
        goals.validate()?;
        self.goals.save_all(&goals)?;
        info!(?goals, "goals updated");
        Ok(goals)
    }

    pub fn reset_goals(&self) -> Result<GoalConfig, TrackerError> {
        let goals = GoalConfig::default();
        self.goals.save_all(&goals)?;
        info!("goals reset to defaults");
        Ok(goals)
    }

    /// Score a day against the current goals without saving it.
    pub fn preview_score(&self, record: &DailyRecord) -> ScoredDay {
        let mut record = record.clone();
        record.score = ScoreEngine::new(self.goals()).score(&record);
        ScoredDay::new(record)
    }

    /// Score and store a day, overwriting any record already on that date.
    pub fn save_day(&self, record: DailyRecord) -> Result<ScoredDay, TrackerError> {
        let scored = self.preview_score(&record);
        let mut entries = self.entries.load();
        let replaced = entries
            .insert(scored.record.date, scored.record.clone())
            .is_some();
        self.entries.save_all(&entries)?;

        info!(
            date = %scored.record.date,
            total = scored.record.score.total,
            replaced,
            "day saved"
        );
        Ok(scored)
    }

    /// `None` when nothing was saved on `date`.
    pub fn load_day(&self, date: NaiveDate) -> Option<ScoredDay> {
        self.entries.load().remove(&date).map(ScoredDay::new)
    }

    pub fn entries(&self) -> EntryMap {
        self.entries.load()
    }

    pub fn dashboard(&self) -> DashboardView {
        let entries = self.entries.load();
        HistoryAggregator::new(&entries).dashboard()
    }

    pub fn weekly_report(&self) -> Option<WeeklyReport> {
        let entries = self.entries.load();
        HistoryAggregator::new(&entries).weekly_report()
    }

    pub fn schedule(&self, start: NaiveDate, count: u32) -> Vec<ScheduledDose> {
        DoseScheduler::schedule(start, count, &self.doses.load())
    }

    pub fn set_dose(&self, date: NaiveDate, administered: bool) -> Result<(), TrackerError> {
        let mut doses = self.doses.load();
        doses.insert(date, administered);
        self.doses.save_all(&doses)?;
        info!(%date, administered, "dose updated");
        Ok(())
    }

    pub fn clear_doses(&self) -> Result<(), TrackerError> {
        self.doses.clear()?;
        info!("dose marks cleared");
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.theme.load()
    }

    pub fn toggle_theme(&self) -> Result<Theme, TrackerError> {
        let next = self.theme.load().toggled();
        self.theme.save_all(&next)?;
        Ok(next)
    }

    /// Drop every saved day and dose mark. Goals and theme survive.
    pub fn reset_all(&self) -> Result<(), TrackerError> {
        self.entries.clear()?;
        self.doses.clear()?;
        info!("entries and doses cleared");
        Ok(())
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, TrackerError> {
        let entries = self.entries.load();
        Ok(export::write_entries(&entries, writer)?)
    }

    /// Merge CSV rows into the saved days. Exported totals stay frozen; see
    /// [`export::read_entries`] for how the breakdown is recovered.
    pub fn import_csv<R: Read>(&self, reader: R) -> Result<usize, TrackerError> {
        let mut entries = self.entries.load();
        let imported = export::read_entries(reader, &self.goals(), &entries)?;
        let count = imported.len();
        entries.extend(imported);
        self.entries.save_all(&entries)?;
        info!(rows = count, "csv imported");
        Ok(count)
    }

    pub fn backup(&self, created_at: DateTime<Utc>) -> BackupDocument {
        BackupDocument::capture(
            self.goals.load(),
            self.entries.load(),
            self.doses.load(),
            self.theme.load(),
            created_at,
        )
    }

    /// Validate the whole document first; only then commit each resource
    /// with a single write.
    pub fn restore(&self, raw: &str) -> Result<RestoreSummary, TrackerError> {
        let plan = RestorePlan::parse(raw)?;

        self.entries.save_all(&plan.entries)?;
        self.doses.save_all(&plan.doses)?;
        if let Some(goals) = &plan.goals {
            self.goals.save_all(goals)?;
        }
        if let Some(theme) = &plan.theme {
            self.theme.save_all(theme)?;
        }

        let summary = RestoreSummary {
            entries: plan.entries.len(),
            doses: plan.doses.len(),
            goals_replaced: plan.goals.is_some(),
            theme_replaced: plan.theme.is_some(),
        };
        info!(?summary, "backup restored");
        Ok(summary)
    }
}

/// Error raised by the tracker service.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Goals(#[from] GoalConfigError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
