use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::super::domain::{align_dates, EntryMap, Theme};
use super::super::dosing::DoseLog;
use super::super::goals::GoalConfig;
use super::ExportError;

pub const BACKUP_VERSION: u32 = 2;

/// Full snapshot of the tracker, written as pretty JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub goals: GoalConfig,
    pub entries: EntryMap,
    pub doses: DoseLog,
    pub theme: Theme,
}

impl BackupDocument {
    pub fn capture(
        goals: GoalConfig,
        entries: EntryMap,
        doses: DoseLog,
        theme: Theme,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version: BACKUP_VERSION,
            created_at,
            goals,
            entries,
            doses,
            theme,
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validated contents of a backup, staged before anything is written.
///
/// `entries` and `doses` always replace the current state (doses default to
/// empty). `goals` and `theme` replace it only when the file carries them.
#[derive(Debug, Clone, PartialEq)]
pub struct RestorePlan {
    pub entries: EntryMap,
    pub doses: DoseLog,
    pub goals: Option<GoalConfig>,
    pub theme: Option<Theme>,
}

impl RestorePlan {
    pub fn parse(raw: &str) -> Result<Self, ExportError> {
        let document: Value = serde_json::from_str(raw)
            .map_err(|err| ExportError::InvalidBackup(format!("not valid JSON ({err})")))?;
        let Value::Object(mut sections) = document else {
            return Err(ExportError::InvalidBackup(
                "expected a JSON object".to_string(),
            ));
        };

        let entries = match take(&mut sections, "entries") {
            Some(value) => section::<EntryMap>("entries", value)?,
            None => {
                return Err(ExportError::InvalidBackup(
                    "missing 'entries' section".to_string(),
                ))
            }
        };
        let doses = take(&mut sections, "doses")
            .map(|value| section::<DoseLog>("doses", value))
            .transpose()?
            .unwrap_or_default();
        let goals = take(&mut sections, "goals")
            .map(|value| section::<GoalConfig>("goals", value))
            .transpose()?
            .map(GoalConfig::sanitized);
        let theme = match take(&mut sections, "theme") {
            Some(Value::String(theme)) => Some(Theme::from(theme)),
            Some(_) => {
                return Err(ExportError::InvalidBackup(
                    "'theme' must be a string".to_string(),
                ))
            }
            None => None,
        };

        Ok(Self {
            entries: align_dates(entries),
            doses,
            goals,
            theme,
        })
    }
}

/// Remove a section, treating `null` the same as absent.
fn take(sections: &mut Map<String, Value>, key: &str) -> Option<Value> {
    sections.remove(key).filter(|value| !value.is_null())
}

fn section<T: DeserializeOwned>(name: &str, value: Value) -> Result<T, ExportError> {
    serde_json::from_value(value)
        .map_err(|err| ExportError::InvalidBackup(format!("malformed '{name}' section ({err})")))
}
