use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::scoring::ScoreResult;

/// Every saved day, keyed by calendar date. One record per date.
pub type EntryMap = BTreeMap<NaiveDate, DailyRecord>;

/// Self-reported workout intensity. Displayed only, never scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Intensity {
    Leve,
    #[default]
    Moderada,
    Intensa,
}

impl Intensity {
    pub const fn ordered() -> [Self; 3] {
        [Self::Leve, Self::Moderada, Self::Intensa]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Leve => "leve",
            Self::Moderada => "moderada",
            Self::Intensa => "intensa",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|intensity| intensity.label().eq_ignore_ascii_case(raw))
    }
}

impl From<String> for Intensity {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

/// Display theme preference carried in backups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("light") {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

/// One day of self-reported metrics plus the score frozen at save time.
///
/// Numeric fields read leniently from storage: numbers, numeric strings, empty
/// strings and `null` are all accepted, and anything unparseable reads as
/// absent. The stored `score` is never recomputed when goals change later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Always taken from the map key on load; a stored `date` field is ignored.
    #[serde(default, skip_deserializing)]
    pub date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::scale",
        skip_serializing_if = "Option::is_none"
    )]
    pub energy: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient::scale",
        skip_serializing_if = "Option::is_none"
    )]
    pub hunger: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient::scale",
        skip_serializing_if = "Option::is_none"
    )]
    pub pain: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient::whole",
        skip_serializing_if = "Option::is_none"
    )]
    pub cardio_min: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient::whole",
        skip_serializing_if = "Option::is_none"
    )]
    pub steps: Option<u32>,
    #[serde(default)]
    pub intensity: Intensity,
    #[serde(default)]
    pub protein: bool,
    #[serde(default)]
    pub water: bool,
    #[serde(default)]
    pub strength_day: bool,
    #[serde(default)]
    pub strength_done: bool,
    #[serde(default)]
    pub mobility_done: bool,
    #[serde(default)]
    pub snacks: bool,
    #[serde(default, deserialize_with = "lenient::count")]
    pub clean_meals: u32,
    #[serde(
        default,
        deserialize_with = "lenient::whole",
        skip_serializing_if = "Option::is_none"
    )]
    pub mobility_min: Option<u32>,
    #[serde(default)]
    pub win: String,
    #[serde(default)]
    pub fix: String,
    #[serde(default)]
    pub score: ScoreResult,
}

impl DailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Weight usable for deltas and charts. Zero means "not weighed".
    pub fn recorded_weight(&self) -> Option<f64> {
        self.weight.filter(|weight| weight.is_finite() && *weight != 0.0)
    }

    pub fn cardio_minutes(&self) -> u32 {
        self.cardio_min.unwrap_or(0)
    }

    pub fn step_count(&self) -> u32 {
        self.steps.unwrap_or(0)
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep.unwrap_or(0.0)
    }

    pub fn completed_strength(&self) -> bool {
        self.strength_day && self.strength_done
    }
}

/// Re-key stored records so each record's `date` matches its map key.
pub(crate) fn align_dates(entries: EntryMap) -> EntryMap {
    entries
        .into_iter()
        .map(|(date, mut record)| {
            record.date = date;
            (date, record)
        })
        .collect()
}

pub(crate) mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    fn raw<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<RawNumber>::deserialize(deserializer)?;
        Ok(value
            .and_then(|raw| match raw {
                RawNumber::Number(number) => Some(number),
                RawNumber::Text(text) => text.trim().parse::<f64>().ok(),
                RawNumber::Other(_) => None,
            })
            .filter(|number| number.is_finite()))
    }

    pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        raw(deserializer)
    }

    /// Whole units (minutes, steps). Fractions truncate, negatives floor at 0.
    pub(crate) fn whole<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw(deserializer)?.map(|number| number.max(0.0) as u32))
    }

    pub(crate) fn scale<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw(deserializer)?.map(|number| number.clamp(0.0, 10.0) as u8))
    }

    pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(whole(deserializer)?.unwrap_or(0))
    }

    /// Whole-unit goals. Fractions round up so that `value >= goal` keeps its
    /// meaning for whole-unit values. Unparseable reads as 0.
    pub(crate) fn goal_whole<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw(deserializer)?.map_or(0, |number| number.max(0.0).ceil() as u32))
    }

    pub(crate) fn goal_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(raw(deserializer)?.unwrap_or(0.0))
    }
}
