use std::io::{Read, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::super::domain::{lenient, DailyRecord, EntryMap, Intensity};
use super::super::goals::GoalConfig;
use super::super::scoring::{ScoreEngine, ScoreResult};
use super::ExportError;

pub const CSV_HEADER: [&str; 20] = [
    "date",
    "weight",
    "sleep",
    "energy",
    "hunger",
    "pain",
    "cardioMin",
    "steps",
    "intensity",
    "protein",
    "water",
    "strengthDay",
    "strengthDone",
    "mobilityDone",
    "snacks",
    "cleanMeals",
    "mobilityMin",
    "score",
    "win",
    "fix",
];

/// Write one row per saved day, oldest first. Fields are never quoted:
/// commas inside the free-text notes become spaces instead.
pub fn write_entries<W: Write>(entries: &EntryMap, writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for (date, record) in entries {
        csv_writer.write_record(&[
            date.to_string(),
            number(record.weight),
            number(record.sleep),
            number(record.energy),
            number(record.hunger),
            number(record.pain),
            number(record.cardio_min),
            number(record.steps),
            record.intensity.label().to_string(),
            record.protein.to_string(),
            record.water.to_string(),
            record.strength_day.to_string(),
            record.strength_done.to_string(),
            record.mobility_done.to_string(),
            record.snacks.to_string(),
            record.clean_meals.to_string(),
            number(record.mobility_min),
            record.score.total.to_string(),
            strip_commas(&record.win),
            strip_commas(&record.fix),
        ])?;
    }

    csv_writer.flush()?;
    Ok(entries.len())
}

/// Read rows written by [`write_entries`].
///
/// The file's `score` column is the frozen total and always wins. Its
/// breakdown is rebuilt with `goals` when that reproduces the total, taken
/// from the `existing` record on the same date when that one agrees, and
/// left empty otherwise. Rows without a score are scored with `goals`.
pub fn read_entries<R: Read>(
    reader: R,
    goals: &GoalConfig,
    existing: &EntryMap,
) -> Result<EntryMap, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .quoting(false)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let engine = ScoreEngine::new(*goals);
    let mut entries = EntryMap::new();

    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row?;
        let exported_total = row.score;
        let mut record = row.into_record();
        let recomputed = engine.score(&record);

        record.score = match exported_total {
            None => recomputed,
            Some(total) => {
                let total = total.min(u32::from(ScoreResult::MAX)) as u8;
                frozen_score(total, recomputed, existing.get(&record.date))
            }
        };

        if record.score.total != recomputed.total {
            warn!(
                date = %record.date,
                exported = record.score.total,
                recomputed = recomputed.total,
                "imported score differs under current goals, keeping exported total"
            );
        }

        entries.insert(record.date, record);
    }

    Ok(entries)
}

fn frozen_score(
    total: u8,
    recomputed: ScoreResult,
    existing: Option<&DailyRecord>,
) -> ScoreResult {
    if recomputed.total == total {
        return recomputed;
    }
    match existing {
        Some(stored) if stored.score.total == total => stored.score,
        _ => ScoreResult {
            total,
            ..ScoreResult::default()
        },
    }
}

fn number<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn strip_commas(text: &str) -> String {
    text.replace(',', " ")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow {
    date: NaiveDate,
    #[serde(default, deserialize_with = "lenient::decimal")]
    weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    sleep: Option<f64>,
    #[serde(default, deserialize_with = "lenient::scale")]
    energy: Option<u8>,
    #[serde(default, deserialize_with = "lenient::scale")]
    hunger: Option<u8>,
    #[serde(default, deserialize_with = "lenient::scale")]
    pain: Option<u8>,
    #[serde(default, deserialize_with = "lenient::whole")]
    cardio_min: Option<u32>,
    #[serde(default, deserialize_with = "lenient::whole")]
    steps: Option<u32>,
    #[serde(default)]
    intensity: String,
    #[serde(default, deserialize_with = "flag")]
    protein: bool,
    #[serde(default, deserialize_with = "flag")]
    water: bool,
    #[serde(default, deserialize_with = "flag")]
    strength_day: bool,
    #[serde(default, deserialize_with = "flag")]
    strength_done: bool,
    #[serde(default, deserialize_with = "flag")]
    mobility_done: bool,
    #[serde(default, deserialize_with = "flag")]
    snacks: bool,
    #[serde(default, deserialize_with = "lenient::count")]
    clean_meals: u32,
    #[serde(default, deserialize_with = "lenient::whole")]
    mobility_min: Option<u32>,
    #[serde(default, deserialize_with = "lenient::whole")]
    score: Option<u32>,
    #[serde(default)]
    win: String,
    #[serde(default)]
    fix: String,
}

impl CsvRow {
    fn into_record(self) -> DailyRecord {
        DailyRecord {
            date: self.date,
            weight: self.weight,
            sleep: self.sleep,
            energy: self.energy,
            hunger: self.hunger,
            pain: self.pain,
            cardio_min: self.cardio_min,
            steps: self.steps,
            intensity: Intensity::parse(&self.intensity).unwrap_or_default(),
            protein: self.protein,
            water: self.water,
            strength_day: self.strength_day,
            strength_done: self.strength_done,
            mobility_done: self.mobility_done,
            snacks: self.snacks,
            clean_meals: self.clean_meals,
            mobility_min: self.mobility_min,
            win: self.win,
            fix: self.fix,
            score: Default::default(),
        }
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "sim"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).expect("valid date")
    }

    #[test]
    fn writes_fixed_columns_without_quoting() {
        let mut record = DailyRecord::new(date(20));
        record.weight = Some(82.5);
        record.cardio_min = Some(40);
        record.protein = true;
        record.win = "walked, swam".to_string();
        record.score.total = 75;
        let mut entries = EntryMap::new();
        entries.insert(record.date, record);

        let mut out = Vec::new();
        let rows = write_entries(&entries, &mut out).expect("csv written");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(rows, 1);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(
            lines[1],
            "2026-01-20,82.5,,,,,40,,moderada,true,false,false,false,false,false,0,,75,walked  swam,"
        );
    }

    #[test]
    fn whole_kilograms_are_written_without_a_fraction() {
        let mut record = DailyRecord::new(date(21));
        record.weight = Some(80.0);
        let mut entries = EntryMap::new();
        entries.insert(record.date, record);

        let mut out = Vec::new();
        write_entries(&entries, &mut out).expect("csv written");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.lines().nth(1).expect("data row").starts_with("2026-01-21,80,"));
    }

    #[test]
    fn reading_rescores_with_given_goals() {
        let csv = "date,weight,sleep,energy,hunger,pain,cardioMin,steps,intensity,protein,water,strengthDay,strengthDone,mobilityDone,snacks,cleanMeals,mobilityMin,score,win,fix\n\
                   2026-01-20,81.3,7,6,4,1,60,10000,intensa,true,true,false,false,true,false,3,15,100,,\n";
        let entries = read_entries(csv.as_bytes(), &GoalConfig::default(), &EntryMap::new())
            .expect("csv parses");
        let record = entries.get(&date(20)).expect("row imported");

        assert_eq!(record.weight, Some(81.3));
        assert_eq!(record.intensity, Intensity::Intensa);
        assert!(record.mobility_done);
        assert_eq!(record.mobility_min, Some(15));
        assert_eq!(record.score.total, 100);
        assert_eq!(record.score.cardio, 25);
    }

    const ROW_SCORED_100: &str = "date,weight,sleep,energy,hunger,pain,cardioMin,steps,intensity,protein,water,strengthDay,strengthDone,mobilityDone,snacks,cleanMeals,mobilityMin,score,win,fix\n\
                                  2026-01-20,81.3,7.5,,,,60,10000,intensa,true,true,false,false,false,false,3,,100,,\n";

    fn stricter_goals() -> GoalConfig {
        GoalConfig {
            cardio_goal: 120,
            steps_goal: 20_000,
            ..GoalConfig::default()
        }
    }

    #[test]
    fn exported_total_survives_stricter_goals() {
        let entries = read_entries(ROW_SCORED_100.as_bytes(), &stricter_goals(), &EntryMap::new())
            .expect("csv parses");
        let record = entries.get(&date(20)).expect("row imported");

        assert_eq!(record.score.total, 100);
        assert_eq!(record.score.cardio, 0);
        assert_eq!(record.score.steps, 0);
    }

    #[test]
    fn stored_breakdown_is_kept_when_totals_agree() {
        let stored = ScoreResult {
            total: 100,
            cardio: 25,
            steps: 15,
            protein: 20,
            water: 10,
            strength: 20,
            sleep: 10,
            meals: 5,
            penalty: 0,
        };
        let mut existing = EntryMap::new();
        let mut previous = DailyRecord::new(date(20));
        previous.score = stored;
        existing.insert(previous.date, previous);

        let entries = read_entries(ROW_SCORED_100.as_bytes(), &stricter_goals(), &existing)
            .expect("csv parses");

        assert_eq!(entries.get(&date(20)).expect("row imported").score, stored);
    }

    #[test]
    fn rows_without_a_score_are_scored_with_given_goals() {
        let csv = "date,cardioMin,intensity,score\n2026-01-20,60,intensa,\n";
        let entries = read_entries(csv.as_bytes(), &GoalConfig::default(), &EntryMap::new())
            .expect("csv parses");

        assert_eq!(entries.get(&date(20)).expect("row imported").score.cardio, 25);
    }
}
