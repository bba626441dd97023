use chrono::{Local, NaiveDate};
use leanlog::config::AppConfig;
use leanlog::error::AppError;
use leanlog::tracker::{FileStore, Intensity, TrackerService};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub(crate) type Service = TrackerService<FileStore>;

pub(crate) fn open_service(config: &AppConfig) -> Result<Service, AppError> {
    let store = FileStore::open(&config.storage.data_dir)?;
    debug!(data_dir = %store.root().display(), "tracker store ready");
    Ok(TrackerService::new(Arc::new(store)))
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_intensity(raw: &str) -> Result<Intensity, String> {
    Intensity::parse(raw).ok_or_else(|| {
        let accepted: Vec<&str> = Intensity::ordered()
            .iter()
            .map(|intensity| intensity.label())
            .collect();
        format!("unknown intensity '{raw}' (expected {})", accepted.join("|"))
    })
}

/// `-` means stdout; anything else is created or truncated.
pub(crate) fn open_output(path: &Path) -> Result<Box<dyn Write>, AppError> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}
