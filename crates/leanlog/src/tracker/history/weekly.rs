use super::super::calendar;
use super::super::domain::DailyRecord;
use super::{average_score, cardio_days, format_weight_delta, weight_delta};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;

const EMPTY_NOTE: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub days: usize,
    pub weight_start: Option<f64>,
    pub weight_end: Option<f64>,
    pub weight_delta: Option<f64>,
    pub average_score: Option<u8>,
    pub cardio_days: usize,
    pub strength_days: usize,
    pub protein_days: usize,
    pub water_days: usize,
    pub win: Option<String>,
    pub fix: Option<String>,
}

pub(super) fn build(window: &[&DailyRecord]) -> Option<WeeklyReport> {
    let first = window.first()?;
    let last = window.last()?;

    Some(WeeklyReport {
        period_start: first.date,
        period_end: last.date,
        days: window.len(),
        weight_start: first.recorded_weight(),
        weight_end: last.recorded_weight(),
        weight_delta: weight_delta(window),
        average_score: average_score(window),
        cardio_days: cardio_days(window),
        strength_days: window.iter().filter(|r| r.completed_strength()).count(),
        protein_days: window.iter().filter(|r| r.protein).count(),
        water_days: window.iter().filter(|r| r.water).count(),
        win: non_blank(&last.win),
        fix: non_blank(&last.fix),
    })
}

fn non_blank(note: &str) -> Option<String> {
    let trimmed = note.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn weight_text(weight: Option<f64>) -> String {
    weight.map_or_else(|| "--".to_string(), |w| w.to_string())
}

impl WeeklyReport {
    pub fn win_or_placeholder(&self) -> &str {
        self.win.as_deref().unwrap_or(EMPTY_NOTE)
    }

    pub fn fix_or_placeholder(&self) -> &str {
        self.fix.as_deref().unwrap_or(EMPTY_NOTE)
    }

    /// Plain-text summary suitable for pasting into a chat.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let days = self.days;
        let delta = self
            .weight_delta
            .map_or_else(|| EMPTY_NOTE.to_string(), format_weight_delta);
        let average = self
            .average_score
            .map_or_else(|| "--".to_string(), |score| score.to_string());

        let _ = writeln!(out, "RELATÓRIO SEMANAL (últimos {days} dias)");
        let _ = writeln!(
            out,
            "{} → {}",
            calendar::display(self.period_start),
            calendar::display(self.period_end)
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Peso: {} → {} ({delta})",
            weight_text(self.weight_start),
            weight_text(self.weight_end)
        );
        let _ = writeln!(out, "Score médio: {average}/100");
        let _ = writeln!(out);
        let _ = writeln!(out, "Cardio: {}/{days} dias", self.cardio_days);
        let _ = writeln!(out, "Força: {} treinos", self.strength_days);
        let _ = writeln!(out, "Proteína batida: {}/{days}", self.protein_days);
        let _ = writeln!(out, "Água batida: {}/{days}", self.water_days);
        let _ = writeln!(out);
        let _ = writeln!(out, "Vitória da semana: {}", self.win_or_placeholder());
        let _ = write!(out, "Ajuste prioritário: {}", self.fix_or_placeholder());
        out
    }
}
