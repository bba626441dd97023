use super::common::*;
use crate::tracker::domain::EntryMap;
use crate::tracker::history::{round_half_away_from_zero, HistoryAggregator};

#[test]
fn streak_stops_at_first_failing_day() {
    let entries = entries_from([
        scored(jan(20), 85),
        scored(jan(19), 90),
        scored(jan(18), 70),
        scored(jan(17), 95),
    ]);

    assert_eq!(HistoryAggregator::new(&entries).streak(), 2);
}

#[test]
fn streak_breaks_on_a_calendar_gap() {
    let entries = entries_from([scored(jan(20), 85), scored(jan(18), 90)]);

    assert_eq!(HistoryAggregator::new(&entries).streak(), 1);
}

#[test]
fn streak_edge_cases() {
    let empty = EntryMap::new();
    assert_eq!(HistoryAggregator::new(&empty).streak(), 0);

    let single = entries_from([scored(jan(20), 80)]);
    assert_eq!(HistoryAggregator::new(&single).streak(), 1);

    let newest_fails = entries_from([scored(jan(20), 79), scored(jan(19), 100)]);
    assert_eq!(HistoryAggregator::new(&newest_fails).streak(), 0);
}

#[test]
fn streak_crosses_month_boundaries() {
    let entries = entries_from([
        scored(date(2026, 2, 1), 90),
        scored(date(2026, 1, 31), 88),
        scored(date(2026, 1, 30), 81),
    ]);

    assert_eq!(HistoryAggregator::new(&entries).streak(), 3);
}

#[test]
fn window_counts_recorded_dates_not_calendar_days() {
    let entries = entries_from((1..=20).step_by(2).map(|day| scored(jan(day), 50)));
    let aggregator = HistoryAggregator::new(&entries);

    let window = aggregator.window(7);
    let dates: Vec<_> = window.iter().map(|record| record.date).collect();

    assert_eq!(dates.len(), 7);
    assert_eq!(dates.first(), Some(&jan(7)));
    assert_eq!(dates.last(), Some(&jan(19)));
}

#[test]
fn average_score_is_unavailable_for_empty_history() {
    let entries = EntryMap::new();
    let kpis = HistoryAggregator::new(&entries).kpis();

    assert_eq!(kpis.average_score, None);
    assert_eq!(kpis.weight_delta, None);
    assert_eq!(kpis.latest_weight, None);
    assert_eq!(kpis.window_days, 0);
    assert_eq!(kpis.streak, 0);
}

#[test]
fn average_rounds_half_away_from_zero() {
    assert_eq!(round_half_away_from_zero(80.5), 81.0);
    assert_eq!(round_half_away_from_zero(81.5), 82.0);
    assert_eq!(round_half_away_from_zero(80.49), 80.0);

    let entries = entries_from([scored(jan(19), 80), scored(jan(20), 81)]);
    let kpis = HistoryAggregator::new(&entries).kpis();
    assert_eq!(kpis.average_score, Some(81));
}

#[test]
fn average_uses_only_the_latest_seven_records() {
    let mut records: Vec<_> = (1..=7).map(|day| scored(jan(day + 10), 90)).collect();
    records.push(scored(jan(1), 0));
    let entries = entries_from(records);

    let kpis = HistoryAggregator::new(&entries).kpis();
    assert_eq!(kpis.average_score, Some(90));
    assert_eq!(kpis.window_days, 7);
}

#[test]
fn weight_delta_needs_both_endpoints() {
    let mut first = scored(jan(18), 70);
    first.weight = Some(84.0);
    let middle = scored(jan(19), 70);
    let mut last = scored(jan(20), 70);
    last.weight = Some(82.8);

    let entries = entries_from([first.clone(), middle.clone(), last]);
    let delta = HistoryAggregator::new(&entries)
        .kpis()
        .weight_delta
        .expect("delta available");
    assert!((delta + 1.2).abs() < 1e-9);

    let mut unweighed_last = scored(jan(20), 70);
    unweighed_last.weight = Some(0.0);
    let entries = entries_from([first, middle, unweighed_last]);
    assert_eq!(HistoryAggregator::new(&entries).kpis().weight_delta, None);
}

#[test]
fn dashboard_delta_spans_the_chart_window() {
    let records: Vec<_> = (1..=20)
        .map(|day| {
            let mut record = scored(jan(day), 60);
            record.weight = Some(100.0 - f64::from(day));
            record
        })
        .collect();
    let entries = entries_from(records);
    let aggregator = HistoryAggregator::new(&entries);

    let kpis = aggregator.kpis();
    assert_eq!(kpis.latest_weight, Some(80.0));
    assert_eq!(kpis.weight_delta, Some(-13.0));

    let report = aggregator.weekly_report().expect("report available");
    assert_eq!(report.weight_delta, Some(-6.0));
}

#[test]
fn cardio_days_count_active_records_in_window() {
    let records: Vec<_> = (14..=20)
        .map(|day| {
            let mut record = scored(jan(day), 60);
            record.cardio_min = Some(if day % 2 == 0 { 30 } else { 0 });
            record
        })
        .collect();
    let entries = entries_from(records);

    let kpis = HistoryAggregator::new(&entries).kpis();
    assert_eq!(kpis.cardio_days, 4);
    assert_eq!(kpis.window_days, 7);
}

#[test]
fn chart_series_covers_fourteen_records_oldest_first() {
    let entries = entries_from((1..=20).map(|day| scored(jan(day), 70)));
    let chart = HistoryAggregator::new(&entries).chart_series();

    assert_eq!(chart.points.len(), 14);
    assert_eq!(chart.points[0].date, jan(7));
    assert_eq!(chart.points[13].date, jan(20));
    assert_eq!(chart.caption, "De 07/01/2026 até 20/01/2026 • 14 registros");

    let empty = EntryMap::new();
    assert_eq!(
        HistoryAggregator::new(&empty).chart_series().caption,
        "Sem dados para gráfico ainda"
    );
}

#[test]
fn recent_list_is_newest_first_and_capped() {
    let entries = entries_from((1..=15).map(|day| scored(jan(day), 70)));
    let recent = HistoryAggregator::new(&entries).recent(10);

    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].date, jan(15));
    assert_eq!(recent[9].date, jan(6));
}

#[test]
fn weekly_report_counts_adherence() {
    let records: Vec<_> = (14..=20)
        .map(|day| {
            let mut record = full_day(jan(day));
            record.score.total = 90;
            record.strength_day = day % 2 == 0;
            record.strength_done = day != 20;
            record.protein = day != 15;
            record.water = day > 16;
            record
        })
        .collect();
    let mut entries = entries_from(records);
    if let Some(latest) = entries.get_mut(&jan(20)) {
        latest.win = "  Treinei cedo  ".to_string();
    }

    let report = HistoryAggregator::new(&entries)
        .weekly_report()
        .expect("report available");

    assert_eq!(report.days, 7);
    assert_eq!(report.period_start, jan(14));
    assert_eq!(report.period_end, jan(20));
    assert_eq!(report.strength_days, 3);
    assert_eq!(report.protein_days, 6);
    assert_eq!(report.water_days, 4);
    assert_eq!(report.cardio_days, 7);
    assert_eq!(report.average_score, Some(90));
    assert_eq!(report.win.as_deref(), Some("Treinei cedo"));
    assert_eq!(report.fix, None);

    let text = report.render();
    assert!(text.contains("14/01/2026 → 20/01/2026"));
    assert!(text.contains("Força: 3 treinos"));
    assert!(text.contains("Vitória da semana: Treinei cedo"));
    assert!(text.ends_with("Ajuste prioritário: —"));
}

#[test]
fn weekly_report_is_absent_without_history() {
    let entries = EntryMap::new();
    assert!(HistoryAggregator::new(&entries).weekly_report().is_none());
}
