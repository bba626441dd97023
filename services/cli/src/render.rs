use leanlog::tracker::calendar;
use leanlog::tracker::history::format_weight_delta;
use leanlog::tracker::{
    GoalConfig, HistoryAggregator, ScheduledDose, ScoredDay, STREAK_THRESHOLD,
};

pub(crate) fn scored_day(scored: &ScoredDay) {
    let record = &scored.record;
    println!(
        "{}: score {}/100 {}",
        calendar::display(record.date),
        record.score.total,
        scored.badge
    );
    println!("  {}", record.score.breakdown());
    if let Some(weight) = record.recorded_weight() {
        println!("  Peso: {weight} kg");
    }
    println!(
        "  Cardio: {} min ({}) | Passos: {} | Sono: {} h",
        record.cardio_minutes(),
        record.intensity.label(),
        record.step_count(),
        record.sleep_hours()
    );
    if !record.win.trim().is_empty() {
        println!("  Vitória: {}", record.win.trim());
    }
    if !record.fix.trim().is_empty() {
        println!("  Ajuste: {}", record.fix.trim());
    }
}

pub(crate) fn dashboard(aggregator: &HistoryAggregator<'_>, limit: usize) {
    let kpis = aggregator.kpis();
    let latest = kpis
        .latest_weight
        .map_or_else(|| "--".to_string(), |weight| format!("{weight} kg"));
    let delta = kpis
        .weight_delta
        .map_or_else(|| "--".to_string(), format_weight_delta);
    let average = kpis
        .average_score
        .map_or_else(|| "--".to_string(), |score| score.to_string());

    println!("Peso atual: {latest} (Δ {delta})");
    println!("Score médio ({} dias): {average}", kpis.window_days);
    println!("Cardio: {}/{} dias", kpis.cardio_days, kpis.window_days);
    println!("Streak (score ≥ {STREAK_THRESHOLD}): {} dias", kpis.streak);
    println!("{}", aggregator.chart_series().caption);

    let recent = aggregator.recent(limit);
    if recent.is_empty() {
        return;
    }
    println!("\nÚltimos registros:");
    for item in recent {
        let weight = item
            .weight
            .map_or_else(|| "--".to_string(), |weight| format!("{weight} kg"));
        println!(
            "- {} | score {} | {} | cardio {} min | {} passos",
            calendar::display(item.date),
            item.score,
            weight,
            item.cardio_min,
            item.steps
        );
    }
}

pub(crate) fn schedule(doses: &[ScheduledDose]) {
    if doses.is_empty() {
        println!("Nenhuma dose no período.");
        return;
    }
    for dose in doses {
        println!(
            "#{:>2} {} {:>8} {}",
            dose.occurrence,
            calendar::display(dose.date),
            dose.dose_label,
            dose.status_label()
        );
    }
}

pub(crate) fn goals(goals: &GoalConfig) {
    println!("Passos: {}", goals.steps_goal);
    println!("Cardio: {} min", goals.cardio_goal);
    println!("Sono: {} h", goals.sleep_goal);
    println!("Refeições limpas: {}", goals.clean_meals_goal);
    println!(
        "Dia sem força conta pontos: {}",
        yes_no(goals.neutral_strength)
    );
    println!("Penalizar beliscos: {}", yes_no(goals.penalize_snacks));
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "sim"
    } else {
        "não"
    }
}
