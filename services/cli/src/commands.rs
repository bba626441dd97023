use crate::cli::{
    Command, DateArg, DayArgs, DayCommand, DoseCommand, ExportCommand, GoalArgs, GoalsCommand,
    ImportCommand, ScheduleArgs, ThemeCommand,
};
use crate::infra::{open_output, open_service, today, Service};
use crate::render;
use chrono::Utc;
use leanlog::config::AppConfig;
use leanlog::error::AppError;
use leanlog::tracker::{DailyRecord, GoalConfig, HistoryAggregator};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use tracing::info;

pub(crate) fn dispatch(command: Command, config: &AppConfig, json: bool) -> Result<(), AppError> {
    let service = open_service(config)?;

    match command {
        Command::Day { command } => run_day(&service, command, json),
        Command::History(args) => {
            let entries = service.entries();
            let aggregator = HistoryAggregator::new(&entries);
            if json {
                let mut view = aggregator.dashboard();
                view.recent = aggregator.recent(args.limit);
                return print_json(&view);
            }
            render::dashboard(&aggregator, args.limit);
            Ok(())
        }
        Command::Report => {
            match service.weekly_report() {
                Some(report) if json => return print_json(&report),
                Some(report) => println!("{}", report.render()),
                None => println!("Sem dados ainda."),
            }
            Ok(())
        }
        Command::Schedule(args) => run_schedule(&service, config, args, json),
        Command::Dose { command } => run_dose(&service, command),
        Command::Goals { command } => run_goals(&service, command, json),
        Command::Export {
            command: ExportCommand::Csv(args),
        } => {
            let mut output = open_output(&args.output)?;
            let rows = service.export_csv(&mut output)?;
            output.flush()?;
            info!(rows, output = %args.output.display(), "csv exported");
            eprintln!("{rows} registros exportados");
            Ok(())
        }
        Command::Import {
            command: ImportCommand::Csv { path },
        } => {
            let reader = BufReader::new(File::open(&path)?);
            let rows = service.import_csv(reader)?;
            println!("{rows} registros importados de {}", path.display());
            Ok(())
        }
        Command::Backup(args) => {
            let document = service.backup(Utc::now()).to_json()?;
            let mut output = open_output(&args.output)?;
            output.write_all(document.as_bytes())?;
            output.flush()?;
            info!(output = %args.output.display(), "backup written");
            Ok(())
        }
        Command::Restore { path } => {
            let raw = fs::read_to_string(&path)?;
            let summary = service.restore(&raw)?;
            println!(
                "Backup restaurado: {} registros, {} marcações de dose{}{}",
                summary.entries,
                summary.doses,
                if summary.goals_replaced { ", metas" } else { "" },
                if summary.theme_replaced { ", tema" } else { "" }
            );
            Ok(())
        }
        Command::Theme { command } => {
            let theme = match command {
                ThemeCommand::Show => service.theme(),
                ThemeCommand::Toggle => service.toggle_theme()?,
            };
            println!("{}", theme.label());
            Ok(())
        }
        Command::Reset { yes } => {
            if !yes {
                println!("Nada foi apagado. Use --yes para zerar registros e doses.");
                return Ok(());
            }
            service.reset_all()?;
            println!("Registros e doses apagados.");
            Ok(())
        }
    }
}

fn run_day(service: &Service, command: DayCommand, json: bool) -> Result<(), AppError> {
    match command {
        DayCommand::Save(args) => {
            let scored = service.save_day(record_from(args))?;
            if json {
                return print_json(&scored);
            }
            println!("Salvo.");
            render::scored_day(&scored);
        }
        DayCommand::Score(args) => {
            let scored = service.preview_score(&record_from(args));
            if json {
                return print_json(&scored);
            }
            render::scored_day(&scored);
        }
        DayCommand::Show(DateArg { date }) => {
            let date = date.unwrap_or_else(today);
            match service.load_day(date) {
                Some(scored) if json => return print_json(&scored),
                Some(scored) => render::scored_day(&scored),
                None => println!("Nenhum registro em {}.", date.format("%d/%m/%Y")),
            }
        }
    }
    Ok(())
}

fn record_from(args: DayArgs) -> DailyRecord {
    let DayArgs {
        date,
        weight,
        sleep,
        energy,
        hunger,
        pain,
        cardio_min,
        steps,
        intensity,
        protein,
        water,
        strength_day,
        strength_done,
        mobility_done,
        mobility_min,
        snacks,
        clean_meals,
        win,
        fix,
    } = args;

    DailyRecord {
        weight,
        sleep,
        energy,
        hunger,
        pain,
        cardio_min,
        steps,
        intensity: intensity.unwrap_or_default(),
        protein,
        water,
        strength_day,
        strength_done,
        mobility_done,
        mobility_min,
        snacks,
        clean_meals,
        win,
        fix,
        ..DailyRecord::new(date.unwrap_or_else(today))
    }
}

fn run_schedule(
    service: &Service,
    config: &AppConfig,
    args: ScheduleArgs,
    json: bool,
) -> Result<(), AppError> {
    let start = args.start.unwrap_or(config.schedule.start);
    let count = args.count.unwrap_or(config.schedule.count);
    let schedule = service.schedule(start, count);
    if json {
        return print_json(&schedule);
    }
    render::schedule(&schedule);
    Ok(())
}

fn run_dose(service: &Service, command: DoseCommand) -> Result<(), AppError> {
    match command {
        DoseCommand::Mark(DateArg { date }) => {
            let date = date.unwrap_or_else(today);
            service.set_dose(date, true)?;
            println!("Dose de {} marcada como aplicada.", date.format("%d/%m/%Y"));
        }
        DoseCommand::Unmark(DateArg { date }) => {
            let date = date.unwrap_or_else(today);
            service.set_dose(date, false)?;
            println!("Dose de {} marcada como pendente.", date.format("%d/%m/%Y"));
        }
        DoseCommand::Clear { yes } => {
            if !yes {
                println!("Nada foi apagado. Use --yes para limpar as marcações de doses.");
                return Ok(());
            }
            service.clear_doses()?;
            println!("Marcações de doses apagadas.");
        }
    }
    Ok(())
}

fn run_goals(service: &Service, command: GoalsCommand, json: bool) -> Result<(), AppError> {
    let goals = match command {
        GoalsCommand::Show => service.goals(),
        GoalsCommand::Set(args) => service.update_goals(merge_goals(service.goals(), args))?,
        GoalsCommand::Reset => service.reset_goals()?,
    };
    if json {
        return print_json(&goals);
    }
    render::goals(&goals);
    Ok(())
}

fn merge_goals(current: GoalConfig, args: GoalArgs) -> GoalConfig {
    GoalConfig {
        steps_goal: args.steps.unwrap_or(current.steps_goal),
        cardio_goal: args.cardio.unwrap_or(current.cardio_goal),
        sleep_goal: args.sleep.unwrap_or(current.sleep_goal),
        clean_meals_goal: args.clean_meals.unwrap_or(current.clean_meals_goal),
        neutral_strength: args.neutral_strength.unwrap_or(current.neutral_strength),
        penalize_snacks: args.penalize_snacks.unwrap_or(current.penalize_snacks),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let encoded = serde_json::to_string_pretty(value)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    println!("{encoded}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use leanlog::tracker::Intensity;

    #[test]
    fn merge_goals_keeps_unspecified_values() {
        let current = GoalConfig {
            cardio_goal: 45,
            ..GoalConfig::default()
        };
        let merged = merge_goals(
            current,
            GoalArgs {
                steps: Some(8_000),
                penalize_snacks: Some(true),
                ..GoalArgs::default()
            },
        );

        assert_eq!(merged.steps_goal, 8_000);
        assert_eq!(merged.cardio_goal, 45);
        assert!(merged.penalize_snacks);
        assert!(merged.neutral_strength);
    }

    #[test]
    fn record_from_args_carries_every_field() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 20).expect("valid date");
        let record = record_from(DayArgs {
            date: Some(date),
            weight: Some(81.2),
            cardio_min: Some(40),
            intensity: Some(Intensity::Leve),
            strength_day: true,
            clean_meals: 2,
            win: "caminhada".to_string(),
            ..DayArgs::default()
        });

        assert_eq!(record.date, date);
        assert_eq!(record.weight, Some(81.2));
        assert_eq!(record.cardio_min, Some(40));
        assert_eq!(record.intensity, Intensity::Leve);
        assert!(record.strength_day);
        assert!(!record.strength_done);
        assert_eq!(record.clean_meals, 2);
        assert_eq!(record.win, "caminhada");
        assert_eq!(record.score.total, 0);
    }
}
