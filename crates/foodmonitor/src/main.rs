//! `foodmon` - CLI for foodmonitor
//!
//! Every command loads the dashboard from the configured database, applies
//! at most one change, and prints the result.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use clap::Parser;
use serde_json::json;

use foodmonitor::cli::{
    Cli, Command, ConfigCommand, DietCommand, FoodCommand, HygieneCommand, OutputFormat,
    ZoneCommand, ZoneSetArgs,
};
use foodmonitor::forms::{DietForm, FoodForm};
use foodmonitor::model::ZoneField;
use foodmonitor::view::{ChecklistView, DashboardView, DietView, FoodListView, ZonesView};
use foodmonitor::{init_logging, metrics, Config, Dashboard, Storage};

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> CliResult {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config_path = cli.config;
    match cli.command {
        // Config commands must work even when the config file is broken.
        Command::Config(cmd) => handle_config(config_path, cmd),
        Command::Dashboard(arg) => {
            with_config(config_path, |config, now| handle_dashboard(config, now, arg.format))
        }
        Command::Food(cmd) => with_config(config_path, |config, now| handle_food(config, now, cmd)),
        Command::Zone(cmd) => with_config(config_path, |config, now| handle_zone(config, now, cmd)),
        Command::Hygiene(cmd) => {
            with_config(config_path, |config, now| handle_hygiene(config, now, cmd))
        }
        Command::Diet(cmd) => with_config(config_path, |config, now| handle_diet(config, now, cmd)),
        Command::Reset { yes } => {
            with_config(config_path, |config, now| handle_reset(config, now, yes))
        }
    }
}

/// Loads the configuration and reads the clock, then runs `handler`.
fn with_config(
    config_path: Option<PathBuf>,
    handler: impl FnOnce(&Config, &DateTime<Local>) -> CliResult,
) -> CliResult {
    let config = Config::load_from(config_path)?;
    handler(&config, &Local::now())
}

fn open(config: &Config, now: &DateTime<Local>) -> Result<Dashboard, foodmonitor::Error> {
    Dashboard::open(config, now.with_timezone(&Utc))
}

fn print_json(value: &impl serde::Serialize) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_dashboard(config: &Config, now: &DateTime<Local>, format: OutputFormat) -> CliResult {
    let dash = open(config, now)?;
    let metrics = dash.metrics(now);

    match format {
        OutputFormat::Json => print_json(&metrics),
        OutputFormat::Plain => {
            print!(
                "{}",
                DashboardView {
                    collections: dash.collections(),
                    metrics: &metrics,
                    thresholds: dash.thresholds(),
                }
            );
            Ok(())
        }
    }
}

fn handle_food(config: &Config, now: &DateTime<Local>, cmd: FoodCommand) -> CliResult {
    let mut dash = open(config, now)?;
    let now_utc = now.with_timezone(&Utc);
    let window_days = dash.thresholds().expiring_soon_days;

    match cmd {
        FoodCommand::List(arg) => {
            let items = &dash.collections().food_items;
            match arg.format {
                OutputFormat::Json => {
                    let rows: Vec<_> = items
                        .iter()
                        .map(|item| {
                            json!({
                                "item": item,
                                "daysUntilExpiry": item.days_until_expiry(now_utc),
                                "status": item.status(now_utc, window_days),
                            })
                        })
                        .collect();
                    print_json(&rows)?;
                }
                OutputFormat::Plain => print!(
                    "{}",
                    FoodListView {
                        items,
                        now: now_utc,
                        window_days,
                        date_format: &config.display.date_format,
                    }
                ),
            }
        }
        FoodCommand::Add(args) => {
            let mut form = FoodForm::from(args);
            let notice = dash.add_food(&mut form, now_utc)?;
            println!("{notice}");
        }
        FoodCommand::Remove { id } => match dash.remove_food(&id)? {
            Some(notice) => println!("{notice}"),
            None => println!("No food item with id {id}."),
        },
    }
    Ok(())
}

fn handle_zone(config: &Config, now: &DateTime<Local>, cmd: ZoneCommand) -> CliResult {
    let mut dash = open(config, now)?;
    let warning_delta = dash.thresholds().warning_delta;

    match cmd {
        ZoneCommand::List(arg) => {
            let zones = &dash.collections().temperature_zones;
            match arg.format {
                OutputFormat::Json => {
                    let rows: Vec<_> = zones
                        .iter()
                        .map(|zone| json!({ "zone": zone, "status": zone.status(warning_delta) }))
                        .collect();
                    print_json(&rows)?;
                }
                OutputFormat::Plain => print!(
                    "{}",
                    ZonesView {
                        zones,
                        warning_delta
                    }
                ),
            }
        }
        ZoneCommand::Set(args) => {
            let ZoneSetArgs {
                id,
                current,
                target,
                min,
                max,
            } = args;
            let edits = [
                (ZoneField::Current, current),
                (ZoneField::Target, target),
                (ZoneField::Min, min),
                (ZoneField::Max, max),
            ];
            if edits.iter().all(|(_, value)| value.is_none()) {
                println!("Nothing to change. Pass --current, --target, --min or --max.");
                return Ok(());
            }

            let mut draft = dash.edit_zones();
            for (field, value) in edits {
                if let Some(value) = value {
                    draft.set(&id, field, value)?;
                }
            }
            let notice = dash.save_zones(draft)?;
            println!("{notice}");
            println!(
                "Temperature alerts: {}",
                metrics::temperature_alert_count(&dash.collections().temperature_zones)
            );
        }
    }
    Ok(())
}

fn handle_hygiene(config: &Config, now: &DateTime<Local>, cmd: HygieneCommand) -> CliResult {
    let mut dash = open(config, now)?;

    match cmd {
        HygieneCommand::List(arg) => {
            let tasks = &dash.collections().hygiene_tasks;
            match arg.format {
                OutputFormat::Json => print_json(&json!({
                    "score": metrics::hygiene_score(tasks),
                    "tasks": tasks,
                }))?,
                OutputFormat::Plain => print!("{}", ChecklistView { tasks }),
            }
        }
        HygieneCommand::Toggle { id } => match dash.toggle_task(&id)? {
            Some(true) => println!("Task {id} marked done."),
            Some(false) => println!("Task {id} marked not done."),
            None => println!("No hygiene task with id {id}."),
        },
    }
    Ok(())
}

fn handle_diet(config: &Config, now: &DateTime<Local>, cmd: DietCommand) -> CliResult {
    let mut dash = open(config, now)?;

    match cmd {
        DietCommand::List { format, limit } => {
            let entries = &dash.collections().diet_entries;
            let limit = limit.unwrap_or(config.display.recent_diet_entries);
            match format {
                OutputFormat::Json => print_json(&json!({
                    "today": metrics::daily_totals(entries, now),
                    "entries": entries.iter().take(limit).collect::<Vec<_>>(),
                }))?,
                OutputFormat::Plain => print!(
                    "{}",
                    DietView {
                        entries,
                        now,
                        limit
                    }
                ),
            }
        }
        DietCommand::Add(args) => {
            let mut form = DietForm::from(args);
            let notice = dash.add_diet(&mut form, now.with_timezone(&Utc))?;
            println!("{notice}");
        }
        DietCommand::Remove { id } => match dash.remove_diet(&id)? {
            Some(notice) => println!("{notice}"),
            None => println!("No diet entry with id {id}."),
        },
    }
    Ok(())
}

fn handle_reset(config: &Config, now: &DateTime<Local>, yes: bool) -> CliResult {
    if !yes {
        println!("This will delete all stored food items, zones, tasks and diet entries.");
        println!("Use --yes to confirm.");
        return Ok(());
    }
    let mut dash = open(config, now)?;
    let removed = dash.reset(now.with_timezone(&Utc))?;
    println!("Removed {removed} stored collections. Sample data returns on next use.");
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> CliResult {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                print_json(&config)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                let db_path = config.database_path();
                println!("  Database path:        {}", db_path.display());
                if db_path.exists() {
                    let stats = Storage::open(&db_path)?.stats()?;
                    println!("  Stored collections:   {}", stats.collections);
                    println!("  Database size:        {} bytes", stats.db_size_bytes);
                    if let Some(saved) = stats.last_saved {
                        println!("  Last saved:           {saved}");
                    }
                }
                println!();
                println!("[Alerts]");
                println!(
                    "  Expiring soon (days): {}",
                    config.alerts.expiring_soon_days
                );
                println!(
                    "  Warning delta:        {}",
                    config.alerts.temperature_warning_delta
                );
                println!();
                println!("[Display]");
                println!("  Date format:          {}", config.display.date_format);
                println!(
                    "  Recent diet entries:  {}",
                    config.display.recent_diet_entries
                );
            }
        }
        ConfigCommand::Path => {
            println!(
                "{}",
                config_path
                    .unwrap_or_else(Config::default_config_path)
                    .display()
            );
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
