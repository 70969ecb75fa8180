//! DASH Planner
//!
//! Command line front end printing nutrition reports as JSON.

use serde::Serialize;
use tracing_subscriber::EnvFilter;

use dash_planner::config::{self, AppConfig};
use dash_planner::tools;

const USAGE: &str = "Usage:
  dash-planner list
  dash-planner recipe <id> [nutrient...]
  dash-planner menu <id>
  dash-planner plan <id>";

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_id(arg: Option<&String>) -> Result<i64, Box<dyn std::error::Error>> {
    let raw = arg.ok_or_else(|| format!("Missing id\n{}", USAGE))?;
    raw.parse::<i64>()
        .map_err(|_| format!("Invalid id '{}'", raw).into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app_config = AppConfig::from_env();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&app_config.log_filter)?)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    tracing::debug!("Catalog path: {}", app_config.data_path.display());
    let catalog = config::load_catalog(&app_config.data_path)?;

    match command.as_str() {
        "list" => print_json(&tools::list_catalog(&catalog)),
        "recipe" => {
            let id = parse_id(args.get(1))?;
            let track: Vec<String> = args.iter().skip(2).cloned().collect();
            match tools::recipe_report(&catalog, id, &track)? {
                Some(report) => print_json(&report),
                None => Err(format!("Recipe not found: {}", id).into()),
            }
        }
        "menu" => {
            let id = parse_id(args.get(1))?;
            match tools::menu_report(&catalog, id)? {
                Some(report) => print_json(&report),
                None => Err(format!("Menu not found: {}", id).into()),
            }
        }
        "plan" => {
            let id = parse_id(args.get(1))?;
            match tools::daily_plan_report(&catalog, id)? {
                Some(report) => print_json(&report),
                None => Err(format!("Daily plan not found: {}", id).into()),
            }
        }
        other => Err(format!("Unknown command '{}'\n{}", other, USAGE).into()),
    }
}
