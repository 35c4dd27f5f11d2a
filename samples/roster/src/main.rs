//! roster-report
//!
//! Prints a department report for a roster file, or for a built-in roster
//! when no path is given.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin roster-report -- staff.json
//! ```

use std::env;
use std::path::PathBuf;

use roster_sample::report::{badges, department_summaries, distinct_skills, salary_bands, top_earners};
use roster_sample::roster::{DEFAULT_ROSTER, load_roster, parse_roster};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const HIGH_SALARY: u64 = 8_000;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let roster = match env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading roster");
            load_roster(&path)?
        }
        None => {
            tracing::info!("no roster given, using the built-in one");
            parse_roster(DEFAULT_ROSTER)?
        }
    };

    println!("Departments");
    for (_, summary) in &department_summaries(&roster)? {
        println!(
            "  {:<10} {:>2} staff  payroll {:>7}  average {:>9.2}",
            summary.department, summary.headcount, summary.payroll, summary.average_salary
        );
    }

    println!("Top earners: {}", top_earners(&roster, 3).join(", "));
    println!("Skills: {}", distinct_skills(&roster).join(", "));

    let (high, low) = salary_bands(&roster, HIGH_SALARY);
    println!("At or above {HIGH_SALARY}: {}", high.join(", "));
    println!("Below {HIGH_SALARY}: {}", low.join(", "));

    println!("Badges");
    for (badge, name) in badges(&roster, 1000) {
        println!("  #{badge} {name}");
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("roster_report=info,collectables=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
