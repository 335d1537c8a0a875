use clap::{Parser, Subcommand};
use peak_core::training_log::{entries_for_day, prefill_day};
use peak_core::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "peak")]
#[command(about = "12-week bench press peaking program", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the program from week 1 with your current maxes
    Start {
        /// Bench press 1RM (kg)
        #[arg(long)]
        bench: f64,

        /// Two-second paused bench 1RM (kg)
        #[arg(long)]
        paused: f64,

        /// Legs-up bench 1RM (kg)
        #[arg(long)]
        legs_up: f64,
    },

    /// Change one or more maxes without resetting progress
    Maxes {
        #[arg(long)]
        bench: Option<f64>,

        #[arg(long)]
        paused: Option<f64>,

        #[arg(long)]
        legs_up: Option<f64>,
    },

    /// Show a week of the plan (defaults to the current week)
    Show {
        #[arg(long)]
        week: Option<u8>,

        /// Print the whole program as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log a training session (defaults to the next one due)
    Log {
        #[arg(long, requires = "day")]
        week: Option<u8>,

        #[arg(long, requires = "week")]
        day: Option<u8>,

        /// Accept the planned weights and reps without prompting
        #[arg(long)]
        auto_complete: bool,

        /// Note stored with every set of the session
        #[arg(long)]
        memo: Option<String>,
    },

    /// Show what was logged for a session
    History {
        #[arg(long)]
        week: u8,

        #[arg(long)]
        day: u8,
    },

    /// Export the whole program to CSV
    Export {
        /// Output path (defaults to the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show maxes and progress (default)
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        peak_core::logging::init_with_level("debug");
    } else {
        peak_core::logging::init();
    }

    let config = Config::load()?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    tracing::debug!("Using data directory {:?}", data_dir);

    let errors = schedule::validate(&schedule::PROGRAM);
    if !errors.is_empty() {
        eprintln!("Schedule validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Schedule("Invalid program schedule".into()));
    }

    match cli.command {
        Some(Commands::Start {
            bench,
            paused,
            legs_up,
        }) => cmd_start(&data_dir, bench, paused, legs_up),
        Some(Commands::Maxes {
            bench,
            paused,
            legs_up,
        }) => cmd_maxes(&data_dir, bench, paused, legs_up),
        Some(Commands::Show { week, json }) => cmd_show(&data_dir, week, json),
        Some(Commands::Log {
            week,
            day,
            auto_complete,
            memo,
        }) => cmd_log(&data_dir, week.zip(day), auto_complete, memo, &config),
        Some(Commands::History { week, day }) => cmd_history(&data_dir, week, day),
        Some(Commands::Export { out }) => cmd_export(&data_dir, out, &config),
        Some(Commands::Status) | None => cmd_status(&data_dir),
    }
}

fn cmd_start(data_dir: &Path, bench: f64, paused: f64, legs_up: f64) -> Result<()> {
    let maxes = TrainingMaxes::new(bench, paused, legs_up)?;
    let profile_path = Config::profile_path(data_dir);

    Profile::update(&profile_path, |profile| {
        profile.start_program(maxes);
        Ok(())
    })?;

    println!("✓ Program started");
    print_maxes(&maxes);
    Ok(())
}

fn cmd_maxes(
    data_dir: &Path,
    bench: Option<f64>,
    paused: Option<f64>,
    legs_up: Option<f64>,
) -> Result<()> {
    let profile_path = Config::profile_path(data_dir);

    let profile = Profile::update(&profile_path, |profile| {
        let current = profile.maxes.ok_or(Error::ProgramNotStarted)?;
        let maxes = TrainingMaxes::new(
            bench.unwrap_or(current.bench),
            paused.unwrap_or(current.paused_bench),
            legs_up.unwrap_or(current.legs_up),
        )?;
        profile.update_maxes(maxes);
        Ok(())
    })?;

    println!("✓ Maxes updated; the plan has been recalculated");
    if let Some(maxes) = profile.maxes {
        print_maxes(&maxes);
    }
    Ok(())
}

fn cmd_show(data_dir: &Path, week: Option<u8>, json: bool) -> Result<()> {
    let profile = Profile::load(&Config::profile_path(data_dir))?;
    let program = profile.program()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&program)?);
        return Ok(());
    }

    let week = week.unwrap_or(profile.current.week);
    let plan = program
        .iter()
        .find(|w| w.week == week)
        .ok_or(Error::NoSuchSession { week, day: 1 })?;

    display_week(plan, &profile);
    Ok(())
}

fn cmd_log(
    data_dir: &Path,
    target: Option<(u8, u8)>,
    auto_complete: bool,
    memo: Option<String>,
    config: &Config,
) -> Result<()> {
    let profile_path = Config::profile_path(data_dir);
    let log_path = Config::log_path(data_dir);

    let mut profile = Profile::load(&profile_path)?;
    let program = profile.program()?;

    let session = match target {
        Some((week, day)) => SessionId::new(week, day)?,
        None => profile.current,
    };
    let plan = program
        .iter()
        .find(|w| w.week == session.week)
        .and_then(|w| w.day(session.day))
        .ok_or(Error::NoSuchSession {
            week: session.week,
            day: session.day,
        })?;

    // Editing a finished session starts from what was logged
    let existing = entries_for_day(&log_path, session)?;
    let mut entries = if profile.is_completed(session) && !existing.is_empty() {
        println!("Editing logged session");
        existing
    } else {
        prefill_day(session.week, plan, config.plates.increment_kg)
    };

    println!("\nWeek {} · Day {}", session.week, session.day);
    for p in &plan.prescriptions {
        println!("  {}", format_prescription(p));
    }
    println!();

    if !auto_complete {
        prompt_sets(&mut entries)?;
    }

    let now = chrono::Utc::now();
    for entry in &mut entries {
        entry.id = uuid::Uuid::new_v4();
        entry.logged_at = now;
        if memo.is_some() {
            entry.memo = memo.clone();
        }
    }

    let mut sink = JsonlLogSink::new(&log_path);
    sink.append_all(&entries)?;

    profile.complete_session(session);
    profile.save(&profile_path)?;

    println!("✓ Session logged ({} sets)", entries.len());
    if profile.is_completed(SessionId::LAST) {
        println!("  Program complete!");
    } else {
        println!(
            "  Next: week {} day {}",
            profile.current.week, profile.current.day
        );
    }
    Ok(())
}

fn cmd_history(data_dir: &Path, week: u8, day: u8) -> Result<()> {
    let session = SessionId::new(week, day)?;
    let entries = entries_for_day(&Config::log_path(data_dir), session)?;

    if entries.is_empty() {
        println!("Nothing logged for week {} day {}.", week, day);
        return Ok(());
    }

    println!("Week {} · Day {}", week, day);
    for entry in &entries {
        let actual = match (entry.actual_weight, entry.actual_reps) {
            (Some(w), Some(r)) => format!("{:.1} kg x {}", w, r),
            (Some(w), None) => format!("{:.1} kg", w),
            (None, Some(r)) => format!("x {}", r),
            (None, None) => "-".to_string(),
        };
        println!(
            "  {:<18} set {}  planned {:.1} kg x {}  actual {}",
            entry.exercise.name(),
            entry.set_number,
            entry.planned_weight,
            entry.planned_reps,
            actual
        );
        if let Some(ref memo) = entry.memo {
            if entry.set_number == 1 {
                println!("    memo: {}", memo);
            }
        }
    }
    Ok(())
}

fn cmd_export(data_dir: &Path, out: Option<PathBuf>, config: &Config) -> Result<()> {
    let profile = Profile::load(&Config::profile_path(data_dir))?;
    let program = profile.program()?;

    let path = out.unwrap_or_else(|| data_dir.join(&config.export.file_name));
    let count = export::write_csv(&program, &path, config.plates.increment_kg)?;

    println!("✓ Exported {} prescriptions", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn cmd_status(data_dir: &Path) -> Result<()> {
    let profile = Profile::load(&Config::profile_path(data_dir))?;

    let Some(maxes) = profile.maxes else {
        println!("No program started.");
        println!("Run `peak start --bench <kg> --paused <kg> --legs-up <kg>` to begin.");
        return Ok(());
    };

    print_maxes(&maxes);
    println!(
        "  Progress: {}/36 sessions",
        profile.completed_sessions.len()
    );
    println!(
        "  Current:  week {} day {}",
        profile.current.week, profile.current.day
    );

    let program = maxes.generate();
    if let Some(day) = program
        .iter()
        .find(|w| w.week == profile.current.week)
        .and_then(|w| w.day(profile.current.day))
    {
        println!();
        for p in &day.prescriptions {
            println!("  {}", format_prescription(p));
        }
    }
    Ok(())
}

fn print_maxes(maxes: &TrainingMaxes) {
    println!("  {:<18} {:.1} kg", ExerciseKind::Bench.name(), maxes.bench);
    println!(
        "  {:<18} {:.1} kg",
        ExerciseKind::PausedBench.name(),
        maxes.paused_bench
    );
    println!(
        "  {:<18} {:.1} kg",
        ExerciseKind::LegsUpBench.name(),
        maxes.legs_up
    );
}

fn format_prescription(p: &SetPrescription) -> String {
    let effort = match (p.rpe, p.estimated_max) {
        (Some(rpe), Some(e1rm)) => format!("@{:<4} e1RM {:.1} kg", rpe, e1rm),
        _ => "ramp".to_string(),
    };
    format!(
        "{:<18} {:>6.1} kg  {} x {}  {}",
        p.exercise.name(),
        p.weight,
        p.reps,
        p.sets,
        effort
    )
}

fn display_week(plan: &WeekPlan, profile: &Profile) {
    println!("\n╭─────────────────────────────────────────╮");
    if plan.is_deload() {
        println!("│  WEEK {} (DELOAD)", plan.week);
    } else {
        println!("│  WEEK {}", plan.week);
    }
    println!("╰─────────────────────────────────────────╯");

    for day in &plan.days {
        let session = SessionId {
            week: plan.week,
            day: day.day,
        };
        let marker = if profile.is_completed(session) {
            "✓"
        } else if profile.current == session {
            "→"
        } else {
            " "
        };
        println!("\n{} Day {}", marker, day.day);
        for p in &day.prescriptions {
            println!("    {}", format_prescription(p));
        }
    }

    println!("\n  Accessories");
    for a in &plan.accessories {
        println!(
            "    {:<10} {:<10} {:<28} {} x {}",
            a.weekday.label(),
            a.category.label(),
            a.name,
            a.reps,
            a.sets
        );
    }
    println!();
}

/// Walk through each set; Enter keeps the prefilled numbers
fn prompt_sets(entries: &mut [TrainingLogEntry]) -> Result<()> {
    println!("─────────────────────────────────────────");
    println!("Enter to accept, or type `<kg> [reps]`");

    for entry in entries.iter_mut() {
        loop {
            print!(
                "{} set {} [{:.1} kg x {}]> ",
                entry.exercise.name(),
                entry.set_number,
                entry.actual_weight.unwrap_or(entry.planned_weight),
                entry.actual_reps.unwrap_or(entry.planned_reps)
            );
            io::stdout().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                // EOF: keep the rest as planned
                return Ok(());
            }

            match parse_set_input(input.trim()) {
                Ok(None) => break,
                Ok(Some((weight, reps))) => {
                    entry.actual_weight = Some(weight);
                    if let Some(reps) = reps {
                        entry.actual_reps = Some(reps);
                    }
                    break;
                }
                Err(msg) => println!("  {}", msg),
            }
        }
    }
    Ok(())
}

/// Parse `<kg> [reps]`; empty input means "keep"
fn parse_set_input(input: &str) -> std::result::Result<Option<(f64, Option<u32>)>, String> {
    if input.is_empty() {
        return Ok(None);
    }

    let mut parts = input.split_whitespace();
    let weight = parts
        .next()
        .and_then(|w| w.parse::<f64>().ok())
        .filter(|w| w.is_finite() && *w >= 0.0)
        .ok_or_else(|| format!("Couldn't read a weight from {:?}", input))?;
    let reps = match parts.next() {
        Some(r) => Some(
            r.parse::<u32>()
                .map_err(|_| format!("Couldn't read reps from {:?}", r))?,
        ),
        None => None,
    };
    tracing::debug!("Parsed set input: {} kg x {:?}", weight, reps);
    Ok(Some((weight, reps)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_input() {
        assert_eq!(parse_set_input(""), Ok(None));
        assert_eq!(parse_set_input("72.5"), Ok(Some((72.5, None))));
        assert_eq!(parse_set_input("72.5 4"), Ok(Some((72.5, Some(4)))));
        assert!(parse_set_input("heavy").is_err());
        assert!(parse_set_input("72.5 x").is_err());
        assert!(parse_set_input("-5").is_err());
    }

    #[test]
    fn test_format_prescription() {
        let program = generate_program(90.0, 80.0, 80.0);
        let line = format_prescription(&program[0].days[0].prescriptions[0]);
        assert!(line.contains("Bench Press"));
        assert!(line.contains("74.7 kg"));
        assert!(line.contains("e1RM 90.5 kg"));

        let ramp = format_prescription(&program[0].days[1].prescriptions[0]);
        assert!(ramp.ends_with("ramp"));
    }
}
