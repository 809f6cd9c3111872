use clap::{Parser, Subcommand};
use ff_core::EntryKind;
use ff_engine::EngineError;
use ff_project::ProjectError;
use ff_results::{ArcFlashResult, ResultsError, RunStore, StudyRecord};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(about = "FaultFlow CLI - short-circuit and arc-flash studies", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a study file
    Validate {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// Run a study
    Run {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Keep the result in the run store next to the study
        #[arg(long)]
        store: bool,
        /// Print the full result record as JSON
        #[arg(long)]
        json: bool,
        /// Write the full result record as JSON to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List stored runs for a study
    Runs {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
    },
    /// Show a stored run
    ShowRun {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Run ID to display
        run_id: String,
        /// Print the full result record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a stored run
    DeleteRun {
        /// Path to the study YAML or JSON file
        study_path: PathBuf,
        /// Run ID to delete
        run_id: String,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Study error: {0}")]
    Project(#[from] ProjectError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("Results error: {0}")]
    Results(#[from] ResultsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { study_path } => cmd_validate(&study_path),
        Commands::Run {
            study_path,
            store,
            json,
            output,
        } => cmd_run(&study_path, store, json, output.as_deref()),
        Commands::Runs { study_path } => cmd_runs(&study_path),
        Commands::ShowRun {
            study_path,
            run_id,
            json,
        } => cmd_show_run(&study_path, &run_id, json),
        Commands::DeleteRun { study_path, run_id } => cmd_delete_run(&study_path, &run_id),
    }
}

fn cmd_validate(study_path: &Path) -> CliResult<()> {
    println!("Validating study: {}", study_path.display());
    let study = ff_project::load(study_path)?;
    println!(
        "✓ Study '{}' is valid ({} components)",
        study.name,
        study.components.len()
    );
    Ok(())
}

fn cmd_run(study_path: &Path, store: bool, json: bool, output: Option<&Path>) -> CliResult<()> {
    let study = ff_project::load(study_path)?;
    let started = Instant::now();

    let record = if store {
        let mut run_store = RunStore::for_study(study_path)?;
        ff_engine::run_and_save(&study, &mut run_store)?
    } else {
        ff_engine::run_study(&study)?
    };
    let elapsed = started.elapsed().as_secs_f64();

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&record)?)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("✓ Study '{}' completed in {:.3}s", study.name, elapsed);
    println!("  Run ID: {}", record.run_id);
    if store {
        println!("  Stored in run store");
    }
    if let Some(path) = output {
        println!("  Record written to {}", path.display());
    }
    print_record(&record);
    Ok(())
}

fn cmd_runs(study_path: &Path) -> CliResult<()> {
    let store = RunStore::for_study(study_path)?;
    let runs = store.list_runs()?;

    if runs.is_empty() {
        println!("No stored runs for: {}", study_path.display());
    } else {
        println!("Stored runs for '{}':", study_path.display());
        for manifest in runs {
            let max = manifest
                .max_fault_ka
                .map_or_else(|| "-".to_string(), |ka| format!("{ka:.2} kA"));
            println!(
                "  {} ({})  {} buses, max {}, {} warnings",
                manifest.run_id,
                manifest.timestamp,
                manifest.bus_count,
                max,
                manifest.warning_count
            );
        }
    }
    Ok(())
}

fn cmd_show_run(study_path: &Path, run_id: &str, json: bool) -> CliResult<()> {
    let store = RunStore::for_study(study_path)?;
    let record = store.load_record(run_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("Run {}", record.run_id);
    println!("  Study: {}", record.study.name);
    println!("  Timestamp: {}", record.timestamp);
    println!("  Engine: {}", record.engine_version);
    print_record(&record);
    Ok(())
}

fn cmd_delete_run(study_path: &Path, run_id: &str) -> CliResult<()> {
    let store = RunStore::for_study(study_path)?;
    if !store.has_run(run_id) {
        return Err(ResultsError::RunNotFound {
            run_id: run_id.to_string(),
        }
        .into());
    }
    store.delete_run(run_id)?;
    println!("✓ Deleted run {}", run_id);
    Ok(())
}

fn print_record(record: &StudyRecord) {
    println!("\nBuses:");
    println!(
        "  {:<12} {:>9} {:>10} {:>10} {:>7} {:>10} {:>10}  {}",
        "bus", "kV", "Isc kA", "w/mot kA", "X/R", "peak kA", "cal/cm²", "PPE"
    );
    for bus in &record.buses {
        let (isc, x_r, peak) = match &bus.fault {
            Some(f) => (
                format!("{:.3}", f.three_phase.ka),
                format!("{:.2}", f.x_r),
                format!("{:.3}", f.peak_ka),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };
        let with_motors = bus
            .with_motors
            .as_ref()
            .map_or_else(|| "-".to_string(), |w| format!("{:.3}", w.first_cycle_ka));
        let (energy, ppe) = match &bus.arc_flash {
            ArcFlashResult::Evaluated(e) => (
                format!("{:.2}", e.incident_energy_cal_cm2),
                if e.ppe_overflow {
                    format!("{} (over 40 cal/cm²)", e.ppe_category)
                } else {
                    e.ppe_category.to_string()
                },
            ),
            ArcFlashResult::NotEvaluated { missing_fields } => {
                ("-".to_string(), format!("not evaluated: {}", missing_fields.join(", ")))
            }
        };
        println!(
            "  {:<12} {:>9.3} {:>10} {:>10} {:>7} {:>10} {:>10}  {}",
            bus.bus,
            bus.voltage_v / 1000.0,
            isc,
            with_motors,
            x_r,
            peak,
            energy,
            ppe
        );
    }

    let s = &record.summary;
    println!("\nSummary:");
    if let (Some(max), Some(bus)) = (s.max_fault_ka, &s.max_fault_bus) {
        println!("  Max fault current: {max:.3} kA at {bus}");
    }
    if let (Some(min), Some(bus)) = (s.min_fault_ka, &s.min_fault_bus) {
        println!("  Min fault current: {min:.3} kA at {bus}");
    }
    if let (Some(e), Some(bus)) = (s.max_incident_energy_cal_cm2, &s.max_incident_energy_bus) {
        println!("  Max incident energy: {e:.2} cal/cm² at {bus}");
    }
    println!(
        "  Ledger: {} assumptions, {} warnings",
        s.assumption_count, s.warning_count
    );

    let warnings: Vec<_> = record
        .ledger
        .iter()
        .filter(|e| e.kind == EntryKind::Warning)
        .collect();
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in warnings {
            println!("  [{}] {}: {}", w.topic, w.subject, w.message);
        }
    }
}
