use clap::{Parser, Subcommand};
use gf_app::{
    AppResult, CaseOutcome, RunOptions, RunRequest, RunTimingSummary, load_compiled, run_service,
    simulate, summarize, write_template,
};
use gf_fluids::OracleKind;
use gf_results::{power_csv, power_rows, profile_csv, profile_export, separator_csv, separator_rows};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "geoflow")]
#[command(about = "geoflow - geothermal well and single-flash plant simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Write the reference case to a new file
    Template {
        /// Destination (extension selects YAML or JSON)
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// March the well and print the depth profile as CSV
    March {
        case_path: PathBuf,
        /// Property backend (coolprop or steam-table), overriding the case
        #[arg(long)]
        oracle: Option<OracleKind>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Separator-pressure sweep on the wellhead fluid
    Separator {
        case_path: PathBuf,
        #[arg(long)]
        oracle: Option<OracleKind>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Power across total mass flow
    Power {
        case_path: PathBuf,
        #[arg(long)]
        oracle: Option<OracleKind>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the full case and store the results next to it
    Run {
        case_path: PathBuf,
        #[arg(long)]
        oracle: Option<OracleKind>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// List stored runs for a case
    Runs {
        case_path: PathBuf,
        /// Only runs of this case name
        #[arg(long)]
        name: Option<String>,
    },
    /// Show details of a stored run
    ShowRun { case_path: PathBuf, run_id: String },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Template { path, force } => cmd_template(&path, force),
        Commands::March {
            case_path,
            oracle,
            output,
        } => cmd_march(&case_path, oracle, output.as_deref()),
        Commands::Separator {
            case_path,
            oracle,
            output,
        } => cmd_separator(&case_path, oracle, output.as_deref()),
        Commands::Power {
            case_path,
            oracle,
            output,
        } => cmd_power(&case_path, oracle, output.as_deref()),
        Commands::Run {
            case_path,
            oracle,
            no_cache,
        } => cmd_run(&case_path, oracle, !no_cache),
        Commands::Runs { case_path, name } => cmd_runs(&case_path, name.as_deref()),
        Commands::ShowRun { case_path, run_id } => cmd_show_run(&case_path, &run_id),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let (_case, compiled) = load_compiled(case_path)?;
    let summary = summarize(&compiled);
    println!("✓ Case is valid");
    println!(
        "  {} - {} nodes over {:.0} m, {} model, {} backend",
        summary.name, summary.nodes, summary.depth_m, summary.pressure_model, summary.oracle
    );
    println!(
        "  Separator sweep: {} points; power sweep: {}",
        summary.separator_points,
        if summary.has_power_sweep { "yes" } else { "no" }
    );
    Ok(())
}

fn cmd_template(path: &Path, force: bool) -> AppResult<()> {
    let case = write_template(path, force)?;
    println!("✓ Wrote case '{}' to {}", case.name, path.display());
    Ok(())
}

fn run_in_memory(case_path: &Path, oracle: Option<OracleKind>) -> AppResult<CaseOutcome> {
    let (_case, mut compiled) = load_compiled(case_path)?;
    if let Some(kind) = oracle {
        compiled.oracle = kind;
    }
    debug!(case = %compiled.name, oracle = %compiled.oracle, "simulating without the run store");
    let backend = compiled.oracle.build();
    let mut timing = RunTimingSummary::default();
    simulate(&compiled, backend.as_ref(), &mut timing)
}

fn emit(csv: String, rows: usize, output: Option<&Path>) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_march(case_path: &Path, oracle: Option<OracleKind>, output: Option<&Path>) -> AppResult<()> {
    let outcome = run_in_memory(case_path, oracle)?;
    let export = profile_export(&outcome.profile);

    if output.is_some() {
        match export.flash_depth_m {
            Some(depth) => println!("  Flash onset: {:.1} m", depth),
            None => println!("  No flashing in the well"),
        }
        println!(
            "  Wellhead: {:.3} bar, quality {:.4}",
            outcome.handoff.wellhead_pressure_pa / 1e5,
            outcome.handoff.wellhead_quality
        );
        if export.lookup_failures > 0 {
            println!("  Undefined nodes: {}", export.lookup_failures);
        }
    }
    emit(profile_csv(&export.rows), export.rows.len(), output)
}

fn cmd_separator(
    case_path: &Path,
    oracle: Option<OracleKind>,
    output: Option<&Path>,
) -> AppResult<()> {
    let outcome = run_in_memory(case_path, oracle)?;
    if output.is_some()
        && let Some((pressure, best)) = outcome.separator.best_power()
    {
        println!(
            "  Best separator pressure: {:.2} bar ({:.1} kW)",
            pressure.value / 1e5,
            best.power.value / 1e3
        );
    }
    let rows = separator_rows(&outcome.separator);
    emit(separator_csv(&rows), rows.len(), output)
}

fn cmd_power(case_path: &Path, oracle: Option<OracleKind>, output: Option<&Path>) -> AppResult<()> {
    let outcome = run_in_memory(case_path, oracle)?;
    match outcome.power {
        Some(report) => {
            if output.is_some() {
                println!(
                    "  Steam fraction {:.3}, specific work {:.1} kJ/kg",
                    report.steam_fraction,
                    report.specific_work / 1e3
                );
            }
            let rows = power_rows(&report);
            emit(power_csv(&rows), rows.len(), output)
        }
        None => {
            println!("Case has no power sweep");
            Ok(())
        }
    }
}

fn cmd_run(case_path: &Path, oracle: Option<OracleKind>, use_cache: bool) -> AppResult<()> {
    let request = RunRequest {
        case_path,
        options: RunOptions {
            use_cache,
            oracle,
            ..RunOptions::default()
        },
    };
    let response = run_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Run completed: {}", response.run_id);
        println!(
            "  March {:.3} s, plant {:.3} s, save {:.3} s",
            response.timing.march_time_s, response.timing.plant_time_s, response.timing.save_time_s
        );
    }

    let m = &response.manifest;
    println!("  Nodes: {}", m.nodes);
    match m.flash_depth_m {
        Some(depth) => println!("  Flash onset: {:.1} m", depth),
        None => println!("  No flashing in the well"),
    }
    if let (Some(p), Some(x)) = (m.wellhead_pressure_pa, m.wellhead_quality) {
        println!("  Wellhead: {:.3} bar, quality {:.4}", p / 1e5, x);
    }
    Ok(())
}

fn cmd_runs(case_path: &Path, name: Option<&str>) -> AppResult<()> {
    let runs = run_service::list_runs(case_path, name)?;

    if runs.is_empty() {
        println!("No stored runs found");
    } else {
        println!("Stored runs:");
        for manifest in runs {
            println!(
                "  {} {} ({}, {})",
                manifest.run_id, manifest.case_name, manifest.oracle, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(case_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, profile) = run_service::load_run(case_path, run_id)?;

    println!("\nRun Summary:");
    println!("  Case: {}", manifest.case_name);
    println!("  Timestamp: {}", manifest.timestamp);
    println!("  Solver: {} ({})", manifest.solver_version, manifest.oracle);
    println!("  Nodes: {}", profile.rows.len());
    match (profile.flash_index, profile.flash_depth_m) {
        (Some(i), Some(depth)) => println!("  Flash onset: node {} at {:.1} m", i, depth),
        _ => println!("  No flashing in the well"),
    }
    println!(
        "  Floor clamps: {}, degenerate saturation: {}, undefined nodes: {}",
        profile.floor_clamps, profile.degenerate_saturation, profile.lookup_failures
    );

    println!("\nFiles:");
    for file in &manifest.files {
        println!("  {}", file);
    }
    Ok(())
}
