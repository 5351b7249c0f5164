use clap::{Parser, Subcommand};
use hs_project::{ProjectResult, SynthesisReport};
use hs_synth::{EquipmentType, SystemType};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "hs-cli")]
#[command(about = "HVAC system topology synthesizer", long_about = None)]
struct Cli {
    /// Log every object as it is created
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Build every system a project requests and print what was created
    Synthesize {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the system type tags the dispatcher accepts
    SystemTypes,
    /// List the equipment type identifiers templates accept
    EquipmentTypes,
}

fn main() -> ProjectResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Synthesize {
            project_path,
            json,
            output,
        } => cmd_synthesize(&project_path, json, output.as_deref()),
        Commands::SystemTypes => {
            for system in SystemType::all() {
                println!("{system}");
            }
            Ok(())
        }
        Commands::EquipmentTypes => {
            for equipment in EquipmentType::catalog() {
                println!("{equipment}");
            }
            Ok(())
        }
    }
}

fn cmd_validate(project_path: &Path) -> ProjectResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = hs_project::load(project_path)?;
    println!("✓ Project is valid");
    println!("  Zones: {}", project.zones.len());
    println!("  Schedules: {}", project.schedules.len());
    println!("  System requests: {}", project.systems.len());
    println!("  Templates: {}", project.templates.len());
    Ok(())
}

fn cmd_synthesize(project_path: &Path, json: bool, output: Option<&Path>) -> ProjectResult<()> {
    let project = hs_project::load(project_path)?;
    let (_, report) = hs_project::synthesize_project(&project)?;

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(io::stdout()),
    };
    if json {
        let content = serde_json::to_string_pretty(&report)?;
        writeln!(writer, "{content}")?;
    } else {
        write_report(&mut writer, &report)?;
    }
    if let Some(path) = output {
        println!("✓ Report written to {}", path.display());
    }
    Ok(())
}

fn write_report(w: &mut dyn Write, report: &SynthesisReport) -> io::Result<()> {
    writeln!(w, "Project: {} ({})", report.project, &report.project_hash[..12])?;
    writeln!(w, "Generated: {}", report.generated_at)?;

    writeln!(w, "\nRequests:")?;
    for request in &report.requests {
        let mark = if request.built { "✓" } else { "✗" };
        writeln!(w, "  {mark} {:?} {} ({} zones)", request.kind, request.label, request.zones)?;
    }

    let summary = &report.summary;
    writeln!(w, "\nPlant loops:")?;
    if summary.plant_loops.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for plant in &summary.plant_loops {
        writeln!(
            w,
            "  {} [{:?}] exit {:.1} °C, ΔT {:.1} K",
            plant.name, plant.role, plant.design_exit_temp_c, plant.design_delta_t_k
        )?;
        writeln!(w, "    supply: {}", plant.supply.join(", "))?;
        writeln!(w, "    demand: {}", plant.demand.join(", "))?;
    }

    writeln!(w, "\nAir loops:")?;
    if summary.air_loops.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for air in &summary.air_loops {
        writeln!(w, "  {}", air.name)?;
        writeln!(w, "    supply: {}", air.supply.join(" -> "))?;
        if let Some(economizer) = &air.economizer {
            writeln!(w, "    economizer: {economizer}")?;
        }
        if let Some(hx) = &air.heat_recovery {
            writeln!(w, "    heat recovery: {hx}")?;
        }
        for terminal in &air.terminals {
            writeln!(w, "    {} -> {} ({})", terminal.name, terminal.zone, terminal.class)?;
        }
    }

    writeln!(w, "\nZone equipment:")?;
    if summary.zone_hvac.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for unit in &summary.zone_hvac {
        writeln!(w, "  {} -> {} ({})", unit.name, unit.zone, unit.class)?;
    }
    Ok(())
}
