//! Galleria command-line interface.
//!
//! Run resonator scans from TOML configuration files:
//! ```sh
//! galleria-cli run job.toml
//! galleria-cli validate job.toml
//! galleria-cli params
//! ```

mod config;
mod progress;
mod runner;
mod store;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use galleria_params::derived::derive;
use galleria_params::geometry::ResonatorGeometry;
use galleria_params::material::MaterialProperties;

#[derive(Parser)]
#[command(name = "galleria-cli")]
#[command(about = "Galleria: counter-propagating Kerr resonator scans")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a detuning scan from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the scan.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Display the built-in parameter presets and their derived constants.
    Params,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Galleria WGM Scanner");
            println!("====================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let scan_output = runner::run_job(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));

            if job.output.save_scan {
                let csv_path = out_dir.join("scan.csv");
                runner::write_scan_csv(&scan_output.result, &csv_path, &job)?;
            }
            if job.output.save_json {
                let json_path = out_dir.join("scan.json");
                runner::write_scan_json(&scan_output, &json_path)?;
            }
            if !scan_output.traces.is_empty() {
                let osc_path = out_dir.join("oscillation.csv");
                runner::write_oscillation_csv(&scan_output.traces, &osc_path)?;
            }

            println!("Scan complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            job.validate()?;
            runner::resolve_material(&job.resonator.material)?;
            runner::resolve_geometry(&job.resonator.geometry)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Params => {
            let material = MaterialProperties::fused_silica();
            let geometry = ResonatorGeometry::symm_break_paper();
            let constants = derive(&material, &geometry);

            println!("Built-in presets:");
            println!();
            println!("  fused-silica      — n0 = {}, n2 = {:.3e} m²/W", material.n0, material.n2);
            println!(
                "  symm_break_paper  — Q = {:.1e}, λ = {:.0} nm, r = {:.0} µm, Aeff = {:.0} µm²",
                geometry.q_factor,
                geometry.wavelength * 1e9,
                geometry.radius * 1e6,
                geometry.mode_area * 1e12,
            );
            println!();
            println!("Derived constants for that pair:");
            println!("  FSR       : {:.4e} Hz", constants.fsr);
            println!("  linewidth : {:.4e} Hz", constants.linewidth);
            println!("  F0        : {:.4e}", constants.detuning_scale);
            println!("  P0        : {:.4e} W", constants.power_scale);
            Ok(())
        }
    }
}
