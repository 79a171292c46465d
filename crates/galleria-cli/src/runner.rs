//! Scan runner: ties together parameters, the simulation core, and output.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use galleria_core::noise::GaussianNoise;
use galleria_core::scan::run_scan;
use galleria_core::types::{OscillationTrace, ScanOutput, ScanResult};
use galleria_params::derived::{derive, DerivedParameters};
use galleria_params::geometry::ResonatorGeometry;
use galleria_params::material::MaterialProperties;

use crate::config::JobConfig;
use crate::progress::ConsoleProgress;
use crate::store;

/// Resolve a material identifier: preset name or parameter file path.
pub fn resolve_material(id: &str) -> Result<MaterialProperties> {
    match id {
        "fused-silica" | "fused_silica" => Ok(MaterialProperties::fused_silica()),
        path => {
            let pairs = store::read_pairs(Path::new(path))
                .with_context(|| format!("Loading material set '{path}'"))?;
            MaterialProperties::from_map(&pairs)
                .with_context(|| format!("Validating material set '{path}'"))
        }
    }
}

/// Resolve a geometry identifier: preset name or parameter file path.
pub fn resolve_geometry(id: &str) -> Result<ResonatorGeometry> {
    match id {
        "symm_break_paper" | "symm-break-paper" => Ok(ResonatorGeometry::symm_break_paper()),
        path => {
            let pairs = store::read_pairs(Path::new(path))
                .with_context(|| format!("Loading geometry set '{path}'"))?;
            ResonatorGeometry::from_map(&pairs)
                .with_context(|| format!("Validating geometry set '{path}'"))
        }
    }
}

/// Run a full scan from a parsed job configuration.
pub fn run_job(job: &JobConfig) -> Result<ScanOutput> {
    let material = resolve_material(&job.resonator.material)?;
    let geometry = resolve_geometry(&job.resonator.geometry)?;
    let constants = derive(&material, &geometry);
    print_summary(&constants);

    let scan_config = job.to_scan_config();
    println!(
        "Scan: Δ ∈ [{}, {}], {} points, p1={}, p2={}, noise={:.1e}",
        scan_config.detuning_start,
        scan_config.detuning_stop,
        scan_config.points,
        scan_config.pump1,
        scan_config.pump2,
        scan_config.noise_amplitude,
    );
    if scan_config.oscillation {
        println!(
            "Oscillation: amp={}, freq={}",
            scan_config.modulation_amplitude.unwrap_or(f64::NAN),
            scan_config.modulation_frequency.unwrap_or(f64::NAN),
        );
    }

    let mut noise = match job.scan.seed {
        Some(seed) => {
            log::info!("Noise generator seeded with {seed}");
            GaussianNoise::from_seed(seed)
        }
        None => GaussianNoise::from_entropy(),
    };

    let start = Instant::now();
    let output = run_scan(&scan_config, &mut noise, &mut ConsoleProgress)
        .context("Scan aborted")?;
    println!("Scan finished in {:.2} s", start.elapsed().as_secs_f64());

    Ok(output)
}

fn print_summary(constants: &DerivedParameters) {
    println!("Resonator constants:");
    println!("  FSR            : {:.4e} Hz", constants.fsr);
    println!("  resonance freq : {:.4e} Hz", constants.resonance_freq);
    println!("  linewidth γ    : {:.4e} Hz", constants.linewidth);
    println!("  F0             : {:.4e}", constants.detuning_scale);
    println!("  P0             : {:.4e} W", constants.power_scale);
}

/// Write the steady-state scan to a CSV file with a metadata header.
pub fn write_scan_csv(result: &ScanResult, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# Galleria — Detuning Scan")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# material: {}", job.resonator.material)?;
    writeln!(file, "# geometry: {}", job.resonator.geometry)?;
    writeln!(
        file,
        "# pump1: {}, pump2: {}, noise_amplitude: {:.3e}",
        job.scan.pump1, job.scan.pump2, job.scan.noise_amplitude
    )?;
    writeln!(file, "#")?;
    writeln!(file, "detuning,pwr1,pwr2")?;

    for i in 0..result.detunings.len() {
        writeln!(
            file,
            "{:.6},{:.6e},{:.6e}",
            result.detunings[i], result.pwr1[i], result.pwr2[i]
        )?;
    }

    println!("Scan written to: {}", path.display());
    Ok(())
}

/// Write the full scan output (grid plus traces) to a JSON file.
pub fn write_scan_json(output: &ScanOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Scan (JSON) written to: {}", path.display());
    Ok(())
}

/// Write all forced-oscillation traces to one CSV file.
pub fn write_oscillation_csv(traces: &[OscillationTrace], path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# Galleria — Forced Oscillation Traces")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# one row per integrator step; phase folded into [0, 2π)")?;
    writeln!(file, "#")?;
    writeln!(file, "detuning,phase,pump,pwr1,pwr2")?;

    for trace in traces {
        for i in 0..trace.phase.len() {
            writeln!(
                file,
                "{:.6},{:.6},{:.6e},{:.6e},{:.6e}",
                trace.detuning, trace.phase[i], trace.pump[i], trace.pwr1[i], trace.pwr2[i]
            )?;
        }
    }

    println!("Oscillation traces written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as IoWrite;

    #[test]
    fn presets_resolve_by_name() {
        assert!(resolve_material("fused-silica").is_ok());
        assert!(resolve_geometry("symm_break_paper").is_ok());
    }

    #[test]
    fn unknown_name_is_treated_as_path() {
        let err = resolve_material("no/such/material.txt").unwrap_err();
        assert!(err.to_string().contains("no/such/material.txt"));
    }

    #[test]
    fn material_file_resolves_through_the_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "n0: 1.444").unwrap();
        writeln!(file, "n2: 2.7e-16").unwrap();
        let mat = resolve_material(file.path().to_str().unwrap()).unwrap();
        assert_eq!(mat.n0, 1.444);
    }

    #[test]
    fn scan_csv_has_header_and_grid_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.csv");
        let result = ScanResult {
            detunings: vec![-1.0, 0.0, 1.0],
            pwr1: vec![0.1, 0.2, 0.3],
            pwr2: vec![0.1, 0.2, 0.3],
        };
        let job: JobConfig = toml::from_str("").unwrap();
        write_scan_csv(&result, &path, &job).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Galleria"));
        assert!(content.contains("detuning,pwr1,pwr2"));
        assert_eq!(content.lines().filter(|l| !l.starts_with('#')).count(), 4);
    }
}
