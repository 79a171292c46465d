//! TOML configuration deserialisation for scan jobs.

use serde::Deserialize;

use galleria_core::scan::{ScanConfig, ScanError};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub resonator: ResonatorConfig,
    #[serde(default)]
    pub scan: ScanSection,
    pub oscillation: Option<OscillationSection>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which material and geometry parameter sets to load.
///
/// Each field is either a preset name (`fused-silica`, `symm_break_paper`)
/// or a path to a plain-text `key: value` parameter file.
#[derive(Debug, Deserialize)]
pub struct ResonatorConfig {
    #[serde(default = "default_material")]
    pub material: String,
    #[serde(default = "default_geometry")]
    pub geometry: String,
}

impl Default for ResonatorConfig {
    fn default() -> Self {
        Self {
            material: default_material(),
            geometry: default_geometry(),
        }
    }
}

fn default_material() -> String {
    "fused-silica".into()
}
fn default_geometry() -> String {
    "symm_break_paper".into()
}

/// Detuning sweep parameters from TOML.
#[derive(Debug, Deserialize)]
pub struct ScanSection {
    #[serde(default = "default_detuning_start")]
    pub detuning_start: f64,
    #[serde(default = "default_detuning_stop")]
    pub detuning_stop: f64,
    #[serde(default = "default_pump")]
    pub pump1: f64,
    #[serde(default = "default_pump")]
    pub pump2: f64,
    #[serde(default = "default_points")]
    pub points: usize,
    #[serde(default = "default_noise_amplitude")]
    pub noise_amplitude: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Seed for the noise generator; omit for entropy seeding.
    pub seed: Option<u64>,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            detuning_start: default_detuning_start(),
            detuning_stop: default_detuning_stop(),
            pump1: default_pump(),
            pump2: default_pump(),
            points: default_points(),
            noise_amplitude: default_noise_amplitude(),
            max_steps: default_max_steps(),
            seed: None,
        }
    }
}

fn default_detuning_start() -> f64 {
    -4.0
}
fn default_detuning_stop() -> f64 {
    7.0
}
fn default_pump() -> f64 {
    1.4
}
fn default_points() -> usize {
    10
}
fn default_noise_amplitude() -> f64 {
    1e-9
}
fn default_max_steps() -> usize {
    5_000_000
}

/// Forced-oscillation sub-scan parameters.
#[derive(Debug, Deserialize)]
pub struct OscillationSection {
    /// Relative pump modulation depth.
    pub amplitude: f64,
    /// Modulation period in normalised time units.
    pub frequency: f64,
    /// Carry the modulated field into the next grid point (default: resume
    /// from the converged state).
    #[serde(default)]
    pub carry_modulated_state: bool,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save the scan as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_scan: bool,
    /// Whether to also save the scan as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_scan: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Translate the TOML sections into the core's scan configuration.
    pub fn to_scan_config(&self) -> ScanConfig {
        ScanConfig {
            detuning_start: self.scan.detuning_start,
            detuning_stop: self.scan.detuning_stop,
            pump1: self.scan.pump1,
            pump2: self.scan.pump2,
            points: self.scan.points,
            noise_amplitude: self.scan.noise_amplitude,
            max_steps: self.scan.max_steps,
            oscillation: self.oscillation.is_some(),
            modulation_amplitude: self.oscillation.as_ref().map(|o| o.amplitude),
            modulation_frequency: self.oscillation.as_ref().map(|o| o.frequency),
            carry_modulated_state: self
                .oscillation
                .as_ref()
                .map(|o| o.carry_modulated_state)
                .unwrap_or(false),
        }
    }

    /// Run the core's up-front validation against this job.
    pub fn validate(&self) -> Result<(), ScanError> {
        self.to_scan_config().validate()
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    use anyhow::Context;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: JobConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let job: JobConfig = toml::from_str("").unwrap();
        assert_eq!(job.resonator.material, "fused-silica");
        assert_eq!(job.scan.detuning_start, -4.0);
        assert_eq!(job.scan.detuning_stop, 7.0);
        assert_eq!(job.scan.pump1, 1.4);
        assert_eq!(job.scan.points, 10);
        assert_eq!(job.scan.noise_amplitude, 1e-9);
        assert!(job.oscillation.is_none());
        assert!(job.output.save_scan);
        assert!(!job.output.save_json);
        assert!(job.validate().is_ok());
    }

    #[test]
    fn full_config_round_trips_into_scan_config() {
        let toml_src = r#"
            [resonator]
            material = "params/material/my_silica.txt"
            geometry = "symm_break_paper"

            [scan]
            detuning_start = -5.0
            detuning_stop = 5.0
            pump1 = 4.0
            pump2 = 0.0
            points = 50
            noise_amplitude = 1e-9
            seed = 42

            [oscillation]
            amplitude = 0.05
            frequency = 5.0

            [output]
            directory = "runs/example"
            save_json = true
        "#;
        let job: JobConfig = toml::from_str(toml_src).unwrap();
        let scan = job.to_scan_config();
        assert_eq!(scan.detuning_start, -5.0);
        assert_eq!(scan.pump1, 4.0);
        assert_eq!(scan.points, 50);
        assert!(scan.oscillation);
        assert_eq!(scan.modulation_amplitude, Some(0.05));
        assert_eq!(scan.modulation_frequency, Some(5.0));
        assert!(!scan.carry_modulated_state);
        assert_eq!(job.scan.seed, Some(42));
        assert!(job.validate().is_ok());
    }

    #[test]
    fn oscillation_section_requires_amplitude_and_frequency() {
        let err = toml::from_str::<JobConfig>("[oscillation]\nfrequency = 5.0\n");
        assert!(err.is_err(), "amplitude should be mandatory in TOML");
    }
}
