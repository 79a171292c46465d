//! Detuning scan driver.
//!
//! Sweeps the pump detuning across an inclusive grid, settling the field at
//! each point and recording the converged mode powers. The field state is
//! carried from one point to the next as the initial guess (continuation),
//! which is what lets a single sweep follow one branch of the bistable
//! response instead of re-converging from scratch; it is also why the grid
//! must be processed strictly sequentially.

use std::f64::consts::PI;

use num_complex::Complex64;
use thiserror::Error;

use crate::integrator::{step, DT};
use crate::noise::NoiseSource;
use crate::steady::{settle, SettleSettings};
use crate::types::{
    DetuningPair, DrivingTerms, FieldState, OscillationTrace, ScanOutput, ScanResult,
};

/// Errors that can abort a scan. No partial result survives any of them.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid scan configuration: {0}")]
    Configuration(String),

    #[error("No steady state at detuning {detuning:.4} after {steps} steps")]
    NonConvergence { detuning: f64, steps: usize },

    #[error("Field became non-finite at detuning {detuning:.4} (step {step})")]
    NumericDivergence { detuning: f64, step: usize },
}

/// Receives one notification per completed detuning grid point.
pub trait ProgressReporter {
    fn report(&mut self, current: usize, total: usize);
}

/// Progress sink that discards every report.
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn report(&mut self, _current: usize, _total: usize) {}
}

/// Full configuration of one detuning sweep.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// First detuning of the sweep (normalised units).
    pub detuning_start: f64,
    /// Last detuning of the sweep, inclusive.
    pub detuning_stop: f64,
    /// Dimensionless pump power into the clockwise mode.
    pub pump1: f64,
    /// Dimensionless pump power into the counter-clockwise mode.
    pub pump2: f64,
    /// Number of grid points.
    pub points: usize,
    /// Per-step noise amplitude, also used as the convergence tolerance.
    pub noise_amplitude: f64,
    /// Step cap per grid point before the scan fails.
    pub max_steps: usize,
    /// Run the forced-oscillation sub-scan after settling at each point.
    pub oscillation: bool,
    /// Relative pump modulation depth; required when `oscillation` is set.
    pub modulation_amplitude: Option<f64>,
    /// Modulation period in normalised time units; required when
    /// `oscillation` is set.
    pub modulation_frequency: Option<f64>,
    /// Let the modulated field replace the carried state for the next grid
    /// point, instead of resuming from the converged one.
    pub carry_modulated_state: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            detuning_start: -4.0,
            detuning_stop: 7.0,
            pump1: 1.4,
            pump2: 1.4,
            points: 10,
            noise_amplitude: 1e-9,
            max_steps: 5_000_000,
            oscillation: false,
            modulation_amplitude: None,
            modulation_frequency: None,
            carry_modulated_state: false,
        }
    }
}

impl ScanConfig {
    /// Reject configurations that would NaN the integrator or loop forever,
    /// before any integration step runs.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.points == 0 {
            return Err(ScanError::Configuration(
                "scan needs at least one grid point".into(),
            ));
        }
        if !self.detuning_start.is_finite() || !self.detuning_stop.is_finite() {
            return Err(ScanError::Configuration(
                "detuning bounds must be finite".into(),
            ));
        }
        for (name, p) in [("pump1", self.pump1), ("pump2", self.pump2)] {
            if !p.is_finite() || p < 0.0 {
                return Err(ScanError::Configuration(format!(
                    "{name} must be finite and non-negative, got {p}"
                )));
            }
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(ScanError::Configuration(format!(
                "noise amplitude must be finite and non-negative, got {}",
                self.noise_amplitude
            )));
        }
        if self.max_steps == 0 {
            return Err(ScanError::Configuration(
                "max_steps must be at least 1".into(),
            ));
        }
        if self.oscillation {
            let amp = self.modulation_amplitude.ok_or_else(|| {
                ScanError::Configuration(
                    "oscillation requires a modulation amplitude".into(),
                )
            })?;
            let freq = self.modulation_frequency.ok_or_else(|| {
                ScanError::Configuration(
                    "oscillation requires a modulation frequency".into(),
                )
            })?;
            if !amp.is_finite() {
                return Err(ScanError::Configuration(format!(
                    "modulation amplitude must be finite, got {amp}"
                )));
            }
            if !freq.is_finite() || freq <= 0.0 {
                return Err(ScanError::Configuration(format!(
                    "modulation frequency must be finite and positive, got {freq}"
                )));
            }
        }
        Ok(())
    }
}

/// `n` evenly spaced points between `start` and `stop`, endpoints included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let span = stop - start;
    (0..n)
        .map(|i| start + span * i as f64 / (n - 1) as f64)
        .collect()
}

/// Sweep the detuning grid and return the steady-state powers.
///
/// The field is seeded once before the loop; every subsequent grid point
/// settles from the previous point's converged state. Any error aborts the
/// whole scan.
pub fn run_scan(
    config: &ScanConfig,
    noise: &mut dyn NoiseSource,
    progress: &mut dyn ProgressReporter,
) -> Result<ScanOutput, ScanError> {
    config.validate()?;

    let modulation = if config.oscillation {
        let amp = config.modulation_amplitude.ok_or_else(|| {
            ScanError::Configuration("oscillation requires a modulation amplitude".into())
        })?;
        let freq = config.modulation_frequency.ok_or_else(|| {
            ScanError::Configuration("oscillation requires a modulation frequency".into())
        })?;
        Some((amp, freq))
    } else {
        None
    };

    let detunings = linspace(config.detuning_start, config.detuning_stop, config.points);
    let drive = DrivingTerms::from_pump_powers(config.pump1, config.pump2);
    let settings = SettleSettings {
        dt: DT,
        tolerance: config.noise_amplitude,
        noise_amplitude: config.noise_amplitude,
        max_steps: config.max_steps,
    };

    let mut state = FieldState::seed();
    let mut pwr1 = Vec::with_capacity(config.points);
    let mut pwr2 = Vec::with_capacity(config.points);
    let mut traces = Vec::new();

    for (index, &det) in detunings.iter().enumerate() {
        let detuning = DetuningPair::symmetric(det);
        let report = settle(state, &drive, &detuning, &settings, noise)?;
        state = report.state;

        pwr1.push(state.e1.norm());
        pwr2.push(state.e2.norm());
        progress.report(index + 1, config.points);

        if let Some((amp, freq)) = modulation {
            let (trace, modulated) =
                oscillate(state, config, &detuning, amp, freq, &settings, noise)?;
            traces.push(trace);
            if config.carry_modulated_state {
                state = modulated;
            }
        }
    }

    Ok(ScanOutput {
        result: ScanResult {
            detunings,
            pwr1,
            pwr2,
        },
        traces,
    })
}

/// Forced-oscillation sub-scan at one detuning.
///
/// Starting from the converged state, the clockwise pump is modulated as
/// √(p1·(1 + amp·cos φ)) while φ advances by dt·2π/freq per step, from 0 up
/// to 12π (six modulation periods). Each row records the phase folded into
/// [0, 2π) together with the instantaneous pump and mode magnitudes.
fn oscillate(
    initial: FieldState,
    config: &ScanConfig,
    detuning: &DetuningPair,
    amp: f64,
    freq: f64,
    settings: &SettleSettings,
    noise: &mut dyn NoiseSource,
) -> Result<(OscillationTrace, FieldState), ScanError> {
    let two_pi = 2.0 * PI;
    let dphase = settings.dt * two_pi / freq;
    let max_phase = 12.0 * PI;

    let mut state = initial;
    let mut phase = 0.0;
    let mut trace = OscillationTrace {
        detuning: detuning.delta1,
        phase: Vec::new(),
        pump: Vec::new(),
        pwr1: Vec::new(),
        pwr2: Vec::new(),
    };

    let mut steps = 0usize;
    while phase < max_phase {
        // A modulation depth above 1 drives the pump power negative; the
        // resulting NaN is surfaced by the finiteness check below.
        let modulated_pump = config.pump1 * (1.0 + amp * phase.cos());
        let drive = DrivingTerms {
            e1_tilde: Complex64::from(modulated_pump.sqrt()),
            e2_tilde: Complex64::from(config.pump2.sqrt()),
        };

        state = step(
            &state,
            &drive,
            detuning,
            settings.dt,
            settings.noise_amplitude,
            noise,
        );
        if !state.is_finite() {
            return Err(ScanError::NumericDivergence {
                detuning: detuning.delta1,
                step: steps,
            });
        }

        phase += dphase;
        trace.phase.push(phase % two_pi);
        trace.pump.push(drive.e1_tilde.norm());
        trace.pwr1.push(state.e1.norm());
        trace.pwr2.push(state.e2.norm());
        steps += 1;
    }

    Ok((trace, state))
}
