//! Core value types shared across the simulation engine.

use num_complex::Complex64;
use serde::Serialize;

/// Complex amplitudes of the two counter-propagating cavity modes.
///
/// An explicit value passed in and out of every step; the scan driver owns
/// the evolving copy and carries it between detuning points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldState {
    /// Clockwise mode amplitude.
    pub e1: Complex64,
    /// Counter-clockwise mode amplitude.
    pub e2: Complex64,
}

impl FieldState {
    /// The fixed non-zero seed used at the start of a scan.
    ///
    /// A zero seed would sit exactly on the (unstable) dark solution of the
    /// driven cavity; 1 + i puts the integrator on the basin of the lit one.
    pub fn seed() -> Self {
        Self {
            e1: Complex64::new(1.0, 1.0),
            e2: Complex64::new(1.0, 1.0),
        }
    }

    /// Both amplitudes are free of NaN and infinities.
    pub fn is_finite(&self) -> bool {
        self.e1.re.is_finite()
            && self.e1.im.is_finite()
            && self.e2.re.is_finite()
            && self.e2.im.is_finite()
    }
}

/// Complex pump amplitudes coupled into each mode.
#[derive(Debug, Clone, Copy)]
pub struct DrivingTerms {
    /// Pump amplitude driving the clockwise mode.
    pub e1_tilde: Complex64,
    /// Pump amplitude driving the counter-clockwise mode.
    pub e2_tilde: Complex64,
}

impl DrivingTerms {
    /// Drive amplitudes √p1, √p2 from dimensionless pump powers.
    pub fn from_pump_powers(p1: f64, p2: f64) -> Self {
        Self {
            e1_tilde: Complex64::from(p1.sqrt()),
            e2_tilde: Complex64::from(p2.sqrt()),
        }
    }
}

/// Normalised detunings of the two modes from cavity resonance.
#[derive(Debug, Clone, Copy)]
pub struct DetuningPair {
    pub delta1: f64,
    pub delta2: f64,
}

impl DetuningPair {
    /// Both modes detuned by the same amount — the only configuration the
    /// scan driver produces, since a single pump laser feeds both directions.
    pub fn symmetric(delta: f64) -> Self {
        Self {
            delta1: delta,
            delta2: delta,
        }
    }
}

/// Steady-state mode powers across one detuning sweep.
///
/// All three vectors have the same length and index correspondence.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Detuning grid (normalised units).
    pub detunings: Vec<f64>,
    /// Converged |e1| at each grid point.
    pub pwr1: Vec<f64>,
    /// Converged |e2| at each grid point.
    pub pwr2: Vec<f64>,
}

/// Trajectory of one forced-oscillation sub-scan at a single detuning.
///
/// Rows are indexed by the modulation phase folded into [0, 2π); six full
/// modulation periods are recorded. Returned for downstream plotting only.
#[derive(Debug, Clone, Serialize)]
pub struct OscillationTrace {
    /// Detuning at which the sub-scan ran.
    pub detuning: f64,
    /// Modulation phase mod 2π at each recorded step.
    pub phase: Vec<f64>,
    /// Instantaneous pump amplitude |e1_tilde|.
    pub pump: Vec<f64>,
    /// Instantaneous |e1|.
    pub pwr1: Vec<f64>,
    /// Instantaneous |e2|.
    pub pwr2: Vec<f64>,
}

/// Everything one scan produces.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutput {
    /// Steady-state powers on the detuning grid.
    pub result: ScanResult,
    /// One trace per grid point when oscillation is enabled, otherwise empty.
    pub traces: Vec<OscillationTrace>,
}
