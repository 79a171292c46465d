//! Coupled-mode Kerr field equations and the explicit Euler step.
//!
//! Both modes obey the normalised Lugiato-Lefever-style rate equation
//!
//! ```text
//! de1/dt = ẽ1 − (1 + i(|e1|² + 2|e2|² − Δ1))·e1
//! de2/dt = ẽ2 − (1 + i(|e2|² + 2|e1|² − Δ2))·e2
//! ```
//!
//! with self-phase modulation |e|², cross-phase modulation 2|e_other|² (XPM
//! is twice SPM for counter-propagating modes), unit linear loss, and
//! detuning Δ. Time is normalised by the cavity decay rate.

use num_complex::Complex64;

use crate::noise::NoiseSource;
use crate::types::{DetuningPair, DrivingTerms, FieldState};

/// Fixed integration step in normalised time units.
pub const DT: f64 = 0.01;

/// Time derivative of both field amplitudes at the current state.
pub fn derivative(
    state: &FieldState,
    drive: &DrivingTerms,
    detuning: &DetuningPair,
) -> (Complex64, Complex64) {
    let i1 = state.e1.norm_sqr();
    let i2 = state.e2.norm_sqr();

    let de1 = drive.e1_tilde
        - (Complex64::new(1.0, i1 + 2.0 * i2 - detuning.delta1)) * state.e1;
    let de2 = drive.e2_tilde
        - (Complex64::new(1.0, i2 + 2.0 * i1 - detuning.delta2)) * state.e2;

    (de1, de2)
}

/// Advance the state by one forward-Euler step with additive noise.
///
/// One standard-normal sample is drawn per field per step and added as a real
/// scalar, so only the real axis of each amplitude is perturbed. That matches
/// the observed behaviour of the lab's reference code; an isotropic complex
/// noise model would diffuse the phase differently.
pub fn step(
    state: &FieldState,
    drive: &DrivingTerms,
    detuning: &DetuningPair,
    dt: f64,
    noise_amplitude: f64,
    noise: &mut dyn NoiseSource,
) -> FieldState {
    let (de1, de2) = derivative(state, drive, detuning);
    FieldState {
        e1: state.e1 + dt * de1 + noise_amplitude * noise.sample(),
        e2: state.e2 + dt * de2 + noise_amplitude * noise.sample(),
    }
}
