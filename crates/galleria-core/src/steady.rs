//! Steady-state detection at a fixed detuning.
//!
//! The field is stepped until the step-to-step change of |e1| drops below the
//! tolerance. In a scan the tolerance equals the injected noise amplitude:
//! the system is deemed settled once its residual motion is within the noise
//! it is itself being fed. The tolerance is a separate setting here so
//! deterministic tests can tighten one without the other.

use crate::integrator::{step, DT};
use crate::noise::NoiseSource;
use crate::scan::ScanError;
use crate::types::{DetuningPair, DrivingTerms, FieldState};

/// Knobs for one settling run.
#[derive(Debug, Clone, Copy)]
pub struct SettleSettings {
    /// Integration step (normalised time units).
    pub dt: f64,
    /// Convergence tolerance on the two-sample |e1| difference.
    pub tolerance: f64,
    /// Amplitude of the per-step Gaussian perturbation.
    pub noise_amplitude: f64,
    /// Hard cap on integrator steps before giving up.
    pub max_steps: usize,
}

impl Default for SettleSettings {
    fn default() -> Self {
        Self {
            dt: DT,
            tolerance: 1e-9,
            noise_amplitude: 1e-9,
            max_steps: 5_000_000,
        }
    }
}

/// Converged state and the number of steps it took to get there.
#[derive(Debug, Clone, Copy)]
pub struct SettleReport {
    pub state: FieldState,
    pub steps: usize,
}

/// Step the field at fixed drive and detuning until |e1| stops changing.
///
/// The convergence test is a plain two-sample difference: |e1| after this
/// step versus |e1| after the previous one, compared against the tolerance.
/// The sentinels (previous 0, current 10) guarantee at least one step runs.
pub fn settle(
    initial: FieldState,
    drive: &DrivingTerms,
    detuning: &DetuningPair,
    settings: &SettleSettings,
    noise: &mut dyn NoiseSource,
) -> Result<SettleReport, ScanError> {
    let mut state = initial;
    let mut pwr_old: f64 = 0.0;
    let mut pwr_new: f64 = 10.0;
    let mut steps = 0usize;

    while (pwr_new - pwr_old).abs() > settings.tolerance {
        if steps >= settings.max_steps {
            return Err(ScanError::NonConvergence {
                detuning: detuning.delta1,
                steps,
            });
        }

        state = step(
            &state,
            drive,
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

        pwr_old = pwr_new;
        pwr_new = state.e1.norm();
        steps += 1;
    }

    Ok(SettleReport { state, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::ZeroNoise;
    use num_complex::Complex64;

    fn quiet_settings(tolerance: f64) -> SettleSettings {
        SettleSettings {
            tolerance,
            noise_amplitude: 0.0,
            ..SettleSettings::default()
        }
    }

    #[test]
    fn undriven_field_decays_to_dark() {
        let drive = DrivingTerms::from_pump_powers(0.0, 0.0);
        let report = settle(
            FieldState::seed(),
            &drive,
            &DetuningPair::symmetric(1.5),
            &quiet_settings(1e-9),
            &mut ZeroNoise,
        )
        .unwrap();
        assert!(report.state.e1.norm() < 1e-4);
        assert!(report.state.e2.norm() < 1e-4);
        assert!(report.steps >= 1);
    }

    #[test]
    fn tighter_tolerance_never_needs_fewer_steps() {
        let drive = DrivingTerms::from_pump_powers(2.0, 2.0);
        let detuning = DetuningPair::symmetric(1.0);

        let mut previous_steps = 0usize;
        for tolerance in [1e-3, 1e-6, 1e-9, 1e-12] {
            let report = settle(
                FieldState::seed(),
                &drive,
                &detuning,
                &quiet_settings(tolerance),
                &mut ZeroNoise,
            )
            .unwrap();
            assert!(
                report.steps >= previous_steps,
                "tolerance {tolerance} took {} steps, looser took {previous_steps}",
                report.steps
            );
            previous_steps = report.steps;
        }
    }

    #[test]
    fn step_cap_raises_non_convergence() {
        let drive = DrivingTerms::from_pump_powers(2.0, 2.0);
        let settings = SettleSettings {
            tolerance: 0.0,
            noise_amplitude: 0.0,
            max_steps: 50,
            ..SettleSettings::default()
        };
        let err = settle(
            FieldState::seed(),
            &drive,
            &DetuningPair::symmetric(0.0),
            &settings,
            &mut ZeroNoise,
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::NonConvergence { steps: 50, .. }));
    }

    #[test]
    fn divergent_field_is_caught() {
        // An enormous initial amplitude makes the explicit Euler step blow up
        // within a few iterations.
        let huge = FieldState {
            e1: Complex64::from(1e154),
            e2: Complex64::from(1e154),
        };
        let drive = DrivingTerms::from_pump_powers(1.0, 1.0);
        let err = settle(
            huge,
            &drive,
            &DetuningPair::symmetric(0.0),
            &quiet_settings(1e-9),
            &mut ZeroNoise,
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::NumericDivergence { .. }));
    }
}
