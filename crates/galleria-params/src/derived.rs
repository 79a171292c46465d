//! Resonator constants derived from material and geometry.
//!
//! These fix the physical scales of the otherwise dimensionless field
//! equations: the normalised detuning axis maps to real frequency through the
//! linewidth, and the dimensionless pump power maps to watts through `P0`.

use serde::Serialize;

use crate::geometry::ResonatorGeometry;
use crate::material::MaterialProperties;

/// Speed of light in vacuum (m/s, exact).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Physical constants derived from one material/geometry pair.
///
/// Pure function of its inputs; recompute via [`derive`] whenever either
/// input changes, never mutate fields independently.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DerivedParameters {
    /// Free spectral range (Hz).
    pub fsr: f64,
    /// Resonance frequency (Hz).
    pub resonance_freq: f64,
    /// Half linewidth γ = ω_res / 2Q (Hz).
    pub linewidth: f64,
    /// Normalised detuning scale F0 = 2π·FSR / γ (dimensionless).
    pub detuning_scale: f64,
    /// Normalisation power P0 (W): one unit of dimensionless pump power.
    pub power_scale: f64,
}

/// Derive the resonator constants:
///
/// ```text
/// FSR = c / (2π · r · n0)
/// ω   = c / λ
/// γ   = ω / 2Q
/// F0  = 2π·FSR / γ
/// P0  = π·n0·Aeff / (Q·F0·n2)
/// ```
pub fn derive(material: &MaterialProperties, geometry: &ResonatorGeometry) -> DerivedParameters {
    use std::f64::consts::PI;

    let fsr = SPEED_OF_LIGHT / (2.0 * PI * geometry.radius * material.n0);
    let resonance_freq = SPEED_OF_LIGHT / geometry.wavelength;
    let linewidth = resonance_freq / (2.0 * geometry.q_factor);
    let detuning_scale = 2.0 * PI * fsr / linewidth;
    let power_scale = PI * material.n0 * geometry.mode_area
        / (geometry.q_factor * detuning_scale * material.n2);

    DerivedParameters {
        fsr,
        resonance_freq,
        linewidth,
        detuning_scale,
        power_scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn silica_rod() -> (MaterialProperties, ResonatorGeometry) {
        (
            MaterialProperties::fused_silica(),
            ResonatorGeometry::symm_break_paper(),
        )
    }

    #[test]
    fn derive_is_pure() {
        let (mat, geom) = silica_rod();
        let a = derive(&mat, &geom);
        let b = derive(&mat, &geom);
        assert_eq!(a.fsr.to_bits(), b.fsr.to_bits());
        assert_eq!(a.resonance_freq.to_bits(), b.resonance_freq.to_bits());
        assert_eq!(a.linewidth.to_bits(), b.linewidth.to_bits());
        assert_eq!(a.detuning_scale.to_bits(), b.detuning_scale.to_bits());
        assert_eq!(a.power_scale.to_bits(), b.power_scale.to_bits());
    }

    #[test]
    fn constants_are_finite_and_positive() {
        let (mat, geom) = silica_rod();
        let d = derive(&mat, &geom);
        for v in [
            d.fsr,
            d.resonance_freq,
            d.linewidth,
            d.detuning_scale,
            d.power_scale,
        ] {
            assert!(v.is_finite() && v > 0.0, "expected finite positive, got {v}");
        }
    }

    #[test]
    fn silica_rod_scales_are_physical() {
        let (mat, geom) = silica_rod();
        let d = derive(&mat, &geom);
        // 2.75 mm diameter silica rod: FSR ≈ 24 GHz.
        assert_relative_eq!(d.fsr, 2.402e10, max_relative = 1e-2);
        // 1550 nm pump: ν ≈ 193 THz.
        assert_relative_eq!(d.resonance_freq, 1.934e14, max_relative = 1e-2);
        // Q = 3e8 gives a sub-MHz half linewidth.
        assert!(d.linewidth < 1e6);
        // Threshold-scale power for a high-Q silica rod sits well below a watt.
        assert!(d.power_scale > 1e-5 && d.power_scale < 1.0);
    }
}
