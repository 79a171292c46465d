//! Resonator geometry and quality factor.
//!
//! Persisted sets store the wavelength in nm, the radius in µm, and the
//! effective mode area in µm²; the constructor converts each to SI metres
//! exactly once.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{check_positive, require_f64, ParameterError};

/// Conversion factor from nm (persisted wavelength) to m.
pub const NM_TO_M: f64 = 1e-9;
/// Conversion factor from µm (persisted radius) to m.
pub const UM_TO_M: f64 = 1e-6;
/// Conversion factor from µm² (persisted mode area) to m².
pub const UM2_TO_M2: f64 = 1e-12;

const KIND: &str = "resonator_params";

/// Geometric and loss parameters of one whispering-gallery resonator.
///
/// Immutable after construction; all fields are SI.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResonatorGeometry {
    /// Loaded quality factor (dimensionless).
    pub q_factor: f64,
    /// Pump wavelength (m).
    pub wavelength: f64,
    /// Resonator radius (m).
    pub radius: f64,
    /// Effective mode area (m²).
    pub mode_area: f64,
}

impl ResonatorGeometry {
    /// Construct from persisted-unit values: wavelength in nm, radius in µm,
    /// mode area in µm².
    pub fn new(
        q_factor: f64,
        wavelength_nm: f64,
        radius_um: f64,
        mode_area_um2: f64,
    ) -> Result<Self, ParameterError> {
        Ok(Self {
            q_factor: check_positive(q_factor, "Q", KIND)?,
            wavelength: check_positive(wavelength_nm, "lambda", KIND)? * NM_TO_M,
            radius: check_positive(radius_um, "r", KIND)? * UM_TO_M,
            mode_area: check_positive(mode_area_um2, "Aeff", KIND)? * UM2_TO_M2,
        })
    }

    /// Build from a persisted key/value mapping.
    ///
    /// Required schema: `Q` (dimensionless), `lambda` (nm), `r` (µm),
    /// `Aeff` (µm²).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, ParameterError> {
        let q = require_f64(map, "Q", KIND)?;
        let lambda = require_f64(map, "lambda", KIND)?;
        let r = require_f64(map, "r", KIND)?;
        let aeff = require_f64(map, "Aeff", KIND)?;
        Self::new(q, lambda, r, aeff)
    }

    /// Millimetre-scale silica rod resonator from the counter-propagating
    /// symmetry-breaking experiments: Q = 3×10⁸, λ = 1550 nm, r = 1375 µm,
    /// Aeff = 120 µm².
    pub fn symm_break_paper() -> Self {
        Self {
            q_factor: 3e8,
            wavelength: 1550.0 * NM_TO_M,
            radius: 1375.0 * UM_TO_M,
            mode_area: 120.0 * UM2_TO_M2,
        }
    }
}
