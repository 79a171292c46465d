//! Resonator material properties.
//!
//! The persisted format stores the nonlinear index in cm²/W (the unit quoted
//! in most Kerr-coefficient tables); the constructor converts to SI once so
//! everything downstream works in m²/W.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{check_positive, require_f64, ParameterError};

/// Conversion factor from cm²/W (persisted) to m²/W (SI).
pub const CM2_TO_M2: f64 = 1e-4;

const KIND: &str = "material";

/// Linear and nonlinear refractive indices of the resonator host material.
///
/// Immutable after construction; all fields are SI.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MaterialProperties {
    /// Linear refractive index (dimensionless).
    pub n0: f64,
    /// Nonlinear (Kerr) refractive index (m²/W).
    pub n2: f64,
}

impl MaterialProperties {
    /// Construct from persisted-unit values: `n2_cm2_per_w` is in cm²/W.
    pub fn new(n0: f64, n2_cm2_per_w: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            n0: check_positive(n0, "n0", KIND)?,
            n2: check_positive(n2_cm2_per_w, "n2", KIND)? * CM2_TO_M2,
        })
    }

    /// Build from a persisted key/value mapping.
    ///
    /// Required schema: `n0` (dimensionless), `n2` (cm²/W).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, ParameterError> {
        let n0 = require_f64(map, "n0", KIND)?;
        let n2 = require_f64(map, "n2", KIND)?;
        Self::new(n0, n2)
    }

    /// Fused silica at 1550 nm: n0 = 1.444, n2 = 2.7×10⁻¹⁶ cm²/W.
    pub fn fused_silica() -> Self {
        Self {
            n0: 1.444,
            n2: 2.7e-16 * CM2_TO_M2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn map_of(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn n2_converts_from_cm2_per_w() {
        let mat = MaterialProperties::new(1.444, 2.7e-16).unwrap();
        // Exact factor application: 1 cm²/W = 1e-4 m²/W.
        assert_eq!(mat.n2, 2.7e-16 * 1e-4);
        assert_eq!(mat.n0, 1.444);
    }

    #[test]
    fn from_map_parses_schema() {
        let map = map_of(&[("n0", "1.444"), ("n2", "2.7e-16")]);
        let mat = MaterialProperties::from_map(&map).unwrap();
        assert_relative_eq!(mat.n2, 2.7e-20);
    }

    #[test]
    fn missing_key_is_reported() {
        let map = map_of(&[("n0", "1.444")]);
        let err = MaterialProperties::from_map(&map).unwrap_err();
        assert!(matches!(err, ParameterError::Missing { key: "n2", .. }));
    }

    #[test]
    fn non_numeric_value_is_reported() {
        let map = map_of(&[("n0", "silica"), ("n2", "2.7e-16")]);
        let err = MaterialProperties::from_map(&map).unwrap_err();
        assert!(matches!(err, ParameterError::NotNumeric { key: "n0", .. }));
    }

    #[test]
    fn non_positive_value_is_rejected() {
        let err = MaterialProperties::new(1.444, -1.0).unwrap_err();
        assert!(matches!(err, ParameterError::NotPositive { key: "n2", .. }));
    }
}
