//! # Galleria Params
//!
//! Physical parameters for whispering-gallery-mode resonator simulations.
//!
//! Persisted parameter sets arrive as string key/value mappings (the plain
//! `key: value` text format used by the lab's parameter store). This crate
//! validates them against a fixed schema, converts the persisted units to SI
//! once at the boundary, and derives the resonator constants consumed by the
//! simulation core.
//!
//! ## Modules
//!
//! - [`material`] — Refractive and nonlinear indices of the resonator material.
//! - [`geometry`] — Q-factor, wavelength, radius, and effective mode area.
//! - [`derived`] — Constants computed from material and geometry.

pub mod derived;
pub mod geometry;
pub mod material;

use thiserror::Error;

/// Errors raised while validating a persisted parameter mapping.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("Missing required key '{key}' in {kind} parameters")]
    Missing { key: &'static str, kind: &'static str },

    #[error("Key '{key}' in {kind} parameters is not numeric: '{value}'")]
    NotNumeric {
        key: &'static str,
        kind: &'static str,
        value: String,
    },

    #[error("Key '{key}' in {kind} parameters must be finite and positive, got {value}")]
    NotPositive {
        key: &'static str,
        kind: &'static str,
        value: f64,
    },
}

/// Look up and parse one required key from a persisted mapping.
pub(crate) fn require_f64(
    map: &std::collections::BTreeMap<String, String>,
    key: &'static str,
    kind: &'static str,
) -> Result<f64, ParameterError> {
    let raw = map
        .get(key)
        .ok_or(ParameterError::Missing { key, kind })?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ParameterError::NotNumeric {
            key,
            kind,
            value: raw.clone(),
        })
}

/// Reject non-finite or non-positive physical values.
pub(crate) fn check_positive(
    value: f64,
    key: &'static str,
    kind: &'static str,
) -> Result<f64, ParameterError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::NotPositive { key, kind, value })
    }
}
