//! # Galleria Core
//!
//! The numerical engine of the Galleria framework. This crate simulates two
//! counter-propagating optical fields circulating in a Kerr-nonlinear
//! whispering-gallery-mode resonator and traces the resonator's bistable
//! response as the pump is tuned across resonance.
//!
//! ## Architecture
//!
//! Field state is an explicit value threaded through every function; nothing
//! in this crate holds hidden mutable simulation state. The scan driver in
//! [`scan`] owns the evolving [`types::FieldState`] across detuning points and
//! carries it forward as the next point's initial condition, which is what
//! lets one sweep follow a single branch of the bistable curve.
//!
//! ## Modules
//!
//! - [`types`] — Field state, driving terms, detunings, and result containers.
//! - [`noise`] — Injectable Gaussian noise sources.
//! - [`integrator`] — Coupled Kerr derivatives and the explicit Euler step.
//! - [`steady`] — Steady-state detection at fixed detuning.
//! - [`scan`] — Detuning sweep driver with optional pump modulation.

pub mod integrator;
pub mod noise;
pub mod scan;
pub mod steady;
pub mod types;
