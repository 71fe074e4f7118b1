//! # Engine Module
//!
//! Time stepping for the particle ensemble.
//!
//! ## Architecture
//!
//! - **Integrators** ([`integrators`]) - Explicit Euler, symplectic Euler and Verlet, midpoint,
//!   classical Runge-Kutta and Tao's extended-phase-space splitting, all driven by the analytic
//!   gradients of the energy model
//! - **Registry** ([`registry`]) - Name lookup of the integrator presets
//! - **Configuration** ([`config`]) - Validated system and run parameters
//! - **Orchestration** ([`system`]) - [`system::BilliardSystem`], which owns the state, the field
//!   objects and the active integrator, and manages the NORMAL / EXTENDED phase-space modes
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! Configuration and validation errors fail fast. Numerical degeneracies (coincident particles,
//! particles on a wire) are never errors: they propagate as non-finite values in the state.

pub mod config;
pub mod error;
pub mod integrators;
pub mod progress;
pub mod registry;
pub mod system;
