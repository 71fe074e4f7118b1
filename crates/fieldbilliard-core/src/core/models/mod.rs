//! # Core Models Module
//!
//! Data structures describing the particle ensemble.
//!
//! - [`phase_space`] - The real canonical coordinates `(q, p)` of every particle, the per-particle
//!   mass and charge, and the optional mirror copy `(q̃, p̃)`.
//!
//! ```ignore
//! use fieldbilliard::core::models::phase_space::PhaseSpace;
//!
//! let state = PhaseSpace::new(vec![0.0, 0.5], vec![0.0, 0.0], None, None, 1.0, 1.0)?;
//! assert_eq!(state.len(), 2);
//! ```

pub mod phase_space;
