//! # FieldBilliard Core Library
//!
//! Simulation of charged point particles ("billiards") moving under their mutual Coulomb
//! repulsion and the potential of static boundary structures such as walls, rings and fixed
//! point charges.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless models of the particle ensemble (`PhaseSpace`),
//!   the immutable field objects, and the Hamiltonian energy model with analytic gradients.
//!
//! - **[`engine`]: The Logic Core.** The integrator suite (explicit, symplectic, Runge-Kutta
//!   and Tao's extended-phase-space splitting), configuration and error types, and the
//!   `BilliardSystem` orchestrator that owns the state and advances it one step at a time.
//!
//! - **[`workflows`]: The Public API.** Complete simulation runs that drive the engine,
//!   record bounded position trajectories and energy samples, and report progress.

pub mod core;
pub mod engine;
pub mod workflows;
