//! # Energy Model Module
//!
//! Composes the energy terms of the particle ensemble into a Hamiltonian and provides its
//! analytic gradients with respect to any selected phase-space leaves.
//!
//! ## Key Components
//!
//! - [`hamiltonian`] - The [`hamiltonian::Hamiltonian`] evaluator: kinetic, internal Coulomb,
//!   external field and magnetic energies, and their gradients
//! - [`gradient`] - The gradient buffer consumed by the integrators
//! - [`term`] - Per-term energy breakdown
//!
//! Gradients are written into a caller-owned [`gradient::Gradient`] that every evaluation
//! clears first, so nothing accumulates across evaluations or steps.

pub mod gradient;
pub mod hamiltonian;
pub(crate) mod potentials;
pub mod term;
