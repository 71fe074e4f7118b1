//! # Core Module
//!
//! The physical model of the simulation, free of any notion of time stepping.
//!
//! - **Particle State** ([`models`]) - Positions, momenta, masses and charges of the ensemble,
//!   plus the optional mirror copy used by extended-phase-space integration
//! - **Boundary Structures** ([`fields`]) - Rings, infinite lines, finite segments, composite
//!   frames and fixed point charges, each a pure potential of particle coordinates
//! - **Energy Model** ([`energy`]) - Kinetic, internal Coulomb, external and magnetic terms
//!   composed into a Hamiltonian together with its gradients
//! - **Numerics** ([`utils`]) - Quadrature used by the ring potential

pub mod energy;
pub mod fields;
pub mod models;
pub mod utils;
