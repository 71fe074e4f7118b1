//! # Workflows Module
//!
//! High-level entry points that drive a [`BilliardSystem`](crate::engine::system::BilliardSystem)
//! through a complete run.
//!
//! - **Simulation** ([`simulate`]) - Steps the system for a fixed number of steps, recording
//!   position snapshots and energy samples and reporting progress
//! - **Recording** ([`trajectory`]) - The bounded snapshot memory and the energy samples it is
//!   exported with

pub mod simulate;
pub mod trajectory;
