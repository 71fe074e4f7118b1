use crate::core::energy::hamiltonian::Hamiltonian;
use crate::core::models::phase_space::{PhaseSpace, Vec2};

// Both schemes assume `H = T(p) + V(q)`; the caller rejects non-separable Hamiltonians.

/// Semi-implicit Euler: kick with the force at the current positions, then drift with the
/// updated momenta.
pub(super) fn euler_step(dt: f64, state: &mut PhaseSpace, hamiltonian: &Hamiltonian) {
    let mut force = Vec::with_capacity(state.len());
    kick(state, hamiltonian, &mut force, dt);
    drift(state, dt);
}

/// Velocity Verlet (leapfrog): half kick, full drift, half kick.
pub(super) fn verlet_step(dt: f64, state: &mut PhaseSpace, hamiltonian: &Hamiltonian) {
    let mut force = Vec::with_capacity(state.len());
    kick(state, hamiltonian, &mut force, 0.5 * dt);
    drift(state, dt);
    kick(state, hamiltonian, &mut force, 0.5 * dt);
}

fn kick(state: &mut PhaseSpace, hamiltonian: &Hamiltonian, buffer: &mut Vec<Vec2>, h: f64) {
    hamiltonian.potential_gradient_into(state.view_with(state.real()), buffer);
    for (p, dv) in state.real_mut().p.iter_mut().zip(buffer.iter()) {
        *p -= h * dv;
    }
}

fn drift(state: &mut PhaseSpace, h: f64) {
    let mass = state.mass().to_vec();
    let real = state.real_mut();
    for ((q, p), m) in real.q.iter_mut().zip(&real.p).zip(mass) {
        *q += (h / m) * p;
    }
}
