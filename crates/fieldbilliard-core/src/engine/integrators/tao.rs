//! Tao's explicit symplectic integrator for non-separable Hamiltonians.
//!
//! The real coordinates `(q, p)` are paired with a mirror copy `(x, y)` and evolved under the
//! extended Hamiltonian `H(q, y) + H(x, p) + ω (|q − x|² + |p − y|²) / 2`. Each of the three
//! pieces has an exact flow:
//!
//! - `A` for `H(q, y)`: moves `p` and `x`,
//! - `B` for `H(x, p)`: moves `q` and `y`,
//! - `C` for the binding term: a rotation of `(q − x, p − y)` by the angle `2ωδ`.
//!
//! A step composes them as `A(dt/2) B(dt/2) C(dt) B(dt/2) A(dt/2)`.

use crate::core::energy::gradient::Gradient;
use crate::core::energy::hamiltonian::Hamiltonian;
use crate::core::models::phase_space::{Canonical, Leaves, PhaseSpace};
use crate::engine::error::EngineError;

const NAME: &str = "tao";

pub(super) fn step(
    dt: f64,
    omega: f64,
    state: &mut PhaseSpace,
    hamiltonian: &Hamiltonian,
) -> Result<(), EngineError> {
    if !state.is_extended() {
        return Err(EngineError::MissingMirrorState { integrator: NAME });
    }
    let mut gradient = Gradient::zeros(state.len());
    let half = 0.5 * dt;

    flow_a(state, hamiltonian, &mut gradient, half);
    flow_b(state, hamiltonian, &mut gradient, half);
    if let (real, Some(mirror)) = state.split_mut() {
        bind(real, mirror, omega, dt);
    }
    flow_b(state, hamiltonian, &mut gradient, half);
    flow_a(state, hamiltonian, &mut gradient, half);
    Ok(())
}

/// `p -= δ ∂H/∂q (q, y)` and `x += δ ∂H/∂p (q, y)`.
fn flow_a(
    state: &mut PhaseSpace,
    hamiltonian: &Hamiltonian,
    gradient: &mut Gradient,
    delta: f64,
) {
    let Some(view) = state.view(Leaves::select(false, true)) else {
        return;
    };
    hamiltonian.gradient_into(view, gradient);
    if let (real, Some(mirror)) = state.split_mut() {
        for (p, dq) in real.p.iter_mut().zip(&gradient.dq) {
            *p -= delta * dq;
        }
        for (x, dp) in mirror.q.iter_mut().zip(&gradient.dp) {
            *x += delta * dp;
        }
    }
}

/// `q += δ ∂H/∂p (x, p)` and `y -= δ ∂H/∂q (x, p)`.
fn flow_b(
    state: &mut PhaseSpace,
    hamiltonian: &Hamiltonian,
    gradient: &mut Gradient,
    delta: f64,
) {
    let Some(view) = state.view(Leaves::select(true, false)) else {
        return;
    };
    hamiltonian.gradient_into(view, gradient);
    if let (real, Some(mirror)) = state.split_mut() {
        for (q, dp) in real.q.iter_mut().zip(&gradient.dp) {
            *q += delta * dp;
        }
        for (y, dq) in mirror.p.iter_mut().zip(&gradient.dq) {
            *y -= delta * dq;
        }
    }
}

/// Exact flow of the binding term over a time `delta`.
fn bind(real: &mut Canonical, mirror: &mut Canonical, omega: f64, delta: f64) {
    let (sin, cos) = (2.0 * omega * delta).sin_cos();
    let particles = real
        .q
        .iter_mut()
        .zip(real.p.iter_mut())
        .zip(mirror.q.iter_mut().zip(mirror.p.iter_mut()));
    for ((q, p), (x, y)) in particles {
        let (dq, dp) = (*q - *x, *p - *y);
        let (sq, sp) = (*q + *x, *p + *y);
        *q = 0.5 * (sq + dq * cos + dp * sin);
        *p = 0.5 * (sp + dp * cos - dq * sin);
        *x = 0.5 * (sq - dq * cos - dp * sin);
        *y = 0.5 * (sp - dp * cos + dq * sin);
    }
}
