use crate::core::energy::gradient::Gradient;
use crate::core::energy::hamiltonian::Hamiltonian;
use crate::core::models::phase_space::PhaseSpace;

const STAGE_OFFSETS: [f64; 3] = [0.5, 0.5, 1.0];
const WEIGHTS: [f64; 4] = [1.0 / 6.0, 2.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0];

/// Classical four-stage Runge-Kutta on the canonical equations.
pub(super) fn step(dt: f64, state: &mut PhaseSpace, hamiltonian: &Hamiltonian) {
    let n = state.len();
    let origin = state.real().clone();
    let mut stage = Gradient::zeros(n);
    let mut combined = Gradient::zeros(n);

    hamiltonian.gradient_into(state.view_with(&origin), &mut stage);
    combined.add_scaled(&stage, WEIGHTS[0]);

    for (offset, weight) in STAGE_OFFSETS.iter().zip(&WEIGHTS[1..]) {
        let midstep = origin.advanced(&stage, offset * dt);
        hamiltonian.gradient_into(state.view_with(&midstep), &mut stage);
        combined.add_scaled(&stage, *weight);
    }

    state.real_mut().advance(&combined, dt);
}
