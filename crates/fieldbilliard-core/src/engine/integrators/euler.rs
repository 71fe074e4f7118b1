use crate::core::energy::gradient::Gradient;
use crate::core::energy::hamiltonian::Hamiltonian;
use crate::core::models::phase_space::PhaseSpace;

/// Explicit Euler: positions and momenta move together along the gradient at the current state.
pub(super) fn step(dt: f64, state: &mut PhaseSpace, hamiltonian: &Hamiltonian) {
    let mut gradient = Gradient::zeros(state.len());
    hamiltonian.gradient_into(state.view_with(state.real()), &mut gradient);
    state.real_mut().advance(&gradient, dt);
}
