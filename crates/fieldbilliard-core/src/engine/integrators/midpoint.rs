use crate::core::energy::gradient::Gradient;
use crate::core::energy::hamiltonian::Hamiltonian;
use crate::core::models::phase_space::PhaseSpace;

/// Explicit midpoint: predict a half step, then take the full step from the original state
/// with the gradient evaluated at the prediction.
pub(super) fn step(dt: f64, state: &mut PhaseSpace, hamiltonian: &Hamiltonian) {
    let mut gradient = Gradient::zeros(state.len());

    hamiltonian.gradient_into(state.view_with(state.real()), &mut gradient);
    let half = state.real().advanced(&gradient, 0.5 * dt);

    hamiltonian.gradient_into(state.view_with(&half), &mut gradient);
    state.real_mut().advance(&gradient, dt);
}
