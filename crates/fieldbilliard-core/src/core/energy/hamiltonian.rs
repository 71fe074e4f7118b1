use super::gradient::Gradient;
use super::potentials::{DarwinPair, coulomb, coulomb_gradient};
use super::term::EnergyTerm;
use crate::core::fields::{FieldObject, FieldSource};
use crate::core::models::phase_space::{Leaves, PhaseSpace, PhaseView, Vec2};

/// The Hamiltonian of the ensemble for a fixed set of field objects and coupling constants.
///
/// `H = Σ |p|² / 2m + Σ_{i≠j} k q_i q_j / d_ij + Σ_fields V + E_mag`
///
/// The internal sum runs over the full pair matrix, so every unordered pair is counted twice.
/// The magnetic term follows the same convention and is only present when a magnetic coupling
/// is set, in which case the Hamiltonian is no longer separable.
#[derive(Debug, Clone, Copy)]
pub struct Hamiltonian<'a> {
    fields: &'a [FieldObject],
    coupling: f64,
    magnetic_coupling: Option<f64>,
}

impl<'a> Hamiltonian<'a> {
    pub fn new(fields: &'a [FieldObject], coupling: f64) -> Self {
        Self {
            fields,
            coupling,
            magnetic_coupling: None,
        }
    }

    pub fn with_magnetic_coupling(mut self, magnetic_coupling: Option<f64>) -> Self {
        self.magnetic_coupling = magnetic_coupling;
        self
    }

    pub fn fields(&self) -> &'a [FieldObject] {
        self.fields
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn magnetic_coupling(&self) -> Option<f64> {
        self.magnetic_coupling
    }

    /// `true` when `H` splits into a momentum-only and a position-only part.
    pub fn is_separable(&self) -> bool {
        self.magnetic_coupling.is_none()
    }

    pub fn kinetic_energy(&self, view: PhaseView<'_>) -> f64 {
        view.p()
            .iter()
            .zip(view.mass())
            .map(|(p, &m)| p.norm_squared() / (2.0 * m))
            .sum()
    }

    pub fn internal_energy(&self, view: PhaseView<'_>) -> f64 {
        let (q, charge) = (view.q(), view.charge());
        let mut energy = 0.0;
        for i in 0..q.len() {
            for j in (i + 1)..q.len() {
                let dist = (q[i] - q[j]).norm();
                energy += 2.0 * coulomb(dist, charge[i], charge[j], self.coupling);
            }
        }
        energy
    }

    pub fn external_energy(&self, view: PhaseView<'_>) -> f64 {
        self.fields
            .iter()
            .map(|field| field.total_potential(view.q(), view.charge(), self.coupling))
            .sum()
    }

    pub fn potential_energy(&self, view: PhaseView<'_>) -> f64 {
        self.internal_energy(view) + self.external_energy(view)
    }

    /// The momentum-dependent correction; zero without a magnetic coupling.
    pub fn magnetic_energy(&self, view: PhaseView<'_>) -> f64 {
        let Some(beta) = self.magnetic_coupling else {
            return 0.0;
        };
        let mut energy = 0.0;
        for_each_pair(view.len(), |i, j| {
            energy += 2.0 * darwin_pair(view, i, j, beta).energy();
        });
        energy
    }

    pub fn energy_terms(&self, view: PhaseView<'_>) -> EnergyTerm {
        EnergyTerm::new(
            self.kinetic_energy(view),
            self.internal_energy(view),
            self.external_energy(view),
            self.magnetic_energy(view),
        )
    }

    pub fn evaluate(&self, view: PhaseView<'_>) -> f64 {
        self.energy_terms(view).total()
    }

    /// Evaluates `H` on the selected leaves of `state`.
    ///
    /// Returns `None` when a mirror leaf is requested but the state has no mirror copy.
    pub fn hamiltonian(&self, state: &PhaseSpace, leaves: Leaves) -> Option<f64> {
        state.view(leaves).map(|view| self.evaluate(view))
    }

    /// Writes `∂V/∂q` of the position-only energy into `out`, replacing its contents.
    pub fn potential_gradient_into(&self, view: PhaseView<'_>, out: &mut Vec<Vec2>) {
        out.clear();
        out.resize(view.len(), Vec2::zeros());
        self.accumulate_potential_gradient(view, out);
    }

    /// Writes the full gradient `(∂H/∂q, ∂H/∂p)` at `view` into `out`, replacing its content.
    pub fn gradient_into(&self, view: PhaseView<'_>, out: &mut Gradient) {
        out.reset(view.len());
        self.accumulate_potential_gradient(view, &mut out.dq);

        for ((dp, p), &m) in out.dp.iter_mut().zip(view.p()).zip(view.mass()) {
            *dp += p / m;
        }

        if let Some(beta) = self.magnetic_coupling {
            for_each_pair(view.len(), |i, j| {
                let pair = darwin_pair(view, i, j, beta);
                let grad_r = 2.0 * pair.grad_r();
                out.dq[i] += grad_r;
                out.dq[j] -= grad_r;
                out.dp[i] += 2.0 * pair.grad_p1();
                out.dp[j] += 2.0 * pair.grad_p2();
            });
        }
    }

    fn accumulate_potential_gradient(&self, view: PhaseView<'_>, out: &mut [Vec2]) {
        let (q, charge) = (view.q(), view.charge());
        for_each_pair(q.len(), |i, j| {
            let g = 2.0 * coulomb_gradient(q[i] - q[j], charge[i], charge[j], self.coupling);
            out[i] += g;
            out[j] -= g;
        });
        for field in self.fields {
            field.accumulate_gradient(q, charge, self.coupling, out);
        }
    }
}

fn for_each_pair(n: usize, mut f: impl FnMut(usize, usize)) {
    for i in 0..n {
        for j in (i + 1)..n {
            f(i, j);
        }
    }
}

fn darwin_pair(view: PhaseView<'_>, i: usize, j: usize, beta: f64) -> DarwinPair {
    let (q, p, charge, mass) = (view.q(), view.p(), view.charge(), view.mass());
    DarwinPair::new(
        q[i] - q[j],
        p[i],
        p[j],
        charge[i] * charge[j],
        mass[i] * mass[j],
        beta,
    )
}
