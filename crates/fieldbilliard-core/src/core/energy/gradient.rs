use crate::core::models::phase_space::Vec2;

/// Partial derivatives of a Hamiltonian with respect to every particle's position and momentum.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    /// `∂H/∂q` per particle.
    pub dq: Vec<Vec2>,
    /// `∂H/∂p` per particle.
    pub dp: Vec<Vec2>,
}

impl Gradient {
    pub fn zeros(n: usize) -> Self {
        Self {
            dq: vec![Vec2::zeros(); n],
            dp: vec![Vec2::zeros(); n],
        }
    }

    pub fn len(&self) -> usize {
        self.dq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dq.is_empty()
    }

    /// Zeroes the buffer and sizes it for `n` particles.
    pub fn reset(&mut self, n: usize) {
        self.dq.clear();
        self.dq.resize(n, Vec2::zeros());
        self.dp.clear();
        self.dp.resize(n, Vec2::zeros());
    }

    /// `self += weight * other`, component by component.
    pub fn add_scaled(&mut self, other: &Gradient, weight: f64) {
        for (a, b) in self.dq.iter_mut().zip(&other.dq) {
            *a += weight * b;
        }
        for (a, b) in self.dp.iter_mut().zip(&other.dp) {
            *a += weight * b;
        }
    }
}
