use super::{FieldObjectError, FieldSource, require_finite};
use crate::core::models::phase_space::Vec2;

pub const KIND: &str = "point charges";

/// A fixed set of static point charges.
///
/// Sources are never moved by the integrators and are assumed never to coincide with a
/// particle, so the inverse-distance sum carries no self-term masking.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCharges {
    positions: Vec<Vec2>,
    charges: Vec<f64>,
}

impl PointCharges {
    pub fn new(x0: &[f64], y0: &[f64], charges: &[f64]) -> Result<Self, FieldObjectError> {
        if x0.len() != y0.len() || x0.len() != charges.len() {
            return Err(FieldObjectError::new(
                KIND,
                format!(
                    "coordinate and charge arrays differ in length (x: {}, y: {}, charge: {})",
                    x0.len(),
                    y0.len(),
                    charges.len()
                ),
            ));
        }
        let positions = x0
            .iter()
            .zip(y0)
            .map(|(&x, &y)| Vec2::new(x, y))
            .collect();
        Ok(Self {
            positions,
            charges: charges.to_vec(),
        })
    }

    /// All sources carry the same `charge`.
    pub fn uniform(x0: &[f64], y0: &[f64], charge: f64) -> Result<Self, FieldObjectError> {
        Self::new(x0, y0, &vec![charge; x0.len()])
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl FieldSource for PointCharges {
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64 {
        self.positions
            .iter()
            .zip(&self.charges)
            .map(|(source, &q)| coupling * q * charge / (position - source).norm())
            .sum()
    }

    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2 {
        self.positions
            .iter()
            .zip(&self.charges)
            .fold(Vec2::zeros(), |acc, (source, &q)| {
                let d = position - source;
                let dist = d.norm();
                acc - (coupling * q * charge / (dist * dist * dist)) * d
            })
    }

    fn validate(&self) -> Result<(), FieldObjectError> {
        for (i, (p, &q)) in self.positions.iter().zip(&self.charges).enumerate() {
            require_finite(KIND, &format!("source {i} x"), p.x)?;
            require_finite(KIND, &format!("source {i} y"), p.y)?;
            require_finite(KIND, &format!("source {i} charge"), q)?;
        }
        Ok(())
    }
}
