use super::{FieldObjectError, FieldSource, require_finite, require_positive};
use crate::core::models::phase_space::Vec2;
use crate::core::utils::quadrature::trapezoid;
use std::f64::consts::PI;

pub const KIND: &str = "ring";
pub const DEFAULT_QUADRATURE_POINTS: usize = 100;

/// A uniformly charged circle acting on particles through its image-charge integral.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub charge_density: f64,
    pub center: Vec2,
    pub quadrature_points: usize,
}

impl Ring {
    pub fn new(radius: f64, charge_density: f64) -> Self {
        Self {
            radius,
            charge_density,
            center: Vec2::zeros(),
            quadrature_points: DEFAULT_QUADRATURE_POINTS,
        }
    }

    pub fn centered_at(mut self, x0: f64, y0: f64) -> Self {
        self.center = Vec2::new(x0, y0);
        self
    }

    pub fn with_quadrature_points(mut self, n: usize) -> Self {
        self.quadrature_points = n;
        self
    }
}

/// `∮ dθ / √(1 + s² − 2 s cos θ)` over `[0, 2π]`; non-finite results become 0.
pub fn image_charge_integral(s: f64, n: usize) -> f64 {
    let value = trapezoid(
        |theta| 1.0 / (1.0 + s * s - 2.0 * s * theta.cos()).sqrt(),
        0.0,
        2.0 * PI,
        n,
    );
    if value.is_finite() { value } else { 0.0 }
}

/// Derivative of [`image_charge_integral`] with respect to `s`, under the same quadrature.
pub fn image_charge_integral_derivative(s: f64, n: usize) -> f64 {
    let value = trapezoid(
        |theta| {
            let cos = theta.cos();
            -(s - cos) / (1.0 + s * s - 2.0 * s * cos).powf(1.5)
        },
        0.0,
        2.0 * PI,
        n,
    );
    if value.is_finite() { value } else { 0.0 }
}

impl FieldSource for Ring {
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64 {
        let r = (position - self.center).norm();
        coupling
            * self.charge_density
            * charge
            * image_charge_integral(r / self.radius, self.quadrature_points)
    }

    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2 {
        let d = position - self.center;
        let r = d.norm();
        if r == 0.0 {
            return Vec2::zeros();
        }
        let dphi_ds = image_charge_integral_derivative(r / self.radius, self.quadrature_points);
        let grad = (coupling * self.charge_density * charge * dphi_ds / (self.radius * r)) * d;
        if grad.iter().all(|c| c.is_finite()) {
            grad
        } else {
            Vec2::zeros()
        }
    }

    fn validate(&self) -> Result<(), FieldObjectError> {
        require_positive(KIND, "radius", self.radius)?;
        require_finite(KIND, "charge density", self.charge_density)?;
        require_finite(KIND, "center x", self.center.x)?;
        require_finite(KIND, "center y", self.center.y)?;
        if self.quadrature_points == 0 {
            return Err(FieldObjectError::new(
                KIND,
                "quadrature needs at least one subdivision",
            ));
        }
        Ok(())
    }
}
