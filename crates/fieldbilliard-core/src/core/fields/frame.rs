use super::line::{InfiniteLine, LineSegment};
use super::{FieldObjectError, FieldSource, require_finite, require_positive};
use crate::core::models::phase_space::Vec2;

pub const HASH_KIND: &str = "hash";
pub const SQUARE_KIND: &str = "square";

/// Four infinite wires at `±length / 2` around `center`, crossing like a `#`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hash {
    pub length: f64,
    pub charge_density: f64,
    pub center: Vec2,
}

impl Hash {
    pub fn new(length: f64, charge_density: f64) -> Self {
        Self {
            length,
            charge_density,
            center: Vec2::zeros(),
        }
    }

    pub fn centered_at(mut self, x0: f64, y0: f64) -> Self {
        self.center = Vec2::new(x0, y0);
        self
    }

    /// Upper, lower, then the two vertical wires at `x0 + l/2` and `x0 - l/2`.
    pub fn lines(&self) -> [InfiniteLine; 4] {
        let half = 0.5 * self.length;
        let (x0, y0) = (self.center.x, self.center.y);
        [
            InfiniteLine::horizontal(y0 + half, self.charge_density),
            InfiniteLine::horizontal(y0 - half, self.charge_density),
            InfiniteLine::vertical(x0 + half, self.charge_density),
            InfiniteLine::vertical(x0 - half, self.charge_density),
        ]
    }
}

/// Four wire segments of length `length` closing a square around `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub length: f64,
    pub charge_density: f64,
    pub center: Vec2,
}

impl Square {
    pub fn new(length: f64, charge_density: f64) -> Self {
        Self {
            length,
            charge_density,
            center: Vec2::zeros(),
        }
    }

    pub fn centered_at(mut self, x0: f64, y0: f64) -> Self {
        self.center = Vec2::new(x0, y0);
        self
    }

    /// Same side order as [`Hash::lines`].
    pub fn sides(&self) -> [LineSegment; 4] {
        let (l, lambda) = (self.length, self.charge_density);
        let half = 0.5 * l;
        let (x0, y0) = (self.center.x, self.center.y);
        [
            LineSegment::horizontal(y0 + half, l, x0, lambda),
            LineSegment::horizontal(y0 - half, l, x0, lambda),
            LineSegment::vertical(x0 + half, l, y0, lambda),
            LineSegment::vertical(x0 - half, l, y0, lambda),
        ]
    }
}

// Sums are written out left to right so a frame equals its parts bit for bit.
fn sum_potentials<S: FieldSource>(
    parts: &[S; 4],
    position: Vec2,
    charge: f64,
    coupling: f64,
) -> f64 {
    let [a, b, c, d] = parts;
    a.potential(position, charge, coupling)
        + b.potential(position, charge, coupling)
        + c.potential(position, charge, coupling)
        + d.potential(position, charge, coupling)
}

fn sum_gradients<S: FieldSource>(
    parts: &[S; 4],
    position: Vec2,
    charge: f64,
    coupling: f64,
) -> Vec2 {
    let [a, b, c, d] = parts;
    a.gradient(position, charge, coupling)
        + b.gradient(position, charge, coupling)
        + c.gradient(position, charge, coupling)
        + d.gradient(position, charge, coupling)
}

fn validate_frame(
    kind: &'static str,
    length: f64,
    charge_density: f64,
    center: Vec2,
) -> Result<(), FieldObjectError> {
    require_positive(kind, "side length", length)?;
    require_finite(kind, "charge density", charge_density)?;
    require_finite(kind, "center x", center.x)?;
    require_finite(kind, "center y", center.y)
}

impl FieldSource for Hash {
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64 {
        sum_potentials(&self.lines(), position, charge, coupling)
    }

    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2 {
        sum_gradients(&self.lines(), position, charge, coupling)
    }

    fn validate(&self) -> Result<(), FieldObjectError> {
        validate_frame(HASH_KIND, self.length, self.charge_density, self.center)
    }
}

impl FieldSource for Square {
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64 {
        sum_potentials(&self.sides(), position, charge, coupling)
    }

    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2 {
        sum_gradients(&self.sides(), position, charge, coupling)
    }

    fn validate(&self) -> Result<(), FieldObjectError> {
        validate_frame(SQUARE_KIND, self.length, self.charge_density, self.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::numerical_gradient;

    const PROBES: [(f64, f64); 4] = [(0.0, 0.0), (0.3, -0.2), (-0.7, 0.65), (2.5, 1.5)];

    #[test]
    fn hash_potential_is_exact_sum_of_its_lines() {
        let hash = Hash::new(2.0, 10.0).centered_at(0.1, -0.1);
        let [upper, lower, left, right] = hash.lines();
        for (x, y) in PROBES {
            let p = Vec2::new(x, y);
            let expected = upper.potential(p, 1.0, 1.0)
                + lower.potential(p, 1.0, 1.0)
                + left.potential(p, 1.0, 1.0)
                + right.potential(p, 1.0, 1.0);
            assert_eq!(hash.potential(p, 1.0, 1.0), expected);
        }
    }

    #[test]
    fn square_potential_is_exact_sum_of_its_sides() {
        let square = Square::new(2.0, 10.0);
        let [upper, lower, left, right] = square.sides();
        for (x, y) in PROBES {
            let p = Vec2::new(x, y);
            let expected = upper.potential(p, 0.5, 2.0)
                + lower.potential(p, 0.5, 2.0)
                + left.potential(p, 0.5, 2.0)
                + right.potential(p, 0.5, 2.0);
            assert_eq!(square.potential(p, 0.5, 2.0), expected);
        }
    }

    #[test]
    fn hash_lines_sit_half_a_side_from_center() {
        let hash = Hash::new(4.0, 1.0).centered_at(1.0, -1.0);
        let offsets: Vec<f64> = hash.lines().iter().map(|l| l.offset).collect();
        assert_eq!(offsets, vec![1.0, -3.0, 3.0, -1.0]);
    }

    #[test]
    fn square_is_symmetric_about_its_center() {
        let square = Square::new(2.0, 10.0);
        let a = square.potential(Vec2::new(0.4, 0.1), 1.0, 1.0);
        let b = square.potential(Vec2::new(-0.4, -0.1), 1.0, 1.0);
        let c = square.potential(Vec2::new(0.1, 0.4), 1.0, 1.0);
        assert!((a - b).abs() < 1e-12);
        assert!((a - c).abs() < 1e-12);
        assert!(square.gradient(Vec2::zeros(), 1.0, 1.0).norm() < 1e-12);
    }

    #[test]
    fn square_confines_positive_charges() {
        let square = Square::new(2.0, 10.0);
        let force = -square.gradient(Vec2::new(0.8, 0.0), 1.0, 1.0);
        assert!(force.x < 0.0);
    }

    #[test]
    fn frame_gradients_match_finite_differences() {
        let hash = Hash::new(2.0, 3.0);
        let square = Square::new(2.0, 3.0).centered_at(0.2, 0.1);
        let position = Vec2::new(0.3, -0.2);
        let analytic = hash.gradient(position, 1.0, 1.0);
        assert!((analytic - numerical_gradient(&hash, position, 1.0, 1.0)).norm() < 1e-5);
        let analytic = square.gradient(position, 1.0, 1.0);
        assert!((analytic - numerical_gradient(&square, position, 1.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn frames_reject_degenerate_sides() {
        assert_eq!(Hash::new(0.0, 1.0).validate().unwrap_err().kind, HASH_KIND);
        assert_eq!(Square::new(-2.0, 1.0).validate().unwrap_err().kind, SQUARE_KIND);
        assert!(Square::new(2.0, 1.0).validate().is_ok());
    }
}
