use super::{FieldObjectError, FieldSource, require_finite, require_positive};
use crate::core::models::phase_space::Vec2;

pub const INFINITE_KIND: &str = "infinite line";
pub const SEGMENT_KIND: &str = "line segment";

/// Orientation of a straight charged wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Splits a displacement into its components along and across the wire.
    fn split(self, d: Vec2) -> (f64, f64) {
        match self {
            Axis::Horizontal => (d.x, d.y),
            Axis::Vertical => (d.y, d.x),
        }
    }

    /// Inverse of [`Axis::split`].
    fn join(self, along: f64, across: f64) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(along, across),
            Axis::Vertical => Vec2::new(across, along),
        }
    }
}

/// An infinitely long charged wire parallel to one of the axes.
///
/// `offset` is the wire's `y` for horizontal wires and its `x` for vertical ones.
/// The logarithmic potential diverges on the wire and is not clamped there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteLine {
    pub axis: Axis,
    pub offset: f64,
    pub charge_density: f64,
}

impl InfiniteLine {
    pub fn horizontal(y0: f64, charge_density: f64) -> Self {
        Self {
            axis: Axis::Horizontal,
            offset: y0,
            charge_density,
        }
    }

    pub fn vertical(x0: f64, charge_density: f64) -> Self {
        Self {
            axis: Axis::Vertical,
            offset: x0,
            charge_density,
        }
    }

    fn across(&self, position: Vec2) -> f64 {
        self.axis.split(position).1 - self.offset
    }
}

impl FieldSource for InfiniteLine {
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64 {
        -coupling * self.charge_density * charge * self.across(position).abs().ln()
    }

    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2 {
        let d_across = -coupling * self.charge_density * charge / self.across(position);
        self.axis.join(0.0, d_across)
    }

    fn validate(&self) -> Result<(), FieldObjectError> {
        require_finite(INFINITE_KIND, "offset", self.offset)?;
        require_finite(INFINITE_KIND, "charge density", self.charge_density)
    }
}

/// A finite charged wire of length `length` parallel to one of the axes.
///
/// The wire lies at `offset` across the axis and is centered at `center` along it. Its
/// potential integrates the inverse-distance kernel along the wire in closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub axis: Axis,
    pub offset: f64,
    pub length: f64,
    pub center: f64,
    pub charge_density: f64,
}

impl LineSegment {
    pub fn horizontal(y0: f64, length: f64, x0: f64, charge_density: f64) -> Self {
        Self {
            axis: Axis::Horizontal,
            offset: y0,
            length,
            center: x0,
            charge_density,
        }
    }

    pub fn vertical(x0: f64, length: f64, y0: f64, charge_density: f64) -> Self {
        Self {
            axis: Axis::Vertical,
            offset: x0,
            length,
            center: y0,
            charge_density,
        }
    }

    fn local(&self, position: Vec2) -> (f64, f64) {
        let (along, across) = self.axis.split(position);
        (along - self.center, across - self.offset)
    }
}

impl FieldSource for LineSegment {
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64 {
        let (along, across) = self.local(position);
        let width = 2.0 * across.abs();
        let integral = ((2.0 * along + self.length) / width).asinh()
            - ((2.0 * along - self.length) / width).asinh();
        coupling * self.charge_density * charge * integral
    }

    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2 {
        let (along, across) = self.local(position);
        let half = 0.5 * self.length;
        // Distances to the two end points of the wire.
        let rho_plus = (along + half).hypot(across);
        let rho_minus = (along - half).hypot(across);

        let d_along = 1.0 / rho_plus - 1.0 / rho_minus;
        let d_across = -(across.signum() / across.abs())
            * ((along + half) / rho_plus - (along - half) / rho_minus);

        let scale = coupling * self.charge_density * charge;
        self.axis.join(scale * d_along, scale * d_across)
    }

    fn validate(&self) -> Result<(), FieldObjectError> {
        require_finite(SEGMENT_KIND, "offset", self.offset)?;
        require_positive(SEGMENT_KIND, "length", self.length)?;
        require_finite(SEGMENT_KIND, "center", self.center)?;
        require_finite(SEGMENT_KIND, "charge density", self.charge_density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::numerical_gradient;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn horizontal_line_potential_is_logarithmic_in_distance() {
        let line = InfiniteLine::horizontal(1.0, 2.0);
        let value = line.potential(Vec2::new(5.0, 1.0 + std::f64::consts::E), 0.5, 3.0);
        assert!(f64_approx_equal(value, -3.0));
    }

    #[test]
    fn vertical_line_ignores_coordinate_along_the_wire() {
        let line = InfiniteLine::vertical(-1.0, 1.0);
        let a = line.potential(Vec2::new(0.5, -10.0), 1.0, 1.0);
        let b = line.potential(Vec2::new(0.5, 10.0), 1.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn infinite_line_gradient_matches_finite_differences() {
        for line in [InfiniteLine::horizontal(0.3, 1.5), InfiniteLine::vertical(-0.4, 0.8)] {
            let position = Vec2::new(0.2, -0.6);
            let analytic = line.gradient(position, 1.1, 0.9);
            let numeric = numerical_gradient(&line, position, 1.1, 0.9);
            assert!((analytic - numeric).norm() < 1e-6);
        }
    }

    #[test]
    fn infinite_line_singularity_propagates() {
        let line = InfiniteLine::horizontal(0.0, 1.0);
        assert!(!line.potential(Vec2::new(0.3, 0.0), 1.0, 1.0).is_finite());
        assert!(!line.gradient(Vec2::new(0.3, 0.0), 1.0, 1.0).y.is_finite());
    }

    #[test]
    fn segment_potential_matches_closed_form_on_bisector() {
        let segment = LineSegment::horizontal(0.0, 2.0, 0.0, 1.0);
        let value = segment.potential(Vec2::new(0.0, 1.0), 1.0, 1.0);
        assert!(f64_approx_equal(value, 2.0 * 1.0f64.asinh()));
    }

    #[test]
    fn long_segment_falls_off_logarithmically() {
        let segment = LineSegment::vertical(0.0, 1e6, 0.0, 1.0);
        let near = segment.potential(Vec2::new(0.5, 0.0), 1.0, 1.0);
        let far = segment.potential(Vec2::new(1.0, 0.0), 1.0, 1.0);
        assert!((near - far - 2.0 * 2.0f64.ln()).abs() < 1e-6);
    }

    #[test]
    fn segment_gradient_matches_finite_differences() {
        let segments = [
            LineSegment::horizontal(1.0, 2.0, 0.1, 10.0),
            LineSegment::vertical(-1.0, 2.0, 0.2, 10.0),
        ];
        let positions = [Vec2::new(0.3, 0.4), Vec2::new(1.7, -0.2), Vec2::new(-0.5, 2.5)];
        for segment in segments {
            for position in positions {
                let analytic = segment.gradient(position, 1.0, 1.0);
                let numeric = numerical_gradient(&segment, position, 1.0, 1.0);
                assert!((analytic - numeric).norm() < 1e-5);
            }
        }
    }

    #[test]
    fn segment_pushes_positive_charges_away() {
        let segment = LineSegment::horizontal(1.0, 2.0, 0.0, 10.0);
        let force = -segment.gradient(Vec2::new(0.0, 0.5), 1.0, 1.0);
        assert!(force.y < 0.0);
        assert!(force.x.abs() < 1e-12);
    }

    #[test]
    fn segment_validation_requires_positive_length() {
        assert!(LineSegment::horizontal(0.0, 0.0, 0.0, 1.0).validate().is_err());
        assert!(LineSegment::vertical(0.0, 1.0, 0.0, 1.0).validate().is_ok());
        assert!(InfiniteLine::vertical(f64::INFINITY, 1.0).validate().is_err());
    }
}
