//! # Field Objects Module
//!
//! Static boundary structures that act on every particle through a potential energy.
//!
//! ## Overview
//!
//! A field object is immutable once built. Its potential is a pure function of one particle's
//! coordinates, that particle's charge, and the electrostatic coupling constant; the external
//! energy of the ensemble is the sum of that potential over all particles.
//!
//! | Variant | Potential law |
//! |---|---|
//! | [`ring::Ring`] | image-charge integral `∮ dθ / √(1 + s² − 2s cos θ)`, `s = r / R`, by trapezoid quadrature |
//! | [`line::InfiniteLine`] | `−k λ q ln|d⊥|` |
//! | [`line::LineSegment`] | `k λ q [asinh((2d∥ + L) / 2|d⊥|) − asinh((2d∥ − L) / 2|d⊥|)]` |
//! | [`frame::Hash`] | sum of four infinite lines forming an open cross frame |
//! | [`frame::Square`] | sum of four segments forming a closed square frame |
//! | [`point_charges::PointCharges`] | `Σ k Q q / d` over the static charges |
//!
//! Every variant also provides the analytic gradient of its potential with respect to the
//! particle position, which is what the integrators consume.

pub mod frame;
pub mod line;
pub mod point_charges;
pub mod ring;

use crate::core::models::phase_space::Vec2;
use frame::{Hash, Square};
use line::{InfiniteLine, LineSegment};
use point_charges::PointCharges;
use ring::Ring;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
#[error("Invalid {kind}: {reason}")]
pub struct FieldObjectError {
    pub kind: &'static str,
    pub reason: String,
}

impl FieldObjectError {
    pub fn new(kind: &'static str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

pub(crate) fn require_finite(
    kind: &'static str,
    name: &str,
    value: f64,
) -> Result<(), FieldObjectError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FieldObjectError::new(
            kind,
            format!("{name} must be finite, got {value}"),
        ))
    }
}

pub(crate) fn require_positive(
    kind: &'static str,
    name: &str,
    value: f64,
) -> Result<(), FieldObjectError> {
    require_finite(kind, name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(FieldObjectError::new(
            kind,
            format!("{name} must be positive, got {value}"),
        ))
    }
}

/// A source of external potential energy for charged particles.
pub trait FieldSource {
    /// Potential energy of one particle of charge `charge` at `position`.
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64;

    /// Gradient of [`FieldSource::potential`] with respect to `position`.
    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2;

    /// Checks that the shape parameters describe a usable object.
    fn validate(&self) -> Result<(), FieldObjectError>;

    /// Sum of the potential over a batch of particles.
    fn total_potential(&self, positions: &[Vec2], charges: &[f64], coupling: f64) -> f64 {
        positions
            .iter()
            .zip(charges)
            .map(|(&position, &charge)| self.potential(position, charge, coupling))
            .sum()
    }

    /// Adds the per-particle gradient of the potential into `out`.
    fn accumulate_gradient(
        &self,
        positions: &[Vec2],
        charges: &[f64],
        coupling: f64,
        out: &mut [Vec2],
    ) {
        for ((&position, &charge), slot) in positions.iter().zip(charges).zip(out.iter_mut()) {
            *slot += self.gradient(position, charge, coupling);
        }
    }
}

/// The closed set of boundary structures a system can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldObject {
    Ring(Ring),
    Line(InfiniteLine),
    Segment(LineSegment),
    Hash(Hash),
    Square(Square),
    PointCharges(PointCharges),
}

impl FieldObject {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldObject::Ring(_) => ring::KIND,
            FieldObject::Line(_) => line::INFINITE_KIND,
            FieldObject::Segment(_) => line::SEGMENT_KIND,
            FieldObject::Hash(_) => frame::HASH_KIND,
            FieldObject::Square(_) => frame::SQUARE_KIND,
            FieldObject::PointCharges(_) => point_charges::KIND,
        }
    }

    fn source(&self) -> &dyn FieldSource {
        match self {
            FieldObject::Ring(o) => o,
            FieldObject::Line(o) => o,
            FieldObject::Segment(o) => o,
            FieldObject::Hash(o) => o,
            FieldObject::Square(o) => o,
            FieldObject::PointCharges(o) => o,
        }
    }
}

impl FieldSource for FieldObject {
    fn potential(&self, position: Vec2, charge: f64, coupling: f64) -> f64 {
        self.source().potential(position, charge, coupling)
    }

    fn gradient(&self, position: Vec2, charge: f64, coupling: f64) -> Vec2 {
        self.source().gradient(position, charge, coupling)
    }

    fn validate(&self) -> Result<(), FieldObjectError> {
        self.source().validate()
    }
}

impl From<Ring> for FieldObject {
    fn from(o: Ring) -> Self {
        FieldObject::Ring(o)
    }
}

impl From<InfiniteLine> for FieldObject {
    fn from(o: InfiniteLine) -> Self {
        FieldObject::Line(o)
    }
}

impl From<LineSegment> for FieldObject {
    fn from(o: LineSegment) -> Self {
        FieldObject::Segment(o)
    }
}

impl From<Hash> for FieldObject {
    fn from(o: Hash) -> Self {
        FieldObject::Hash(o)
    }
}

impl From<Square> for FieldObject {
    fn from(o: Square) -> Self {
        FieldObject::Square(o)
    }
}

impl From<PointCharges> for FieldObject {
    fn from(o: PointCharges) -> Self {
        FieldObject::PointCharges(o)
    }
}

/// Central finite-difference gradient, shared by the variant tests.
#[cfg(test)]
pub(crate) fn numerical_gradient<S: FieldSource>(
    source: &S,
    position: Vec2,
    charge: f64,
    coupling: f64,
) -> Vec2 {
    let h = 1e-6;
    let v = |p: Vec2| source.potential(p, charge, coupling);
    let dx = Vec2::new(h, 0.0);
    let dy = Vec2::new(0.0, h);
    Vec2::new(
        (v(position + dx) - v(position - dx)) / (2.0 * h),
        (v(position + dy) - v(position - dy)) / (2.0 * h),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_dispatch_matches_inner_object() {
        let ring = Ring::new(1.0, 2.0);
        let object = FieldObject::from(ring.clone());
        let position = Vec2::new(0.2, -0.1);
        assert_eq!(
            object.potential(position, 1.5, 0.5),
            ring.potential(position, 1.5, 0.5)
        );
        assert_eq!(
            object.gradient(position, 1.5, 0.5),
            ring.gradient(position, 1.5, 0.5)
        );
        assert_eq!(object.kind(), "ring");
    }

    #[test]
    fn batch_potential_sums_over_particles() {
        let line = InfiniteLine::horizontal(0.0, 1.0);
        let positions = [Vec2::new(0.0, 1.0), Vec2::new(3.0, 2.0)];
        let total = line.total_potential(&positions, &[1.0, 1.0], 1.0);
        assert!((total - (-(2.0f64).ln())).abs() < 1e-12);
    }

    #[test]
    fn accumulate_gradient_adds_to_existing_values() {
        let line = InfiniteLine::vertical(0.0, 1.0);
        let mut out = vec![Vec2::new(1.0, 1.0)];
        line.accumulate_gradient(&[Vec2::new(2.0, 0.0)], &[1.0], 1.0, &mut out);
        assert!((out[0] - Vec2::new(0.5, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn validation_errors_name_the_object_kind() {
        let object = FieldObject::from(Ring::new(-1.0, 1.0));
        let err = object.validate().unwrap_err();
        assert_eq!(err.kind, "ring");
        assert!(err.reason.contains("radius"));
    }
}
