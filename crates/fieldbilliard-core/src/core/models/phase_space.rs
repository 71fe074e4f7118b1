use crate::core::energy::gradient::Gradient;
use nalgebra::Vector2;
use thiserror::Error;

pub type Vec2 = Vector2<f64>;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum PhaseSpaceError {
    #[error(
        "Coordinate sequences must share one length, got x={x}, y={y}, px={px}, py={py}"
    )]
    LengthMismatch {
        x: usize,
        y: usize,
        px: usize,
        py: usize,
    },

    #[error("A particle ensemble needs at least one particle")]
    Empty,

    #[error("Per-particle {property} has {found} entries, expected {expected}")]
    PropertyLength {
        property: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Particle {index} has non-positive mass {mass}")]
    NonPositiveMass { index: usize, mass: f64 },
}

/// Which copy of a canonical variable an evaluation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replica {
    Real,
    Mirror,
}

/// Selection of the position and momentum leaves a Hamiltonian is evaluated on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaves {
    pub position: Replica,
    pub momentum: Replica,
}

impl Leaves {
    pub const REAL: Self = Self {
        position: Replica::Real,
        momentum: Replica::Real,
    };

    pub fn select(use_mirror_position: bool, use_mirror_momentum: bool) -> Self {
        let pick = |mirror: bool| if mirror { Replica::Mirror } else { Replica::Real };
        Self {
            position: pick(use_mirror_position),
            momentum: pick(use_mirror_momentum),
        }
    }

    pub fn uses_mirror(&self) -> bool {
        self.position == Replica::Mirror || self.momentum == Replica::Mirror
    }
}

/// One copy of the canonical coordinates: a position and a momentum per particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Canonical {
    pub q: Vec<Vec2>,
    pub p: Vec<Vec2>,
}

impl Canonical {
    /// Moves along the Hamiltonian flow described by `gradient` for a time `h`:
    /// `q += h ∂H/∂p` and `p -= h ∂H/∂q`.
    pub fn advance(&mut self, gradient: &Gradient, h: f64) {
        for (q, dp) in self.q.iter_mut().zip(&gradient.dp) {
            *q += h * dp;
        }
        for (p, dq) in self.p.iter_mut().zip(&gradient.dq) {
            *p -= h * dq;
        }
    }

    pub fn advanced(&self, gradient: &Gradient, h: f64) -> Self {
        let mut next = self.clone();
        next.advance(gradient, h);
        next
    }
}

/// Borrowed view of one evaluation point in phase space.
///
/// Only [`PhaseSpace::view`] and [`PhaseSpace::view_with`] build views, so the four
/// slices always describe the same number of particles.
#[derive(Debug, Clone, Copy)]
pub struct PhaseView<'a> {
    q: &'a [Vec2],
    p: &'a [Vec2],
    mass: &'a [f64],
    charge: &'a [f64],
}

impl<'a> PhaseView<'a> {
    pub fn q(&self) -> &'a [Vec2] {
        self.q
    }

    pub fn p(&self) -> &'a [Vec2] {
        self.p
    }

    pub fn mass(&self) -> &'a [f64] {
        self.mass
    }

    pub fn charge(&self) -> &'a [f64] {
        self.charge
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }
}

/// Positions, momenta, masses and charges of the particle ensemble.
///
/// The real coordinates always exist. The mirror copy only exists while an
/// extended-phase-space integrator is selected; it is created equal to the real state.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpace {
    real: Canonical,
    mirror: Option<Canonical>,
    mass: Vec<f64>,
    charge: Vec<f64>,
}

impl PhaseSpace {
    /// Creates an ensemble from coordinate sequences, broadcasting scalar mass and charge.
    ///
    /// Missing momenta default to zero.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseSpaceError::LengthMismatch`] if the sequences differ in length,
    /// [`PhaseSpaceError::Empty`] for zero particles, and
    /// [`PhaseSpaceError::NonPositiveMass`] for a mass that is not strictly positive.
    pub fn new(
        x: Vec<f64>,
        y: Vec<f64>,
        px: Option<Vec<f64>>,
        py: Option<Vec<f64>>,
        mass: f64,
        charge: f64,
    ) -> Result<Self, PhaseSpaceError> {
        let n = x.len();
        let px = px.unwrap_or_else(|| vec![0.0; n]);
        let py = py.unwrap_or_else(|| vec![0.0; y.len()]);

        if y.len() != n || px.len() != n || py.len() != n {
            return Err(PhaseSpaceError::LengthMismatch {
                x: n,
                y: y.len(),
                px: px.len(),
                py: py.len(),
            });
        }
        if n == 0 {
            return Err(PhaseSpaceError::Empty);
        }

        let q = x.iter().zip(&y).map(|(&x, &y)| Vec2::new(x, y)).collect();
        let p = px.iter().zip(&py).map(|(&px, &py)| Vec2::new(px, py)).collect();

        Self {
            real: Canonical { q, p },
            mirror: None,
            mass: vec![1.0; n],
            charge: vec![charge; n],
        }
        .with_masses(vec![mass; n])
    }

    /// Replaces the masses with one value per particle.
    pub fn with_masses(mut self, masses: Vec<f64>) -> Result<Self, PhaseSpaceError> {
        self.check_property("mass", masses.len())?;
        let invalid = masses
            .iter()
            .enumerate()
            .find(|(_, m)| !m.is_finite() || **m <= 0.0);
        if let Some((index, &mass)) = invalid {
            return Err(PhaseSpaceError::NonPositiveMass { index, mass });
        }
        self.mass = masses;
        Ok(self)
    }

    /// Replaces the charges with one value per particle.
    pub fn with_charges(mut self, charges: Vec<f64>) -> Result<Self, PhaseSpaceError> {
        self.check_property("charge", charges.len())?;
        self.charge = charges;
        Ok(self)
    }

    fn check_property(&self, property: &'static str, found: usize) -> Result<(), PhaseSpaceError> {
        if found != self.len() {
            return Err(PhaseSpaceError::PropertyLength {
                property,
                expected: self.len(),
                found,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.real.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.q.is_empty()
    }

    pub fn x(&self) -> Vec<f64> {
        self.real.q.iter().map(|q| q.x).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.real.q.iter().map(|q| q.y).collect()
    }

    pub fn px(&self) -> Vec<f64> {
        self.real.p.iter().map(|p| p.x).collect()
    }

    pub fn py(&self) -> Vec<f64> {
        self.real.p.iter().map(|p| p.y).collect()
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.real.q
    }

    pub fn momenta(&self) -> &[Vec2] {
        &self.real.p
    }

    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    pub fn charge(&self) -> &[f64] {
        &self.charge
    }

    pub fn real(&self) -> &Canonical {
        &self.real
    }

    pub fn real_mut(&mut self) -> &mut Canonical {
        &mut self.real
    }

    pub fn mirror(&self) -> Option<&Canonical> {
        self.mirror.as_ref()
    }

    /// Mutable access to both copies at once, as the splitting operators need.
    pub fn split_mut(&mut self) -> (&mut Canonical, Option<&mut Canonical>) {
        (&mut self.real, self.mirror.as_mut())
    }

    pub fn is_extended(&self) -> bool {
        self.mirror.is_some()
    }

    /// Allocates the mirror copy as a snapshot of the real coordinates.
    /// An existing mirror is kept untouched.
    pub fn attach_mirror(&mut self) {
        if self.mirror.is_none() {
            self.mirror = Some(self.real.clone());
        }
    }

    pub fn detach_mirror(&mut self) {
        self.mirror = None;
    }

    /// Borrows the leaves selected by `leaves`, or `None` when a mirror leaf is requested
    /// while no mirror exists.
    pub fn view(&self, leaves: Leaves) -> Option<PhaseView<'_>> {
        let pick = |replica: Replica| match replica {
            Replica::Real => Some(&self.real),
            Replica::Mirror => self.mirror.as_ref(),
        };
        Some(PhaseView {
            q: &pick(leaves.position)?.q,
            p: &pick(leaves.momentum)?.p,
            mass: &self.mass,
            charge: &self.charge,
        })
    }

    /// Views a detached copy of the coordinates with this ensemble's masses and charges.
    ///
    /// `canonical` must hold one entry per particle of this ensemble; debug builds panic
    /// otherwise.
    pub fn view_with<'a>(&'a self, canonical: &'a Canonical) -> PhaseView<'a> {
        debug_assert!(
            canonical.q.len() == self.mass.len() && canonical.p.len() == self.mass.len(),
            "canonical coordinates for {}/{} particles viewed against an ensemble of {}",
            canonical.q.len(),
            canonical.p.len(),
            self.mass.len()
        );
        PhaseView {
            q: &canonical.q,
            p: &canonical.p,
            mass: &self.mass,
            charge: &self.charge,
        }
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.real.p.iter().sum()
    }

    /// Largest position and momentum distance between the real and mirror copies.
    pub fn mirror_separation(&self) -> Option<(f64, f64)> {
        let mirror = self.mirror.as_ref()?;
        let max_dist = |a: &[Vec2], b: &[Vec2]| {
            a.iter()
                .zip(b)
                .map(|(a, b)| (a - b).norm())
                .fold(0.0, f64::max)
        };
        Some((
            max_dist(&self.real.q, &mirror.q),
            max_dist(&self.real.p, &mirror.p),
        ))
    }
}
