use std::ops::{Add, AddAssign};

/// Breakdown of the Hamiltonian into its contributions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub kinetic: f64,
    pub internal: f64,
    pub external: f64,
    pub magnetic: f64,
}

impl EnergyTerm {
    pub fn new(kinetic: f64, internal: f64, external: f64, magnetic: f64) -> Self {
        Self {
            kinetic,
            internal,
            external,
            magnetic,
        }
    }

    #[inline]
    pub fn potential(&self) -> f64 {
        self.internal + self.external
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.kinetic + self.internal + self.external + self.magnetic
    }
}

impl Add for EnergyTerm {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            kinetic: self.kinetic + rhs.kinetic,
            internal: self.internal + rhs.internal,
            external: self.external + rhs.external,
            magnetic: self.magnetic + rhs.magnetic,
        }
    }
}

impl AddAssign for EnergyTerm {
    fn add_assign(&mut self, rhs: Self) {
        self.kinetic += rhs.kinetic;
        self.internal += rhs.internal;
        self.external += rhs.external;
        self.magnetic += rhs.magnetic;
    }
}
