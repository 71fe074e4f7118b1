use crate::core::models::phase_space::Vec2;

#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64, coupling: f64) -> f64 {
    coupling * q1 * q2 / dist
}

/// Gradient of [`coulomb`] with respect to the first particle, for `r = r1 - r2`.
#[inline]
pub fn coulomb_gradient(r: Vec2, q1: f64, q2: f64, coupling: f64) -> Vec2 {
    let dist = r.norm();
    -(coupling * q1 * q2 / (dist * dist * dist)) * r
}

/// One ordered pair of the magnetic (Darwin-like) interaction:
///
/// `E = c [ (p1·p2) / d + (p1·r)(p2·r) / d³ ]` with `c = -β q1 q2 / (2 m1 m2)`.
#[derive(Debug, Clone, Copy)]
pub struct DarwinPair {
    /// `r1 - r2`.
    pub r: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub strength: f64,
}

impl DarwinPair {
    pub fn new(r: Vec2, p1: Vec2, p2: Vec2, q1q2: f64, m1m2: f64, beta: f64) -> Self {
        Self {
            r,
            p1,
            p2,
            strength: -beta * q1q2 / (2.0 * m1m2),
        }
    }

    pub fn energy(&self) -> f64 {
        let d = self.r.norm();
        let projected = self.p1.dot(&self.r) * self.p2.dot(&self.r);
        self.strength * (self.p1.dot(&self.p2) / d + projected / (d * d * d))
    }

    /// Gradient with respect to `r`; the first particle gets `+`, the second `-`.
    pub fn grad_r(&self) -> Vec2 {
        let d = self.r.norm();
        let d3 = d * d * d;
        let (a, b) = (self.p1.dot(&self.r), self.p2.dot(&self.r));
        let cross = (b * self.p1 + a * self.p2) / d3;
        let radial = (self.p1.dot(&self.p2) / d3 + 3.0 * a * b / (d3 * d * d)) * self.r;
        self.strength * (cross - radial)
    }

    pub fn grad_p1(&self) -> Vec2 {
        self.momentum_gradient(self.p2)
    }

    pub fn grad_p2(&self) -> Vec2 {
        self.momentum_gradient(self.p1)
    }

    fn momentum_gradient(&self, other: Vec2) -> Vec2 {
        let d = self.r.norm();
        self.strength * (other / d + (other.dot(&self.r) / (d * d * d)) * self.r)
    }
}
