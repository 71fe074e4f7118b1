//! Stepping algorithms that advance a [`PhaseSpace`] in place.
//!
//! Every integrator reads the gradients of a [`Hamiltonian`] and never keeps state between
//! calls. Gradient buffers are owned by a single step and cleared before each evaluation.

mod euler;
mod midpoint;
mod runge_kutta;
mod symplectic;
mod tao;

use super::config::ConfigError;
use super::error::EngineError;
use crate::core::energy::hamiltonian::Hamiltonian;
use crate::core::models::phase_space::PhaseSpace;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegratorKind {
    Euler,
    SymplecticEuler,
    SymplecticVerlet,
    Midpoint,
    RungeKutta4,
    /// Tao's extended-phase-space splitting with binding stiffness `omega`.
    Tao { omega: f64 },
}

impl IntegratorKind {
    pub fn name(&self) -> &'static str {
        match self {
            IntegratorKind::Euler => "euler",
            IntegratorKind::SymplecticEuler => "symplectic-euler",
            IntegratorKind::SymplecticVerlet => "symplectic-verlet",
            IntegratorKind::Midpoint => "midpoint",
            IntegratorKind::RungeKutta4 => "runge-kutta",
            IntegratorKind::Tao { .. } => "tao",
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            IntegratorKind::Euler | IntegratorKind::SymplecticEuler => 1,
            IntegratorKind::SymplecticVerlet
            | IntegratorKind::Midpoint
            | IntegratorKind::Tao { .. } => 2,
            IntegratorKind::RungeKutta4 => 4,
        }
    }

    pub fn is_symplectic(&self) -> bool {
        matches!(
            self,
            IntegratorKind::SymplecticEuler
                | IntegratorKind::SymplecticVerlet
                | IntegratorKind::Tao { .. }
        )
    }

    /// Integrators that split `H` into kinetic and potential parts.
    pub fn requires_separable(&self) -> bool {
        matches!(
            self,
            IntegratorKind::SymplecticEuler | IntegratorKind::SymplecticVerlet
        )
    }

    pub fn requires_extended_phase_space(&self) -> bool {
        matches!(self, IntegratorKind::Tao { .. })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            IntegratorKind::Tao { omega } if !omega.is_finite() || omega <= 0.0 => {
                Err(ConfigError::InvalidParameter {
                    name: "omega",
                    value: omega,
                })
            }
            _ => Ok(()),
        }
    }

    /// Advances `state` by one step of size `dt` under `hamiltonian`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonSeparableCoupling`] when a separable-only integrator meets a
    /// magnetic coupling, and [`EngineError::MissingMirrorState`] when Tao's method runs on a
    /// state without a mirror copy. In both cases `state` is left untouched.
    pub fn step(
        &self,
        dt: f64,
        state: &mut PhaseSpace,
        hamiltonian: &Hamiltonian,
    ) -> Result<(), EngineError> {
        if self.requires_separable() && !hamiltonian.is_separable() {
            return Err(ConfigError::NonSeparableCoupling {
                integrator: self.name(),
            }
            .into());
        }
        match *self {
            IntegratorKind::Euler => euler::step(dt, state, hamiltonian),
            IntegratorKind::SymplecticEuler => symplectic::euler_step(dt, state, hamiltonian),
            IntegratorKind::SymplecticVerlet => symplectic::verlet_step(dt, state, hamiltonian),
            IntegratorKind::Midpoint => midpoint::step(dt, state, hamiltonian),
            IntegratorKind::RungeKutta4 => runge_kutta::step(dt, state, hamiltonian),
            IntegratorKind::Tao { omega } => return tao::step(dt, omega, state, hamiltonian),
        }
        Ok(())
    }
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegratorKind::Tao { omega } => write!(f, "tao (omega = {omega})"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::energy::hamiltonian::Hamiltonian;
    use crate::core::fields::FieldObject;
    use crate::core::fields::frame::Square;
    use crate::core::fields::point_charges::PointCharges;
    use crate::core::models::phase_space::{Leaves, Vec2};

    const ALL: [IntegratorKind; 6] = [
        IntegratorKind::Euler,
        IntegratorKind::SymplecticEuler,
        IntegratorKind::SymplecticVerlet,
        IntegratorKind::Midpoint,
        IntegratorKind::RungeKutta4,
        IntegratorKind::Tao { omega: 80.0 },
    ];

    fn prepared(kind: IntegratorKind, state: &PhaseSpace) -> PhaseSpace {
        let mut state = state.clone();
        if kind.requires_extended_phase_space() {
            state.attach_mirror();
        }
        state
    }

    fn free_particle() -> PhaseSpace {
        PhaseSpace::new(
            vec![0.25],
            vec![-0.5],
            Some(vec![0.5]),
            Some(vec![-0.25]),
            2.0,
            1.0,
        )
        .unwrap()
    }

    fn interacting_cluster() -> PhaseSpace {
        PhaseSpace::new(
            vec![0.0, -0.3, 0.3, 0.1],
            vec![0.7, -0.3, -0.3, 0.1],
            Some(vec![0.1, 0.0, -0.2, 0.3]),
            Some(vec![0.0, 0.4, -0.1, -0.2]),
            1.0,
            1.0,
        )
        .unwrap()
        .with_charges(vec![1.0, 0.5, 2.0, 1.5])
        .unwrap()
    }

    #[test]
    fn free_particle_moves_uniformly_under_every_integrator() {
        let h = Hamiltonian::new(&[], 0.0);
        for kind in ALL {
            let mut state = prepared(kind, &free_particle());
            for _ in 0..10 {
                kind.step(0.1, &mut state, &h).unwrap();
            }
            assert_eq!(state.momenta()[0], Vec2::new(0.5, -0.25), "{kind}");
            let expected = Vec2::new(0.25, -0.5) + 1.0 * Vec2::new(0.5, -0.25) / 2.0;
            assert!((state.positions()[0] - expected).norm() < 1e-12, "{kind}");
        }
    }

    #[test]
    fn isolated_cluster_conserves_total_momentum() {
        let h = Hamiltonian::new(&[], 1.0);
        for kind in ALL {
            for dt in [0.001, 0.01] {
                let mut state = prepared(kind, &interacting_cluster());
                let initial = state.total_momentum();
                for _ in 0..20 {
                    kind.step(dt, &mut state, &h).unwrap();
                }
                assert!(
                    (state.total_momentum() - initial).norm() < 1e-9,
                    "{kind} dt={dt}"
                );
            }
        }
    }

    #[test]
    fn symplectic_schemes_track_energy_better_than_euler() {
        let fields = vec![FieldObject::from(Square::new(2.0, 10.0))];
        let h = Hamiltonian::new(&fields, 1.0);
        let drift = |kind: IntegratorKind| {
            let mut state = prepared(kind, &interacting_cluster());
            let e0 = h.hamiltonian(&state, Leaves::REAL).unwrap();
            let mut worst: f64 = 0.0;
            for _ in 0..400 {
                kind.step(0.005, &mut state, &h).unwrap();
                let e = h.hamiltonian(&state, Leaves::REAL).unwrap();
                worst = worst.max(((e - e0) / e0).abs());
            }
            worst
        };
        let euler = drift(IntegratorKind::Euler);
        assert!(drift(IntegratorKind::SymplecticVerlet) < euler);
        assert!(drift(IntegratorKind::Tao { omega: 320.0 }) < euler);
    }

    /// Worst `|ΔE/E₀|` over the first and the second half of a run on a circular
    /// orbit around an opposite point charge.
    fn orbit_energy_error_by_half(kind: IntegratorKind, dt: f64, steps: usize) -> (f64, f64) {
        let fields = vec![FieldObject::from(
            PointCharges::new(&[0.0], &[0.0], &[-1.0]).unwrap(),
        )];
        let h = Hamiltonian::new(&fields, 1.0);
        let orbit =
            PhaseSpace::new(vec![1.0], vec![0.0], Some(vec![0.0]), Some(vec![1.0]), 1.0, 1.0)
                .unwrap();
        let mut state = prepared(kind, &orbit);
        let e0 = h.hamiltonian(&state, Leaves::REAL).unwrap();
        let (mut first, mut second): (f64, f64) = (0.0, 0.0);
        for k in 0..steps {
            kind.step(dt, &mut state, &h).unwrap();
            let e = h.hamiltonian(&state, Leaves::REAL).unwrap();
            let error = ((e - e0) / e0).abs();
            if k < steps / 2 {
                first = first.max(error);
            } else {
                second = second.max(error);
            }
        }
        (first, second)
    }

    #[test]
    fn symplectic_euler_energy_error_stays_bounded_over_many_orbits() {
        // 200 time units, about 30 revolutions.
        let (first, second) =
            orbit_energy_error_by_half(IntegratorKind::SymplecticEuler, 0.01, 20_000);
        assert!(first < 2e-4, "first half {first:e}");
        assert!(second < 2e-4, "second half {second:e}");
        assert!(second <= 1.05 * first, "{first:e} -> {second:e}");
    }

    #[test]
    fn tao_energy_error_stays_bounded_over_many_orbits() {
        let (first, second) =
            orbit_energy_error_by_half(IntegratorKind::Tao { omega: 320.0 }, 0.005, 12_000);
        assert!(first < 1e-5, "first half {first:e}");
        assert!(second < 1e-5, "second half {second:e}");
        assert!(second <= 1.05 * first, "{first:e} -> {second:e}");
    }

    #[test]
    fn explicit_euler_energy_error_grows_on_the_same_orbit() {
        let (first, second) = orbit_energy_error_by_half(IntegratorKind::Euler, 0.01, 2_000);
        assert!(second > first);
    }

    #[test]
    fn separable_only_integrators_refuse_magnetic_coupling() {
        let h = Hamiltonian::new(&[], 1.0).with_magnetic_coupling(Some(0.01));
        for kind in [IntegratorKind::SymplecticEuler, IntegratorKind::SymplecticVerlet] {
            let mut state = interacting_cluster();
            let before = state.clone();
            let err = kind.step(0.01, &mut state, &h).unwrap_err();
            assert_eq!(
                err,
                EngineError::Config(ConfigError::NonSeparableCoupling {
                    integrator: kind.name()
                })
            );
            assert_eq!(state, before);
        }
    }

    #[test]
    fn tao_requires_the_mirror_state() {
        let h = Hamiltonian::new(&[], 1.0);
        let mut state = interacting_cluster();
        let err = IntegratorKind::Tao { omega: 20.0 }
            .step(0.01, &mut state, &h)
            .unwrap_err();
        assert_eq!(err, EngineError::MissingMirrorState { integrator: "tao" });
    }

    #[test]
    fn orders_and_capabilities() {
        assert_eq!(IntegratorKind::RungeKutta4.order(), 4);
        assert_eq!(IntegratorKind::SymplecticVerlet.order(), 2);
        assert!(!IntegratorKind::Euler.is_symplectic());
        assert!(IntegratorKind::Tao { omega: 1.0 }.requires_extended_phase_space());
        assert!(!IntegratorKind::Tao { omega: 1.0 }.requires_separable());
        assert_eq!(
            IntegratorKind::Tao { omega: 320.0 }.to_string(),
            "tao (omega = 320)"
        );
    }
}
