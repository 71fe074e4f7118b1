use super::config::{ConfigError, SystemConfig};
use super::error::EngineError;
use super::integrators::IntegratorKind;
use super::registry;
use crate::core::energy::hamiltonian::Hamiltonian;
use crate::core::energy::term::EnergyTerm;
use crate::core::fields::{FieldObject, FieldSource};
use crate::core::models::phase_space::{Leaves, PhaseSpace, Vec2};
use tracing::{debug, info, instrument, warn};

/// Whether the mirror copy of phase space is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseMode {
    Normal,
    Extended,
}

/// The particle ensemble together with its field objects, couplings and active integrator.
///
/// The system is the sole owner of its state. Each [`BilliardSystem::step`] either advances
/// the whole ensemble or fails without touching it.
#[derive(Debug, Clone)]
pub struct BilliardSystem {
    state: PhaseSpace,
    fields: Vec<FieldObject>,
    integrator: IntegratorKind,
    coupling: f64,
    magnetic_coupling: Option<f64>,
    time: f64,
    steps: u64,
    degenerate: bool,
}

impl BilliardSystem {
    #[instrument(skip_all, name = "billiard_system")]
    pub fn new(state: PhaseSpace, config: SystemConfig) -> Self {
        let mut system = Self {
            state,
            fields: Vec::new(),
            integrator: config.integrator,
            coupling: config.coupling,
            magnetic_coupling: config.magnetic_coupling,
            time: 0.0,
            steps: 0,
            degenerate: false,
        };
        system.sync_mode();
        info!(
            particles = system.state.len(),
            integrator = %system.integrator,
            coupling = system.coupling,
            magnetic_coupling = ?system.magnetic_coupling,
            "Billiard system created."
        );
        system
    }

    /// Appends a field object after checking its shape parameters.
    pub fn add_field_object(&mut self, object: impl Into<FieldObject>) -> Result<(), ConfigError> {
        let object = object.into();
        object.validate()?;
        debug!(kind = object.kind(), index = self.fields.len(), "Field object added.");
        self.fields.push(object);
        Ok(())
    }

    /// Advances the system by `dt` with the active integrator.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTimeStep`] for a non-positive or non-finite `dt`, and a
    /// configuration error if the active integrator cannot handle the magnetic coupling.
    pub fn step(&mut self, dt: f64) -> Result<(), EngineError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(EngineError::InvalidTimeStep(dt));
        }
        let hamiltonian = Hamiltonian::new(&self.fields, self.coupling)
            .with_magnetic_coupling(self.magnetic_coupling);
        self.integrator.step(dt, &mut self.state, &hamiltonian)?;
        self.time += dt;
        self.steps += 1;

        if !self.degenerate && !self.is_finite() {
            self.degenerate = true;
            warn!(
                step = self.steps,
                time = self.time,
                "Phase space became non-finite; particles likely collided or reached a wire."
            );
        }
        Ok(())
    }

    /// Selects an integrator preset by name.
    pub fn set_integrator(&mut self, name: &str) -> Result<(), ConfigError> {
        let kind = registry::resolve(name)?;
        self.set_integrator_kind(kind)
    }

    pub fn set_integrator_kind(&mut self, kind: IntegratorKind) -> Result<(), ConfigError> {
        kind.validate()?;
        debug!(from = %self.integrator, to = %kind, "Switching integrator.");
        self.integrator = kind;
        self.sync_mode();
        Ok(())
    }

    // NORMAL -> EXTENDED copies the real state into the mirror; EXTENDED -> NORMAL drops it.
    fn sync_mode(&mut self) {
        let wanted = if self.integrator.requires_extended_phase_space() {
            PhaseMode::Extended
        } else {
            PhaseMode::Normal
        };
        if wanted == self.mode() {
            return;
        }
        match wanted {
            PhaseMode::Extended => self.state.attach_mirror(),
            PhaseMode::Normal => self.state.detach_mirror(),
        }
        info!(mode = ?wanted, integrator = %self.integrator, "Phase space mode changed.");
    }

    pub fn mode(&self) -> PhaseMode {
        if self.state.is_extended() {
            PhaseMode::Extended
        } else {
            PhaseMode::Normal
        }
    }

    pub fn hamiltonian(&self) -> Hamiltonian<'_> {
        Hamiltonian::new(&self.fields, self.coupling)
            .with_magnetic_coupling(self.magnetic_coupling)
    }

    /// Energy breakdown of the real coordinates.
    pub fn energy(&self) -> EnergyTerm {
        let view = self.state.view_with(self.state.real());
        self.hamiltonian().energy_terms(view)
    }

    /// `H` on the selected leaves, or `None` for mirror leaves in NORMAL mode.
    pub fn hamiltonian_at(&self, leaves: Leaves) -> Option<f64> {
        self.hamiltonian().hamiltonian(&self.state, leaves)
    }

    fn is_finite(&self) -> bool {
        let finite = |v: &Vec2| v.x.is_finite() && v.y.is_finite();
        self.state.positions().iter().all(finite) && self.state.momenta().iter().all(finite)
    }

    pub fn state(&self) -> &PhaseSpace {
        &self.state
    }

    pub fn fields(&self) -> &[FieldObject] {
        &self.fields
    }

    pub fn integrator(&self) -> IntegratorKind {
        self.integrator
    }

    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn magnetic_coupling(&self) -> Option<f64> {
        self.magnetic_coupling
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn x(&self) -> Vec<f64> {
        self.state.x()
    }

    pub fn y(&self) -> Vec<f64> {
        self.state.y()
    }

    pub fn positions(&self) -> &[Vec2] {
        self.state.positions()
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.state.total_momentum()
    }

    pub fn mirror_separation(&self) -> Option<(f64, f64)> {
        self.state.mirror_separation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::frame::Square;
    use crate::core::fields::ring::Ring;

    fn config(integrator: IntegratorKind, magnetic: Option<f64>) -> SystemConfig {
        SystemConfig::builder()
            .integrator(integrator)
            .coupling(1.0)
            .magnetic_coupling(magnetic)
            .build()
            .unwrap()
    }

    fn triangle() -> PhaseSpace {
        PhaseSpace::new(
            vec![0.0, -0.3, 0.3],
            vec![0.7, -0.3, -0.3],
            None,
            None,
            1.0,
            1.0,
        )
        .unwrap()
    }

    fn boxed_triangle(integrator: IntegratorKind, magnetic: Option<f64>) -> BilliardSystem {
        let mut system = BilliardSystem::new(triangle(), config(integrator, magnetic));
        system.add_field_object(Square::new(2.0, 10.0)).unwrap();
        system
    }

    #[test]
    fn square_frame_confines_particles_and_conserves_energy() {
        let mut system = boxed_triangle(IntegratorKind::SymplecticVerlet, None);
        let e0 = system.energy().total();
        // The walls of a density-10 square are too stiff for dt = 0.1: particles overshoot
        // the boundary and get ejected (|q| grows past 100). dt <= 0.05 stays confined.
        for _ in 0..100 {
            system.step(0.01).unwrap();
            for q in system.positions() {
                assert!(q.x.is_finite() && q.y.is_finite());
                assert!(q.x.abs() < 1.2 && q.y.abs() < 1.2);
            }
        }
        let e1 = system.energy().total();
        assert!(((e1 - e0) / e0).abs() < 1e-2);
    }

    #[test]
    fn clock_advances_with_each_step() {
        let mut system = boxed_triangle(IntegratorKind::SymplecticVerlet, None);
        for _ in 0..3 {
            system.step(0.01).unwrap();
        }
        assert_eq!(system.steps(), 3);
        assert!((system.time() - 0.03).abs() < 1e-15);
    }

    #[test]
    fn unknown_integrator_is_rejected_and_keeps_the_current_one() {
        let mut system = boxed_triangle(IntegratorKind::SymplecticVerlet, None);
        let err = system.set_integrator("unknown").unwrap_err();
        assert_eq!(err, ConfigError::UnknownIntegrator("unknown".to_string()));
        assert_eq!(system.integrator(), IntegratorKind::SymplecticVerlet);
    }

    #[test]
    fn symplectic_euler_with_magnetic_coupling_fails_on_step() {
        let mut system = boxed_triangle(IntegratorKind::SymplecticEuler, Some(0.01));
        let before = system.state().clone();
        let err = system.step(0.01).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::NonSeparableCoupling { .. })
        ));
        assert_eq!(system.state(), &before);
        assert_eq!(system.steps(), 0);
    }

    #[test]
    fn invalid_time_steps_are_rejected() {
        let mut system = boxed_triangle(IntegratorKind::Euler, None);
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                system.step(dt),
                Err(EngineError::InvalidTimeStep(_))
            ));
        }
        assert_eq!(system.time(), 0.0);
    }

    #[test]
    fn selecting_tao_allocates_the_mirror_and_leaving_releases_it() {
        let mut system = boxed_triangle(IntegratorKind::SymplecticVerlet, None);
        system.step(0.01).unwrap();
        assert_eq!(system.mode(), PhaseMode::Normal);
        assert_eq!(system.hamiltonian_at(Leaves::select(true, true)), None);

        system.set_integrator("tao320").unwrap();
        assert_eq!(system.mode(), PhaseMode::Extended);
        assert_eq!(system.state().mirror(), Some(system.state().real()));
        assert_eq!(
            system.hamiltonian_at(Leaves::select(true, true)),
            system.hamiltonian_at(Leaves::REAL)
        );

        system.set_integrator("symplectic-verlet").unwrap();
        assert_eq!(system.mode(), PhaseMode::Normal);
        assert!(system.mirror_separation().is_none());
    }

    #[test]
    fn constructing_with_tao_starts_extended() {
        let tao = IntegratorKind::Tao { omega: 20.0 };
        let system = BilliardSystem::new(triangle(), config(tao, None));
        assert_eq!(system.mode(), PhaseMode::Extended);
    }

    #[test]
    fn tao_run_with_magnetic_coupling_keeps_copies_close() {
        let mut system = boxed_triangle(IntegratorKind::Euler, Some(0.01));
        system.set_integrator("tao320").unwrap();
        for _ in 0..300 {
            system.step(0.001).unwrap();
            let (dq, dp) = system.mirror_separation().unwrap();
            assert!(dq < 1e-2 && dp < 1e-2);
        }
        assert_ne!(system.energy().magnetic, 0.0);
    }

    #[test]
    fn isolated_system_conserves_momentum_for_every_preset() {
        for (name, _) in registry::presets() {
            let state = PhaseSpace::new(
                vec![0.0, 0.4, -0.5],
                vec![0.0, 0.3, 0.2],
                Some(vec![0.2, -0.1, 0.0]),
                Some(vec![0.0, 0.1, -0.3]),
                1.0,
                1.0,
            )
            .unwrap();
            let mut system = BilliardSystem::new(state, config(IntegratorKind::Euler, None));
            system.set_integrator(name).unwrap();
            let p0 = system.total_momentum();
            for _ in 0..25 {
                system.step(0.005).unwrap();
            }
            assert!((system.total_momentum() - p0).norm() < 1e-10, "{name}");
        }
    }

    #[test]
    fn invalid_field_objects_are_configuration_errors() {
        let mut system = boxed_triangle(IntegratorKind::Euler, None);
        let err = system.add_field_object(Ring::new(-1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFieldObject { kind: "ring", .. }
        ));
        assert_eq!(system.fields().len(), 1);

        system.add_field_object(Ring::new(1.5, 1.0)).unwrap();
        assert_eq!(system.fields().len(), 2);
    }

    #[test]
    fn coincident_particles_propagate_non_finite_values() {
        let state =
            PhaseSpace::new(vec![0.0, 0.0], vec![0.0, 0.0], None, None, 1.0, 1.0).unwrap();
        let mut system = BilliardSystem::new(state, config(IntegratorKind::Euler, None));
        system.step(0.01).unwrap();
        assert!(system.state().px().iter().all(|v| v.is_nan()));
    }
}
