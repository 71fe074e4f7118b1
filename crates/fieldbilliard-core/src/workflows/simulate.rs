use super::trajectory::{EnergySample, Frame, Trajectory};
use crate::engine::config::RunConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::system::BilliardSystem;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub trajectory: Trajectory,
    pub energies: Vec<EnergySample>,
    pub steps: u64,
    pub time: f64,
}

impl SimulationReport {
    pub fn initial_energy(&self) -> Option<f64> {
        self.energies.first().map(|s| s.total)
    }

    pub fn final_energy(&self) -> Option<f64> {
        self.energies.last().map(|s| s.total)
    }

    /// `(E_final − E_initial) / |E_initial|` over the recorded samples.
    pub fn relative_energy_drift(&self) -> Option<f64> {
        let (e0, e1) = (self.initial_energy()?, self.final_energy()?);
        Some(relative_change(e0, e1))
    }

    /// Largest relative deviation from the initial energy among the recorded samples.
    pub fn max_relative_energy_drift(&self) -> Option<f64> {
        let e0 = self.initial_energy()?;
        self.energies
            .iter()
            .map(|s| relative_change(e0, s.total).abs())
            .reduce(f64::max)
    }
}

fn relative_change(reference: f64, value: f64) -> f64 {
    if reference == 0.0 {
        value - reference
    } else {
        (value - reference) / reference.abs()
    }
}

/// Steps `system` `config.steps` times, recording the initial state and then every
/// `config.record_every` steps.
///
/// An invalid `config` is rejected before the first step. The first failing step
/// aborts the run; the system keeps the state reached before it.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(
    system: &mut BilliardSystem,
    config: &RunConfig,
    reporter: &ProgressReporter,
) -> Result<SimulationReport, EngineError> {
    config.validate()?;
    info!(
        steps = config.steps,
        dt = config.dt,
        integrator = %system.integrator(),
        "Starting simulation run."
    );

    let mut trajectory = Trajectory::with_capacity(config.memory);
    let mut energies = Vec::with_capacity(config.steps / config.record_every + 1);
    record(system, &mut trajectory, &mut energies, reporter);

    reporter.report(Progress::RunStart {
        total_steps: config.steps as u64,
    });
    for i in 1..=config.steps {
        system.step(config.dt)?;
        reporter.report(Progress::StepIncrement);
        if i % config.record_every == 0 {
            record(system, &mut trajectory, &mut energies, reporter);
        }
    }
    reporter.report(Progress::RunFinish);

    let report = SimulationReport {
        trajectory,
        energies,
        steps: system.steps(),
        time: system.time(),
    };
    info!(
        frames = report.trajectory.len(),
        samples = report.energies.len(),
        drift = ?report.relative_energy_drift(),
        "Simulation run complete."
    );
    Ok(report)
}

fn record(
    system: &BilliardSystem,
    trajectory: &mut Trajectory,
    energies: &mut Vec<EnergySample>,
    reporter: &ProgressReporter,
) {
    let (step, time) = (system.steps(), system.time());
    trajectory.record(Frame {
        step,
        time,
        positions: system.positions().to_vec(),
    });
    let sample = EnergySample::new(step, time, system.energy());
    debug!(step, time, total = sample.total, "Recorded frame.");
    energies.push(sample);
    reporter.report(Progress::FrameRecorded { step, time });
}
