use crate::cli::RunArgs;
use crate::config::{AppConfig, build_config};
use crate::error::Result;
use crate::utils::output;
use crate::utils::progress::CliProgressHandler;
use fieldbilliard::engine::error::EngineError;
use fieldbilliard::engine::progress::ProgressReporter;
use fieldbilliard::engine::system::BilliardSystem;
use fieldbilliard::workflows::simulate::{self, SimulationReport};
use tracing::{info, warn};

pub fn run(args: RunArgs) -> Result<()> {
    info!("Loading scenario from {:?}", &args.config);
    let app = build_config(&args)?;

    let progress_handler = (!args.no_progress).then(CliProgressHandler::new);
    let reporter = match &progress_handler {
        Some(handler) => ProgressReporter::with_callback(handler.get_callback()),
        None => ProgressReporter::new(),
    };

    println!("Starting simulation...");
    let report = simulate_scenario(&app, &reporter)?;

    output::write_trajectory(&app.trajectory_path, &report.trajectory)?;
    println!(
        "Trajectory ({} frame(s)) written to: {}",
        report.trajectory.len(),
        app.trajectory_path.display()
    );
    if let Some(path) = &app.energy_path {
        output::write_energies(path, &report.energies)?;
        println!("Energy samples written to: {}", path.display());
    }

    match report.relative_energy_drift() {
        Some(drift) if drift.is_finite() => {
            println!(
                "Finished {} step(s), t = {:.4}, relative energy drift {:+.3e}",
                report.steps, report.time, drift
            );
        }
        _ => {
            warn!("Energy is not finite at the end of the run.");
            println!(
                "Finished {} step(s), t = {:.4}, energy is no longer finite",
                report.steps, report.time
            );
        }
    }
    Ok(())
}

/// Builds the system described by `app` and runs it to completion.
pub fn simulate_scenario(
    app: &AppConfig,
    reporter: &ProgressReporter,
) -> std::result::Result<SimulationReport, EngineError> {
    let mut system = BilliardSystem::new(app.state.clone(), app.system.clone());
    for object in &app.field_objects {
        system.add_field_object(object.clone())?;
    }
    info!(
        particles = app.state.len(),
        field_objects = system.fields().len(),
        "Invoking the simulation workflow..."
    );
    simulate::run(&mut system, &app.run, reporter)
}
