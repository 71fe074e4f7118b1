use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileIntegratorConfig, FileParticlesConfig};
use super::models::AppConfig;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use fieldbilliard::core::fields::FieldObject;
use fieldbilliard::core::models::phase_space::PhaseSpace;
use fieldbilliard::engine::config as core_config;
use fieldbilliard::engine::error::EngineError;
use fieldbilliard::engine::integrators::IntegratorKind;
use fieldbilliard::engine::registry;
use std::str::FromStr;

pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::from_file(&args.config)?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let particles = file_config.particles.take().ok_or_else(|| {
        CliError::Config("The `[particles]` table with `x` and `y` is required.".to_string())
    })?;
    let state = build_state(particles, &defaults)?;

    let integrator = resolve_integrator(
        args.integrator.as_deref(),
        file_config.integrator.take().unwrap_or_default(),
        &defaults,
    )?;

    let interaction = file_config.interaction.take().unwrap_or_default();
    let system = core_config::SystemConfig::builder()
        .integrator(integrator)
        .coupling(interaction.coupling.unwrap_or(defaults.coupling))
        .magnetic_coupling(interaction.magnetic_coupling)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let run_file = file_config.run.take().unwrap_or_default();
    let run = core_config::RunConfig::builder()
        .dt(args.dt.or(run_file.dt).unwrap_or(defaults.dt))
        .steps(args.steps.or(run_file.steps).unwrap_or(defaults.steps))
        .record_every(
            args.record_every
                .or(run_file.record_every)
                .unwrap_or(defaults.record_every),
        )
        .memory(args.memory.or(run_file.memory).unwrap_or(defaults.memory))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let field_objects = file_config
        .field_objects
        .into_iter()
        .map(FieldObject::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        state,
        system,
        field_objects,
        run,
        trajectory_path: args.output.clone(),
        energy_path: args.energy_output.clone(),
    })
}

fn build_state(particles: FileParticlesConfig, defaults: &DefaultsConfig) -> Result<PhaseSpace> {
    let n = particles.x.len();
    let state = PhaseSpace::new(
        particles.x,
        particles.y,
        particles.px,
        particles.py,
        defaults.mass,
        defaults.charge,
    )
    .map_err(EngineError::from)?;

    let state = match particles.mass {
        Some(mass) => state.with_masses(mass.expand(n)),
        None => Ok(state),
    }
    .map_err(EngineError::from)?;
    let state = match particles.charge {
        Some(charge) => state.with_charges(charge.expand(n)),
        None => Ok(state),
    }
    .map_err(EngineError::from)?;
    Ok(state)
}

/// The command-line name wins over the file name. A stiffness from the file turns the selection
/// into a custom extended-phase-space integrator and is only valid for that family.
fn resolve_integrator(
    cli_name: Option<&str>,
    file: FileIntegratorConfig,
    defaults: &DefaultsConfig,
) -> Result<IntegratorKind> {
    let name = cli_name
        .or(file.name.as_deref())
        .unwrap_or(defaults.integrator.as_str());
    let kind = registry::resolve(name).map_err(|e| CliError::Config(e.to_string()))?;

    match (kind, file.omega) {
        (_, None) => Ok(kind),
        (IntegratorKind::Tao { .. }, Some(omega)) => Ok(IntegratorKind::Tao { omega }),
        (other, Some(_)) => Err(CliError::Config(format!(
            "`integrator.omega` only applies to tao integrators, not '{}'",
            other.name()
        ))),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "interaction.coupling" => {
                config
                    .interaction
                    .get_or_insert_with(Default::default)
                    .coupling = Some(parse_value(key, value_str, "float")?);
            }
            "interaction.magnetic-coupling" => {
                config
                    .interaction
                    .get_or_insert_with(Default::default)
                    .magnetic_coupling = Some(parse_value(key, value_str, "float")?);
            }
            "integrator.name" => {
                config.integrator.get_or_insert_with(Default::default).name =
                    Some(value_str.to_string());
            }
            "integrator.omega" => {
                config.integrator.get_or_insert_with(Default::default).omega =
                    Some(parse_value(key, value_str, "float")?);
            }
            "run.dt" => {
                config.run.get_or_insert_with(Default::default).dt =
                    Some(parse_value(key, value_str, "float")?);
            }
            "run.steps" => {
                config.run.get_or_insert_with(Default::default).steps =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.record-every" => {
                config.run.get_or_insert_with(Default::default).record_every =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "run.memory" => {
                config.run.get_or_insert_with(Default::default).memory =
                    Some(parse_value(key, value_str, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
