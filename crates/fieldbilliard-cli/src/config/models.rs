use fieldbilliard::core::fields::FieldObject;
use fieldbilliard::core::models::phase_space::PhaseSpace;
use fieldbilliard::engine::config as core_config;
use std::path::PathBuf;

pub struct AppConfig {
    pub state: PhaseSpace,
    pub system: core_config::SystemConfig,
    pub field_objects: Vec<FieldObject>,
    pub run: core_config::RunConfig,
    pub trajectory_path: PathBuf,
    pub energy_path: Option<PathBuf>,
}
