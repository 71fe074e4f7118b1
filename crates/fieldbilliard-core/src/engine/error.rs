use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::phase_space::PhaseSpaceError;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EngineError {
    #[error("Invalid particle state: {0}")]
    PhaseSpace(#[from] PhaseSpaceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("Integrator '{integrator}' needs the mirror phase space, which is not allocated")]
    MissingMirrorState { integrator: &'static str },
}
