use super::integrators::IntegratorKind;
use crate::core::fields::FieldObjectError;
use thiserror::Error;

pub const DEFAULT_COUPLING: f64 = 1.0;
pub const DEFAULT_RECORD_EVERY: usize = 1;
pub const DEFAULT_MEMORY: usize = 50;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Unknown integrator: '{0}'")]
    UnknownIntegrator(String),

    #[error("Integrator '{integrator}' is only valid without a magnetic coupling")]
    NonSeparableCoupling { integrator: &'static str },

    #[error("Invalid {kind}: {reason}")]
    InvalidFieldObject { kind: &'static str, reason: String },

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

impl From<FieldObjectError> for ConfigError {
    fn from(e: FieldObjectError) -> Self {
        ConfigError::InvalidFieldObject {
            kind: e.kind,
            reason: e.reason,
        }
    }
}

/// Physical parameters and integrator of a [`BilliardSystem`](super::system::BilliardSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub integrator: IntegratorKind,
    pub coupling: f64,
    /// Strength of the momentum-dependent interaction; `None` keeps the Hamiltonian separable.
    pub magnetic_coupling: Option<f64>,
}

impl SystemConfig {
    pub fn builder() -> SystemConfigBuilder {
        SystemConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct SystemConfigBuilder {
    integrator: Option<IntegratorKind>,
    coupling: Option<f64>,
    magnetic_coupling: Option<f64>,
}

impl SystemConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = Some(integrator);
        self
    }
    pub fn coupling(mut self, coupling: f64) -> Self {
        self.coupling = Some(coupling);
        self
    }
    pub fn magnetic_coupling(mut self, magnetic_coupling: Option<f64>) -> Self {
        self.magnetic_coupling = magnetic_coupling;
        self
    }

    pub fn build(self) -> Result<SystemConfig, ConfigError> {
        let integrator = self
            .integrator
            .ok_or(ConfigError::MissingParameter("integrator"))?;
        integrator.validate()?;

        let coupling = self.coupling.unwrap_or(DEFAULT_COUPLING);
        if !coupling.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "coupling",
                value: coupling,
            });
        }
        if let Some(value) = self.magnetic_coupling {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name: "magnetic_coupling",
                    value,
                });
            }
        }

        Ok(SystemConfig {
            integrator,
            coupling,
            magnetic_coupling: self.magnetic_coupling,
        })
    }
}

/// Pacing and recording of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub dt: f64,
    pub steps: usize,
    /// A frame is recorded every `record_every` steps, plus the initial frame.
    pub record_every: usize,
    /// Maximum number of frames kept; older frames are dropped first.
    pub memory: usize,
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::new()
    }

    /// Checks the invariants the builder enforces; used on configs assembled by hand.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "dt",
                value: self.dt,
            });
        }
        if self.record_every == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "record_every",
                value: 0.0,
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RunConfigBuilder {
    dt: Option<f64>,
    steps: Option<usize>,
    record_every: Option<usize>,
    memory: Option<usize>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = Some(steps);
        self
    }
    pub fn record_every(mut self, record_every: usize) -> Self {
        self.record_every = Some(record_every);
        self
    }
    pub fn memory(mut self, memory: usize) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let config = RunConfig {
            dt: self.dt.ok_or(ConfigError::MissingParameter("dt"))?,
            steps: self.steps.ok_or(ConfigError::MissingParameter("steps"))?,
            record_every: self.record_every.unwrap_or(DEFAULT_RECORD_EVERY),
            memory: self.memory.unwrap_or(DEFAULT_MEMORY),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_config_requires_an_integrator() {
        let result = SystemConfig::builder().coupling(2.0).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("integrator")));
    }

    #[test]
    fn system_config_defaults_coupling_and_keeps_separable() {
        let config = SystemConfig::builder()
            .integrator(IntegratorKind::SymplecticVerlet)
            .build()
            .unwrap();
        assert_eq!(config.coupling, DEFAULT_COUPLING);
        assert_eq!(config.magnetic_coupling, None);
    }

    #[test]
    fn system_config_rejects_negative_magnetic_coupling() {
        let result = SystemConfig::builder()
            .integrator(IntegratorKind::Tao { omega: 20.0 })
            .magnetic_coupling(Some(-0.1))
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "magnetic_coupling",
                ..
            })
        ));
    }

    #[test]
    fn system_config_rejects_invalid_tao_stiffness() {
        let result = SystemConfig::builder()
            .integrator(IntegratorKind::Tao { omega: 0.0 })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "omega", .. })
        ));
    }

    #[test]
    fn run_config_validates_time_step_and_stride() {
        assert_eq!(
            RunConfig::builder().steps(10).build(),
            Err(ConfigError::MissingParameter("dt"))
        );
        assert!(RunConfig::builder().dt(-0.1).steps(10).build().is_err());
        assert!(
            RunConfig::builder()
                .dt(0.1)
                .steps(10)
                .record_every(0)
                .build()
                .is_err()
        );

        let config = RunConfig::builder().dt(0.01).steps(5).build().unwrap();
        assert_eq!(config.record_every, DEFAULT_RECORD_EVERY);
        assert_eq!(config.memory, DEFAULT_MEMORY);
    }

    #[test]
    fn field_object_errors_convert_to_config_errors() {
        let err: ConfigError = FieldObjectError::new("ring", "radius must be positive").into();
        assert_eq!(
            err,
            ConfigError::InvalidFieldObject {
                kind: "ring",
                reason: "radius must be positive".to_string()
            }
        );
    }
}
