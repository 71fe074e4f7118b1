use fieldbilliard::engine::config::{DEFAULT_COUPLING, DEFAULT_MEMORY, DEFAULT_RECORD_EVERY};

pub struct DefaultsConfig {
    pub integrator: String,
    pub coupling: f64,
    pub mass: f64,
    pub charge: f64,
    pub dt: f64,
    pub steps: usize,
    pub record_every: usize,
    pub memory: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            integrator: "symplectic-verlet".to_string(),
            coupling: DEFAULT_COUPLING,
            mass: 1.0,
            charge: 1.0,
            dt: 0.01,
            steps: 1000,
            record_every: DEFAULT_RECORD_EVERY,
            memory: DEFAULT_MEMORY,
        }
    }
}
