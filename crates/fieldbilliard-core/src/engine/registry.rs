use super::config::ConfigError;
use super::integrators::IntegratorKind;
use phf::{Map, phf_map};

static INTEGRATORS: Map<&'static str, IntegratorKind> = phf_map! {
    "euler" => IntegratorKind::Euler,
    "symplectic-euler" => IntegratorKind::SymplecticEuler,
    "symplectic-verlet" => IntegratorKind::SymplecticVerlet,
    "midpoint" => IntegratorKind::Midpoint,
    "runge-kutta" => IntegratorKind::RungeKutta4,
    "tao20" => IntegratorKind::Tao { omega: 20.0 },
    "tao80" => IntegratorKind::Tao { omega: 80.0 },
    "tao320" => IntegratorKind::Tao { omega: 320.0 },
    // Legacy spellings.
    "sympleticeuler" => IntegratorKind::SymplecticEuler,
    "sympleticverlet" => IntegratorKind::SymplecticVerlet,
    "rungekutta" => IntegratorKind::RungeKutta4,
    "rk4" => IntegratorKind::RungeKutta4,
};

/// Preset names in presentation order, without the legacy aliases.
pub const INTEGRATOR_NAMES: [&str; 8] = [
    "euler",
    "symplectic-euler",
    "symplectic-verlet",
    "midpoint",
    "runge-kutta",
    "tao20",
    "tao80",
    "tao320",
];

/// Looks up an integrator preset by name, ignoring case and surrounding whitespace.
pub fn resolve(name: &str) -> Result<IntegratorKind, ConfigError> {
    let key = name.trim().to_ascii_lowercase();
    INTEGRATORS
        .get(key.as_str())
        .copied()
        .ok_or_else(|| ConfigError::UnknownIntegrator(name.to_string()))
}

/// Every preset with its resolved configuration, in [`INTEGRATOR_NAMES`] order.
pub fn presets() -> impl Iterator<Item = (&'static str, IntegratorKind)> {
    INTEGRATOR_NAMES
        .iter()
        .filter_map(|&name| INTEGRATORS.get(name).map(|&kind| (name, kind)))
}

/// Legacy spellings accepted by [`resolve`], sorted by name.
pub fn aliases() -> Vec<(&'static str, IntegratorKind)> {
    let mut aliases: Vec<_> = INTEGRATORS
        .entries()
        .filter(|(name, _)| !INTEGRATOR_NAMES.contains(*name))
        .map(|(&name, &kind)| (name, kind))
        .collect();
    aliases.sort_by_key(|&(name, _)| name);
    aliases
}
