use crate::error::{CliError, Result};
use fieldbilliard::core::fields::frame::{Hash, Square};
use fieldbilliard::core::fields::line::{InfiniteLine, LineSegment};
use fieldbilliard::core::fields::point_charges::PointCharges;
use fieldbilliard::core::fields::ring::Ring;
use fieldbilliard::core::fields::{FieldObject, FieldObjectError};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// A value given once for every particle, or one entry per particle.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PerParticle {
    Uniform(f64),
    Each(Vec<f64>),
}

impl PerParticle {
    pub fn expand(&self, n: usize) -> Vec<f64> {
        match self {
            PerParticle::Uniform(v) => vec![*v; n],
            PerParticle::Each(values) => values.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileParticlesConfig {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub px: Option<Vec<f64>>,
    pub py: Option<Vec<f64>>,
    pub mass: Option<PerParticle>,
    pub charge: Option<PerParticle>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileInteractionConfig {
    pub coupling: Option<f64>,
    pub magnetic_coupling: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileIntegratorConfig {
    pub name: Option<String>,
    /// Custom stiffness for the extended-phase-space integrator.
    pub omega: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRunConfig {
    pub dt: Option<f64>,
    pub steps: Option<usize>,
    pub record_every: Option<usize>,
    pub memory: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "kebab-case",
    deny_unknown_fields
)]
pub enum FileFieldObject {
    Ring {
        radius: f64,
        charge_density: f64,
        center: Option<[f64; 2]>,
        quadrature_points: Option<usize>,
    },
    HorizontalLine {
        y0: f64,
        charge_density: f64,
    },
    VerticalLine {
        x0: f64,
        charge_density: f64,
    },
    HorizontalSegment {
        y0: f64,
        length: f64,
        x0: f64,
        charge_density: f64,
    },
    VerticalSegment {
        x0: f64,
        length: f64,
        y0: f64,
        charge_density: f64,
    },
    Hash {
        length: f64,
        charge_density: f64,
        center: Option<[f64; 2]>,
    },
    Square {
        length: f64,
        charge_density: f64,
        center: Option<[f64; 2]>,
    },
    PointCharges {
        x: Vec<f64>,
        y: Vec<f64>,
        charge: PerParticle,
    },
}

impl TryFrom<FileFieldObject> for FieldObject {
    type Error = FieldObjectError;

    fn try_from(p: FileFieldObject) -> std::result::Result<Self, Self::Error> {
        let object = match p {
            FileFieldObject::Ring {
                radius,
                charge_density,
                center,
                quadrature_points,
            } => {
                let [x0, y0] = center.unwrap_or_default();
                let mut ring = Ring::new(radius, charge_density).centered_at(x0, y0);
                if let Some(n) = quadrature_points {
                    ring = ring.with_quadrature_points(n);
                }
                ring.into()
            }
            FileFieldObject::HorizontalLine { y0, charge_density } => {
                InfiniteLine::horizontal(y0, charge_density).into()
            }
            FileFieldObject::VerticalLine { x0, charge_density } => {
                InfiniteLine::vertical(x0, charge_density).into()
            }
            FileFieldObject::HorizontalSegment {
                y0,
                length,
                x0,
                charge_density,
            } => LineSegment::horizontal(y0, length, x0, charge_density).into(),
            FileFieldObject::VerticalSegment {
                x0,
                length,
                y0,
                charge_density,
            } => LineSegment::vertical(x0, length, y0, charge_density).into(),
            FileFieldObject::Hash {
                length,
                charge_density,
                center,
            } => {
                let [x0, y0] = center.unwrap_or_default();
                Hash::new(length, charge_density).centered_at(x0, y0).into()
            }
            FileFieldObject::Square {
                length,
                charge_density,
                center,
            } => {
                let [x0, y0] = center.unwrap_or_default();
                Square::new(length, charge_density)
                    .centered_at(x0, y0)
                    .into()
            }
            FileFieldObject::PointCharges { x, y, charge } => {
                PointCharges::new(&x, &y, &charge.expand(x.len()))?.into()
            }
        };
        Ok(object)
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub particles: Option<FileParticlesConfig>,
    pub interaction: Option<FileInteractionConfig>,
    pub integrator: Option<FileIntegratorConfig>,
    pub run: Option<FileRunConfig>,
    #[serde(default)]
    pub field_objects: Vec<FileFieldObject>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading scenario from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| CliError::FileParsing {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
