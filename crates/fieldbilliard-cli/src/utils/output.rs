use crate::error::Result;
use fieldbilliard::workflows::trajectory::{EnergySample, Trajectory};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Serialize)]
struct TrajectoryRow {
    frame: u64,
    particle: usize,
    x: f64,
    y: f64,
}

/// Writes one row per particle and kept frame; `frame` is the step the snapshot was taken at.
pub fn write_trajectory(path: &Path, trajectory: &Trajectory) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for frame in trajectory.frames() {
        for (particle, q) in frame.positions.iter().enumerate() {
            writer.serialize(TrajectoryRow {
                frame: frame.step,
                particle,
                x: q.x,
                y: q.y,
            })?;
        }
    }
    writer.flush()?;
    debug!(frames = trajectory.len(), path = %path.display(), "Trajectory written.");
    Ok(())
}

pub fn write_energies(path: &Path, samples: &[EnergySample]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    debug!(samples = samples.len(), path = %path.display(), "Energy samples written.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldbilliard::core::energy::term::EnergyTerm;
    use fieldbilliard::core::models::phase_space::Vec2;
    use fieldbilliard::workflows::trajectory::Frame;
    use tempfile::tempdir;

    #[test]
    fn trajectory_csv_has_one_row_per_particle_and_frame() {
        let mut trajectory = Trajectory::with_capacity(2);
        for step in 0..3u64 {
            trajectory.record(Frame {
                step,
                time: step as f64 * 0.1,
                positions: vec![Vec2::new(step as f64, 0.5), Vec2::new(-1.0, 2.0)],
            });
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("trajectory.csv");
        write_trajectory(&path, &trajectory).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "frame,particle,x,y");
        assert_eq!(lines.len(), 1 + 2 * 2);
        assert_eq!(lines[1], "1,0,1.0,0.5");
        assert_eq!(lines[4], "2,1,-1.0,2.0");
    }

    #[test]
    fn energy_csv_carries_the_breakdown() {
        let samples = vec![
            EnergySample::new(0, 0.0, EnergyTerm::new(1.0, 2.0, 0.5, 0.0)),
            EnergySample::new(10, 0.1, EnergyTerm::new(1.5, 1.5, 0.5, 0.0)),
        ];
        let dir = tempdir().unwrap();
        let path = dir.path().join("energy.csv");
        write_energies(&path, &samples).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["step", "time", "kinetic", "internal", "external", "magnetic", "total"]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "10");
        assert_eq!(rows[1][6].parse::<f64>().unwrap(), 3.5);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("trajectory.csv");
        assert!(write_trajectory(&path, &Trajectory::with_capacity(1)).is_err());
    }
}
