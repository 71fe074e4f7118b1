use crate::core::energy::term::EnergyTerm;
use crate::core::models::phase_space::Vec2;
use serde::Serialize;
use std::collections::VecDeque;

/// Positions of every particle at one recorded step.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub step: u64,
    pub time: f64,
    pub positions: Vec<Vec2>,
}

/// A bounded memory of frames; once full, recording a frame drops the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    capacity: usize,
    frames: VecDeque<Frame>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            frames: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, frame: Frame) {
        if self.capacity == 0 {
            return;
        }
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn latest(&self) -> Option<&Frame> {
        self.frames.back()
    }

    /// Positions indexed as `[particle][axis][frame]`, oldest frame first.
    pub fn to_tensor(&self) -> Vec<[Vec<f64>; 2]> {
        let particles = self.frames.front().map_or(0, |f| f.positions.len());
        (0..particles)
            .map(|i| {
                let xs = self.frames.iter().map(|f| f.positions[i].x).collect();
                let ys = self.frames.iter().map(|f| f.positions[i].y).collect();
                [xs, ys]
            })
            .collect()
    }
}

/// Energy breakdown at one recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySample {
    pub step: u64,
    pub time: f64,
    pub kinetic: f64,
    pub internal: f64,
    pub external: f64,
    pub magnetic: f64,
    pub total: f64,
}

impl EnergySample {
    pub fn new(step: u64, time: f64, energy: EnergyTerm) -> Self {
        Self {
            step,
            time,
            kinetic: energy.kinetic,
            internal: energy.internal,
            external: energy.external,
            magnetic: energy.magnetic,
            total: energy.total(),
        }
    }
}
