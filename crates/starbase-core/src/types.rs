//! Fundamental geometric and time types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of the given half-extent centred on `center`.
    pub fn centered(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Simulation clock.
///
/// Time is measured in frame adjustments: one nominal frame advances
/// `elapsed` by 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed ticks.
    pub tick: u64,
    /// Sum of all frame adjustments.
    pub elapsed: f32,
}

impl SimTime {
    /// Advance by one tick of the given adjustment.
    pub fn advance(&mut self, adjustment: f32) {
        self.tick += 1;
        self.elapsed += adjustment;
    }
}

/// Frame adjustment for a wall-clock frame duration: 1.0 at the nominal frame rate.
pub fn frame_adjustment(elapsed_ms: f32) -> f32 {
    elapsed_ms * crate::constants::NOMINAL_FRAME_RATE / 1000.0
}
