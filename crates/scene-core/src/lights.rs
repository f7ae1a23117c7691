//! Four point lights slowly circling the boat, phase-offset by a quarter
//! turn each, with a gentle shared vertical bob.

use crate::constants::{
    LIGHT_BASE_FREQUENCY, LIGHT_BOB_AMPLITUDE, LIGHT_COUNT, LIGHT_HEIGHT, LIGHT_ORBIT_AMPLITUDE,
    LIGHT_PHASE_STEP, LIGHT_TIME_SCALE,
};
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct LightRig {
    positions: [Vec3; LIGHT_COUNT],
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

impl LightRig {
    pub fn new() -> Self {
        Self {
            positions: [Vec3::ZERO; LIGHT_COUNT],
        }
    }

    /// Offset of light `index` from the anchor at `elapsed_sec` since start.
    pub fn orbit_offset(index: usize, elapsed_sec: f32) -> Vec3 {
        let tau = elapsed_sec * LIGHT_TIME_SCALE;
        let phase = index as f32 * LIGHT_PHASE_STEP;
        Vec3::new(
            LIGHT_ORBIT_AMPLITUDE * (LIGHT_BASE_FREQUENCY * tau + phase).sin(),
            LIGHT_HEIGHT + LIGHT_BOB_AMPLITUDE * (LIGHT_BASE_FREQUENCY * tau).sin(),
            LIGHT_ORBIT_AMPLITUDE * (LIGHT_BASE_FREQUENCY * tau + phase).cos(),
        )
    }

    /// Reposition every light around `anchor`. The caller skips this while
    /// the boat is still loading, which leaves positions untouched.
    pub fn update(&mut self, anchor: Vec3, elapsed_sec: f32) {
        for (i, pos) in self.positions.iter_mut().enumerate() {
            *pos = anchor + Self::orbit_offset(i, elapsed_sec);
        }
    }

    pub fn positions(&self) -> &[Vec3; LIGHT_COUNT] {
        &self.positions
    }
}
