use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

// Scene tuning constants shared by the web and native frontends. The ripple
// and light values are cosmetic carry-overs; change them freely, nothing else
// depends on the exact numbers.

// Ripples
pub const MAX_RIPPLES: usize = 5;
pub const RIPPLE_SENTINEL: f32 = -1.0; // marks a slot that never held a ripple
pub const RIPPLE_MIN_DELAY_SEC: f64 = 0.5;
pub const RIPPLE_MAX_DELAY_SEC: f64 = 2.5; // exclusive
pub const RIPPLE_RADIUS_PER_SEC: f32 = 0.02; // ring growth in uv units
pub const RIPPLE_EDGE_THICKNESS: f32 = 0.005;
pub const RIPPLE_FADE_PER_SEC: f32 = 0.2;

// Light rig
pub const LIGHT_COUNT: usize = 4;
pub const LIGHT_TIME_SCALE: f32 = 0.05; // slows the orbit way down
pub const LIGHT_BASE_FREQUENCY: f32 = 7.5;
pub const LIGHT_ORBIT_AMPLITUDE: f32 = 0.75;
pub const LIGHT_HEIGHT: f32 = 0.5;
pub const LIGHT_BOB_AMPLITUDE: f32 = 0.05;
pub const LIGHT_PHASE_STEP: f32 = FRAC_PI_2; // per-index phase offset
pub const LIGHT_COLOR: [f32; 3] = [1.0, 0.875, 0.557]; // warm #ffdf8e
pub const LIGHT_MARKER_SIZE: f32 = 0.04;

// Water plane and boat placement
pub const SCENE_CENTER: [f32; 3] = [2.0, -1.0, 1.0];
pub const WATER_SIZE: f32 = 10.0;
pub const SCENE_TILT_X: f32 = -FRAC_PI_2; // lay the plane flat
pub const SCENE_TILT_Y: f32 = -PI / 16.0;
pub const WATER_COLOR: [f32; 3] = [0.0, 0.5, 1.0];
pub const BOAT_SCALE: f32 = 10.0;
pub const BOAT_SHININESS: f32 = 200.0;
pub const BOAT_SPECULAR: f32 = 0.067; // #111111

// Camera
pub const CAMERA_EYE: [f32; 3] = [2.0, 1.0, -3.0];
pub const CAMERA_FOVY: f32 = 75.0 * PI / 180.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DAMPING: f32 = 0.25; // velocity retained per update is 1 - this
pub const CAMERA_MIN_DISTANCE: f32 = 0.5;
pub const CAMERA_MAX_DISTANCE: f32 = 50.0;

#[inline]
pub fn scene_center_vec3() -> Vec3 {
    Vec3::new(SCENE_CENTER[0], SCENE_CENTER[1], SCENE_CENTER[2])
}
