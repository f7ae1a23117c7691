//! All cross-frame mutable scene state in one place, owned by the frontend
//! frame loop instead of floating module globals.

use crate::camera::OrbitCamera;
use crate::constants::{scene_center_vec3, BOAT_SCALE, SCENE_TILT_X, SCENE_TILT_Y};
use crate::lights::LightRig;
use crate::ripple::RippleSet;
use glam::{Mat4, Vec3};

pub struct SceneState {
    pub ripples: RippleSet,
    pub lights: LightRig,
    pub camera: OrbitCamera,
    /// Set once the async model load completes; light updates are skipped
    /// until then.
    pub boat_anchor: Option<Vec3>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    pub fn new() -> Self {
        Self {
            ripples: RippleSet::new(),
            lights: LightRig::new(),
            camera: OrbitCamera::new(),
            boat_anchor: None,
        }
    }

    /// Mark the boat as present, parked at the scene center.
    pub fn set_boat_loaded(&mut self) {
        self.boat_anchor = Some(scene_center_vec3());
    }

    /// Per-frame core update: camera damping, then light orbiting when the
    /// boat exists. Ripple spawning is timer-driven and happens elsewhere.
    pub fn frame(&mut self, elapsed_sec: f32) {
        self.camera.update();
        if let Some(anchor) = self.boat_anchor {
            self.lights.update(anchor, elapsed_sec);
        }
    }
}

/// Model matrix for the water plane: centered in the scene, laid flat, with
/// the slight yaw the whole arrangement carries.
pub fn water_model_matrix() -> Mat4 {
    Mat4::from_translation(scene_center_vec3())
        * Mat4::from_rotation_x(SCENE_TILT_X)
        * Mat4::from_rotation_y(SCENE_TILT_Y)
}

/// Model matrix for the boat: same placement and tilt as the plane, scaled
/// up from the tiny source asset.
pub fn boat_model_matrix() -> Mat4 {
    Mat4::from_translation(scene_center_vec3())
        * Mat4::from_rotation_x(SCENE_TILT_X)
        * Mat4::from_rotation_y(SCENE_TILT_Y)
        * Mat4::from_scale(Vec3::splat(BOAT_SCALE))
}
