//! Damped orbit camera around a fixed target.
//!
//! Rotation input accumulates into an angular velocity that decays by the
//! damping factor each frame, so the view keeps gliding briefly after the
//! pointer stops. The pitch clamp keeps the eye above the water plane.

use crate::constants::{
    CAMERA_DAMPING, CAMERA_EYE, CAMERA_FAR, CAMERA_FOVY, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE,
    CAMERA_NEAR,
};
use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

const PITCH_MAX: f32 = FRAC_PI_2 - 0.01;

#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::from_eye(Vec3::from(CAMERA_EYE), Vec3::ZERO)
    }

    pub fn from_eye(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(1e-4);
        let pitch = (offset.y / distance).asin().clamp(0.0, PITCH_MAX);
        let yaw = offset.x.atan2(offset.z);
        Self {
            target,
            distance,
            yaw,
            pitch,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Feed rotation input (radians). Applied gradually via `update`.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw_velocity += delta_yaw;
        self.pitch_velocity += delta_pitch;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance =
            (self.distance * (1.0 + delta * 0.1)).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Advance damping state; call once per frame.
    pub fn update(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(0.0, PITCH_MAX);
        let keep = 1.0 - CAMERA_DAMPING;
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(CAMERA_FOVY, aspect.max(1e-4), CAMERA_NEAR, CAMERA_FAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn rotational_speed(&self) -> f32 {
        (self.yaw_velocity * self.yaw_velocity + self.pitch_velocity * self.pitch_velocity).sqrt()
    }
}
