use glam::Vec3;
use scene_core::{OrbitCamera, CAMERA_EYE, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE};
use std::f32::consts::FRAC_PI_2;

#[test]
fn new_camera_reconstructs_the_default_eye() {
    let camera = OrbitCamera::new();
    let eye = camera.eye();
    assert!((eye - Vec3::from(CAMERA_EYE)).length() < 1e-4, "eye {eye:?}");
    assert_eq!(camera.target, Vec3::ZERO);
}

#[test]
fn from_eye_round_trips_arbitrary_positions() {
    for raw in [
        Vec3::new(3.0, 2.0, 1.0),
        Vec3::new(-4.0, 0.5, 2.0),
        Vec3::new(0.1, 1.0, -0.1),
    ] {
        let camera = OrbitCamera::from_eye(raw, Vec3::ZERO);
        assert!(
            (camera.eye() - raw).length() < 1e-4,
            "round trip failed for {raw:?}: got {:?}",
            camera.eye()
        );
    }
}

#[test]
fn rotation_velocity_decays_to_rest() {
    let mut camera = OrbitCamera::new();
    camera.rotate(0.5, 0.0);
    let mut prev = camera.rotational_speed();
    assert!(prev > 0.0);
    for _ in 0..60 {
        camera.update();
        let speed = camera.rotational_speed();
        assert!(speed < prev || speed == 0.0);
        prev = speed;
    }
    assert!(prev < 1e-6, "camera still moving after 60 frames: {prev}");
}

#[test]
fn yaw_keeps_gliding_after_a_single_input() {
    let mut camera = OrbitCamera::new();
    let yaw0 = camera.yaw();
    camera.rotate(0.1, 0.0);
    camera.update();
    let yaw1 = camera.yaw();
    camera.update();
    let yaw2 = camera.yaw();
    assert!(yaw1 > yaw0);
    // Second frame still moves, but by less
    assert!(yaw2 > yaw1);
    assert!(yaw2 - yaw1 < yaw1 - yaw0);
}

#[test]
fn pitch_never_leaves_its_clamp_range() {
    let mut camera = OrbitCamera::new();
    for _ in 0..100 {
        camera.rotate(0.0, 1.0);
        camera.update();
        assert!(camera.pitch() < FRAC_PI_2);
    }
    for _ in 0..100 {
        camera.rotate(0.0, -1.0);
        camera.update();
        assert!(camera.pitch() >= 0.0);
    }
}

#[test]
fn zoom_clamps_distance() {
    let mut camera = OrbitCamera::new();
    for _ in 0..200 {
        camera.zoom(-5.0);
    }
    assert_eq!(camera.distance(), CAMERA_MIN_DISTANCE);
    for _ in 0..200 {
        camera.zoom(5.0);
    }
    assert_eq!(camera.distance(), CAMERA_MAX_DISTANCE);
}

#[test]
fn zoom_preserves_viewing_direction() {
    let mut camera = OrbitCamera::new();
    let dir_before = (camera.eye() - camera.target).normalize();
    camera.zoom(0.5);
    let dir_after = (camera.eye() - camera.target).normalize();
    assert!((dir_before - dir_after).length() < 1e-5);
}

#[test]
fn view_matrix_maps_target_onto_the_view_axis() {
    let camera = OrbitCamera::new();
    let view = camera.view_matrix();
    let target_view = view.transform_point3(camera.target);
    // Looking down -Z in view space
    assert!(target_view.x.abs() < 1e-4);
    assert!(target_view.y.abs() < 1e-4);
    assert!(target_view.z < 0.0);
    let eye_view = view.transform_point3(camera.eye());
    assert!(eye_view.length() < 1e-4);
}
