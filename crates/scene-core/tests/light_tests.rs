use glam::Vec3;
use scene_core::{
    scene_center_vec3, LightRig, SceneState, LIGHT_BASE_FREQUENCY, LIGHT_BOB_AMPLITUDE,
    LIGHT_COUNT, LIGHT_HEIGHT, LIGHT_ORBIT_AMPLITUDE, LIGHT_TIME_SCALE,
};
use std::f32::consts::FRAC_PI_2;

const EPS: f32 = 1e-5;

fn assert_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < EPS, "{a:?} != {b:?}");
}

#[test]
fn offset_matches_closed_form_for_first_light() {
    for elapsed in [0.0f32, 1.0, 13.7, 120.0] {
        let tau = elapsed * LIGHT_TIME_SCALE;
        let expected = Vec3::new(
            LIGHT_ORBIT_AMPLITUDE * (LIGHT_BASE_FREQUENCY * tau).sin(),
            LIGHT_HEIGHT + LIGHT_BOB_AMPLITUDE * (LIGHT_BASE_FREQUENCY * tau).sin(),
            LIGHT_ORBIT_AMPLITUDE * (LIGHT_BASE_FREQUENCY * tau).cos(),
        );
        assert_close(LightRig::orbit_offset(0, elapsed), expected);
    }
}

#[test]
fn lights_are_a_quarter_turn_apart() {
    let elapsed = 42.0f32;
    let tau = elapsed * LIGHT_TIME_SCALE;
    for i in 0..LIGHT_COUNT {
        let offset = LightRig::orbit_offset(i, elapsed);
        let phase = LIGHT_BASE_FREQUENCY * tau + i as f32 * FRAC_PI_2;
        assert!((offset.x - LIGHT_ORBIT_AMPLITUDE * phase.sin()).abs() < EPS);
        assert!((offset.z - LIGHT_ORBIT_AMPLITUDE * phase.cos()).abs() < EPS);
    }
}

#[test]
fn bob_height_is_shared_across_lights() {
    let elapsed = 7.3f32;
    let y0 = LightRig::orbit_offset(0, elapsed).y;
    for i in 1..LIGHT_COUNT {
        assert!((LightRig::orbit_offset(i, elapsed).y - y0).abs() < EPS);
    }
}

#[test]
fn offsets_stay_on_the_orbit_radius() {
    for i in 0..LIGHT_COUNT {
        for step in 0..100 {
            let offset = LightRig::orbit_offset(i, step as f32 * 0.37);
            let radial = (offset.x * offset.x + offset.z * offset.z).sqrt();
            assert!((radial - LIGHT_ORBIT_AMPLITUDE).abs() < 1e-4);
            assert!(offset.y >= LIGHT_HEIGHT - LIGHT_BOB_AMPLITUDE - EPS);
            assert!(offset.y <= LIGHT_HEIGHT + LIGHT_BOB_AMPLITUDE + EPS);
        }
    }
}

#[test]
fn update_positions_lights_around_the_anchor() {
    let mut rig = LightRig::new();
    let anchor = Vec3::new(2.0, -1.0, 1.0);
    rig.update(anchor, 5.0);
    for (i, pos) in rig.positions().iter().enumerate() {
        assert_close(*pos, anchor + LightRig::orbit_offset(i, 5.0));
    }
}

#[test]
fn scene_frame_skips_lights_until_boat_loads() {
    let mut scene = SceneState::new();
    let before = *scene.lights.positions();
    scene.frame(3.0);
    assert_eq!(*scene.lights.positions(), before);

    scene.set_boat_loaded();
    assert_eq!(scene.boat_anchor, Some(scene_center_vec3()));
    scene.frame(3.0);
    assert_ne!(*scene.lights.positions(), before);
}
