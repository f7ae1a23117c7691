use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::{
    spawn_interval, RippleSet, MAX_RIPPLES, RIPPLE_MAX_DELAY_SEC, RIPPLE_MIN_DELAY_SEC,
    RIPPLE_SENTINEL,
};

#[test]
fn new_set_is_all_sentinel() {
    let set = RippleSet::new();
    assert_eq!(set.active_count(), 0);
    for t in set.start_times() {
        assert_eq!(*t, RIPPLE_SENTINEL);
    }
}

#[test]
fn first_spawn_fills_first_slot() {
    let mut set = RippleSet::new();
    set.spawn(10.0);
    assert_eq!(set.start_times()[0], 10.0);
    assert_eq!(set.active_count(), 1);
    let sentinels = set
        .start_times()
        .iter()
        .filter(|t| **t == RIPPLE_SENTINEL)
        .count();
    assert_eq!(sentinels, MAX_RIPPLES - 1);
}

#[test]
fn spawns_fill_sentinels_before_recycling() {
    let mut set = RippleSet::new();
    for i in 0..MAX_RIPPLES {
        set.spawn(i as f32);
    }
    assert_eq!(set.active_count(), MAX_RIPPLES);
    // Set is full; the next spawn must overwrite the oldest entry (0.0).
    set.spawn(100.0);
    assert!(!set.start_times().contains(&0.0));
    assert!(set.start_times().contains(&100.0));
    assert!(set.start_times().contains(&1.0));
}

#[test]
fn spawn_always_evicts_the_minimum() {
    let mut set = RippleSet::new();
    let mut clock = 0.0f32;
    for _ in 0..50 {
        clock += 0.7;
        let min_before = set
            .start_times()
            .iter()
            .cloned()
            .fold(f32::INFINITY, f32::min);
        set.spawn(clock);
        assert!(
            !set.start_times().contains(&min_before),
            "minimum {min_before} survived a spawn at {clock}"
        );
    }
    assert_eq!(set.active_count(), MAX_RIPPLES);
}

#[test]
fn equal_timestamps_evict_the_first_slot() {
    let mut set = RippleSet::new();
    for _ in 0..MAX_RIPPLES {
        set.spawn(5.0);
    }
    set.spawn(9.0);
    assert_eq!(set.start_times()[0], 9.0);
    for t in &set.start_times()[1..] {
        assert_eq!(*t, 5.0);
    }
}

#[test]
fn spawn_interval_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let d = spawn_interval(&mut rng).as_secs_f64();
        assert!(
            (RIPPLE_MIN_DELAY_SEC..RIPPLE_MAX_DELAY_SEC).contains(&d),
            "interval {d} out of range"
        );
    }
}
