//! Property-based checks for the pure resize primitives.
//!
//! 1. **Clamp idempotence**: without an aspect ratio, applying constraints
//!    twice gives exactly the same pair as applying them once.
//! 2. **Ratio idempotence**: with an aspect ratio and bounds on one axis,
//!    a second application moves the result by at most rounding error.
//! 3. **Ratio preserved**: with no bounds, the result always has the
//!    requested ratio.
//! 4. **Snap never moves further than threshold**: a snapped value is
//!    within `threshold` of the input, or equal to it.
//! 5. **Preset convergence**: every preset settles from any reasonable
//!    displacement at a 16ms step.

use proptest::prelude::*;
use springsize_core::{Constraints, DimensionState, SizeBound, SpringPreset, snap};

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

fn ordered_pair() -> impl Strategy<Value = (f64, f64)> {
    (1.0f64..2000.0, 0.0f64..2000.0).prop_map(|(lo, span)| (lo, lo + span))
}

fn preset() -> impl Strategy<Value = SpringPreset> {
    prop_oneof![
        Just(SpringPreset::Gentle),
        Just(SpringPreset::Professional),
        Just(SpringPreset::Snappy),
    ]
}

proptest! {
    #[test]
    fn clamp_only_is_idempotent(
        w in -5000.0f64..5000.0,
        h in -5000.0f64..5000.0,
        (min_w, max_w) in ordered_pair(),
        (min_h, max_h) in ordered_pair(),
    ) {
        let c = Constraints::none()
            .with_min(SizeBound::both(min_w, min_h))
            .with_max(SizeBound::both(max_w, max_h));
        let once = c.apply(w, h);
        let twice = c.apply(once.0, once.1);
        prop_assert_eq!(once, twice);
        prop_assert!(once.0 >= min_w && once.0 <= max_w);
        prop_assert!(once.1 >= min_h && once.1 <= max_h);
    }

    #[test]
    fn ratio_with_width_bounds_is_idempotent(
        w in 1.0f64..5000.0,
        h in 1.0f64..5000.0,
        (min_w, max_w) in ordered_pair(),
        ratio in 0.25f64..4.0,
    ) {
        let c = Constraints::none()
            .with_min(SizeBound::width(min_w))
            .with_max(SizeBound::width(max_w))
            .with_aspect_ratio(ratio);
        let once = c.apply(w, h);
        let twice = c.apply(once.0, once.1);
        prop_assert!(approx_eq(once.0, twice.0), "{:?} vs {:?}", once, twice);
        prop_assert!(approx_eq(once.1, twice.1), "{:?} vs {:?}", once, twice);
        prop_assert!(approx_eq(once.0 / once.1, ratio));
    }

    #[test]
    fn ratio_without_bounds_holds(
        w in 1.0f64..5000.0,
        h in 1.0f64..5000.0,
        ratio in 0.1f64..10.0,
    ) {
        let c = Constraints::none().with_aspect_ratio(ratio);
        let (rw, rh) = c.apply(w, h);
        prop_assert!(approx_eq(rw / rh, ratio));
        // Height drives on ties, so it is untouched.
        prop_assert_eq!(rh, h);
    }

    #[test]
    fn snap_stays_within_threshold(
        value in -10_000.0f64..10_000.0,
        points in prop::collection::vec(-10_000.0f64..10_000.0, 0..8),
        increment in prop::option::of(0.0f64..200.0),
        threshold in 0.0f64..20.0,
    ) {
        let out = snap(value, &points, increment, threshold);
        prop_assert!(out == value || (out - value).abs() <= threshold);
    }

    #[test]
    fn snap_to_reachable_point_is_a_point(
        value in -1000.0f64..1000.0,
        offset in -4.9f64..4.9,
    ) {
        let point = value + offset;
        let out = snap(value, &[point], Some(10.0), 5.0);
        prop_assert_eq!(out, point);
    }

    #[test]
    fn presets_converge_from_displacement(
        preset in preset(),
        start in 0.0f64..2000.0,
        target in 0.0f64..2000.0,
    ) {
        let spring = preset.config();
        let mut state = DimensionState { current: start, velocity: 0.0, target };
        for _ in 0..400 {
            spring.step(&mut state, 0.016);
        }
        prop_assert!(state.is_at_rest(), "{:?} -> {:?}", preset, state);
    }
}
