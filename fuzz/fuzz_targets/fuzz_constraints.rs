#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use springsize_core::{Constraints, SizeBound, snap};

#[derive(Debug, Arbitrary)]
struct Input {
    width: f64,
    height: f64,
    min: (Option<f64>, Option<f64>),
    max: (Option<f64>, Option<f64>),
    ratio: Option<f64>,
    points: Vec<f64>,
    increment: Option<f64>,
    threshold: f64,
}

fuzz_target!(|input: Input| {
    let constraints = Constraints {
        min: Some(SizeBound::new(input.min.0, input.min.1)),
        max: Some(SizeBound::new(input.max.0, input.max.1)),
        aspect_ratio: input.ratio,
    };

    // Never panics, whatever the input.
    let (w, h) = constraints.apply(input.width, input.height);
    let _ = snap(input.width, &input.points, input.increment, input.threshold);

    if !constraints.validate().is_empty() || !input.width.is_finite() || !input.height.is_finite()
    {
        return;
    }

    if constraints.aspect_ratio.is_none() {
        // Clamping alone is idempotent.
        assert_eq!(constraints.apply(w, h), (w, h));
        if let Some(min) = constraints.min_width() {
            assert!(w >= min);
        }
        if let Some(max) = constraints.max_height() {
            assert!(h <= max);
        }
    }

    let snapped = snap(input.width, &input.points, input.increment, input.threshold);
    if input.threshold.is_finite() && input.threshold >= 0.0 && snapped.is_finite() {
        assert!(
            snapped == input.width || (snapped - input.width).abs() <= input.threshold,
            "snap moved {} to {} beyond threshold {}",
            input.width,
            snapped,
            input.threshold
        );
    }
});
