//! Piecewise-linear domain-to-range value mapping.
//!
//! Used to derive the head card's rotation from its horizontal drag offset:
//! the drag domain maps onto an angle range, interpolating linearly between
//! stops and clamping to the endpoint outputs outside the domain.

use crate::Lerp;

/// Maps `value` through the given `(input, output)` stops.
///
/// Stops must be sorted by input and contain at least two entries. Values at
/// or below the first input return the first output; values at or above the
/// last input return the last output; in between, the output is linearly
/// interpolated within the surrounding segment.
pub fn map_range(value: f32, stops: &[(f32, f32)]) -> f32 {
    debug_assert!(stops.len() >= 2, "map_range needs at least two stops");
    debug_assert!(
        stops.windows(2).all(|pair| pair[0].0 <= pair[1].0),
        "map_range stops must be sorted by input"
    );

    let (first_in, first_out) = stops[0];
    if value <= first_in {
        return first_out;
    }
    let (last_in, last_out) = stops[stops.len() - 1];
    if value >= last_in {
        return last_out;
    }

    for pair in stops.windows(2) {
        let (in_a, out_a) = pair[0];
        let (in_b, out_b) = pair[1];
        // Strict comparison so a value sitting exactly on a stop picks the
        // segment that starts there (relevant for duplicated inputs).
        if value < in_b {
            let span = in_b - in_a;
            if span <= f32::EPSILON {
                return out_b;
            }
            let fraction = (value - in_a) / span;
            return out_a.lerp(&out_b, fraction);
        }
    }

    last_out
}
