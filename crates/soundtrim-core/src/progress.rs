// crates/soundtrim-core/src/progress.rs
//
// Clamped linear rescaling for progress display.
//
// Progress is a best-effort display value: a misreported or unknown duration
// must never surface as an error or a NaN on screen, so every degenerate
// case recovers locally by clamping.

/// Linearly remap `value` from `[input_min, input_max]` to
/// `[output_min, output_max]`, clamped to the output range.
///
/// Non-finite results — including the division by zero when
/// `input_max == input_min` — clamp to `output_min`.
///
/// ```
/// use soundtrim_core::progress::map_range;
/// assert_eq!(map_range(250.0, 0.0, 500.0, 0.0, 100.0), 50.0);
/// assert_eq!(map_range(900.0, 0.0, 500.0, 0.0, 100.0), 100.0);
/// assert_eq!(map_range(250.0, 0.0, 0.0, 0.0, 100.0), 0.0);
/// ```
pub fn map_range(
    value:      f64,
    input_min:  f64,
    input_max:  f64,
    output_min: f64,
    output_max: f64,
) -> f64 {
    let result =
        (value - input_min) / (input_max - input_min) * (output_max - output_min) + output_min;

    if !result.is_finite() || result < output_min {
        return output_min;
    }
    if result > output_max {
        return output_max;
    }
    result
}

/// Elapsed transcode time → completion percentage in `[0, 100]`.
///
/// Safe to call with duplicate or out-of-order ticks; each call is
/// independent and the clamp keeps the display in range even when the
/// reported `total` undershoots the real duration.
pub fn progress_percent(elapsed: f64, total: f64) -> f64 {
    map_range(elapsed, 0.0, total, 0.0, 100.0)
}
