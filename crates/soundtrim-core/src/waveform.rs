// crates/soundtrim-core/src/waveform.rs
//
// RMS loudness readings → bounded display heights.
//
// The input comes straight from the analyzer's log parse: one f32 per
// analysis frame, with NaN (or ±inf — ffmpeg prints "-inf" for digital
// silence) marking a reading that could not be measured. Normalization is
// global: the whole sequence is needed to find the observed min/max, so this
// is a sequence transform, not a per-element map.

/// Map raw RMS readings onto `[min_height, max_height]`.
///
/// - Non-finite readings are excluded from the min/max scan and then
///   rendered at the quietest observed level. A gap drawn as silence reads
///   correctly; a gap drawn as a peak would exaggerate exactly the frames we
///   know nothing about.
/// - A perfectly flat signal (max == min) or an input with no finite reading
///   at all degrades to an all-`min_height` output of the same length.
/// - An empty input yields an empty output; neither case is an error.
///
/// Output length always equals input length; every entry is finite and
/// within `[min_height, max_height]`.
///
/// ```
/// use soundtrim_core::waveform::sample_heights;
/// let h = sample_heights(&[-60.0, f32::NAN, -20.0], 0.0, 30.0);
/// assert_eq!(h, vec![0.0, 0.0, 30.0]);
/// ```
pub fn sample_heights(raw: &[f32], min_height: f32, max_height: f32) -> Vec<f32> {
    let mut min_rms = f32::INFINITY;
    let mut max_rms = f32::NEG_INFINITY;
    for &level in raw.iter().filter(|l| l.is_finite()) {
        min_rms = min_rms.min(level);
        max_rms = max_rms.max(level);
    }

    // No finite reading, or a flat signal: nothing to normalize against.
    if !min_rms.is_finite() || max_rms == min_rms {
        return vec![min_height; raw.len()];
    }

    raw.iter()
        .map(|&level| {
            let level    = if level.is_finite() { level } else { min_rms };
            let position = (level - min_rms) / (max_rms - min_rms);
            min_height + position * (max_height - min_height)
        })
        .collect()
}
