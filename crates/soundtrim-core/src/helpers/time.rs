// crates/soundtrim-core/src/helpers/time.rs
//
// Time-formatting utilities shared between soundtrim-media and any consumer
// that needs human-readable timestamps.
//
// Selections are expressed in RMS sample indices (one reading per analysis
// frame), so converting a Selection boundary into an ffmpeg-compatible
// timestamp means dividing by the analysis rate first.

/// Format an RMS sample index as `MM:SS.CC` (minutes, seconds, centiseconds)
/// given the analysis rate in readings per second.
///
/// This is the exact timestamp shape handed to the export collaborator's
/// `-ss` / `-to` arguments, and what the trim screen shows under each marker.
///
/// ```
/// use soundtrim_core::helpers::time::sample_to_timestamp;
/// assert_eq!(sample_to_timestamp(0.0, 15.0),    "00:00.00");
/// assert_eq!(sample_to_timestamp(930.0, 15.0),  "01:02.00");
/// assert_eq!(sample_to_timestamp(97.0, 15.0),   "00:06.46");
/// ```
pub fn sample_to_timestamp(sample: f64, samples_per_second: f64) -> String {
    let total_seconds = sample / samples_per_second;
    let minutes       = (total_seconds / 60.0).floor() as u64;
    let seconds       = (total_seconds % 60.0).floor() as u64;
    let centis        = ((total_seconds % 1.0) * 100.0).floor() as u64;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

/// Format a duration in seconds as a compact human-readable string.
///
/// Used in log lines where frame-level precision is unnecessary.
///
/// | Range         | Format       | Example   |
/// |---------------|--------------|-----------|
/// | ≥ 3600 s      | `H:MM:SS`    | `1:04:35` |
/// | ≥ 60 s        | `M:SS`       | `3:07`    |
/// | < 60 s        | `S.Xs`       | `4.2s`    |
///
/// ```
/// use soundtrim_core::helpers::time::format_duration;
/// assert_eq!(format_duration(4.2),    "4.2s");
/// assert_eq!(format_duration(187.0),  "3:07");
/// assert_eq!(format_duration(3875.0), "1:04:35");
/// ```
pub fn format_duration(secs: f64) -> String {
    if secs >= 3600.0 {
        format!(
            "{}:{:02}:{:02}",
            secs as u64 / 3600,
            (secs as u64 % 3600) / 60,
            secs as u64 % 60,
        )
    } else if secs >= 60.0 {
        format!("{}:{:02}", secs as u64 / 60, secs as u64 % 60)
    } else {
        format!("{secs:.1}s")
    }
}
