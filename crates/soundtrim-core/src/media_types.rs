// crates/soundtrim-core/src/media_types.rs
//
// Types that flow across the channel between soundtrim-media and its
// consumer. No ffmpeg, no UI — just plain data.

use std::path::PathBuf;
use uuid::Uuid;

/// Results sent from the MediaWorker background threads to the caller.
///
/// Every job reports exactly one terminal result (`Duration`, `AudioPath`,
/// `RmsLevels`, `ExportDone`, or `Error`); conversion jobs additionally
/// stream `ConvertProgress` before their terminal result. The string
/// "cancelled" in `Error::msg` is the sentinel for a user-initiated cancel,
/// distinct from a real failure.
pub enum MediaResult {
    Duration        { id: Uuid, seconds: f64 },
    /// Completion percentage in [0, 100] for a running audio conversion.
    ConvertProgress { id: Uuid, percent: f64 },
    /// Extracted audio file ready for analysis and trimming.
    AudioPath       { id: Uuid, path: PathBuf },
    /// Raw per-frame RMS readings; NaN / -inf mark unreadable frames.
    /// Feed through `soundtrim_core::waveform::sample_heights` for display.
    RmsLevels       { id: Uuid, levels: Vec<f32> },
    ExportDone      { id: Uuid, path: PathBuf },
    Error           { id: Uuid, msg: String },
}
