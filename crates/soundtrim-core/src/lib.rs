// crates/soundtrim-core/src/lib.rs
//
// Pure selection / waveform / progress logic — no ffmpeg, no channels, no UI.
// Everything here is synchronous, deterministic, and unit-testable without
// touching the filesystem.
//
// soundtrim-media consumes these types and feeds results back to callers via
// the plain-data enums in `media_types`.

pub mod error;
pub mod helpers;
pub mod media_types;
pub mod progress;
pub mod trim;
pub mod waveform;

// Re-export the main public API so soundtrim-media imports are simple.
pub use error::SoundtrimError;
pub use trim::{quantize, Marker, Selection, Track, TrimController, MIN_SEPARATION_PX};
pub use waveform::sample_heights;
