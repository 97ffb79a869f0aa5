// crates/soundtrim-media/src/lib.rs
//
// ffmpeg-facing collaborators: probing, audio conversion, RMS analysis, trim
// export. Communicates with consumers via channels only — no UI types.
//
// Everything here shells out to the ffmpeg / ffprobe CLI; being
// codec-agnostic beats in-process decoding for a tool whose media work is
// four one-shot commands.
//
// To add a new media capability:
//   1. Create a new module file here
//   2. Add `mod mymodule;` below
//   3. Call it from worker.rs (a new MediaWorker method)

pub mod analyze;
pub mod convert;
pub mod export;
pub mod naming;
pub mod probe;
pub mod worker;

// Re-export the main public API so consumer imports are simple.
pub use worker::MediaWorker;
pub use soundtrim_core::media_types::MediaResult;
