// crates/soundtrim-core/src/error.rs
//
// Typed errors for the selection core.
//
// The split matters to callers:
//   InvalidArgument — a caller bug (bad track geometry, out-of-range
//                     position). Fail fast; never silently clamp.
//   Configuration   — the track cannot host two markers at all. Raised at
//                     TrimController construction, never at drag time.
//   InvalidState    — drag lifecycle misuse (update without begin, double
//                     begin). Recoverable: log it and treat as a no-op.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SoundtrimError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}
