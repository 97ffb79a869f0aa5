// crates/soundtrim-media/src/probe.rs
//
// Duration probing via the ffprobe CLI's JSON output.
//
// The container-level format.duration is preferred; when a container lies
// (streaming-oriented files sometimes report 0) the per-stream durations are
// scanned as a fallback.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use uuid::Uuid;

use soundtrim_core::helpers::time::format_duration;
use soundtrim_core::media_types::MediaResult;

/// Probe `path` for its duration in seconds and send the result via `tx`.
///
/// Returns the duration directly as well so conversion jobs can chain probe →
/// convert on one thread without a channel round-trip. Returns 0.0 on
/// failure (after sending `MediaResult::Error`), which downstream progress
/// mapping clamps to a 0% display rather than NaN.
pub fn probe_duration(path: &Path, id: Uuid, tx: &Sender<MediaResult>) -> f64 {
    match read_duration(path) {
        Ok(seconds) => {
            eprintln!("[media] duration {} ← {}", format_duration(seconds), path.display());
            let _ = tx.send(MediaResult::Duration { id, seconds });
            seconds
        }
        Err(e) => {
            eprintln!("[media] probe failed for '{}': {e:#}", path.display());
            let _ = tx.send(MediaResult::Error { id, msg: e.to_string() });
            0.0
        }
    }
}

fn read_duration(path: &Path) -> Result<f64> {
    let out = Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(path)
        .output()
        .context("spawning ffprobe")?;

    if !out.status.success() {
        anyhow::bail!(
            "ffprobe exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).lines().last().unwrap_or("")
        );
    }

    parse_duration(&out.stdout)
}

/// Extract a positive duration from ffprobe's JSON. Falls back from
/// `format.duration` to the longest stream duration.
fn parse_duration(json: &[u8]) -> Result<f64> {
    let doc: serde_json::Value = serde_json::from_slice(json).context("parsing ffprobe JSON")?;

    let format_dur = doc["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    if format_dur > 0.0 {
        return Ok(format_dur);
    }

    let stream_dur = doc["streams"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|s| s["duration"].as_str().and_then(|d| d.parse::<f64>().ok()))
        .fold(0.0_f64, f64::max);
    if stream_dur > 0.0 {
        return Ok(stream_dur);
    }

    anyhow::bail!("no usable duration in probe output")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_preferred() {
        let json = br#"{"format":{"duration":"12.500000"},"streams":[{"duration":"11.9"}]}"#;
        assert_eq!(parse_duration(json).unwrap(), 12.5);
    }

    #[test]
    fn falls_back_to_longest_stream() {
        let json = br#"{"format":{},"streams":[{"duration":"3.0"},{"duration":"7.25"}]}"#;
        assert_eq!(parse_duration(json).unwrap(), 7.25);
    }

    #[test]
    fn zero_format_duration_is_not_trusted() {
        let json = br#"{"format":{"duration":"0.000000"},"streams":[{"duration":"4.0"}]}"#;
        assert_eq!(parse_duration(json).unwrap(), 4.0);
    }

    #[test]
    fn missing_duration_is_an_error() {
        assert!(parse_duration(br#"{"format":{},"streams":[]}"#).is_err());
        assert!(parse_duration(b"not json").is_err());
    }
}
