// crates/soundtrim-media/src/analyze.rs
//
// Coarse loudness analysis via ffmpeg's astats filter.
//
// `asetnsamples` regroups decoded audio into fixed-size frames, `astats`
// computes per-frame statistics, and `ametadata=print` writes the overall
// RMS level of each frame to a log file:
//
//   frame:0    pts:0       pts_time:0
//   lavfi.astats.Overall.RMS_level=-27.241
//   frame:1    pts:2940    pts_time:0.066667
//   lavfi.astats.Overall.RMS_level=-inf
//   ...
//
// The parse keeps one f32 per frame, in order. Readings astats could not
// measure ("-inf" for digital silence, or anything unparsable) come through
// as non-finite values; `soundtrim_core::waveform::sample_heights` renders
// those as gaps, so they are preserved here rather than dropped — dropping
// them would desynchronize the waveform from the trim track's time axis.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use uuid::Uuid;

use soundtrim_core::media_types::MediaResult;

/// RMS readings per second of audio. Together with `ANALYSIS_RATE_HZ` this
/// fixes the astats frame size, and it is the time base for converting
/// Selection sample indices back into timestamps at export.
pub const RMS_SAMPLES_PER_SECOND: f64 = 15.0;

/// Decode rate assumed for the analysis pass.
pub const ANALYSIS_RATE_HZ: u32 = 44_100;

/// Measure per-frame RMS levels of the audio file at `path` and send them
/// via `tx` as `MediaResult::RmsLevels`.
///
/// Soft-fails: on any error an `Error` result is sent and nothing panics.
pub fn analyze_rms(path: &Path, id: Uuid, tx: &Sender<MediaResult>) {
    match run_analysis(path) {
        Ok(levels) => {
            eprintln!("[media] {} RMS readings ← {}", levels.len(), path.display());
            let _ = tx.send(MediaResult::RmsLevels { id, levels });
        }
        Err(e) => {
            eprintln!("[media] analysis failed for '{}': {e:#}", path.display());
            let _ = tx.send(MediaResult::Error { id, msg: e.to_string() });
        }
    }
}

fn run_analysis(path: &Path) -> Result<Vec<f32>> {
    // ametadata writes to a file, not a pipe; a NamedTempFile keeps the log
    // out of the way and deletes it when this function returns.
    let log = tempfile::Builder::new()
        .prefix("soundtrim_rms_")
        .suffix(".log")
        .tempfile()
        .context("creating analysis log file")?;

    let frame_size = (ANALYSIS_RATE_HZ as f64 / RMS_SAMPLES_PER_SECOND) as u32;
    let filter = format!(
        "asetnsamples={frame_size},astats=metadata=1:reset=1,\
         ametadata=print:key=lavfi.astats.Overall.RMS_level:file={}",
        log.path().display()
    );

    let out = Command::new("ffmpeg")
        .args(["-v", "error", "-nostats", "-i"])
        .arg(path)
        .args(["-af", &filter, "-f", "null", "-"])
        .output()
        .context("spawning ffmpeg")?;

    if !out.status.success() {
        anyhow::bail!(
            "ffmpeg exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).lines().last().unwrap_or("")
        );
    }

    let text = std::fs::read_to_string(log.path()).context("reading analysis log")?;
    let levels = parse_rms_log(&text);
    anyhow::ensure!(!levels.is_empty(), "no RMS readings in analysis log");
    Ok(levels)
}

/// Pull the RMS reading out of every `…RMS_level=<value>` line.
///
/// Unparsable payloads become NaN so the reading still occupies its frame
/// slot. Lines without an RMS_level key (frame headers) are skipped.
fn parse_rms_log(text: &str) -> Vec<f32> {
    text.lines()
        .filter_map(|line| {
            let (_, value) = line.split_once("RMS_level=")?;
            Some(value.trim().parse::<f32>().unwrap_or(f32::NAN))
        })
        .collect()
}
