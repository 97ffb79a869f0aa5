// crates/soundtrim-media/src/convert.rs
//
// Video → MP3 audio extraction via the ffmpeg CLI.
//
// `-progress pipe:1` makes ffmpeg emit key=value status blocks on stdout
// (`out_time_us=…` once or twice a second). Each tick is mapped to a
// completion percentage against the probed source duration and forwarded as
// `MediaResult::ConvertProgress`; the clamp in `progress_percent` keeps the
// display in [0, 100] even when the container misreports its duration.
//
// Cancellation: the per-job flag is checked at progress-line granularity.
// A cancelled job kills the child and reports Error { msg: "cancelled" } —
// the sentinel consumers use to tell an abort from a real failure.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use uuid::Uuid;

use soundtrim_core::media_types::MediaResult;
use soundtrim_core::progress::progress_percent;

use crate::naming::unique_output_name;

/// Extract the audio track of `path` into an MP3 in the OS temp directory,
/// streaming progress along the way.
///
/// Terminal result is `AudioPath` on success, `Error` otherwise (including
/// the "cancelled" sentinel). Soft-fails — nothing here panics.
pub fn convert_to_audio(
    path:       &Path,
    id:         Uuid,
    total_secs: f64,
    cancel:     &AtomicBool,
    tx:         &Sender<MediaResult>,
) {
    let out_path = std::env::temp_dir().join(unique_output_name(path, "audio", "mp3"));

    match run_convert(path, &out_path, id, total_secs, cancel, tx) {
        Ok(()) => {
            eprintln!("[media] audio extracted → {}", out_path.display());
            let _ = tx.send(MediaResult::AudioPath { id, path: out_path });
        }
        Err(e) => {
            eprintln!("[media] convert failed for '{}': {e:#}", path.display());
            let _ = tx.send(MediaResult::Error { id, msg: e.to_string() });
        }
    }
}

/// ffmpeg argument list for the extraction. `-vn` drops video; libmp3lame at
/// qscale 2 is ~190 kbps VBR, transparent for waveform/trim purposes.
fn build_convert_args(input: &Path, output: &Path) -> Vec<String> {
    let input  = input.to_string_lossy();
    let output = output.to_string_lossy();
    [
        "-v", "error", "-nostats", "-y",
        "-progress", "pipe:1",
        "-i", input.as_ref(),
        "-vn",
        "-acodec", "libmp3lame",
        "-qscale:a", "2",
        output.as_ref(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Elapsed seconds from one `-progress` status line, if it carries one.
///
/// ffmpeg emits `out_time_us=<microseconds>`; an unparsable or negative
/// payload (ffmpeg prints `out_time_us=-9223372036854775808` before the
/// first processed frame) yields None.
fn parse_progress_line(line: &str) -> Option<f64> {
    let micros = line.strip_prefix("out_time_us=")?.trim().parse::<i64>().ok()?;
    if micros < 0 {
        return None;
    }
    Some(micros as f64 / 1_000_000.0)
}

fn run_convert(
    input:      &Path,
    output:     &Path,
    id:         Uuid,
    total_secs: f64,
    cancel:     &AtomicBool,
    tx:         &Sender<MediaResult>,
) -> Result<()> {
    let mut child = Command::new("ffmpeg")
        .args(build_convert_args(input, output))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning ffmpeg")?;

    let stdout = child.stdout.take().context("no stdout handle on ffmpeg child")?;
    for line in BufReader::new(stdout).lines() {
        if cancel.load(Ordering::Relaxed) {
            let _ = child.kill();
            let _ = child.wait();
            anyhow::bail!("cancelled");
        }
        let Ok(line) = line else { break };
        if let Some(elapsed) = parse_progress_line(&line) {
            let percent = progress_percent(elapsed, total_secs);
            let _ = tx.send(MediaResult::ConvertProgress { id, percent });
        }
    }

    let status = child.wait().context("waiting for ffmpeg")?;
    if !status.success() {
        // `-v error` keeps stderr to the point; surface its last line.
        let mut err = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            let _ = stderr.read_to_string(&mut err);
        }
        anyhow::bail!(
            "ffmpeg exited with {status}: {}",
            err.lines().last().unwrap_or("")
        );
    }
    Ok(())
}
