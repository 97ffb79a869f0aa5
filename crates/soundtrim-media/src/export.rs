// crates/soundtrim-media/src/export.rs
//
// Trim export: lossless stream copy of the selected range.
//
// A Selection arrives in RMS sample indices (the trim track's domain units).
// Both boundaries are formatted to MM:SS.CC timestamps at the analysis rate
// and handed to ffmpeg as `-ss`/`-to` with `-c copy` — no re-encode, so the
// export is fast and bit-identical inside the cut.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use uuid::Uuid;

use soundtrim_core::helpers::time::sample_to_timestamp;
use soundtrim_core::media_types::MediaResult;
use soundtrim_core::trim::Selection;

use crate::analyze::RMS_SAMPLES_PER_SECOND;
use crate::naming::unique_output_name;

/// Copy the selected range of the audio file at `path` into a new MP3 under
/// `out_dir`, sending `ExportDone` or `Error` via `tx`.
pub fn export_clip(
    path:      &Path,
    out_dir:   &Path,
    id:        Uuid,
    selection: &Selection,
    tx:        &Sender<MediaResult>,
) {
    let out_path = out_dir.join(unique_output_name(path, "trimmed", "mp3"));

    match run_export(path, &out_path, selection) {
        Ok(()) => {
            eprintln!("[media] exported {:?} → {}", selection, out_path.display());
            let _ = tx.send(MediaResult::ExportDone { id, path: out_path });
        }
        Err(e) => {
            eprintln!("[media] export failed for '{}': {e:#}", path.display());
            let _ = tx.send(MediaResult::Error { id, msg: e.to_string() });
        }
    }
}

fn build_export_args(input: &Path, output: &Path, selection: &Selection) -> Vec<String> {
    let input  = input.to_string_lossy();
    let output = output.to_string_lossy();
    let start  = sample_to_timestamp(selection.min_value, RMS_SAMPLES_PER_SECOND);
    let end    = sample_to_timestamp(selection.max_value, RMS_SAMPLES_PER_SECOND);
    [
        "-v", "error", "-nostats", "-y",
        "-i", input.as_ref(),
        "-ss", &start,
        "-to", &end,
        "-c", "copy",
        output.as_ref(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn run_export(input: &Path, output: &Path, selection: &Selection) -> Result<()> {
    if let Some(dir) = output.parent() {
        std::fs::create_dir_all(dir).context("creating export directory")?;
    }

    let out = Command::new("ffmpeg")
        .args(build_export_args(input, output, selection))
        .output()
        .context("spawning ffmpeg")?;

    if !out.status.success() {
        anyhow::bail!(
            "ffmpeg exited with {}: {}",
            out.status,
            String::from_utf8_lossy(&out.stderr).lines().last().unwrap_or("")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_args_carry_formatted_boundaries() {
        // Samples 4 and 9 at 15/s → 0.266 s and 0.6 s.
        let sel  = Selection { min_value: 4.0, max_value: 9.0 };
        let args = build_export_args(Path::new("in.mp3"), Path::new("out.mp3"), &sel);
        assert!(args.windows(2).any(|w| w == ["-ss", "00:00.26"]), "{args:?}");
        assert!(args.windows(2).any(|w| w == ["-to", "00:00.60"]), "{args:?}");
        assert!(args.windows(2).any(|w| w == ["-c", "copy"]));
    }

    #[test]
    fn export_args_minute_scale_selection() {
        // 930 samples at 15/s is 62 s.
        let sel  = Selection { min_value: 0.0, max_value: 930.0 };
        let args = build_export_args(Path::new("in.mp3"), Path::new("out.mp3"), &sel);
        assert!(args.windows(2).any(|w| w == ["-ss", "00:00.00"]));
        assert!(args.windows(2).any(|w| w == ["-to", "01:02.00"]));
    }
}
