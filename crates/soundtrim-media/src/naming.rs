// crates/soundtrim-media/src/naming.rs
//
// Output file naming: sanitized stems plus a millisecond suffix so repeated
// runs against the same source never collide.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Replace every non-alphanumeric character in a file stem with `_`.
///
/// Source names arrive from pickers and content URIs and routinely contain
/// spaces, parentheses, and punctuation that would need quoting in an ffmpeg
/// command line.
///
/// ```
/// use soundtrim_media::naming::sanitize_stem;
/// assert_eq!(sanitize_stem("My Clip (final).v2"), "My_Clip__final__v2");
/// ```
pub fn sanitize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Build a unique output name from `input`'s stem: `<stem>_<suffix>_<ms>.<ext>`.
///
/// `suffix` distinguishes job kinds ("audio", "trimmed"); the unix-epoch
/// millisecond stamp distinguishes repeated runs.
pub fn unique_output_name(input: &Path, suffix: &str, ext: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| sanitize_stem(&s.to_string_lossy()))
        .unwrap_or_else(|| "output".to_string());

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);

    format!("{stem}_{suffix}_{millis}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn sanitize_keeps_alphanumerics() {
        assert_eq!(sanitize_stem("clip01"), "clip01");
    }

    #[test]
    fn sanitize_replaces_punctuation_and_spaces() {
        assert_eq!(sanitize_stem("a b.c-d"), "a_b_c_d");
        assert_eq!(sanitize_stem("héllo"), "h_llo");
    }

    #[test]
    fn output_name_has_stem_suffix_and_extension() {
        let name = unique_output_name(&PathBuf::from("/tmp/My Video.mp4"), "audio", "mp3");
        assert!(name.starts_with("My_Video_audio_"), "unexpected name {name}");
        assert!(name.ends_with(".mp3"));
    }

    #[test]
    fn extensionless_input_still_names() {
        let name = unique_output_name(&PathBuf::from("clip"), "trimmed", "mp3");
        assert!(name.starts_with("clip_trimmed_"));
    }
}
