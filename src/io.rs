use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use miette::{Context, IntoDiagnostic};
use regex::Regex;

use crate::{
    result::Result,
    types::{Container, VideoId},
};

/// Maximum length of a file name, in characters
pub const MAX_FILENAME_LEN: usize = 255;

/// Runs of characters that are reserved on at least one common filesystem
const RESERVED_CHARS: &str = r#"[<>:"/\\|?*\x00-\x1F]+"#;

static RESERVED_RE: OnceLock<Regex> = OnceLock::new();

fn is_trimmed(c: char) -> bool {
    c.is_whitespace() || c == '.'
}

/// Turn any string into a name that can safely be used as a file name.
///
/// Every run of reserved characters becomes a single `_`, leading and trailing
/// whitespaces and dots are removed and the result is capped to
/// [`MAX_FILENAME_LEN`] characters. Never returns an empty string.
pub fn sanitize_filename(input: &str) -> String {
    let re = RESERVED_RE.get_or_init(|| Regex::new(RESERVED_CHARS).expect("invalid pattern"));

    let replaced = re.replace_all(input, "_");
    let trimmed = replaced.trim_matches(is_trimmed);

    // Truncating may expose new trailing characters to trim
    let name = match trimmed.char_indices().nth(MAX_FILENAME_LEN) {
        Some((end, _)) => trimmed[..end].trim_end_matches(is_trimmed),
        None => trimmed,
    };

    if name.is_empty() {
        "_".to_owned()
    } else {
        name.to_owned()
    }
}

/// Create the output directory and all its parents if needed
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Could not create the output directory {}", dir.display()))?;
    Ok(())
}

/// Build a fresh output path for a clip of the video.
///
/// Format: `<out_dir>/<video_id>_<uuid>.<ext>`, with the file name sanitized.
/// The random token makes collisions between two clips of the same video
/// practically impossible.
pub fn unique_clip_path(out_dir: &Path, video_id: &VideoId, container: Container) -> PathBuf {
    let token = uuid::Uuid::new_v4();
    let filename = sanitize_filename(&format!("{video_id}_{token}{}", container.with_dot()));
    out_dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_safe(name: &str) -> bool {
        name.chars().all(|c| {
            !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' | '\0'..='\x1F')
        })
    }

    #[test]
    fn replaces_runs_of_reserved_characters() {
        assert_eq!(sanitize_filename("a/b"), "a_b");
        assert_eq!(sanitize_filename("a<>:\"/\\|?*b"), "a_b");
        assert_eq!(sanitize_filename("what?/now*"), "what_now_");
        assert_eq!(sanitize_filename("tab\there"), "tab_here");
    }

    #[test]
    fn trims_whitespaces_and_dots() {
        assert_eq!(sanitize_filename("  ..clip.mp4.. "), "clip.mp4");
        assert_eq!(sanitize_filename(". a"), "a");
    }

    #[test]
    fn never_empty() {
        assert_eq!(sanitize_filename(""), "_");
        assert_eq!(sanitize_filename(" . . "), "_");
        assert_eq!(sanitize_filename("???"), "_");
    }

    #[test]
    fn caps_the_length() {
        let long = "x".repeat(300);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_FILENAME_LEN);

        // Multi-byte characters are counted as one
        let long = "é".repeat(300);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_FILENAME_LEN);

        // Dots exposed by the truncation are trimmed
        let name = format!("{}. tail", "y".repeat(MAX_FILENAME_LEN - 1));
        assert_eq!(sanitize_filename(&name), "y".repeat(MAX_FILENAME_LEN - 1));
    }

    #[test]
    fn properties_hold_for_random_strings() {
        const ALPHABET: &[char] = &[
            'a', 'Z', '0', '_', '-', '.', ' ', '\t', '/', '\\', ':', '*', '?', '"', '<', '>', '|',
            '\0', 'é', '字', '\u{a0}',
        ];
        let mut rng = fastrand::Rng::with_seed(42);

        for _ in 0..2000 {
            let len = rng.usize(..400);
            let input: String = (0..len)
                .map(|_| ALPHABET[rng.usize(..ALPHABET.len())])
                .collect();

            let once = sanitize_filename(&input);
            assert!(!once.is_empty());
            assert!(once.chars().count() <= MAX_FILENAME_LEN);
            assert!(is_safe(&once), "{once:?}");
            assert_eq!(sanitize_filename(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn clip_paths_are_unique_and_in_the_output_directory() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        let dir = Path::new("out");

        let a = unique_clip_path(dir, &id, Container::Mp4);
        let b = unique_clip_path(dir, &id, Container::Mp4);

        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(dir));
        let name = a.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("dQw4w9WgXcQ_"));
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn ensure_dir_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Already existing is fine
        ensure_dir(&nested).unwrap();
    }
}
