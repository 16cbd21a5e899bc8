//! Subtitle file filter: decides whether a path looks like a subtitle file.

use std::path::Path;

/// Extensions recognized as subtitle files.
pub const SUBTITLE_EXTENSIONS: &[&str] = &[
    "idx", "sub", "srt", "ssa", "ass", "smi", "utf", "utf8", "utf-8", "rt", "aqt", "txt", "usf",
    "jss", "cdg", "psb", "mpsub", "mpl2", "pjs", "dks", "stl", "vtt", "sbv", "ttml",
];

#[derive(Debug, Clone, Default)]
pub struct SubtitleFilter {
    extra: Vec<String>,
}

impl SubtitleFilter {
    /// Built-in list plus `extra` (lowercase, no leading dot).
    pub fn with_extra(extra: Vec<String>) -> Self {
        Self { extra }
    }

    /// Case-insensitive extension match. Paths without an extension are refused.
    pub fn accepts(&self, path: &str) -> bool {
        let Some(ext) = Path::new(path).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();
        SUBTITLE_EXTENSIONS.contains(&ext.as_str()) || self.extra.iter().any(|e| *e == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_any_case() {
        let filter = SubtitleFilter::default();
        assert!(filter.accepts("/movies/film.srt"));
        assert!(filter.accepts("film.EN.ASS"));
        assert!(filter.accepts("C:/subs/track.vtt"));
    }

    #[test]
    fn rejects_media_and_bare_names() {
        let filter = SubtitleFilter::default();
        assert!(!filter.accepts("film.mkv"));
        assert!(!filter.accepts("README"));
        assert!(!filter.accepts(""));
    }

    #[test]
    fn extra_extensions() {
        let filter = SubtitleFilter::with_extra(vec!["lrc".to_string()]);
        assert!(filter.accepts("song.LRC"));
    }
}
