use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    bookmarks: BookmarksConfig,
    #[serde(default)]
    control: ControlConfig,
    #[serde(default)]
    subtitles: SubtitlesConfig,
}

#[derive(Deserialize, Default)]
struct BookmarksConfig {
    name_template: Option<String>,
}

#[derive(Deserialize, Default)]
struct ControlConfig {
    queue_capacity: Option<usize>,
    preparsing: Option<bool>,
}

#[derive(Deserialize, Default)]
struct SubtitlesConfig {
    extra_extensions: Option<Vec<String>>,
}

pub struct Config {
    bookmarks: BookmarksConfig,
    control: ControlConfig,
    subtitles: SubtitlesConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) => Self::load_with_override(&path),
            None => Self::embedded(),
        }
    }

    /// Embedded defaults only.
    pub fn embedded() -> Self {
        let base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");
        Config {
            bookmarks: base.bookmarks,
            control: base.control,
            subtitles: base.subtitles,
        }
    }

    /// Embedded defaults merged with `path`. A missing or malformed file is
    /// logged and ignored.
    pub fn load_with_override(path: &Path) -> Self {
        let mut config = Self::embedded();
        if !path.exists() {
            return config;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(user) => {
                    merge_bookmarks(&mut config.bookmarks, user.bookmarks);
                    merge_control(&mut config.control, user.control);
                    merge_subtitles(&mut config.subtitles, user.subtitles);
                }
                Err(e) => {
                    log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                }
            },
            Err(e) => {
                log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
            }
        }
        config
    }

    /// Template for synthesized bookmark names; `{n}` is the counter.
    pub fn bookmark_name_template(&self) -> &str {
        self.bookmarks
            .name_template
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Bookmark {n}")
    }

    /// Control queue capacity; `None` means unbounded.
    pub fn queue_capacity(&self) -> Option<usize> {
        match self.control.queue_capacity.unwrap_or(100) {
            0 => None,
            n => Some(n),
        }
    }

    pub fn preparsing(&self) -> bool {
        self.control.preparsing.unwrap_or(false)
    }

    /// Extra subtitle extensions, lowercased and without leading dots.
    pub fn extra_subtitle_extensions(&self) -> Vec<String> {
        self.subtitles
            .extra_extensions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::embedded()
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rondo").join("config.toml"))
}

fn merge_bookmarks(base: &mut BookmarksConfig, user: BookmarksConfig) {
    if user.name_template.is_some() {
        base.name_template = user.name_template;
    }
}

fn merge_control(base: &mut ControlConfig, user: ControlConfig) {
    if user.queue_capacity.is_some() {
        base.queue_capacity = user.queue_capacity;
    }
    if user.preparsing.is_some() {
        base.preparsing = user.preparsing;
    }
}

fn merge_subtitles(base: &mut SubtitlesConfig, user: SubtitlesConfig) {
    if user.extra_extensions.is_some() {
        base.extra_extensions = user.extra_extensions;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_embedded_config() {
        let config = Config::embedded();
        assert_eq!(config.bookmark_name_template(), "Bookmark {n}");
        assert_eq!(config.queue_capacity(), Some(100));
        assert!(!config.preparsing());
        assert!(config.extra_subtitle_extensions().is_empty());
    }

    #[test]
    fn test_user_override_merges_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[control]\nqueue_capacity = 0\n\n[subtitles]\nextra_extensions = [\".LRC\", \"xyz\"]"
        )
        .unwrap();

        let config = Config::load_with_override(file.path());
        assert_eq!(config.queue_capacity(), None);
        assert_eq!(config.extra_subtitle_extensions(), vec!["lrc", "xyz"]);
        // Untouched keys keep the embedded defaults
        assert_eq!(config.bookmark_name_template(), "Bookmark {n}");
        assert!(!config.preparsing());
    }

    #[test]
    fn test_malformed_override_is_ignored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[control\nqueue_capacity = ").unwrap();

        let config = Config::load_with_override(file.path());
        assert_eq!(config.queue_capacity(), Some(100));
    }

    #[test]
    fn test_missing_override_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_with_override(&dir.path().join("absent.toml"));
        assert_eq!(config.bookmark_name_template(), "Bookmark {n}");
    }
}
