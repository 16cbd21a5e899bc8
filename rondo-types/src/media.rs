//! Media records owned by an input item: bookmarks, titles, attachments, info.

use serde::{Deserialize, Serialize};

use crate::Tick;

// ============================================================================
// Navigation markers
// ============================================================================

/// A chapter-like time marker. The name is optional: unnamed seekpoints
/// are valid chapters, and an unnamed seekpoint handed to *add bookmark*
/// gets a synthesized name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seekpoint {
    #[serde(default)]
    pub name: Option<String>,
    pub time_offset: Tick,
}

impl Seekpoint {
    pub fn new(name: impl Into<String>, time_offset: Tick) -> Self {
        Self { name: Some(name.into()), time_offset }
    }

    pub fn unnamed(time_offset: Tick) -> Self {
        Self { name: None, time_offset }
    }
}

/// A user bookmark. Stored bookmarks always carry a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub time_offset: Tick,
}

impl Bookmark {
    pub fn new(name: impl Into<String>, time_offset: Tick) -> Self {
        Self { name: name.into(), time_offset }
    }
}

impl From<Bookmark> for Seekpoint {
    fn from(b: Bookmark) -> Self {
        Seekpoint { name: Some(b.name), time_offset: b.time_offset }
    }
}

/// Title attributes reported by the demuxer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleFlags {
    #[serde(default)]
    pub menu: bool,
    #[serde(default)]
    pub interactive: bool,
}

/// A top-level navigable unit (e.g. a disc title) and its chapters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub length: Tick,
    #[serde(default)]
    pub flags: TitleFlags,
    #[serde(default)]
    pub seekpoints: Vec<Seekpoint>,
}

/// An auxiliary resource bundled with the item (fonts, embedded subtitles, cover art).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub data: Vec<u8>,
}

// ============================================================================
// Item info
// ============================================================================

/// One `name: value` line of item info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    pub value: String,
}

/// A named group of info lines ("Stream 0", "Meta", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoCategory {
    pub name: String,
    #[serde(default)]
    pub infos: Vec<Info>,
}

impl InfoCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), infos: Vec::new() }
    }

    pub fn info(&self, name: &str) -> Option<&Info> {
        self.infos.iter().find(|i| i.name == name)
    }

    /// Replace the value of `name`, or append a new line.
    pub fn upsert(&mut self, name: &str, value: &str) {
        match self.infos.iter_mut().find(|i| i.name == name) {
            Some(info) => info.value = value.to_string(),
            None => self.infos.push(Info { name: name.to_string(), value: value.to_string() }),
        }
    }

    /// Remove `name`. Returns false if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.infos.len();
        self.infos.retain(|i| i.name != name);
        self.infos.len() != before
    }
}

// ============================================================================
// Choice list
// ============================================================================

/// One entry of a variable's choice-list (value plus display label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: i64,
    pub label: String,
}

// ============================================================================
// Small enums
// ============================================================================

/// 360° video viewpoint, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub fov: f32,
}

/// Elementary stream category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EsCategory {
    Unknown,
    Video,
    Audio,
    Subtitle,
    Data,
}

impl EsCategory {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(EsCategory::Unknown),
            1 => Some(EsCategory::Video),
            2 => Some(EsCategory::Audio),
            3 => Some(EsCategory::Subtitle),
            4 => Some(EsCategory::Data),
            _ => None,
        }
    }
}

/// Input play state, stored as an integer in the variable store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Init,
    Opening,
    Playing,
    Pause,
    End,
    Error,
}

impl PlayState {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(PlayState::Init),
            1 => Some(PlayState::Opening),
            2 => Some(PlayState::Playing),
            3 => Some(PlayState::Pause),
            4 => Some(PlayState::End),
            5 => Some(PlayState::Error),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i64 {
        self as i64
    }
}

/// Menu navigation directions (DVD/Blu-ray menus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavDirection {
    Activate,
    Up,
    Down,
    Left,
    Right,
    Popup,
    Menu,
}

impl NavDirection {
    pub const ALL: [NavDirection; 7] = [
        NavDirection::Activate,
        NavDirection::Up,
        NavDirection::Down,
        NavDirection::Left,
        NavDirection::Right,
        NavDirection::Popup,
        NavDirection::Menu,
    ];
}
