//! Control queries, their wire codes and argument signatures.
//!
//! Callers inside the process build a [`Query`] directly. Remote bindings and
//! scripts speak `(code, args)`; each [`QueryCode`] has exactly one argument
//! signature, listed in [`SIGNATURES`], and decoding checks the raw arguments
//! against it before a typed `Query` is built.

use serde::{Deserialize, Serialize};

use crate::{
    Attachment, Bookmark, ControlError, EsCategory, EsId, InfoCategory, NavDirection, PlayState,
    Seekpoint, Tick, Title, Viewpoint,
};

// ============================================================================
// Codes and signatures
// ============================================================================

/// Numeric query codes of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum QueryCode {
    GetPosition = 0x00,
    SetPosition = 0x01,
    GetLength = 0x02,
    GetTime = 0x03,
    SetTime = 0x04,
    GetRate = 0x05,
    SetRate = 0x06,
    GetState = 0x07,
    SetState = 0x08,
    GetAudioDelay = 0x09,
    SetAudioDelay = 0x0a,
    GetSpuDelay = 0x0b,
    SetSpuDelay = 0x0c,
    NavActivate = 0x0d,
    NavUp = 0x0e,
    NavDown = 0x0f,
    NavLeft = 0x10,
    NavRight = 0x11,
    NavPopup = 0x12,
    NavMenu = 0x13,
    AddInfo = 0x14,
    ReplaceInfos = 0x15,
    MergeInfos = 0x16,
    DelInfo = 0x17,
    AddBookmark = 0x18,
    ChangeBookmark = 0x19,
    DelBookmark = 0x1a,
    GetBookmarks = 0x1b,
    ClearBookmarks = 0x1c,
    SetBookmark = 0x1d,
    GetBookmark = 0x1e,
    GetTitleInfo = 0x1f,
    GetFullTitleInfo = 0x20,
    GetSeekpoints = 0x21,
    AddSlave = 0x22,
    AddSubtitle = 0x23,
    GetAttachments = 0x24,
    GetAttachment = 0x25,
    SetRecordState = 0x26,
    GetRecordState = 0x27,
    RestartEs = 0x28,
    UpdateViewpoint = 0x29,
}

impl QueryCode {
    pub fn from_raw(raw: u32) -> Option<Self> {
        SIGNATURES
            .iter()
            .map(|(code, _)| *code)
            .find(|code| code.as_raw() == raw)
    }

    pub fn as_raw(self) -> u32 {
        self as u32
    }

    /// The fixed argument signature of this query.
    pub fn signature(self) -> &'static [ArgKind] {
        SIGNATURES
            .iter()
            .find(|(code, _)| *code == self)
            .map(|(_, sig)| *sig)
            .unwrap_or(&[])
    }

    /// Navigation direction for the `Nav*` codes.
    pub fn nav_direction(self) -> Option<NavDirection> {
        let raw = self.as_raw();
        let first = QueryCode::NavActivate.as_raw();
        if (first..=QueryCode::NavMenu.as_raw()).contains(&raw) {
            NavDirection::ALL.get((raw - first) as usize).copied()
        } else {
            None
        }
    }
}

/// Type of one positional argument on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgKind {
    Int,
    Float,
    Bool,
    Str,
    /// A string or `Null`.
    OptStr,
    Seekpoint,
    Bookmark,
    InfoCategory,
    Viewpoint,
}

impl ArgKind {
    pub fn accepts(self, arg: &Arg) -> bool {
        matches!(
            (self, arg),
            (ArgKind::Int, Arg::Int(_))
                | (ArgKind::Float, Arg::Float(_))
                | (ArgKind::Float, Arg::Int(_))
                | (ArgKind::Bool, Arg::Bool(_))
                | (ArgKind::Str, Arg::Str(_))
                | (ArgKind::OptStr, Arg::Str(_))
                | (ArgKind::OptStr, Arg::Null)
                | (ArgKind::Seekpoint, Arg::Seekpoint(_))
                | (ArgKind::Bookmark, Arg::Bookmark(_))
                | (ArgKind::InfoCategory, Arg::InfoCategory(_))
                | (ArgKind::Viewpoint, Arg::Viewpoint(_))
        )
    }
}

use ArgKind as K;

/// Argument signature of every query code, in protocol order.
///
/// Outputs are not listed: they travel back in the [`Reply`].
pub const SIGNATURES: &[(QueryCode, &[ArgKind])] = &[
    (QueryCode::GetPosition, &[]),
    (QueryCode::SetPosition, &[K::Float]),
    (QueryCode::GetLength, &[]),
    (QueryCode::GetTime, &[]),
    (QueryCode::SetTime, &[K::Int]),
    (QueryCode::GetRate, &[]),
    (QueryCode::SetRate, &[K::Int]),
    (QueryCode::GetState, &[]),
    (QueryCode::SetState, &[K::Int]),
    (QueryCode::GetAudioDelay, &[]),
    (QueryCode::SetAudioDelay, &[K::Int]),
    (QueryCode::GetSpuDelay, &[]),
    (QueryCode::SetSpuDelay, &[K::Int]),
    (QueryCode::NavActivate, &[]),
    (QueryCode::NavUp, &[]),
    (QueryCode::NavDown, &[]),
    (QueryCode::NavLeft, &[]),
    (QueryCode::NavRight, &[]),
    (QueryCode::NavPopup, &[]),
    (QueryCode::NavMenu, &[]),
    // category, name, value
    (QueryCode::AddInfo, &[K::Str, K::Str, K::Str]),
    (QueryCode::ReplaceInfos, &[K::InfoCategory]),
    (QueryCode::MergeInfos, &[K::InfoCategory]),
    // category, name (null deletes the whole category)
    (QueryCode::DelInfo, &[K::Str, K::OptStr]),
    (QueryCode::AddBookmark, &[K::Seekpoint]),
    // new value, index
    (QueryCode::ChangeBookmark, &[K::Bookmark, K::Int]),
    (QueryCode::DelBookmark, &[K::Int]),
    (QueryCode::GetBookmarks, &[]),
    (QueryCode::ClearBookmarks, &[]),
    (QueryCode::SetBookmark, &[K::Int]),
    (QueryCode::GetBookmark, &[]),
    // title offset, -1 for the current title
    (QueryCode::GetTitleInfo, &[K::Int]),
    (QueryCode::GetFullTitleInfo, &[]),
    (QueryCode::GetSeekpoints, &[K::Int]),
    // category, path, forced
    (QueryCode::AddSlave, &[K::Int, K::Str, K::Bool]),
    // path, select
    (QueryCode::AddSubtitle, &[K::Str, K::Bool]),
    (QueryCode::GetAttachments, &[]),
    (QueryCode::GetAttachment, &[K::Str]),
    (QueryCode::SetRecordState, &[K::Bool]),
    (QueryCode::GetRecordState, &[]),
    (QueryCode::RestartEs, &[K::Int]),
    // viewpoint, absolute
    (QueryCode::UpdateViewpoint, &[K::Viewpoint, K::Bool]),
];

/// One raw positional argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Seekpoint(Seekpoint),
    Bookmark(Bookmark),
    InfoCategory(InfoCategory),
    Viewpoint(Viewpoint),
}

// ============================================================================
// Typed queries and replies
// ============================================================================

/// Title addressed by a query: the active one, or an explicit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleSelector {
    Current,
    At(usize),
}

impl TitleSelector {
    /// Wire form: any negative offset means "current".
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            TitleSelector::Current
        } else {
            TitleSelector::At(raw as usize)
        }
    }
}

/// A control query with its typed arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    GetPosition,
    SetPosition(f64),
    GetLength,
    GetTime,
    SetTime(Tick),
    GetRate,
    /// Rate value, `RATE_DEFAULT / multiplier`.
    SetRate(i32),
    GetState,
    SetState(PlayState),
    GetAudioDelay,
    SetAudioDelay(Tick),
    GetSpuDelay,
    SetSpuDelay(Tick),

    Nav(NavDirection),

    AddInfo { category: String, name: String, value: String },
    ReplaceInfos(InfoCategory),
    MergeInfos(InfoCategory),
    DelInfo { category: String, name: Option<String> },

    AddBookmark(Seekpoint),
    ChangeBookmark { bookmark: Bookmark, index: usize },
    DelBookmark(usize),
    GetBookmarks,
    ClearBookmarks,
    SetBookmark(usize),
    GetBookmark,

    GetTitleInfo(TitleSelector),
    GetFullTitleInfo,
    GetSeekpoints(TitleSelector),

    AddSlave { category: EsCategory, path: String, forced: bool },
    AddSubtitle { path: String, select: bool },

    GetAttachments,
    GetAttachment(String),

    SetRecordState(bool),
    GetRecordState,

    RestartEs(EsId),
    UpdateViewpoint { viewpoint: Viewpoint, absolute: bool },
}

impl Query {
    pub fn code(&self) -> QueryCode {
        match self {
            Query::GetPosition => QueryCode::GetPosition,
            Query::SetPosition(_) => QueryCode::SetPosition,
            Query::GetLength => QueryCode::GetLength,
            Query::GetTime => QueryCode::GetTime,
            Query::SetTime(_) => QueryCode::SetTime,
            Query::GetRate => QueryCode::GetRate,
            Query::SetRate(_) => QueryCode::SetRate,
            Query::GetState => QueryCode::GetState,
            Query::SetState(_) => QueryCode::SetState,
            Query::GetAudioDelay => QueryCode::GetAudioDelay,
            Query::SetAudioDelay(_) => QueryCode::SetAudioDelay,
            Query::GetSpuDelay => QueryCode::GetSpuDelay,
            Query::SetSpuDelay(_) => QueryCode::SetSpuDelay,
            Query::Nav(dir) => match dir {
                NavDirection::Activate => QueryCode::NavActivate,
                NavDirection::Up => QueryCode::NavUp,
                NavDirection::Down => QueryCode::NavDown,
                NavDirection::Left => QueryCode::NavLeft,
                NavDirection::Right => QueryCode::NavRight,
                NavDirection::Popup => QueryCode::NavPopup,
                NavDirection::Menu => QueryCode::NavMenu,
            },
            Query::AddInfo { .. } => QueryCode::AddInfo,
            Query::ReplaceInfos(_) => QueryCode::ReplaceInfos,
            Query::MergeInfos(_) => QueryCode::MergeInfos,
            Query::DelInfo { .. } => QueryCode::DelInfo,
            Query::AddBookmark(_) => QueryCode::AddBookmark,
            Query::ChangeBookmark { .. } => QueryCode::ChangeBookmark,
            Query::DelBookmark(_) => QueryCode::DelBookmark,
            Query::GetBookmarks => QueryCode::GetBookmarks,
            Query::ClearBookmarks => QueryCode::ClearBookmarks,
            Query::SetBookmark(_) => QueryCode::SetBookmark,
            Query::GetBookmark => QueryCode::GetBookmark,
            Query::GetTitleInfo(_) => QueryCode::GetTitleInfo,
            Query::GetFullTitleInfo => QueryCode::GetFullTitleInfo,
            Query::GetSeekpoints(_) => QueryCode::GetSeekpoints,
            Query::AddSlave { .. } => QueryCode::AddSlave,
            Query::AddSubtitle { .. } => QueryCode::AddSubtitle,
            Query::GetAttachments => QueryCode::GetAttachments,
            Query::GetAttachment(_) => QueryCode::GetAttachment,
            Query::SetRecordState(_) => QueryCode::SetRecordState,
            Query::GetRecordState => QueryCode::GetRecordState,
            Query::RestartEs(_) => QueryCode::RestartEs,
            Query::UpdateViewpoint { .. } => QueryCode::UpdateViewpoint,
        }
    }
}

/// Output of a successful query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    None,
    Float(f64),
    Tick(Tick),
    Rate(i32),
    State(PlayState),
    Bool(bool),
    Bookmarks(Vec<Bookmark>),
    Bookmark(Seekpoint),
    /// `offset` is the resolved title offset.
    Title { offset: usize, title: Title },
    Titles(Vec<Title>),
    Seekpoints { title: usize, count: usize, seekpoints: Vec<Seekpoint> },
    Attachments(Vec<Attachment>),
    Attachment(Attachment),
}

pub type QueryResult = Result<Reply, ControlError>;
