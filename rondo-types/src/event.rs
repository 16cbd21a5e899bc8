//! Notifications emitted after the shared item state changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// The bookmark list (and its option string / choice-list) was rebuilt.
    Bookmark,
    /// Item info was added, replaced, merged or deleted.
    MetaInfo,
}
