//! Media item: the descriptor that owns the item lock.
//!
//! Bookmark mutations go through here so the option string and the
//! choice-list are rebuilt inside the same critical section as the change.

use rondo_types::{Attachment, Bookmark, Choice, InfoCategory, Seekpoint, Title};

use crate::bookmark_option::{self, OPTION_KEY};
use crate::store::{ItemLock, ItemState};
use crate::ControlError;

pub struct MediaItem {
    uri: String,
    lock: ItemLock,
}

impl MediaItem {
    pub fn new(uri: impl Into<String>) -> Self {
        Self::with_options(uri, Vec::new())
    }

    pub fn with_options(uri: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            uri: uri.into(),
            lock: ItemLock::new(ItemState::with_options(options)),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn lock(&self) -> &ItemLock {
        &self.lock
    }

    // ── Producer side ────────────────────────────────────────────

    pub fn set_titles(&self, titles: Vec<Title>) {
        self.lock.with(|s| s.set_titles(titles));
    }

    pub fn set_attachments(&self, attachments: Vec<Attachment>) {
        self.lock.with(|s| s.set_attachments(attachments));
    }

    /// Record the bookmark the processing thread just jumped to.
    pub fn set_current_bookmark(&self, seekpoint: Seekpoint) {
        self.lock.with(|s| s.set_current_bookmark(seekpoint));
    }

    // ── Snapshots ────────────────────────────────────────────────

    pub fn options(&self) -> Vec<String> {
        self.lock.with(|s| s.options().to_vec())
    }

    /// The persisted `bookmarks=` option, if one has been written.
    pub fn bookmarks_option(&self) -> Option<String> {
        self.lock.with(|s| {
            s.options()
                .iter()
                .find(|o| o.starts_with(OPTION_KEY))
                .cloned()
        })
    }

    pub fn bookmark_choices(&self) -> Vec<Choice> {
        self.lock.with(|s| s.bookmark_choices().to_vec())
    }

    pub fn info(&self) -> Result<Vec<InfoCategory>, ControlError> {
        self.lock.with(|s| s.info_snapshot())
    }

    // ── Bookmark mutations ───────────────────────────────────────

    pub fn add_bookmark(&self, seekpoint: &Seekpoint, template: &str) -> Result<usize, ControlError> {
        self.lock.with(|s| {
            let index = s.add_bookmark(seekpoint, template)?;
            bookmark_option::rebuild(s);
            Ok(index)
        })
    }

    pub fn change_bookmark(&self, index: usize, bookmark: &Bookmark) -> Result<(), ControlError> {
        self.lock.with(|s| {
            s.change_bookmark(index, bookmark)?;
            bookmark_option::rebuild(s);
            Ok(())
        })
    }

    pub fn delete_bookmark(&self, index: usize) -> Result<(), ControlError> {
        self.lock.with(|s| {
            s.delete_bookmark(index)?;
            bookmark_option::rebuild(s);
            Ok(())
        })
    }

    pub fn clear_bookmarks(&self) {
        self.lock.with(|s| {
            s.clear_bookmarks();
            bookmark_option::rebuild(s);
        });
    }

    /// Load bookmarks from a persisted `bookmarks=` option, replacing the
    /// current list. `None` when the item carries no such option; otherwise
    /// the number of bookmarks restored. On failure the list, the option and
    /// the choice-list are left as they were.
    pub fn restore_bookmarks(&self, template: &str) -> Result<Option<usize>, ControlError> {
        self.lock.with(|s| {
            let Some(option) = s.options().iter().find(|o| o.starts_with(OPTION_KEY)).cloned()
            else {
                return Ok(None);
            };
            let parsed = bookmark_option::parse_bookmarks(&option);
            s.replace_bookmarks(&parsed, template)?;
            bookmark_option::rebuild(s);
            log::debug!(target: "item", "restored {} bookmarks", parsed.len());
            Ok(Some(parsed.len()))
        })
    }
}
