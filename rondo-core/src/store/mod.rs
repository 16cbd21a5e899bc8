//! Shared collection store of one media item.
//!
//! Bookmarks, titles, attachments, the current-bookmark snapshot, the
//! bookmark choice-list, option strings and info categories all live in one
//! [`ItemState`] behind one mutex, the [`ItemLock`]. A single lock keeps the
//! collections mutually consistent without any lock-ordering rules.
//!
//! Everything handed out of the lock is a deep copy built with
//! [`Duplicate`], so callers own what they receive.

mod attachments;
mod bookmarks;
mod dup;
mod info;
mod titles;

use std::sync::{Mutex, MutexGuard, PoisonError};

use rondo_types::{Attachment, Bookmark, Choice, InfoCategory, Seekpoint, Title};

pub use dup::Duplicate;

/// State guarded by the item lock.
#[derive(Debug, Default)]
pub struct ItemState {
    pub(crate) bookmarks: Vec<Bookmark>,
    /// Counter for synthesized bookmark names; never decreases.
    pub(crate) next_bookmark_number: u64,
    pub(crate) current_bookmark: Seekpoint,
    pub(crate) bookmark_choices: Vec<Choice>,
    pub(crate) titles: Vec<Title>,
    pub(crate) attachments: Vec<Attachment>,
    pub(crate) options: Vec<String>,
    pub(crate) info: Vec<InfoCategory>,
}

impl ItemState {
    pub fn with_options(options: Vec<String>) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn bookmark_choices(&self) -> &[Choice] {
        &self.bookmark_choices
    }

    /// Append an option unless an identical one is already present.
    pub fn add_unique_option(&mut self, option: &str) {
        if !self.options.iter().any(|o| o == option) {
            self.options.push(option.to_string());
        }
    }
}

/// The item lock: one mutex over the whole [`ItemState`], acquired through
/// scoped accessors only.
#[derive(Debug, Default)]
pub struct ItemLock {
    state: Mutex<ItemState>,
}

impl ItemLock {
    pub fn new(state: ItemState) -> Self {
        Self { state: Mutex::new(state) }
    }

    /// Acquire the lock. Mutations are duplicate-then-swap, so the state
    /// behind a poisoned lock is still consistent and is recovered.
    pub fn lock(&self) -> MutexGuard<'_, ItemState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` inside one critical section.
    pub fn with<R>(&self, f: impl FnOnce(&mut ItemState) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }
}
