use rondo_types::{Bookmark, Seekpoint};

use super::dup::{dup_slice, Duplicate};
use super::ItemState;
use crate::ControlError;

/// Placeholder in bookmark name templates.
const NUMBER_PLACEHOLDER: &str = "{n}";

fn synthesize_name(template: &str, number: u64) -> String {
    if template.contains(NUMBER_PLACEHOLDER) {
        template.replace(NUMBER_PLACEHOLDER, &number.to_string())
    } else {
        format!("{} {}", template, number)
    }
}

fn name_bookmark(copy: Seekpoint, template: &str, next: &mut u64) -> Bookmark {
    let name = match copy.name {
        Some(name) => name,
        None => {
            let number = *next;
            *next += 1;
            synthesize_name(template, number)
        }
    };
    Bookmark { name, time_offset: copy.time_offset }
}

impl ItemState {
    /// Append a copy of `seekpoint`, naming it from `template` when it has
    /// no name. Returns the new bookmark's index.
    ///
    /// Space is reserved before the entry is built, so a failure leaves the
    /// collection as it was.
    pub fn add_bookmark(
        &mut self,
        seekpoint: &Seekpoint,
        template: &str,
    ) -> Result<usize, ControlError> {
        let copy = seekpoint.duplicate()?;
        self.bookmarks.try_reserve(1)?;

        let mut next = self.next_bookmark_number;
        let bookmark = name_bookmark(copy, template, &mut next);
        self.next_bookmark_number = next;
        self.bookmarks.push(bookmark);
        Ok(self.bookmarks.len() - 1)
    }

    /// Build the list that would replace the current one, plus the counter
    /// value after naming it. Reads only.
    pub fn build_bookmarks(
        &self,
        seekpoints: &[Seekpoint],
        template: &str,
    ) -> Result<(Vec<Bookmark>, u64), ControlError> {
        let mut next = self.next_bookmark_number;
        let mut built = Vec::new();
        built.try_reserve_exact(seekpoints.len())?;
        for seekpoint in seekpoints {
            built.push(name_bookmark(seekpoint.duplicate()?, template, &mut next));
        }
        Ok((built, next))
    }

    /// Replace the whole list with copies of `seekpoints`. Nothing changes
    /// unless every entry could be built.
    pub fn replace_bookmarks(
        &mut self,
        seekpoints: &[Seekpoint],
        template: &str,
    ) -> Result<(), ControlError> {
        let (built, next) = self.build_bookmarks(seekpoints, template)?;
        self.bookmarks = built;
        self.next_bookmark_number = next;
        Ok(())
    }

    /// Replace the bookmark at `index`. The new value is copied before the
    /// old one is released.
    pub fn change_bookmark(&mut self, index: usize, bookmark: &Bookmark) -> Result<(), ControlError> {
        let len = self.bookmarks.len();
        let slot = self
            .bookmarks
            .get_mut(index)
            .ok_or(ControlError::OutOfBounds { index, len })?;
        let copy = bookmark.duplicate()?;
        let old = std::mem::replace(slot, copy);
        drop(old);
        Ok(())
    }

    /// Remove the bookmark at `index`; later bookmarks shift down by one.
    pub fn delete_bookmark(&mut self, index: usize) -> Result<Bookmark, ControlError> {
        let len = self.bookmarks.len();
        if index >= len {
            return Err(ControlError::OutOfBounds { index, len });
        }
        Ok(self.bookmarks.remove(index))
    }

    pub fn clear_bookmarks(&mut self) {
        self.bookmarks = Vec::new();
    }

    /// Deep copy of every bookmark. An empty collection is the documented
    /// "no bookmarks" failure.
    pub fn bookmarks_snapshot(&self) -> Result<Vec<Bookmark>, ControlError> {
        if self.bookmarks.is_empty() {
            return Err(ControlError::Empty("bookmarks"));
        }
        dup_slice(&self.bookmarks)
    }

    pub fn current_bookmark(&self) -> Result<Seekpoint, ControlError> {
        self.current_bookmark.duplicate()
    }

    pub fn set_current_bookmark(&mut self, seekpoint: Seekpoint) {
        self.current_bookmark = seekpoint;
    }
}
