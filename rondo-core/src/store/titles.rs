use rondo_types::{Seekpoint, Title};

use super::dup::{dup_slice, Duplicate};
use super::ItemState;
use crate::ControlError;

impl ItemState {
    /// Install the title list produced by the demuxer.
    pub fn set_titles(&mut self, titles: Vec<Title>) {
        self.titles = titles;
    }

    fn title_at(&self, offset: usize) -> Result<&Title, ControlError> {
        self.titles.get(offset).ok_or(ControlError::OutOfBounds {
            index: offset,
            len: self.titles.len(),
        })
    }

    /// Copy of the title at `offset`.
    pub fn title(&self, offset: usize) -> Result<Title, ControlError> {
        self.title_at(offset)?.duplicate()
    }

    /// Copy of every title; empty is a valid answer.
    pub fn titles_snapshot(&self) -> Result<Vec<Title>, ControlError> {
        dup_slice(&self.titles)
    }

    /// Copy of the seekpoints of the title at `offset` (possibly none).
    pub fn seekpoints(&self, offset: usize) -> Result<Vec<Seekpoint>, ControlError> {
        dup_slice(&self.title_at(offset)?.seekpoints)
    }
}

#[cfg(test)]
mod tests {
    use rondo_types::Tick;

    use super::*;

    fn two_titles() -> ItemState {
        let mut state = ItemState::default();
        state.set_titles(vec![
            Title {
                name: Some("Main".into()),
                seekpoints: vec![
                    Seekpoint::new("Chapter 1", Tick::ZERO),
                    Seekpoint::new("Chapter 2", Tick::new(300_000_000)),
                ],
                ..Title::default()
            },
            Title { name: Some("Extras".into()), ..Title::default() },
        ]);
        state
    }

    #[test]
    fn title_lookup_is_bounds_checked() {
        let state = two_titles();
        assert_eq!(state.title(1).unwrap().name.as_deref(), Some("Extras"));
        assert_eq!(
            state.title(2),
            Err(ControlError::OutOfBounds { index: 2, len: 2 })
        );
    }

    #[test]
    fn seekpoints_of_title_without_chapters() {
        let state = two_titles();
        assert_eq!(state.seekpoints(0).unwrap().len(), 2);
        assert!(state.seekpoints(1).unwrap().is_empty());
    }

    #[test]
    fn empty_title_list_snapshot_succeeds() {
        let state = ItemState::default();
        assert_eq!(state.titles_snapshot(), Ok(Vec::new()));
    }
}
