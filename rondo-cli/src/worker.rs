//! Stand-in processing thread: drains the control queue and applies what
//! it can to the media item.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rondo_core::{ControlReceiver, MediaItem};
use rondo_types::{ControlCommand, Seekpoint};

/// Run until every producer is gone. Returns the number of commands seen.
pub fn spawn(commands: ControlReceiver, item: Arc<MediaItem>) -> JoinHandle<usize> {
    thread::spawn(move || {
        let mut seen = 0;
        while let Some(cmd) = commands.recv() {
            apply(&cmd, &item);
            seen += 1;
        }
        log::debug!(target: "control::queue", "processing thread done after {} commands", seen);
        seen
    })
}

fn apply(cmd: &ControlCommand, item: &MediaItem) {
    match cmd {
        ControlCommand::SetBookmark(index) => {
            let target = item
                .lock()
                .with(|s| s.bookmarks_snapshot())
                .ok()
                .and_then(|list| list.into_iter().nth(*index));
            match target {
                Some(bookmark) => {
                    log::info!(target: "control::queue", "jump to bookmark {} ({})", index, bookmark.name);
                    item.set_current_bookmark(Seekpoint::from(bookmark));
                }
                None => log::warn!(target: "control::queue", "no bookmark at index {}", index),
            }
        }
        other => log::info!(target: "control::queue", "applying {}", other.name()),
    }
}
