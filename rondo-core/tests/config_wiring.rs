use std::io::Write;
use std::sync::Arc;

use rondo_core::config::Config;
use rondo_core::var::MemoryVarStore;
use rondo_core::{EventSink, InputControl, MediaItem};
use rondo_types::{Bookmark, ControlError, NavDirection, Query, Reply, Seekpoint, Tick};

fn config_from(contents: &str) -> Config {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    Config::load_with_override(file.path())
}

#[test]
fn test_configured_template_and_capacity() {
    let config = config_from(
        "[bookmarks]\nname_template = \"Mark #{n}\"\n\n[control]\nqueue_capacity = 1\n",
    );
    let item = Arc::new(MediaItem::new("file:///media/a.mkv"));
    let (control, commands) =
        InputControl::from_config(&config, item, Arc::new(MemoryVarStore::new()));

    control.dispatch(Query::AddBookmark(Seekpoint::unnamed(Tick::ZERO))).unwrap();
    assert_eq!(
        control.dispatch(Query::GetBookmarks),
        Ok(Reply::Bookmarks(vec![Bookmark::new("Mark #0", Tick::ZERO)]))
    );

    control.dispatch(Query::Nav(NavDirection::Up)).unwrap();
    assert_eq!(control.dispatch(Query::Nav(NavDirection::Up)), Err(ControlError::QueueFull));
    assert_eq!(commands.len(), 1);
}

#[test]
fn test_configured_preparsing_and_extensions() {
    let config = config_from(
        "[control]\npreparsing = true\n\n[subtitles]\nextra_extensions = [\"lrc\"]\n",
    );
    let item = Arc::new(MediaItem::new("file:///media/song.flac"));
    let (sink, events) = EventSink::channel();
    let (control, commands) =
        InputControl::from_config(&config, item, Arc::new(MemoryVarStore::new()));
    let control = control.with_events(sink);

    control
        .dispatch(Query::AddInfo { category: "Meta".into(), name: "Artist".into(), value: "X".into() })
        .unwrap();
    assert!(events.try_recv().is_err());

    control
        .dispatch(Query::AddSubtitle { path: "/media/song.LRC".into(), select: true })
        .unwrap();
    assert_eq!(commands.len(), 1);
}
