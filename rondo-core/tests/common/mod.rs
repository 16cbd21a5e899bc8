#![allow(dead_code)]
//! Test harness utilities for rondo-core integration tests.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use rondo_core::control::{control_queue, ControlReceiver};
use rondo_core::var::MemoryVarStore;
use rondo_core::{EventSink, InputControl, MediaItem};
use rondo_types::{Attachment, InputEvent, Seekpoint, Tick, Title, TitleFlags};

/// A controller wired to in-memory collaborators.
pub struct Harness {
    pub control: InputControl,
    pub commands: ControlReceiver,
    pub events: Receiver<InputEvent>,
    pub vars: Arc<MemoryVarStore>,
}

impl Harness {
    pub fn new() -> Self {
        Self::build(MediaItem::new("file:///media/movie.mkv"), None)
    }

    pub fn with_options(options: &[&str]) -> Self {
        let options = options.iter().map(|o| o.to_string()).collect();
        Self::build(MediaItem::with_options("file:///media/movie.mkv", options), None)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(MediaItem::new("file:///media/movie.mkv"), Some(capacity))
    }

    fn build(item: MediaItem, capacity: Option<usize>) -> Self {
        let vars = Arc::new(MemoryVarStore::new());
        let (queue, commands) = control_queue(capacity);
        let (sink, events) = EventSink::channel();
        let control = InputControl::new(Arc::new(item), vars.clone(), queue).with_events(sink);
        Self { control, commands, events, vars }
    }

    pub fn preparsing(mut self) -> Self {
        self.control = self.control.with_preparsing(true);
        self
    }

    pub fn drain_events(&self) -> Vec<InputEvent> {
        self.events.try_iter().collect()
    }
}

/// A title named `name` with `chapters` one-second-apart seekpoints.
pub fn make_title(name: &str, chapters: usize) -> Title {
    Title {
        name: Some(name.to_string()),
        length: Tick::new(3_600_000_000),
        flags: TitleFlags::default(),
        seekpoints: (0..chapters)
            .map(|i| Seekpoint::new(format!("Chapter {}", i + 1), Tick::new(i as i64 * 1_000_000)))
            .collect(),
    }
}

pub fn make_attachment(name: &str, mime: &str) -> Attachment {
    Attachment {
        name: name.to_string(),
        mime: mime.to_string(),
        description: String::new(),
        data: name.as_bytes().to_vec(),
    }
}

pub fn secs(s: i64) -> Tick {
    Tick::new(s * 1_000_000)
}
