//! Query dispatch: the single entry point for control queries on an input.
//!
//! Synchronous queries are answered from the var store or the item store;
//! navigation, track and viewpoint queries are handed to the processing
//! thread through the control queue and return as soon as they are queued.

mod raw;

pub use raw::decode;

use std::sync::Arc;

use rondo_types::{Arg, Controller, InputEvent, Query, QueryResult, Reply, TitleSelector};

use crate::config::Config;
use crate::control::{control_queue, ControlQueue, ControlReceiver};
use crate::events::EventSink;
use crate::item::MediaItem;
use crate::scalar::Scalars;
use crate::subtitles::SubtitleFilter;
use crate::var::VarStore;
use crate::ControlError;

/// Default template for synthesized bookmark names.
pub const DEFAULT_BOOKMARK_TEMPLATE: &str = "Bookmark {n}";

/// Control surface of one input. Holds handles only; safe to share across
/// threads and call concurrently.
pub struct InputControl {
    item: Arc<MediaItem>,
    vars: Arc<dyn VarStore>,
    queue: ControlQueue,
    events: EventSink,
    preparsing: bool,
    subtitles: SubtitleFilter,
    bookmark_template: String,
}

impl InputControl {
    pub fn new(item: Arc<MediaItem>, vars: Arc<dyn VarStore>, queue: ControlQueue) -> Self {
        Self {
            item,
            vars,
            queue,
            events: EventSink::disabled(),
            preparsing: false,
            subtitles: SubtitleFilter::default(),
            bookmark_template: DEFAULT_BOOKMARK_TEMPLATE.to_string(),
        }
    }

    /// Build a controller and its control queue from configuration.
    pub fn from_config(
        config: &Config,
        item: Arc<MediaItem>,
        vars: Arc<dyn VarStore>,
    ) -> (Self, ControlReceiver) {
        let (queue, rx) = control_queue(config.queue_capacity());
        let control = Self {
            preparsing: config.preparsing(),
            subtitles: SubtitleFilter::with_extra(config.extra_subtitle_extensions()),
            bookmark_template: config.bookmark_name_template().to_string(),
            ..Self::new(item, vars, queue)
        };
        (control, rx)
    }

    pub fn with_events(mut self, events: EventSink) -> Self {
        self.events = events;
        self
    }

    pub fn with_preparsing(mut self, preparsing: bool) -> Self {
        self.preparsing = preparsing;
        self
    }

    pub fn item(&self) -> &Arc<MediaItem> {
        &self.item
    }

    /// Restore bookmarks persisted in the item's options and announce them.
    /// Any `bookmarks=` option rebuilds the list, so an empty one still
    /// notifies.
    pub fn restore_bookmarks(&self) -> Result<Option<usize>, ControlError> {
        let restored = self.item.restore_bookmarks(&self.bookmark_template)?;
        if restored.is_some() {
            self.events.emit(InputEvent::Bookmark);
        }
        Ok(restored)
    }

    /// Decode a raw `(code, args)` query and dispatch it.
    pub fn dispatch_raw(&self, code: u32, args: Vec<Arg>) -> QueryResult {
        let query = decode(code, args)?;
        self.dispatch(query)
    }

    pub fn dispatch(&self, query: Query) -> QueryResult {
        let code = query.code();
        let result = self.dispatch_inner(query);
        if let Err(e) = &result {
            log::debug!(target: "control", "query {:?} failed: {}", code, e);
        }
        result
    }

    fn scalars(&self) -> Scalars<'_> {
        Scalars::new(self.vars.as_ref())
    }

    fn dispatch_inner(&self, query: Query) -> QueryResult {
        let vars = self.scalars();
        match query {
            Query::GetPosition => Ok(Reply::Float(vars.position())),
            Query::SetPosition(p) => vars.set_position(p).map(done),
            Query::GetLength => Ok(Reply::Tick(vars.length())),
            Query::GetTime => Ok(Reply::Tick(vars.time())),
            Query::SetTime(t) => vars.set_time(t).map(done),
            Query::GetRate => Ok(Reply::Rate(vars.rate())),
            Query::SetRate(r) => vars.set_rate(r).map(done),
            Query::GetState => Ok(Reply::State(vars.state())),
            Query::SetState(s) => vars.set_state(s).map(done),
            Query::GetAudioDelay => Ok(Reply::Tick(vars.audio_delay())),
            Query::SetAudioDelay(d) => vars.set_audio_delay(d).map(done),
            Query::GetSpuDelay => Ok(Reply::Tick(vars.spu_delay())),
            Query::SetSpuDelay(d) => vars.set_spu_delay(d).map(done),
            Query::SetRecordState(on) => vars.set_record(on).map(done),
            Query::GetRecordState => Ok(Reply::Bool(vars.record())),

            Query::Nav(direction) => self.queue.nav(direction).map(done),

            Query::AddInfo { category, name, value } => {
                self.info_change(|s| s.add_info(&category, &name, &value))
            }
            Query::ReplaceInfos(category) => self.info_change(|s| s.replace_infos(&category)),
            Query::MergeInfos(category) => self.info_change(|s| s.merge_infos(&category)),
            Query::DelInfo { category, name } => {
                self.info_change(|s| s.del_info(&category, name.as_deref()))
            }

            Query::AddBookmark(seekpoint) => {
                self.bookmark_change(|| self.item.add_bookmark(&seekpoint, &self.bookmark_template).map(drop))
            }
            Query::ChangeBookmark { bookmark, index } => {
                self.bookmark_change(|| self.item.change_bookmark(index, &bookmark))
            }
            Query::DelBookmark(index) => self.bookmark_change(|| self.item.delete_bookmark(index)),
            Query::ClearBookmarks => self.bookmark_change(|| {
                self.item.clear_bookmarks();
                Ok(())
            }),
            Query::GetBookmarks => self
                .item
                .lock()
                .with(|s| s.bookmarks_snapshot())
                .map(Reply::Bookmarks),
            Query::GetBookmark => self
                .item
                .lock()
                .with(|s| s.current_bookmark())
                .map(Reply::Bookmark),
            Query::SetBookmark(index) => self.queue.set_bookmark(index).map(done),

            Query::GetTitleInfo(selector) => {
                let offset = self.resolve_title(selector);
                let title = self.item.lock().with(|s| s.title(offset))?;
                Ok(Reply::Title { offset, title })
            }
            Query::GetFullTitleInfo => self
                .item
                .lock()
                .with(|s| s.titles_snapshot())
                .map(Reply::Titles),
            Query::GetSeekpoints(selector) => {
                let title = self.resolve_title(selector);
                let seekpoints = self.item.lock().with(|s| s.seekpoints(title))?;
                Ok(Reply::Seekpoints { title, count: seekpoints.len(), seekpoints })
            }

            Query::AddSlave { category, path, forced } => {
                self.queue.add_slave(category, &path, forced).map(done)
            }
            Query::AddSubtitle { path, select } => {
                self.queue.add_subtitle(&path, select, &self.subtitles).map(done)
            }

            Query::GetAttachments => self
                .item
                .lock()
                .with(|s| s.attachments_snapshot())
                .map(Reply::Attachments),
            Query::GetAttachment(name) => self
                .item
                .lock()
                .with(|s| s.attachment(&name))
                .map(Reply::Attachment),

            Query::RestartEs(id) => self.queue.restart_es(id).map(done),
            Query::UpdateViewpoint { viewpoint, absolute } => {
                self.queue.update_viewpoint(&viewpoint, absolute).map(done)
            }
        }
    }

    /// `Current` reads the title variable; must run before the item lock
    /// is taken.
    fn resolve_title(&self, selector: TitleSelector) -> usize {
        match selector {
            TitleSelector::Current => self.scalars().current_title(),
            TitleSelector::At(offset) => offset,
        }
    }

    /// Run a bookmark mutation, then announce it once the lock is released.
    fn bookmark_change(&self, f: impl FnOnce() -> Result<(), ControlError>) -> QueryResult {
        f()?;
        self.events.emit(InputEvent::Bookmark);
        Ok(Reply::None)
    }

    fn info_change(
        &self,
        f: impl FnOnce(&mut crate::store::ItemState) -> Result<(), ControlError>,
    ) -> QueryResult {
        self.item.lock().with(f)?;
        if !self.preparsing {
            self.events.emit(InputEvent::MetaInfo);
        }
        Ok(Reply::None)
    }
}

impl Controller for InputControl {
    fn dispatch(&self, query: Query) -> QueryResult {
        InputControl::dispatch(self, query)
    }
}

fn done(_: ()) -> Reply {
    Reply::None
}
