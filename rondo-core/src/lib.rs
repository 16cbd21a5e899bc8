//! # rondo-core
//!
//! Control-query dispatcher and shared-state coordinator for a media input.
//! Answers control queries from any thread, keeps the item's bookmark,
//! title and attachment collections consistent under one lock, and hands
//! asynchronous requests to the processing thread over a control queue.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rondo_core::config::Config;
//! use rondo_core::dispatch::InputControl;
//! use rondo_core::item::MediaItem;
//! use rondo_core::var::MemoryVarStore;
//! use rondo_types::{Query, Seekpoint, Tick};
//!
//! // 1. Item and variable store, normally owned by the input
//! let item = Arc::new(MediaItem::new("file:///movie.mkv"));
//! let vars = Arc::new(MemoryVarStore::new());
//!
//! // 2. Controller plus the receiving end of its control queue
//! let config = Config::load();
//! let (control, commands) = InputControl::from_config(&config, item, vars);
//!
//! // 3. Dispatch queries from any thread
//! control.dispatch(Query::AddBookmark(Seekpoint::unnamed(Tick::new(5_000_000))))?;
//!
//! // 4. The processing thread drains `commands` and applies them in order
//! ```
//!
//! ## Module Overview
//!
//! - [`dispatch`]: `InputControl::dispatch()`, the single entry point for
//!   control queries, and the raw `(code, args)` decoder
//! - [`scalar`]: typed accessors over the variable store (position, time, rate, ...)
//! - [`var`]: `VarStore` trait and the in-memory store
//! - [`store`]: `ItemState` collections behind the item lock
//! - [`item`]: `MediaItem`, bookmark mutations with option/choice rebuild
//! - [`bookmark_option`]: `bookmarks=` option format and parser
//! - [`control`]: control queue producer and receiver
//! - [`events`]: `InputEvent` notification sink
//! - [`subtitles`]: subtitle file extension filter
//! - [`config`]: TOML configuration loading (embedded + user override)

pub mod bookmark_option;
pub mod config;
pub mod control;
pub mod dispatch;
pub mod events;
pub mod item;
pub mod scalar;
pub mod store;
pub mod subtitles;
pub mod var;

pub use rondo_types::ControlError;

pub use control::{control_queue, ControlQueue, ControlReceiver};
pub use dispatch::InputControl;
pub use events::EventSink;
pub use item::MediaItem;
