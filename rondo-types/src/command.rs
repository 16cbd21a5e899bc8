//! Commands handed to the processing thread through the control queue.

use serde::{Deserialize, Serialize};

use crate::{EsCategory, EsId, NavDirection, Viewpoint};

/// Priority of a slave track. Tracks added through the control interface
/// always come from the user; automatic matching happens elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlavePriority {
    User,
}

/// An external audio or subtitle track to attach to the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slave {
    pub category: EsCategory,
    pub path: String,
    pub priority: SlavePriority,
    /// Select the track once it is loaded.
    pub forced: bool,
}

/// State-changing request executed later, in FIFO order, by the thread that
/// owns the input. Immutable once enqueued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlCommand {
    Nav(NavDirection),
    SetBookmark(usize),
    RestartEs(EsId),
    AddSlave(Slave),
    AddSubtitle { path: String, select: bool },
    /// Absolute viewpoint.
    SetViewpoint(Box<Viewpoint>),
    /// Relative viewpoint update.
    UpdateViewpoint(Box<Viewpoint>),
}

impl ControlCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ControlCommand::Nav(_) => "nav",
            ControlCommand::SetBookmark(_) => "set-bookmark",
            ControlCommand::RestartEs(_) => "restart-es",
            ControlCommand::AddSlave(_) => "add-slave",
            ControlCommand::AddSubtitle { .. } => "add-subtitle",
            ControlCommand::SetViewpoint(_) => "set-viewpoint",
            ControlCommand::UpdateViewpoint(_) => "update-viewpoint",
        }
    }
}
