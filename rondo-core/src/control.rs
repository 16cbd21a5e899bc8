//! Control queue: producer side of the hand-off to the processing thread.
//!
//! The dispatcher builds a [`ControlCommand`] and pushes it without waiting;
//! the thread that owns the input drains the [`ControlReceiver`] and applies
//! commands in FIFO order. Input is validated before a command is built, so
//! only well-formed commands ever reach the queue.

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};
use rondo_types::{
    ControlCommand, ControlError, EsCategory, EsId, NavDirection, Slave, SlavePriority, Viewpoint,
};

use crate::subtitles::SubtitleFilter;

/// Create a control queue. `None` capacity means unbounded.
pub fn control_queue(capacity: Option<usize>) -> (ControlQueue, ControlReceiver) {
    let (tx, rx) = match capacity {
        Some(n) => crossbeam_channel::bounded(n),
        None => crossbeam_channel::unbounded(),
    };
    (ControlQueue { tx }, ControlReceiver { rx })
}

/// Producer half. Cheap to clone; every clone feeds the same queue.
#[derive(Clone)]
pub struct ControlQueue {
    tx: Sender<ControlCommand>,
}

impl ControlQueue {
    /// Hand a command to the processing thread without blocking.
    pub fn push(&self, cmd: ControlCommand) -> Result<(), ControlError> {
        match self.tx.try_send(cmd) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(cmd)) => {
                log::warn!(target: "control::queue", "control fifo overflow, dropping {}", cmd.name());
                Err(ControlError::QueueFull)
            }
            Err(TrySendError::Disconnected(cmd)) => {
                log::warn!(target: "control::queue", "processing thread gone, dropping {}", cmd.name());
                Err(ControlError::Disconnected)
            }
        }
    }

    pub fn nav(&self, direction: NavDirection) -> Result<(), ControlError> {
        self.push(ControlCommand::Nav(direction))
    }

    pub fn set_bookmark(&self, index: usize) -> Result<(), ControlError> {
        self.push(ControlCommand::SetBookmark(index))
    }

    pub fn restart_es(&self, id: EsId) -> Result<(), ControlError> {
        self.push(ControlCommand::RestartEs(id))
    }

    /// Queue an external audio or subtitle track.
    pub fn add_slave(&self, category: EsCategory, path: &str, forced: bool) -> Result<(), ControlError> {
        if path.is_empty() {
            return Err(ControlError::InvalidInput("slave path is empty".into()));
        }
        if !matches!(category, EsCategory::Audio | EsCategory::Subtitle) {
            return Err(ControlError::InvalidInput(format!(
                "slave category {:?} not supported",
                category
            )));
        }
        self.push(ControlCommand::AddSlave(Slave {
            category,
            path: path.to_string(),
            priority: SlavePriority::User,
            forced,
        }))
    }

    /// Queue a subtitle file. When `select` is set the path must also look
    /// like a subtitle file.
    pub fn add_subtitle(
        &self,
        path: &str,
        select: bool,
        filter: &SubtitleFilter,
    ) -> Result<(), ControlError> {
        if path.is_empty() {
            return Err(ControlError::InvalidInput("subtitle path is empty".into()));
        }
        if select && !filter.accepts(path) {
            return Err(ControlError::InvalidInput(format!("'{}' is not a subtitle file", path)));
        }
        self.push(ControlCommand::AddSubtitle { path: path.to_string(), select })
    }

    /// Queue a viewpoint change. The viewpoint is copied, so the caller's
    /// value can be reused as soon as this returns.
    pub fn update_viewpoint(&self, viewpoint: &Viewpoint, absolute: bool) -> Result<(), ControlError> {
        let boxed = Box::new(*viewpoint);
        if absolute {
            self.push(ControlCommand::SetViewpoint(boxed))
        } else {
            self.push(ControlCommand::UpdateViewpoint(boxed))
        }
    }
}

/// Consumer half, owned by the processing thread.
pub struct ControlReceiver {
    rx: Receiver<ControlCommand>,
}

impl ControlReceiver {
    /// Next command, blocking until one arrives. `None` once every producer is gone.
    pub fn recv(&self) -> Option<ControlCommand> {
        self.rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<ControlCommand> {
        match self.rx.try_recv() {
            Ok(cmd) => Some(cmd),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Every command currently queued, oldest first.
    pub fn drain(&self) -> Vec<ControlCommand> {
        self.rx.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_keep_fifo_order() {
        let (queue, rx) = control_queue(None);
        queue.nav(NavDirection::Up).unwrap();
        queue.set_bookmark(2).unwrap();
        queue.restart_es(EsId::new(7)).unwrap();
        assert_eq!(
            rx.drain(),
            vec![
                ControlCommand::Nav(NavDirection::Up),
                ControlCommand::SetBookmark(2),
                ControlCommand::RestartEs(EsId::new(7)),
            ]
        );
    }

    #[test]
    fn slave_validation_happens_before_enqueue() {
        let (queue, rx) = control_queue(None);
        assert!(queue.add_slave(EsCategory::Video, "/a/b.mkv", false).is_err());
        assert!(queue.add_slave(EsCategory::Audio, "", false).is_err());
        assert!(rx.is_empty());

        queue.add_slave(EsCategory::Audio, "/a/commentary.ogg", true).unwrap();
        match rx.try_recv() {
            Some(ControlCommand::AddSlave(slave)) => {
                assert_eq!(slave.priority, SlavePriority::User);
                assert!(slave.forced);
            }
            other => panic!("Expected AddSlave, got {:?}", other),
        }
    }

    #[test]
    fn subtitle_filter_applies_only_when_selecting() {
        let (queue, rx) = control_queue(None);
        let filter = SubtitleFilter::default();
        assert!(queue.add_subtitle("", false, &filter).is_err());
        assert!(queue.add_subtitle("/a/movie.mkv", true, &filter).is_err());
        queue.add_subtitle("/a/movie.mkv", false, &filter).unwrap();
        queue.add_subtitle("/a/movie.srt", true, &filter).unwrap();
        assert_eq!(rx.len(), 2);
    }

    #[test]
    fn full_queue_drops_without_blocking() {
        let (queue, rx) = control_queue(Some(1));
        queue.nav(NavDirection::Menu).unwrap();
        assert_eq!(queue.nav(NavDirection::Popup), Err(ControlError::QueueFull));
        assert_eq!(rx.drain(), vec![ControlCommand::Nav(NavDirection::Menu)]);
    }

    #[test]
    fn disconnected_consumer() {
        let (queue, rx) = control_queue(None);
        drop(rx);
        assert_eq!(queue.set_bookmark(0), Err(ControlError::Disconnected));
    }

    #[test]
    fn viewpoint_is_copied() {
        let (queue, rx) = control_queue(None);
        let mut vp = Viewpoint { yaw: 10.0, pitch: 0.0, roll: 0.0, fov: 80.0 };
        queue.update_viewpoint(&vp, true).unwrap();
        vp.yaw = 99.0;
        queue.update_viewpoint(&vp, false).unwrap();
        let cmds = rx.drain();
        assert!(matches!(&cmds[0], ControlCommand::SetViewpoint(v) if v.yaw == 10.0));
        assert!(matches!(&cmds[1], ControlCommand::UpdateViewpoint(v) if v.yaw == 99.0));
    }
}
