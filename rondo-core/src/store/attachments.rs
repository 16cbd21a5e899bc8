use rondo_types::Attachment;

use super::dup::{dup_slice, Duplicate};
use super::ItemState;
use crate::ControlError;

impl ItemState {
    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) {
        self.attachments = attachments;
    }

    /// Copy of every attachment; `Empty` when there are none.
    pub fn attachments_snapshot(&self) -> Result<Vec<Attachment>, ControlError> {
        if self.attachments.is_empty() {
            return Err(ControlError::Empty("attachments"));
        }
        dup_slice(&self.attachments)
    }

    /// Copy of the first attachment called `name`.
    pub fn attachment(&self, name: &str) -> Result<Attachment, ControlError> {
        self.attachments
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| ControlError::NotFound(format!("attachment '{}'", name)))?
            .duplicate()
    }
}
