use rondo_types::{Attachment, Bookmark, Info, InfoCategory, Seekpoint, Title};

use crate::ControlError;

/// Fallible deep copy. Every buffer is reserved with `try_reserve`, so an
/// allocation failure surfaces as [`ControlError::OutOfMemory`] instead of
/// aborting, and the source is never touched.
pub trait Duplicate: Sized {
    fn duplicate(&self) -> Result<Self, ControlError>;
}

pub(crate) fn dup_str(s: &str) -> Result<String, ControlError> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())?;
    out.push_str(s);
    Ok(out)
}

fn dup_opt_str(s: &Option<String>) -> Result<Option<String>, ControlError> {
    s.as_deref().map(dup_str).transpose()
}

/// Deep copy of a slice into a vector sized exactly to it.
pub(crate) fn dup_slice<T: Duplicate>(items: &[T]) -> Result<Vec<T>, ControlError> {
    let mut out = Vec::new();
    out.try_reserve_exact(items.len())?;
    for item in items {
        out.push(item.duplicate()?);
    }
    Ok(out)
}

impl Duplicate for Seekpoint {
    fn duplicate(&self) -> Result<Self, ControlError> {
        Ok(Seekpoint {
            name: dup_opt_str(&self.name)?,
            time_offset: self.time_offset,
        })
    }
}

impl Duplicate for Bookmark {
    fn duplicate(&self) -> Result<Self, ControlError> {
        Ok(Bookmark {
            name: dup_str(&self.name)?,
            time_offset: self.time_offset,
        })
    }
}

impl Duplicate for Title {
    fn duplicate(&self) -> Result<Self, ControlError> {
        Ok(Title {
            name: dup_opt_str(&self.name)?,
            length: self.length,
            flags: self.flags,
            seekpoints: dup_slice(&self.seekpoints)?,
        })
    }
}

impl Duplicate for Attachment {
    fn duplicate(&self) -> Result<Self, ControlError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Attachment {
            name: dup_str(&self.name)?,
            mime: dup_str(&self.mime)?,
            description: dup_str(&self.description)?,
            data,
        })
    }
}

impl Duplicate for Info {
    fn duplicate(&self) -> Result<Self, ControlError> {
        Ok(Info {
            name: dup_str(&self.name)?,
            value: dup_str(&self.value)?,
        })
    }
}

impl Duplicate for InfoCategory {
    fn duplicate(&self) -> Result<Self, ControlError> {
        Ok(InfoCategory {
            name: dup_str(&self.name)?,
            infos: dup_slice(&self.infos)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rondo_types::Tick;

    use super::*;

    #[test]
    fn title_copy_is_independent() {
        let original = Title {
            name: Some("Main".into()),
            length: Tick::new(90 * 60 * 1_000_000),
            seekpoints: vec![Seekpoint::new("Opening", Tick::ZERO)],
            ..Title::default()
        };
        let mut copy = original.duplicate().unwrap();
        copy.seekpoints[0].name = Some("Changed".into());
        assert_eq!(original.seekpoints[0].name.as_deref(), Some("Opening"));
        assert_eq!(copy.length, original.length);
    }

    #[test]
    fn slice_copy_matches_source() {
        let marks = vec![
            Bookmark::new("a", Tick::new(1)),
            Bookmark::new("b", Tick::new(2)),
        ];
        let copy = dup_slice(&marks).unwrap();
        assert_eq!(copy, marks);
    }
}
