//! Raw `(code, args)` decoding into typed [`Query`] values.
//!
//! Every code has one fixed argument signature in
//! [`rondo_types::SIGNATURES`]. A call that does not match is a protocol
//! violation by the caller: it is logged and refused, never fatal.

use rondo_types::{
    Arg, ArgKind, EsCategory, EsId, PlayState, Query, QueryCode, Tick, TitleSelector,
};

use crate::ControlError;

/// Decode a raw query.
pub fn decode(code: u32, args: Vec<Arg>) -> Result<Query, ControlError> {
    let Some(query_code) = QueryCode::from_raw(code) else {
        log::error!(target: "control", "unknown query {:#x}", code);
        return Err(ControlError::UnknownQuery(code));
    };

    let signature = query_code.signature();
    if let Err(reason) = check_signature(signature, &args) {
        log::error!(target: "control", "query {:?} ({:#x}): {}", query_code, code, reason);
        return Err(ControlError::BadArguments { code, reason });
    }

    build(query_code, args).map_err(|reason| {
        log::error!(target: "control", "query {:?} ({:#x}): {}", query_code, code, reason);
        ControlError::BadArguments { code, reason }
    })
}

fn check_signature(signature: &[ArgKind], args: &[Arg]) -> Result<(), String> {
    if signature.len() != args.len() {
        return Err(format!(
            "expected {} arguments, got {}",
            signature.len(),
            args.len()
        ));
    }
    for (i, (kind, arg)) in signature.iter().zip(args).enumerate() {
        if !kind.accepts(arg) {
            return Err(format!("argument {} should be {:?}, got {:?}", i, kind, arg));
        }
    }
    Ok(())
}

/// Pulls arguments in signature order. The signature has already been
/// checked, so a kind mismatch here only means a table/decoder disagreement.
struct Args(std::vec::IntoIter<Arg>);

impl Args {
    fn take(&mut self) -> Result<Arg, String> {
        self.0.next().ok_or_else(|| "missing argument".to_string())
    }

    fn int(&mut self) -> Result<i64, String> {
        match self.take()? {
            Arg::Int(v) => Ok(v),
            other => Err(format!("expected Int, got {:?}", other)),
        }
    }

    fn float(&mut self) -> Result<f64, String> {
        match self.take()? {
            Arg::Float(v) => Ok(v),
            Arg::Int(v) => Ok(v as f64),
            other => Err(format!("expected Float, got {:?}", other)),
        }
    }

    fn boolean(&mut self) -> Result<bool, String> {
        match self.take()? {
            Arg::Bool(v) => Ok(v),
            other => Err(format!("expected Bool, got {:?}", other)),
        }
    }

    fn string(&mut self) -> Result<String, String> {
        match self.take()? {
            Arg::Str(v) => Ok(v),
            other => Err(format!("expected Str, got {:?}", other)),
        }
    }

    fn opt_string(&mut self) -> Result<Option<String>, String> {
        match self.take()? {
            Arg::Str(v) => Ok(Some(v)),
            Arg::Null => Ok(None),
            other => Err(format!("expected Str or Null, got {:?}", other)),
        }
    }

    fn index(&mut self) -> Result<usize, String> {
        let raw = self.int()?;
        usize::try_from(raw).map_err(|_| format!("index {} is negative", raw))
    }

    fn int32(&mut self) -> Result<i32, String> {
        let raw = self.int()?;
        i32::try_from(raw).map_err(|_| format!("{} out of range", raw))
    }
}

fn build(code: QueryCode, args: Vec<Arg>) -> Result<Query, String> {
    let mut a = Args(args.into_iter());
    let query = match code {
        QueryCode::GetPosition => Query::GetPosition,
        QueryCode::SetPosition => Query::SetPosition(a.float()?),
        QueryCode::GetLength => Query::GetLength,
        QueryCode::GetTime => Query::GetTime,
        QueryCode::SetTime => Query::SetTime(Tick::new(a.int()?)),
        QueryCode::GetRate => Query::GetRate,
        QueryCode::SetRate => Query::SetRate(a.int32()?),
        QueryCode::GetState => Query::GetState,
        QueryCode::SetState => {
            let raw = a.int()?;
            Query::SetState(PlayState::from_raw(raw).ok_or_else(|| format!("unknown state {}", raw))?)
        }
        QueryCode::GetAudioDelay => Query::GetAudioDelay,
        QueryCode::SetAudioDelay => Query::SetAudioDelay(Tick::new(a.int()?)),
        QueryCode::GetSpuDelay => Query::GetSpuDelay,
        QueryCode::SetSpuDelay => Query::SetSpuDelay(Tick::new(a.int()?)),

        QueryCode::AddInfo => Query::AddInfo {
            category: a.string()?,
            name: a.string()?,
            value: a.string()?,
        },
        QueryCode::ReplaceInfos => match a.take()? {
            Arg::InfoCategory(c) => Query::ReplaceInfos(c),
            other => return Err(format!("expected InfoCategory, got {:?}", other)),
        },
        QueryCode::MergeInfos => match a.take()? {
            Arg::InfoCategory(c) => Query::MergeInfos(c),
            other => return Err(format!("expected InfoCategory, got {:?}", other)),
        },
        QueryCode::DelInfo => Query::DelInfo {
            category: a.string()?,
            name: a.opt_string()?,
        },

        QueryCode::AddBookmark => match a.take()? {
            Arg::Seekpoint(s) => Query::AddBookmark(s),
            other => return Err(format!("expected Seekpoint, got {:?}", other)),
        },
        QueryCode::ChangeBookmark => {
            let bookmark = match a.take()? {
                Arg::Bookmark(b) => b,
                other => return Err(format!("expected Bookmark, got {:?}", other)),
            };
            Query::ChangeBookmark { bookmark, index: a.index()? }
        }
        QueryCode::DelBookmark => Query::DelBookmark(a.index()?),
        QueryCode::GetBookmarks => Query::GetBookmarks,
        QueryCode::ClearBookmarks => Query::ClearBookmarks,
        QueryCode::SetBookmark => Query::SetBookmark(a.index()?),
        QueryCode::GetBookmark => Query::GetBookmark,

        QueryCode::GetTitleInfo => Query::GetTitleInfo(TitleSelector::from_raw(a.int()?)),
        QueryCode::GetFullTitleInfo => Query::GetFullTitleInfo,
        QueryCode::GetSeekpoints => Query::GetSeekpoints(TitleSelector::from_raw(a.int()?)),

        QueryCode::AddSlave => {
            let raw = a.int()?;
            let category =
                EsCategory::from_raw(raw).ok_or_else(|| format!("unknown category {}", raw))?;
            Query::AddSlave { category, path: a.string()?, forced: a.boolean()? }
        }
        QueryCode::AddSubtitle => Query::AddSubtitle { path: a.string()?, select: a.boolean()? },

        QueryCode::GetAttachments => Query::GetAttachments,
        QueryCode::GetAttachment => Query::GetAttachment(a.string()?),

        QueryCode::SetRecordState => Query::SetRecordState(a.boolean()?),
        QueryCode::GetRecordState => Query::GetRecordState,

        QueryCode::RestartEs => Query::RestartEs(EsId::new(a.int32()?)),
        QueryCode::UpdateViewpoint => {
            let viewpoint = match a.take()? {
                Arg::Viewpoint(v) => v,
                other => return Err(format!("expected Viewpoint, got {:?}", other)),
            };
            Query::UpdateViewpoint { viewpoint, absolute: a.boolean()? }
        }

        QueryCode::NavActivate
        | QueryCode::NavUp
        | QueryCode::NavDown
        | QueryCode::NavLeft
        | QueryCode::NavRight
        | QueryCode::NavPopup
        | QueryCode::NavMenu => code
            .nav_direction()
            .map(Query::Nav)
            .ok_or_else(|| format!("{:?} has no direction", code))?,
    };
    Ok(query)
}

#[cfg(test)]
mod tests {
    use rondo_types::{Bookmark, NavDirection, ResultCode, Seekpoint};

    use super::*;

    #[test]
    fn unknown_code_is_generic() {
        let err = decode(0x99, vec![]).unwrap_err();
        assert_eq!(err, ControlError::UnknownQuery(0x99));
        assert_eq!(err.code(), ResultCode::Generic);
    }

    #[test]
    fn nav_codes_map_in_order() {
        for (i, direction) in NavDirection::ALL.iter().enumerate() {
            let code = QueryCode::NavActivate.as_raw() + i as u32;
            assert_eq!(decode(code, vec![]), Ok(Query::Nav(*direction)));
        }
    }

    #[test]
    fn wrong_argument_count_or_kind() {
        assert!(matches!(
            decode(QueryCode::DelBookmark.as_raw(), vec![]),
            Err(ControlError::BadArguments { .. })
        ));
        assert!(matches!(
            decode(QueryCode::DelBookmark.as_raw(), vec![Arg::Str("1".into())]),
            Err(ControlError::BadArguments { .. })
        ));
        assert!(matches!(
            decode(QueryCode::GetBookmarks.as_raw(), vec![Arg::Int(1)]),
            Err(ControlError::BadArguments { .. })
        ));
    }

    #[test]
    fn negative_bookmark_index_refused() {
        assert!(decode(QueryCode::DelBookmark.as_raw(), vec![Arg::Int(-1)]).is_err());
        assert!(decode(QueryCode::SetBookmark.as_raw(), vec![Arg::Int(-3)]).is_err());
    }

    #[test]
    fn negative_title_means_current() {
        assert_eq!(
            decode(QueryCode::GetSeekpoints.as_raw(), vec![Arg::Int(-1)]),
            Ok(Query::GetSeekpoints(TitleSelector::Current))
        );
        assert_eq!(
            decode(QueryCode::GetTitleInfo.as_raw(), vec![Arg::Int(2)]),
            Ok(Query::GetTitleInfo(TitleSelector::At(2)))
        );
    }

    #[test]
    fn position_accepts_integer() {
        assert_eq!(
            decode(QueryCode::SetPosition.as_raw(), vec![Arg::Int(1)]),
            Ok(Query::SetPosition(1.0))
        );
    }

    #[test]
    fn structured_arguments() {
        let bookmark = Bookmark::new("Intro", Tick::new(1_000_000));
        assert_eq!(
            decode(
                QueryCode::ChangeBookmark.as_raw(),
                vec![Arg::Bookmark(bookmark.clone()), Arg::Int(0)]
            ),
            Ok(Query::ChangeBookmark { bookmark, index: 0 })
        );
        assert_eq!(
            decode(
                QueryCode::AddBookmark.as_raw(),
                vec![Arg::Seekpoint(Seekpoint::unnamed(Tick::ZERO))]
            ),
            Ok(Query::AddBookmark(Seekpoint::unnamed(Tick::ZERO)))
        );
        assert_eq!(
            decode(QueryCode::DelInfo.as_raw(), vec![Arg::Str("General".into()), Arg::Null]),
            Ok(Query::DelInfo { category: "General".into(), name: None })
        );
    }

    #[test]
    fn slave_category_must_be_known() {
        let args = vec![Arg::Int(42), Arg::Str("/a.ogg".into()), Arg::Bool(false)];
        assert!(decode(QueryCode::AddSlave.as_raw(), args).is_err());
        let args = vec![Arg::Int(2), Arg::Str("/a.ogg".into()), Arg::Bool(false)];
        assert_eq!(
            decode(QueryCode::AddSlave.as_raw(), args),
            Ok(Query::AddSlave { category: EsCategory::Audio, path: "/a.ogg".into(), forced: false })
        );
    }
}
