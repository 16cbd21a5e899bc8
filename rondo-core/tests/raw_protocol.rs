mod common;

use common::{secs, Harness};
use rondo_types::{Arg, Bookmark, ControlError, QueryCode, Reply, ResultCode, Seekpoint};

#[test]
fn test_unknown_code_is_generic_and_not_fatal() {
    let h = Harness::new();
    let err = h.control.dispatch_raw(0x1234, vec![]).unwrap_err();
    assert_eq!(err, ControlError::UnknownQuery(0x1234));
    assert_eq!(err.code(), ResultCode::Generic);

    // The controller keeps working afterwards.
    assert_eq!(
        h.control.dispatch_raw(QueryCode::GetRate.as_raw(), vec![]),
        Ok(Reply::Rate(1000))
    );
}

#[test]
fn test_rate_multipliers_round_trip() {
    let h = Harness::new();
    for rate in [2000, 1000, 500, 250] {
        h.control
            .dispatch_raw(QueryCode::SetRate.as_raw(), vec![Arg::Int(rate)])
            .unwrap();
        assert_eq!(
            h.control.dispatch_raw(QueryCode::GetRate.as_raw(), vec![]),
            Ok(Reply::Rate(rate as i32))
        );
    }
}

#[test]
fn test_zero_rate_is_rejected() {
    let h = Harness::new();
    let err = h
        .control
        .dispatch_raw(QueryCode::SetRate.as_raw(), vec![Arg::Int(0)])
        .unwrap_err();
    assert_eq!(err.code(), ResultCode::Generic);
}

#[test]
fn test_bookmark_session_over_raw_codes() {
    let h = Harness::new();
    let add = |s: Seekpoint| {
        h.control
            .dispatch_raw(QueryCode::AddBookmark.as_raw(), vec![Arg::Seekpoint(s)])
    };
    add(Seekpoint::new("Intro", secs(10))).unwrap();
    add(Seekpoint::unnamed(secs(20))).unwrap();

    h.control
        .dispatch_raw(
            QueryCode::ChangeBookmark.as_raw(),
            vec![Arg::Bookmark(Bookmark::new("Scene", secs(25))), Arg::Int(1)],
        )
        .unwrap();

    assert_eq!(
        h.control.dispatch_raw(QueryCode::GetBookmarks.as_raw(), vec![]),
        Ok(Reply::Bookmarks(vec![
            Bookmark::new("Intro", secs(10)),
            Bookmark::new("Scene", secs(25)),
        ]))
    );

    let err = h
        .control
        .dispatch_raw(QueryCode::DelBookmark.as_raw(), vec![Arg::Int(-1)])
        .unwrap_err();
    assert!(matches!(err, ControlError::BadArguments { .. }));
}

#[test]
fn test_argument_mismatch_is_generic() {
    let h = Harness::new();
    let err = h
        .control
        .dispatch_raw(QueryCode::AddSubtitle.as_raw(), vec![Arg::Str("/a.srt".into())])
        .unwrap_err();
    assert_eq!(err.code(), ResultCode::Generic);
    assert!(h.commands.is_empty());
}
