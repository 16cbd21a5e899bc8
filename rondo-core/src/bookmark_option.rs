//! Persisted form of the bookmark list.
//!
//! The bookmarks of an item are mirrored in two places observers read: the
//! `bookmarks=` option string stored with the item, and the bookmark
//! choice-list. Both are rebuilt from scratch after every mutation, inside
//! the critical section that did the mutation.
//!
//! Option format: `bookmarks={name=Intro,time=12.500},{name=Credits,time=5400.000}`.
//! Names are written verbatim, so a name containing `}` or `,time=` does
//! not read back as the same bookmark.

use rondo_types::{Bookmark, Choice, Seekpoint, Tick};

use crate::store::ItemState;

/// Key prefix of the persisted option.
pub const OPTION_KEY: &str = "bookmarks=";

/// Render the bookmark list as an option string.
pub fn format_bookmarks(bookmarks: &[Bookmark]) -> String {
    let mut out = String::from(OPTION_KEY);
    for (i, bookmark) in bookmarks.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&format!(
            "{{name={},time={:.3}}}",
            bookmark.name,
            bookmark.time_offset.as_secs_f64()
        ));
    }
    out
}

/// Rebuild the choice-list and the option string from the bookmark list.
pub(crate) fn rebuild(state: &mut ItemState) {
    state.bookmark_choices.clear();
    for (i, bookmark) in state.bookmarks.iter().enumerate() {
        state.bookmark_choices.push(Choice {
            value: i as i64,
            label: bookmark.name.clone(),
        });
    }

    let option = format_bookmarks(&state.bookmarks);
    let mut replaced = false;
    state.options.retain_mut(|existing| {
        if !existing.starts_with(OPTION_KEY) {
            return true;
        }
        if replaced {
            return false;
        }
        *existing = option.clone();
        replaced = true;
        true
    });
    if !replaced {
        state.add_unique_option(&option);
    }
    log::debug!(target: "item", "bookmark list rebuilt ({} entries)", state.bookmarks.len());
}

/// Parse a persisted option back into seekpoints. Entries without a usable
/// time are skipped; entries without a name come back unnamed.
pub fn parse_bookmarks(option: &str) -> Vec<Seekpoint> {
    let Some(body) = option.strip_prefix(OPTION_KEY) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    let mut rest = body;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            log::warn!(target: "item", "unterminated bookmark entry: {}", &rest[start..]);
            break;
        };
        let entry = &rest[start + 1..start + len];
        rest = &rest[start + len + 1..];

        match parse_entry(entry) {
            Some(seekpoint) => out.push(seekpoint),
            None => log::warn!(target: "item", "skipping malformed bookmark entry '{}'", entry),
        }
    }
    out
}

fn parse_entry(entry: &str) -> Option<Seekpoint> {
    let mut name: Option<String> = None;
    let mut time: Option<Tick> = None;
    let mut last_was_name = false;

    for field in entry.split(',') {
        if let Some(value) = field.strip_prefix("name=") {
            name = Some(value.to_string());
            last_was_name = true;
        } else if let Some(value) = field.strip_prefix("time=") {
            let secs: f64 = value.trim().parse().ok()?;
            if !secs.is_finite() || secs < 0.0 {
                return None;
            }
            time = Some(Tick::from_secs_f64(secs));
            last_was_name = false;
        } else if last_was_name {
            // A comma inside the name
            if let Some(n) = name.as_mut() {
                n.push(',');
                n.push_str(field);
            }
        }
    }

    Some(Seekpoint { name, time_offset: time? })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_formats_bare_key() {
        assert_eq!(format_bookmarks(&[]), "bookmarks=");
    }

    #[test]
    fn times_have_millisecond_precision() {
        let marks = [
            Bookmark::new("Intro", Tick::new(12_500_000)),
            Bookmark::new("Credits", Tick::new(5_400_000_400)),
        ];
        assert_eq!(
            format_bookmarks(&marks),
            "bookmarks={name=Intro,time=12.500},{name=Credits,time=5400.000}"
        );
    }

    #[test]
    fn rebuild_replaces_existing_option_and_drops_duplicates() {
        let mut state = ItemState::with_options(vec![
            ":no-audio".to_string(),
            "bookmarks={name=old,time=1.000}".to_string(),
            "bookmarks={name=older,time=2.000}".to_string(),
        ]);
        state.bookmarks.push(Bookmark::new("new", Tick::new(3_000_000)));
        rebuild(&mut state);

        assert_eq!(
            state.options,
            vec![":no-audio", "bookmarks={name=new,time=3.000}"]
        );
        assert_eq!(
            state.bookmark_choices,
            vec![Choice { value: 0, label: "new".to_string() }]
        );
    }

    #[test]
    fn rebuild_appends_when_missing() {
        let mut state = ItemState::default();
        rebuild(&mut state);
        assert_eq!(state.options, vec!["bookmarks="]);
        assert!(state.bookmark_choices.is_empty());
    }

    #[test]
    fn parse_reads_back_formatted_option() {
        let marks = [
            Bookmark::new("Intro, part 1", Tick::new(12_500_000)),
            Bookmark::new("End", Tick::new(60_000_000)),
        ];
        let parsed = parse_bookmarks(&format_bookmarks(&marks));
        assert_eq!(
            parsed,
            vec![
                Seekpoint::new("Intro, part 1", Tick::new(12_500_000)),
                Seekpoint::new("End", Tick::new(60_000_000)),
            ]
        );
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let parsed = parse_bookmarks(
            "bookmarks={name=a,time=abc},{time=4.5},{name=b},\
             {name=c,time=NaN},{name=d,time=inf},{name=e,time=-1}",
        );
        assert_eq!(parsed, vec![Seekpoint::unnamed(Tick::new(4_500_000))]);
    }

    #[test]
    fn reserved_sequences_in_names_do_not_read_back() {
        let brace = [Bookmark::new("a}b", Tick::new(1_000_000))];
        assert!(parse_bookmarks(&format_bookmarks(&brace)).is_empty());

        let time = [Bookmark::new("x,time=2", Tick::new(1_000_000))];
        assert_eq!(
            parse_bookmarks(&format_bookmarks(&time)),
            vec![Seekpoint::new("x", Tick::new(1_000_000))]
        );
    }

    #[test]
    fn parse_ignores_other_options() {
        assert!(parse_bookmarks(":start-time=10").is_empty());
    }
}
