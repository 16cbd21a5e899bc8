mod script;
mod worker;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use rondo_core::config::Config;
use rondo_core::var::MemoryVarStore;
use rondo_core::{EventSink, InputControl, MediaItem};
use rondo_types::{QueryResult, ResultCode};
use serde_json::json;

/// Open the first log file that can be created.
fn open_log_file(candidates: &[PathBuf]) -> Option<(PathBuf, File)> {
    candidates.iter().find_map(|path| {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        File::create(path).ok().map(|file| (path.clone(), file))
    })
}

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rondo")
        .join("rondo.log");
    let candidates = [log_path, std::env::temp_dir().join("rondo.log")];

    let Some((path, log_file)) = open_log_file(&candidates) else {
        eprintln!("rondo: cannot create a log file, logging disabled");
        return;
    };

    if let Err(e) = WriteLogger::init(log_level, simplelog::Config::default(), log_file) {
        eprintln!("rondo: failed to initialize logger: {}", e);
        return;
    }

    log::info!("rondo starting (log level: {:?}, log file: {})", log_level, path.display());
}

/// One output line per query.
fn render(code: u32, result: &QueryResult) -> serde_json::Value {
    let status = ResultCode::from(result);
    match result {
        Ok(reply) => json!({ "code": code, "result": status, "reply": reply }),
        Err(e) => json!({ "code": code, "result": status, "error": e.to_string() }),
    }
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    let Some(script_path) = args.iter().skip(1).find(|a| !a.starts_with('-')) else {
        eprintln!("usage: rondo [-v] <script.json>");
        std::process::exit(2);
    };
    let script = script::load(std::path::Path::new(script_path))?;

    let config = Config::load();
    let item = Arc::new(MediaItem::with_options(script.uri, script.options));
    log::info!(target: "item", "opened {}", item.uri());
    item.set_titles(script.titles);
    item.set_attachments(script.attachments);

    let (sink, events) = EventSink::channel();
    let (control, commands) =
        InputControl::from_config(&config, Arc::clone(&item), Arc::new(MemoryVarStore::new()));
    let control = control.with_events(sink);
    let processing = worker::spawn(commands, Arc::clone(&item));

    if let Err(e) = control.restore_bookmarks() {
        log::warn!(target: "item", "could not restore bookmarks: {}", e);
    }

    for query in script.queries {
        let result = control.dispatch_raw(query.code, query.args);
        println!("{}", render(query.code, &result));
    }

    drop(control);
    let applied = processing.join().unwrap_or(0);
    let events: Vec<_> = events.try_iter().collect();
    println!(
        "{}",
        json!({
            "applied_commands": applied,
            "events": events,
            "options": item.options(),
            "choices": item.bookmark_choices(),
        })
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use rondo_types::{ControlError, Reply};

    use super::*;

    #[test]
    fn render_success_and_failure() {
        let ok = render(0x05, &Ok(Reply::Rate(1000)));
        assert_eq!(ok["result"], "Success");
        assert_eq!(ok["reply"]["Rate"], 1000);

        let oom = render(0x18, &Err(ControlError::OutOfMemory));
        assert_eq!(oom["result"], "OutOfMemory");

        let err = render(0x99, &Err(ControlError::UnknownQuery(0x99)));
        assert_eq!(err["result"], "Generic");
        assert!(err.get("reply").is_none());
    }

    #[test]
    fn log_file_falls_back_to_next_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        File::create(&blocker).unwrap();

        let unusable = blocker.join("rondo.log");
        let fallback = dir.path().join("logs").join("rondo.log");
        let (path, _file) = open_log_file(&[unusable, fallback.clone()]).unwrap();
        assert_eq!(path, fallback);
        assert!(fallback.exists());
    }

    #[test]
    fn no_usable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        File::create(&blocker).unwrap();
        assert!(open_log_file(&[blocker.join("rondo.log")]).is_none());
    }
}
