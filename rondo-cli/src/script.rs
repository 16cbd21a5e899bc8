//! Query scripts: a media item description plus the raw queries to replay
//! against it.

use std::io;
use std::path::Path;

use rondo_types::{Arg, Attachment, Title};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Script {
    pub uri: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub titles: Vec<Title>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub queries: Vec<RawQuery>,
}

#[derive(Debug, Deserialize)]
pub struct RawQuery {
    pub code: u32,
    #[serde(default)]
    pub args: Vec<Arg>,
}

pub fn load(path: &Path) -> io::Result<Script> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents)
}

pub fn parse(contents: &str) -> io::Result<Script> {
    serde_json::from_str(contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
