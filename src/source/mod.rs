//! Readers for the three input streams handed over by the upstream collectors.
//!
//! - [`dependencies`] — package descriptions grouped by ecosystem.
//! - [`images`] — container image metadata.
//! - [`languages`] — bare language identifiers for the project.
//!
//! Each reader turns one JSON artifact into [`Subject`]s. A failure here is
//! reported per stream and never touches the other streams.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::SourceError;
use crate::models::{Stream, Subject};

pub mod dependencies;
pub mod images;
pub mod languages;

pub trait SourceReader {
    fn stream(&self) -> Stream;

    fn read(&self, path: &Path) -> Result<Vec<Subject>, SourceError>;
}

/// The reader for `stream`.
pub fn reader_for(stream: Stream) -> Box<dyn SourceReader> {
    match stream {
        Stream::Dependencies => Box::new(dependencies::DependencyReader::new()),
        Stream::Images => Box::new(images::ImageReader::new()),
        Stream::Languages => Box::new(languages::LanguageReader::new()),
    }
}

fn read_json<T: DeserializeOwned>(stream: Stream, path: &Path) -> Result<T, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        stream,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Parse {
        stream,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, content.as_bytes()).unwrap();
    file
}
