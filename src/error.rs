use std::path::PathBuf;

use crate::models::Stream;

/// Failure to build a [`Taxonomy`](crate::taxonomy::Taxonomy) from its catalog file.
///
/// Every variant except `Io` and `Parse` carries the location of the offending
/// record, e.g. `technology_groups[2].technologies[0].versions`.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{0}` must not be blank")]
    BlankField(String),

    #[error("`{0}` declares no technologies")]
    NoTechnologies(String),

    #[error("`{0}` declares no versions")]
    NoVersions(String),

    #[error("invalid alias pattern at `{path}`: {source}")]
    Pattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure to read one input stream. Only the stream concerned is lost.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("{stream} input {path}: {source}")]
    Io {
        stream: Stream,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stream} input {path} is malformed: {source}")]
    Parse {
        stream: Stream,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
