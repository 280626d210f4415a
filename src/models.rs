use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The input collection a [`Subject`] was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stream {
    Dependencies,
    Images,
    Languages,
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Dependencies => write!(f, "dependencies"),
            Stream::Images => write!(f, "images"),
            Stream::Languages => write!(f, "languages"),
        }
    }
}

/// One thing to classify: an output key plus the free text describing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub stream: Stream,
    /// Output key: package name, image identifier, or language name.
    pub key: String,
    /// Grouping the subject was listed under (the ecosystem for dependencies).
    pub group: Option<String>,
    /// `None` when the upstream collector found no description.
    pub text: Option<String>,
}

impl Subject {
    pub fn new(stream: Stream, key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            stream,
            key: key.into(),
            group: None,
            text: Some(text.into()),
        }
    }
}

/// Labels recognized per source key, serialized as a plain JSON object.
///
/// Append-only: [`AggregateResult::merge`] extends existing entries and never
/// replaces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateResult(BTreeMap<String, Vec<String>>);

impl AggregateResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `labels` under `key`.
    ///
    /// A new key takes `labels` exactly as classified, duplicates included.
    /// When the key is already present, only labels it did not hold before
    /// this call are appended.
    pub fn merge(&mut self, key: &str, labels: &[String]) {
        if labels.is_empty() {
            return;
        }
        match self.0.entry(key.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(labels.to_vec());
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get().len();
                let entry = entry.get_mut();
                for label in labels {
                    if !entry[..existing].contains(label) {
                        entry.push(label.clone());
                    }
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}
