use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::SourceError;
use crate::models::{Stream, Subject};

/// Package descriptions keyed by ecosystem, e.g.
/// `{"python": [{"name": "requests", "description": "HTTP for Humans."}], "go": []}`.
type DescriptionFile = BTreeMap<String, Vec<DependencyEntry>>;

/// The collectors write either records or `[name, description]` pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DependencyEntry {
    Record {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
    Pair(String, Option<String>),
}

impl DependencyEntry {
    fn into_parts(self) -> (String, Option<String>) {
        match self {
            DependencyEntry::Record { name, description } => (name, description),
            DependencyEntry::Pair(name, description) => (name, description),
        }
    }
}

/// Reads `dependency_descriptions.json`.
///
/// Classification text is `"<name>. <description>"`, keyed by package name.
/// A blank description, or the registry placeholder `-`, counts as missing;
/// such subjects carry no text. An ecosystem with no packages yields a single
/// text-less subject keyed by the ecosystem itself.
#[derive(Debug, Default)]
pub struct DependencyReader;

impl DependencyReader {
    pub fn new() -> Self {
        Self
    }
}

impl super::SourceReader for DependencyReader {
    fn stream(&self) -> Stream {
        Stream::Dependencies
    }

    fn read(&self, path: &Path) -> Result<Vec<Subject>, SourceError> {
        let file: DescriptionFile = super::read_json(Stream::Dependencies, path)?;
        Ok(subjects_from(file))
    }
}

fn subjects_from(file: DescriptionFile) -> Vec<Subject> {
    let mut subjects = Vec::new();

    for (language, entries) in file {
        if entries.is_empty() {
            subjects.push(Subject {
                stream: Stream::Dependencies,
                key: language.clone(),
                group: Some(language),
                text: None,
            });
            continue;
        }

        for entry in entries {
            let (name, description) = entry.into_parts();
            let text = description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty() && d != "-")
                .map(|d| format!("{}. {}", name, d));

            subjects.push(Subject {
                stream: Stream::Dependencies,
                key: name,
                group: Some(language.clone()),
                text,
            });
        }
    }

    subjects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{write_temp, SourceReader};

    #[test]
    fn test_records_and_pairs() {
        let file = write_temp(
            r#"{
                "python": [{"name": "pyopenssl", "description": "Python wrapper module around the OpenSSL library"}],
                "javascript": [["express", "Fast, unopinionated, minimalist web framework"]]
            }"#,
        );

        let subjects = DependencyReader::new().read(file.path()).unwrap();
        assert_eq!(subjects.len(), 2);

        // ecosystems come out sorted
        assert_eq!(subjects[0].key, "express");
        assert_eq!(subjects[0].group.as_deref(), Some("javascript"));
        assert_eq!(
            subjects[0].text.as_deref(),
            Some("express. Fast, unopinionated, minimalist web framework")
        );
        assert_eq!(subjects[1].key, "pyopenssl");
        assert_eq!(subjects[1].group.as_deref(), Some("python"));
    }

    #[test]
    fn test_missing_descriptions() {
        let file = write_temp(
            r#"{
                "rust": [
                    {"name": "serde"},
                    {"name": "tokio", "description": null},
                    ["rand", "-"],
                    ["regex", "   "]
                ]
            }"#,
        );

        let subjects = DependencyReader::new().read(file.path()).unwrap();
        assert_eq!(subjects.len(), 4);
        assert!(subjects.iter().all(|s| s.text.is_none()));
    }

    #[test]
    fn test_empty_ecosystem_placeholder() {
        let file = write_temp(r#"{"go": []}"#);

        let subjects = DependencyReader::new().read(file.path()).unwrap();
        assert_eq!(
            subjects,
            vec![Subject {
                stream: Stream::Dependencies,
                key: "go".to_string(),
                group: Some("go".to_string()),
                text: None,
            }]
        );
    }

    #[test]
    fn test_malformed_file() {
        let file = write_temp(r#"{"python": "requests"}"#);
        let err = DependencyReader::new().read(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Parse { stream: Stream::Dependencies, .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DependencyReader::new()
            .read(&dir.path().join("dependency_descriptions.json"))
            .unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
