use std::collections::BTreeMap;
use std::path::Path;

use crate::error::SourceError;
use crate::models::{Stream, Subject};

/// Reads `project_languages.json`, e.g. `{"Java": 71.4, "Kotlin": 28.6}`.
/// Only the keys are used; each language name is both the text and the key.
#[derive(Debug, Default)]
pub struct LanguageReader;

impl LanguageReader {
    pub fn new() -> Self {
        Self
    }
}

impl super::SourceReader for LanguageReader {
    fn stream(&self) -> Stream {
        Stream::Languages
    }

    fn read(&self, path: &Path) -> Result<Vec<Subject>, SourceError> {
        let languages: BTreeMap<String, serde_json::Value> =
            super::read_json(Stream::Languages, path)?;

        Ok(languages
            .into_keys()
            .map(|language| Subject::new(Stream::Languages, language.clone(), language))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{write_temp, SourceReader};

    #[test]
    fn test_keys_only() {
        let file = write_temp(r#"{"Python": 64.2, "Go": {"bytes": 1200}, "Shell": null}"#);

        let subjects = LanguageReader::new().read(file.path()).unwrap();
        let keys: Vec<&str> = subjects.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["Go", "Python", "Shell"]);
        assert_eq!(subjects[1].text.as_deref(), Some("Python"));
    }

    #[test]
    fn test_not_an_object() {
        let file = write_temp(r#"["Python", "Go"]"#);
        let err = LanguageReader::new().read(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Parse { stream: Stream::Languages, .. }));
    }
}
