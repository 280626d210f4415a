use regex::Regex;

use crate::taxonomy::{Taxonomy, TechnologyGroup};

/// A catalog alias compiled for case-insensitive whole-word search.
///
/// The alias must be delimited by non-word characters or the ends of the
/// text. Unlike a plain `\b` anchor this also works for aliases that start or
/// end with punctuation, such as `.net` or `c++`.
#[derive(Debug, Clone)]
pub struct WordPattern {
    alias: String,
    regex: Regex,
}

impl WordPattern {
    pub fn new(alias: &str) -> Result<Self, regex::Error> {
        let alias = alias.trim().to_lowercase();
        let regex = Regex::new(&format!(
            r"(?i)(?:^|\W){}(?:\W|$)",
            regex::escape(&alias)
        ))?;
        Ok(Self { alias, regex })
    }

    /// The normalized (trimmed, lowercase) alias.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// True when any of `patterns` occurs as a whole word in `text`.
pub fn any_match(patterns: &[WordPattern], text: &str) -> bool {
    patterns.iter().any(|p| p.is_match(text))
}

/// All groups referenced by `text`, in catalog declaration order.
///
/// An empty result means nothing in the catalog was recognized.
pub fn match_groups<'t>(taxonomy: &'t Taxonomy, text: &str) -> Vec<&'t TechnologyGroup> {
    taxonomy
        .groups()
        .iter()
        .filter(|group| any_match(group.usage_names(), text))
        .collect()
}
