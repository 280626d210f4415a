//! The technology catalog: groups → technologies → versions.
//!
//! - [`loader`] — reads and validates the catalog JSON into a [`Taxonomy`].
//! - [`coverage`] — compares a checklist listing against the catalog's labels.
//!
//! A [`Taxonomy`] is built once per run and only ever borrowed afterwards.
//! Every alias it holds is already compiled into a [`WordPattern`], so the
//! classifier never builds patterns per call.

pub mod coverage;
pub mod loader;

use crate::classify::matcher::WordPattern;

/// Immutable, validated catalog.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    groups: Vec<TechnologyGroup>,
}

/// A family of related technologies recognized by its usage names.
///
/// Always holds at least one technology; the first is the default.
#[derive(Debug, Clone)]
pub struct TechnologyGroup {
    usage_names: Vec<WordPattern>,
    technologies: Vec<Technology>,
}

/// One technology variant, disambiguated within its group by its type names.
///
/// Always holds at least one version; the first is the default.
#[derive(Debug, Clone)]
pub struct Technology {
    type_names: Vec<WordPattern>,
    versions: Vec<VersionInfo>,
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    number: WordPattern,
    full_name: String,
}

impl Taxonomy {
    pub fn groups(&self) -> &[TechnologyGroup] {
        &self.groups
    }

    /// Every canonical label in declaration order.
    pub fn full_names(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.technologies.iter())
            .flat_map(|t| t.versions.iter())
            .map(|v| v.full_name.as_str())
    }

    pub fn technology_count(&self) -> usize {
        self.groups.iter().map(|g| g.technologies.len()).sum()
    }

    pub fn version_count(&self) -> usize {
        self.full_names().count()
    }
}

impl TechnologyGroup {
    pub fn usage_names(&self) -> &[WordPattern] {
        &self.usage_names
    }

    pub fn technologies(&self) -> &[Technology] {
        &self.technologies
    }

    /// The technology adopted when no type name is found in the text.
    pub fn default_technology(&self) -> &Technology {
        &self.technologies[0]
    }

    /// First usage name, used to label the group in logs.
    pub fn name(&self) -> &str {
        self.usage_names
            .first()
            .map(WordPattern::alias)
            .unwrap_or("<unnamed>")
    }
}

impl Technology {
    pub fn type_names(&self) -> &[WordPattern] {
        &self.type_names
    }

    pub fn versions(&self) -> &[VersionInfo] {
        &self.versions
    }

    /// The version adopted when no version number is found in the text.
    pub fn default_version(&self) -> &VersionInfo {
        &self.versions[0]
    }
}

impl VersionInfo {
    pub fn number(&self) -> &WordPattern {
        &self.number
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}
