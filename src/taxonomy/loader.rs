use std::path::Path;

use serde::Deserialize;

use super::{Taxonomy, Technology, TechnologyGroup, VersionInfo};
use crate::classify::matcher::WordPattern;
use crate::error::LoadError;

// Raw catalog records. Every field is optional so that a missing one can be
// reported with its location instead of serde's bare "missing field".

#[derive(Debug, Deserialize)]
struct RawCatalog {
    technology_groups: Option<Vec<RawGroup>>,
}

#[derive(Debug, Deserialize)]
struct RawGroup {
    usage_names: Option<Vec<String>>,
    technologies: Option<Vec<RawTechnology>>,
}

#[derive(Debug, Deserialize)]
struct RawTechnology {
    // Optional: a technology without type names is never picked by name and
    // is only reached as its group's default.
    #[serde(default)]
    type_names: Vec<String>,
    versions: Option<Vec<RawVersion>>,
}

#[derive(Debug, Deserialize)]
struct RawVersion {
    number: Option<String>,
    full_name: Option<String>,
}

impl Taxonomy {
    /// Read and validate the catalog file at `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy = Self::from_json(&content)?;

        tracing::info!(
            path = %path.display(),
            groups = taxonomy.groups().len(),
            technologies = taxonomy.technology_count(),
            versions = taxonomy.version_count(),
            "catalog loaded"
        );

        Ok(taxonomy)
    }

    /// Build a taxonomy from catalog JSON.
    ///
    /// Fails when a group has no technologies, a technology has no versions,
    /// or a required string field is absent or blank. `type_names` is the one
    /// optional list and defaults to empty.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let raw: RawCatalog = serde_json::from_str(content)?;
        let raw_groups = raw
            .technology_groups
            .ok_or_else(|| LoadError::MissingField("technology_groups".to_string()))?;

        let groups = raw_groups
            .into_iter()
            .enumerate()
            .map(|(i, g)| build_group(&format!("technology_groups[{}]", i), g))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Taxonomy { groups })
    }
}

fn build_group(at: &str, raw: RawGroup) -> Result<TechnologyGroup, LoadError> {
    let usage_at = format!("{}.usage_names", at);
    let usage_names = raw
        .usage_names
        .ok_or_else(|| LoadError::MissingField(usage_at.clone()))?;
    let usage_names = compile_aliases(&usage_at, &usage_names)?;
    if usage_names.is_empty() {
        tracing::warn!(group = at, "group has no usage names and will never match");
    }

    let tech_at = format!("{}.technologies", at);
    let raw_technologies = raw
        .technologies
        .ok_or_else(|| LoadError::MissingField(tech_at.clone()))?;
    if raw_technologies.is_empty() {
        return Err(LoadError::NoTechnologies(at.to_string()));
    }

    let technologies = raw_technologies
        .into_iter()
        .enumerate()
        .map(|(i, t)| build_technology(&format!("{}[{}]", tech_at, i), t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TechnologyGroup {
        usage_names,
        technologies,
    })
}

fn build_technology(at: &str, raw: RawTechnology) -> Result<Technology, LoadError> {
    let type_names = compile_aliases(&format!("{}.type_names", at), &raw.type_names)?;

    let versions_at = format!("{}.versions", at);
    let raw_versions = raw
        .versions
        .ok_or_else(|| LoadError::MissingField(versions_at.clone()))?;
    if raw_versions.is_empty() {
        return Err(LoadError::NoVersions(at.to_string()));
    }

    let versions = raw_versions
        .into_iter()
        .enumerate()
        .map(|(i, v)| build_version(&format!("{}[{}]", versions_at, i), v))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Technology {
        type_names,
        versions,
    })
}

fn build_version(at: &str, raw: RawVersion) -> Result<VersionInfo, LoadError> {
    let number_at = format!("{}.number", at);
    let number = required(&number_at, raw.number)?;
    let full_name = required(&format!("{}.full_name", at), raw.full_name)?;

    Ok(VersionInfo {
        number: compile(&number_at, &number)?,
        full_name: full_name.trim().to_string(),
    })
}

fn required(at: &str, value: Option<String>) -> Result<String, LoadError> {
    let value = value.ok_or_else(|| LoadError::MissingField(at.to_string()))?;
    if value.trim().is_empty() {
        return Err(LoadError::BlankField(at.to_string()));
    }
    Ok(value)
}

fn compile_aliases(at: &str, aliases: &[String]) -> Result<Vec<WordPattern>, LoadError> {
    aliases
        .iter()
        .enumerate()
        .map(|(i, alias)| {
            let alias_at = format!("{}[{}]", at, i);
            if alias.trim().is_empty() {
                return Err(LoadError::BlankField(alias_at));
            }
            compile(&alias_at, alias)
        })
        .collect()
}

fn compile(at: &str, alias: &str) -> Result<WordPattern, LoadError> {
    WordPattern::new(alias).map_err(|source| LoadError::Pattern {
        path: at.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NGINX: &str = r#"{
        "technology_groups": [
            {
                "usage_names": ["nginx"],
                "technologies": [
                    {
                        "type_names": ["nginx"],
                        "versions": [
                            {"number": "1.18", "full_name": "nginx 1.18"},
                            {"number": "1.20", "full_name": "nginx 1.20"}
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_load_valid_catalog() {
        let taxonomy = Taxonomy::from_json(NGINX).unwrap();
        assert_eq!(taxonomy.groups().len(), 1);
        assert_eq!(taxonomy.technology_count(), 1);
        let names: Vec<&str> = taxonomy.full_names().collect();
        assert_eq!(names, vec!["nginx 1.18", "nginx 1.20"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, NGINX.as_bytes()).unwrap();

        let taxonomy = Taxonomy::load(file.path()).unwrap();
        assert_eq!(taxonomy.version_count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Taxonomy::load(&dir.path().join("stig.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_not_json() {
        let err = Taxonomy::from_json("technology_groups: []").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_group_without_technologies() {
        let json = r#"{"technology_groups": [{"usage_names": ["redis"], "technologies": []}]}"#;
        let err = Taxonomy::from_json(json).unwrap_err();
        match err {
            LoadError::NoTechnologies(at) => assert_eq!(at, "technology_groups[0]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_technology_without_versions() {
        let json = r#"{"technology_groups": [{"usage_names": ["redis"],
            "technologies": [{"type_names": ["redis"], "versions": []}]}]}"#;
        let err = Taxonomy::from_json(json).unwrap_err();
        match err {
            LoadError::NoVersions(at) => assert_eq!(at, "technology_groups[0].technologies[0]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_full_name() {
        let json = r#"{"technology_groups": [{"usage_names": ["redis"],
            "technologies": [{"versions": [{"number": "6"}]}]}]}"#;
        let err = Taxonomy::from_json(json).unwrap_err();
        match err {
            LoadError::MissingField(at) => {
                assert_eq!(at, "technology_groups[0].technologies[0].versions[0].full_name")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_usage_names() {
        let json = r#"{"technology_groups": [{"technologies": []}]}"#;
        let err = Taxonomy::from_json(json).unwrap_err();
        assert!(matches!(err, LoadError::MissingField(ref at) if at == "technology_groups[0].usage_names"));
    }

    #[test]
    fn test_missing_root() {
        let err = Taxonomy::from_json("{}").unwrap_err();
        assert!(matches!(err, LoadError::MissingField(ref at) if at == "technology_groups"));
    }

    #[test]
    fn test_blank_alias_rejected() {
        let json = r#"{"technology_groups": [{"usage_names": ["  "],
            "technologies": [{"versions": [{"number": "6", "full_name": "Redis 6"}]}]}]}"#;
        let err = Taxonomy::from_json(json).unwrap_err();
        assert!(matches!(err, LoadError::BlankField(ref at) if at == "technology_groups[0].usage_names[0]"));
    }

    #[test]
    fn test_type_names_optional() {
        let json = r#"{"technology_groups": [{"usage_names": ["redis"],
            "technologies": [{"versions": [{"number": "6", "full_name": "Redis 6"}]}]}]}"#;
        let taxonomy = Taxonomy::from_json(json).unwrap();
        assert!(taxonomy.groups()[0].technologies()[0].type_names().is_empty());
    }
}
