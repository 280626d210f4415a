use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::Stream;

/// Root configuration structure, deserialized from `.stig-mapper/config.toml`.
///
/// ```toml
/// [catalog]
/// path = "stig.json"
///
/// [inputs]
/// dependencies = "data/dependency_descriptions.json"
/// images = "data/image_details.json"
/// languages = "data/project_languages.json"
///
/// [output]
/// path = "data/used_stigs.json"
///
/// [classification]
/// parallel = true
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
}

#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Catalog JSON file. Defaults to `stig.json`.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("stig.json")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Input artifacts. A stream without a configured path is not read.
#[derive(Debug, Default, Deserialize)]
pub struct InputsConfig {
    pub dependencies: Option<PathBuf>,
    pub images: Option<PathBuf>,
    pub languages: Option<PathBuf>,
}

impl InputsConfig {
    pub fn path_for(&self, stream: Stream) -> Option<&Path> {
        match stream {
            Stream::Dependencies => self.dependencies.as_deref(),
            Stream::Images => self.images.as_deref(),
            Stream::Languages => self.languages.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the aggregate result as JSON. Not written when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ClassificationConfig {
    /// Classify each stream on the rayon thread pool. Defaults to `true`.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.stig-mapper/config.toml`
/// 3. `~/.config/stig-mapper/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".stig-mapper").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("stig-mapper").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Resolve `path` against the project directory unless it is already absolute.
pub fn resolve(project_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_path.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog.path, PathBuf::from("stig.json"));
        assert!(config.inputs.dependencies.is_none());
        assert!(config.output.path.is_none());
        assert!(config.classification.parallel);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[inputs]
images = "data/image_details.json"
"#,
        )
        .unwrap();

        assert_eq!(config.catalog.path, PathBuf::from("stig.json"));
        assert_eq!(
            config.inputs.path_for(Stream::Images),
            Some(Path::new("data/image_details.json"))
        );
        assert_eq!(config.inputs.path_for(Stream::Languages), None);
        assert!(config.classification.parallel);
    }

    #[test]
    fn test_project_config_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".stig-mapper");
        std::fs::create_dir(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[catalog]\npath = \"catalog/stig.json\"\n\n[classification]\nparallel = false\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("catalog/stig.json"));
        assert!(!config.classification.parallel);
    }

    #[test]
    fn test_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let override_path = dir.path().join("custom.toml");
        std::fs::write(&override_path, "[output]\npath = \"used_stigs.json\"\n").unwrap();

        let config = load_config(dir.path(), Some(&override_path)).unwrap();
        assert_eq!(config.output.path, Some(PathBuf::from("used_stigs.json")));
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let override_path = dir.path().join("broken.toml");
        std::fs::write(&override_path, "[classification]\nparallel = \"yes\"\n").unwrap();

        assert!(load_config(dir.path(), Some(&override_path)).is_err());
    }

    #[test]
    fn test_resolve() {
        let project = Path::new("/srv/app");
        assert_eq!(
            resolve(project, Path::new("stig.json")),
            PathBuf::from("/srv/app/stig.json")
        );
        assert_eq!(
            resolve(project, Path::new("/etc/stig.json")),
            PathBuf::from("/etc/stig.json")
        );
    }
}
