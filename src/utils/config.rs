use super::format::Format;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "scrivener.toml";

/// main configuration for scrivener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrivenerConfig {
    /// directory holding fragment files, relative to the project root
    pub fragment_directory: PathBuf,

    /// markup format of fragments and the changelog
    pub format: Format,

    /// section titles offered in new fragments, in changelog order
    pub categories: Vec<String>,

    /// changelog file that collected entries are written into
    pub output_file: PathBuf,

    /// optional template file for new fragments, relative to the project root
    pub new_fragment_template: Option<PathBuf>,

    /// template for the title of a collected entry (`version`, `date`)
    pub entry_title_template: String,

    /// comment text marking where collected entries are inserted
    pub insert_marker: String,
}

impl Default for ScrivenerConfig {
    fn default() -> Self {
        Self {
            fragment_directory: PathBuf::from("changelog.d"),
            format: Format::Rst,
            categories: vec![
                "Removed".to_string(),
                "Added".to_string(),
                "Changed".to_string(),
                "Deprecated".to_string(),
                "Fixed".to_string(),
                "Security".to_string(),
            ],
            output_file: PathBuf::from("CHANGELOG.rst"),
            new_fragment_template: None,
            entry_title_template: "{% if version %}{{ version }} - {% endif %}{{ date }}"
                .to_string(),
            insert_marker: "scrivener-insert-here".to_string(),
        }
    }
}

impl ScrivenerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fragment_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fragment_directory = dir.into();
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    pub fn new_fragment_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.new_fragment_template = Some(path.into());
        self
    }

    pub fn entry_title_template(mut self, template: impl Into<String>) -> Self {
        self.entry_title_template = template.into();
        self
    }

    pub fn insert_marker(mut self, marker: impl Into<String>) -> Self {
        self.insert_marker = marker.into();
        self
    }

    /// load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::error::Error::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        let config: ScrivenerConfig =
            toml::from_str(&contents).map_err(|e| crate::error::Error::TomlParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(config)
    }

    /// find and load configuration file in the project
    ///
    /// returns default config if file is not found or cannot be parsed
    pub fn load_or_default<P: AsRef<Path>>(root: P) -> Self {
        match Self::find_config_file(&root) {
            Some(config_path) => match Self::load_from_file(&config_path) {
                Ok(config) => {
                    tracing::debug!(path = %config_path.display(), "loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!("{}, using default configuration", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// find configuration file in the project
    ///
    /// looks for `scrivener.toml` in the project root
    pub fn find_config_file<P: AsRef<Path>>(root: P) -> Option<PathBuf> {
        let config_path = root.as_ref().join(CONFIG_FILE_NAME);

        if config_path.is_file() {
            Some(config_path)
        } else {
            None
        }
    }

    pub fn fragment_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.fragment_directory)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output_file)
    }
}
