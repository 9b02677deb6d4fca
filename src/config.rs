use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from ~/.config/booknotectl/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Two-letter locale code for user-facing messages ("en" or "ja").
    /// Falls back to the LANG environment variable when unset.
    pub locale: Option<String>,

    #[serde(default)]
    pub notes: NotesConfig,
}

/// Configuration for note and cover-image output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Directory where notes are written
    #[serde(default = "default_notes_dir")]
    pub dir: PathBuf,

    /// Directory where downloaded cover images are written
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// Whether to download cover images locally
    #[serde(default = "default_download_images")]
    pub download_images: bool,

    /// Filename template, e.g. "{{title}}" or "{{title}} - {{authors}}"
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Path to a note template file; the built-in template is used when unset
    pub template_file: Option<PathBuf>,
}

fn default_notes_dir() -> PathBuf {
    PathBuf::from("Books")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("Books/Covers")
}

fn default_download_images() -> bool {
    true
}

fn default_filename_template() -> String {
    "{{title}}".to_string()
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: default_notes_dir(),
            image_dir: default_image_dir(),
            download_images: default_download_images(),
            filename_template: default_filename_template(),
            template_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default path (~/.config/booknotectl/config.toml)
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("booknotectl").join("config.toml"))
    }

    /// Get the notes directory, with CLI override taking precedence
    pub fn notes_dir(&self, cli_override: Option<&PathBuf>) -> PathBuf {
        cli_override.cloned().unwrap_or_else(|| self.notes.dir.clone())
    }

    /// Get the filename template, with CLI override taking precedence
    pub fn filename_template(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(String::from)
            .unwrap_or_else(|| self.notes.filename_template.clone())
    }

    /// Get the template file path, with CLI override taking precedence
    pub fn template_file(&self, cli_override: Option<&PathBuf>) -> Option<PathBuf> {
        cli_override.cloned().or_else(|| self.notes.template_file.clone())
    }
}
