use folio_editor::{ExportOptions, StoreKey, DEFAULT_BASENAME, DEFAULT_STORE_KEY};
use folio_export::{RenderOptions, Stylesheet, DEFAULT_MAX_NESTING_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Key the working document is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory holding stored documents
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Directory exports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Artifact file name stem
    #[serde(default = "default_basename")]
    pub basename: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub subject: String,

    #[serde(default)]
    pub keywords: String,

    /// Debounce window for saves
    #[serde(default = "default_autosave_ms")]
    pub autosave_ms: u64,

    /// Deepest card nesting rendered on export
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,

    #[serde(default = "default_image_max_width")]
    pub image_max_width: f32,

    #[serde(default = "default_image_max_height")]
    pub image_max_height: f32,
}

fn default_storage_key() -> String {
    DEFAULT_STORE_KEY.to_string()
}

fn default_data_dir() -> String {
    ".folio".to_string()
}

fn default_output_dir() -> String {
    "exports".to_string()
}

fn default_basename() -> String {
    DEFAULT_BASENAME.to_string()
}

fn default_autosave_ms() -> u64 {
    500
}

fn default_max_nesting_depth() -> usize {
    DEFAULT_MAX_NESTING_DEPTH
}

fn default_image_max_width() -> f32 {
    Stylesheet::default().image_max_width
}

fn default_image_max_height() -> f32 {
    Stylesheet::default().image_max_height
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn store_key(&self) -> StoreKey {
        StoreKey::new(self.storage_key.clone())
    }

    pub fn get_data_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.data_dir)
    }

    pub fn get_output_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.output_dir)
    }

    pub fn autosave_window(&self) -> Duration {
        Duration::from_millis(self.autosave_ms)
    }

    pub fn stylesheet(&self) -> Stylesheet {
        Stylesheet {
            image_max_width: self.image_max_width,
            image_max_height: self.image_max_height,
            ..Stylesheet::default()
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            stylesheet: self.stylesheet(),
            max_nesting_depth: self.max_nesting_depth,
            ..RenderOptions::default()
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            basename: self.basename.clone(),
            author: self.author.clone(),
            subject: self.subject.clone(),
            keywords: self.keywords.clone(),
            stylesheet: self.stylesheet(),
            max_nesting_depth: self.max_nesting_depth,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            basename: default_basename(),
            author: String::new(),
            subject: String::new(),
            keywords: String::new(),
            autosave_ms: default_autosave_ms(),
            max_nesting_depth: default_max_nesting_depth(),
            image_max_width: default_image_max_width(),
            image_max_height: default_image_max_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storageKey": "portfolio",
            "outputDir": "dist",
            "basename": "resume",
            "author": "Ada",
            "maxNestingDepth": 3,
            "imageMaxWidth": 200
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_key(), StoreKey::new("portfolio"));
        assert_eq!(config.output_dir, "dist");
        assert_eq!(config.data_dir, ".folio");
        assert_eq!(config.max_nesting_depth, 3);

        let options = config.export_options();
        assert_eq!(options.basename, "resume");
        assert_eq!(options.author, "Ada");
        assert_eq!(options.stylesheet.image_max_width, 200.0);
        assert_eq!(options.stylesheet.image_max_height, 320.0);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_key, "folio-document");
        assert_eq!(config.basename, "folio-export");
        assert_eq!(config.autosave_window(), Duration::from_millis(500));
        assert_eq!(config.render_options().max_nesting_depth, 8);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }
}
