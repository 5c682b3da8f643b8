//! # Configuration
//!
//! Builder configuration is managed by [`confique`], which layers
//! environment variables over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SITEBUILDER_DATA_DIR`, `SITEBUILDER_EXPORT_PREFIX`, ...
//! 2. **Config file**: a `sitebuilder.toml` passed to [`SiteConfig::load`].
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where the key/value files live |
//! | `export_prefix` | `website-design` | Export file names are `{prefix}-{millis}.json` |
//! | `pretty_export` | `true` | Indent exported JSON |
//! | `default_page_name` | `Home` | Name of the page in a fresh or emptied document |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteError};

/// Configuration for the builder, stored in `sitebuilder.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory for persisted state. When absent, the OS data directory.
    #[config(env = "SITEBUILDER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Prefix of exported file names.
    #[config(env = "SITEBUILDER_EXPORT_PREFIX", default = "website-design")]
    pub export_prefix: String,

    /// Indent exported JSON.
    #[config(env = "SITEBUILDER_PRETTY_EXPORT", default = true)]
    pub pretty_export: bool,

    /// Name of the single page a fresh document starts with, also used when
    /// an import or the saved data holds no pages.
    #[config(env = "SITEBUILDER_DEFAULT_PAGE_NAME", default = "Home")]
    pub default_page_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_prefix: "website-design".to_string(),
            pretty_export: true,
            default_page_name: "Home".to_string(),
        }
    }
}

impl SiteConfig {
    /// Loads env, then the file at `path` if given, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = SiteConfig::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// The configured data directory, or the OS default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("com", "sitebuilder", "sitebuilder")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| SiteError::Config("Could not determine data directory".to_string()))
    }

    /// Export prefix with surrounding whitespace removed, or the default when blank.
    pub fn export_prefix(&self) -> &str {
        match self.export_prefix.trim() {
            "" => "website-design",
            prefix => prefix,
        }
    }

    /// Default page name, falling back to `Home` when blank.
    pub fn default_page_name(&self) -> &str {
        match self.default_page_name.trim() {
            "" => "Home",
            name => name,
        }
    }
}
