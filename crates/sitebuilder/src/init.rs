//! # Startup
//!
//! Wires configuration, the filesystem backend and the API together.
//!
//! ## Data Directory Resolution
//!
//! [`initialize`] picks the directory holding the persisted keys:
//!
//! 1. `data_override`, when given (a host that manages its own storage).
//! 2. `data_dir` from the configuration (`SITEBUILDER_DATA_DIR` or the
//!    config file).
//! 3. The OS data directory for `sitebuilder`, via the `directories` crate.
//!
//! The directory is created lazily by the first write, so a host that only
//! reads never leaves an empty directory behind.

use crate::api::SiteApi;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::store::fs_backend::FsBackend;
use std::path::{Path, PathBuf};

pub struct SiteContext {
    pub api: SiteApi<FsBackend>,
    pub config: SiteConfig,
    pub data_dir: PathBuf,
}

/// Loads configuration and opens the saved document.
///
/// # Arguments
///
/// * `config_file` - Optional `sitebuilder.toml`; environment variables still
///   override it.
/// * `data_override` - Optional explicit data directory, bypassing the
///   configured and default locations.
pub fn initialize(
    config_file: Option<&Path>,
    data_override: Option<PathBuf>,
) -> Result<SiteContext> {
    let config = SiteConfig::load(config_file)?;
    let data_dir = match data_override {
        Some(dir) => dir,
        None => config.data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "opening site");

    let api = SiteApi::new(FsBackend::new(&data_dir), config.clone());
    Ok(SiteContext {
        api,
        config,
        data_dir,
    })
}
