//! # sitebuilder
//!
//! The document core of a visual website builder. A site is a list of
//! [`Page`](model::Page)s, each an ordered list of
//! [`Section`](model::Section)s picked from a fixed catalog (header, hero,
//! pricing, footer, ...). This crate owns that document: every mutation,
//! its persistence to a local key/value store, and the JSON export format.
//! Rendering and editing forms live in the host.
//!
//! ## Architecture
//!
//! ```text
//! host UI ──> api::SiteApi ──> commands::* ──> model::Document
//!                  │
//!                  └──> store::Persistence ──> store::KeyValueBackend
//! ```
//!
//! - [`api`]: the single entry point. Runs commands on a scratch copy,
//!   saves, then publishes the new document to subscribers.
//! - [`commands`]: pure document transformations and the export/import
//!   format.
//! - [`store`]: key/value backends and the mapping of a document onto keys.
//! - [`model`], [`props`], [`catalog`]: the data and the section templates.
//! - [`links`], [`drag`]: link resolution and the drag-to-reorder adapter.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sitebuilder::api::SiteApi;
//! use sitebuilder::config::SiteConfig;
//! use sitebuilder::props::SectionType;
//! use sitebuilder::store::fs_backend::FsBackend;
//!
//! # fn main() -> sitebuilder::error::Result<()> {
//! let mut api = SiteApi::new(FsBackend::new("/tmp/my-site"), SiteConfig::default());
//! api.add_section("home", SectionType::Hero)?;
//! let file = api.export_design()?;
//! println!("{}", file.file_name);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod clock;
pub mod commands;
pub mod config;
pub mod drag;
pub mod error;
pub mod ids;
pub mod init;
pub mod links;
pub mod model;
pub mod props;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
