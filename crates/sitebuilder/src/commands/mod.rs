//! # Command Layer
//!
//! This module contains the **core business logic** of the builder. Each
//! group of operations lives in its own submodule and is a plain function
//! over a [`Document`](crate::model::Document).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Implement section and page mutations and keep the document invariants
//!   (dense `order`, unique ids, at least one page, valid current page)
//! - Build and parse the export file
//! - Return a structured [`CmdResult`] with the ids touched and the notices
//!   to show the user
//!
//! ## What Commands Do NOT Do
//!
//! - **Persistence**: writing the document back is the API's job
//! - **Atomicity**: the API hands commands a scratch copy and only keeps it
//!   when the command returns `Ok`
//! - **Selection**: which section the editor has open is UI state held by
//!   the API
//!
//! ## Errors vs. Misses
//!
//! A rejected request (blank page name, deleting the last page) is an
//! `Err(SiteError::Validation)`. Operating on an id that does not exist is a
//! reference miss: it is logged and returns `Ok` with no change, because it
//! only ever comes from a stale UI reference.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests build
//! documents directly with [`SequentialIds`](crate::ids::SequentialIds) so
//! ids are predictable.
//!
//! ## Command Modules
//!
//! - [`sections`]: add, update, delete, reorder and clear sections
//! - [`pages`]: add, rename, duplicate, delete and navigate pages
//! - [`transfer`]: export file construction and import parsing
//! - [`helpers`]: shared lookups

use serde::Serialize;

pub mod helpers;
pub mod pages;
pub mod sections;
pub mod transfer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notice: a title line and a longer description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub title: String,
    pub content: String,
}

impl CmdMessage {
    fn new(level: MessageLevel, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn info(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, title, content)
    }

    pub fn success(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, title, content)
    }

    pub fn warning(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, title, content)
    }

    pub fn error(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, title, content)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CmdResult {
    /// Pages created or modified, by id.
    pub affected_pages: Vec<String>,
    /// Sections created or modified, by id.
    pub affected_sections: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pages(mut self, pages: Vec<String>) -> Self {
        self.affected_pages = pages;
        self
    }

    pub fn with_affected_sections(mut self, sections: Vec<String>) -> Self {
        self.affected_sections = sections;
        self
    }

    /// True when nothing was touched and nothing needs saying.
    pub fn is_empty(&self) -> bool {
        self.affected_pages.is_empty()
            && self.affected_sections.is_empty()
            && self.messages.is_empty()
    }
}
