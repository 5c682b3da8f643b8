//! Maps a [`Document`] onto backend keys and back.

use super::KeyValueBackend;
use crate::commands::transfer::normalize_pages;
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::model::{Document, Page};

pub const PAGES_KEY: &str = "website-builder-pages";
pub const CURRENT_PAGE_KEY: &str = "website-builder-current-page";
pub const TOUR_KEY: &str = "website-builder-tour-completed";

pub struct Persistence<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Writes the pages and then the current page id.
    ///
    /// If the second write fails the previous pages value is put back, so the
    /// store never pairs new pages with an old current page id.
    pub fn save(&self, doc: &Document) -> Result<()> {
        let pages = serde_json::to_string(&doc.pages)?;
        let previous = self.backend.get(PAGES_KEY)?;
        self.backend.set(PAGES_KEY, &pages)?;

        if let Err(e) = self.backend.set(CURRENT_PAGE_KEY, &doc.current_page_id) {
            let restored = match &previous {
                Some(old) => self.backend.set(PAGES_KEY, old),
                None => self.backend.remove(PAGES_KEY),
            };
            if let Err(restore_err) = restored {
                tracing::warn!(
                    error = %restore_err,
                    "could not restore saved pages after failed save"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    /// Reads the saved document, or `None` if nothing usable is stored.
    ///
    /// Stored pages go through the same normalization as an import, and a
    /// saved current page id that no longer exists falls back to the first
    /// page. A stored empty page list comes back as one page named
    /// `default_page_name`.
    pub fn load(&self, ids: &dyn IdGenerator, default_page_name: &str) -> Option<Document> {
        let raw = match self.backend.get(PAGES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved pages, starting fresh");
                return None;
            }
        };

        let mut pages: Vec<Page> = match serde_json::from_str(&raw) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(error = %e, "saved pages are corrupt, starting fresh");
                return None;
            }
        };
        if let Err(reason) = normalize_pages(&mut pages, ids, default_page_name) {
            tracing::warn!(%reason, "saved pages are inconsistent, starting fresh");
            return None;
        }

        let current_page_id = match self.backend.get(CURRENT_PAGE_KEY) {
            Ok(id) => id.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read saved current page");
                String::new()
            }
        };

        let mut doc = Document {
            pages,
            current_page_id,
        };
        doc.repair_current_page();
        tracing::debug!(
            pages = doc.pages.len(),
            current = %doc.current_page_id,
            "loaded document"
        );
        Some(doc)
    }

    /// True until [`mark_tour_seen`](Self::mark_tour_seen) has been called.
    pub fn is_first_visit(&self) -> bool {
        match self.backend.get(TOUR_KEY) {
            Ok(value) => value.as_deref() != Some("true"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read tour flag");
                true
            }
        }
    }

    pub fn mark_tour_seen(&self) -> Result<()> {
        self.backend.set(TOUR_KEY, "true")
    }

    /// Forgets the tour flag so the tour shows again.
    pub fn reset_tour(&self) -> Result<()> {
        self.backend.remove(TOUR_KEY)
    }
}
