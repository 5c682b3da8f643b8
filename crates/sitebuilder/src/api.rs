//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for every builder operation, whatever UI sits on top.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the document** and hands commands a scratch copy
//! - **Commits** the copy only when the command succeeds and actually changed
//!   something: save to the backend, swap in memory, notify subscribers
//! - **Holds UI state** that is not part of the document: the selected
//!   section and the subscriber list
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Presentation**: notices are returned as data, never printed
//! - **File reads**: the host reads an import file and passes the bytes in
//!
//! ## Commit Order
//!
//! ```text
//! clone ──> command ──Err──> discard copy, return Err
//!              │
//!              Ok ──> unchanged? ──yes──> return Ok
//!                        │
//!                        no ──> save ──Err──> discard copy, return Err
//!                                 │
//!                                 Ok ──> swap, fix selection, notify
//! ```
//!
//! Subscribers therefore only ever see documents that are already on disk.
//!
//! ## Selection
//!
//! The selected section must live on the current page. After every commit
//! a selection that no longer resolves there is dropped; an import always
//! drops it.
//!
//! ## Generic Over KeyValueBackend
//!
//! `SiteApi<B: KeyValueBackend>` is generic over the storage backend:
//! - Production: `SiteApi<FsBackend>`
//! - Testing: `SiteApi<MemBackend>`

use crate::clock::{Clock, SystemClock};
use crate::commands::transfer::{self, ExportFile};
use crate::commands::{self, CmdMessage, CmdResult};
use crate::config::SiteConfig;
use crate::error::Result;
use crate::ids::{IdGenerator, TimeRandomIds};
use crate::links::{self, LinkTarget};
use crate::model::{Document, Page, Section};
use crate::props::{SectionProps, SectionType};
use crate::store::persistence::Persistence;
use crate::store::sink::FileSink;
use crate::store::KeyValueBackend;

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&Document)>;

/// The main API facade for builder operations.
pub struct SiteApi<B: KeyValueBackend> {
    doc: Document,
    persistence: Persistence<B>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    config: SiteConfig,
    selected: Option<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl<B: KeyValueBackend> SiteApi<B> {
    /// Opens the builder on `backend` with real ids and wall-clock time.
    pub fn new(backend: B, config: SiteConfig) -> Self {
        Self::with_collaborators(
            backend,
            config,
            Box::new(TimeRandomIds::new()),
            Box::new(SystemClock),
        )
    }

    /// Opens the builder with explicit id and time sources.
    ///
    /// Loads the saved document, or starts from a single default page when
    /// nothing usable is stored.
    pub fn with_collaborators(
        backend: B,
        config: SiteConfig,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let persistence = Persistence::new(backend);
        let default_name = config.default_page_name();
        let doc = persistence.load(ids.as_ref(), default_name).unwrap_or_else(|| {
            tracing::debug!("no saved document, starting fresh");
            Document::with_home_page(default_name)
        });

        Self {
            doc,
            persistence,
            ids,
            clock,
            config,
            selected: None,
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    // --- Reads ---

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn pages(&self) -> &[Page] {
        &self.doc.pages
    }

    pub fn current_page_id(&self) -> &str {
        &self.doc.current_page_id
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.doc.current_page()
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    // --- Sections ---

    pub fn add_section(&mut self, page_id: &str, section_type: SectionType) -> Result<CmdResult> {
        self.apply("add_section", |doc, ids| {
            commands::sections::add(doc, ids, page_id, section_type)
        })
    }

    pub fn update_section(
        &mut self,
        page_id: &str,
        section_id: &str,
        props: SectionProps,
    ) -> Result<CmdResult> {
        self.apply("update_section", |doc, _| {
            commands::sections::update(doc, page_id, section_id, props)
        })
    }

    pub fn delete_section(&mut self, page_id: &str, section_id: &str) -> Result<CmdResult> {
        self.apply("delete_section", |doc, _| {
            commands::sections::delete(doc, page_id, section_id)
        })
    }

    pub fn reorder_section(
        &mut self,
        page_id: &str,
        drag_index: usize,
        hover_index: usize,
    ) -> Result<CmdResult> {
        self.apply("reorder_section", |doc, _| {
            commands::sections::reorder(doc, page_id, drag_index, hover_index)
        })
    }

    pub fn clear_sections(&mut self, page_id: &str) -> Result<CmdResult> {
        self.apply("clear_sections", |doc, _| {
            commands::sections::clear(doc, page_id)
        })
    }

    // --- Pages ---

    pub fn add_page(&mut self, name: Option<&str>) -> Result<CmdResult> {
        self.apply("add_page", |doc, ids| commands::pages::add(doc, ids, name))
    }

    pub fn rename_page(&mut self, page_id: &str, name: &str) -> Result<CmdResult> {
        self.apply("rename_page", |doc, _| {
            commands::pages::rename(doc, page_id, name)
        })
    }

    pub fn duplicate_page(&mut self, page_id: &str) -> Result<CmdResult> {
        self.apply("duplicate_page", |doc, ids| {
            commands::pages::duplicate(doc, ids, page_id)
        })
    }

    pub fn delete_page(&mut self, page_id: &str) -> Result<CmdResult> {
        self.apply("delete_page", |doc, _| commands::pages::delete(doc, page_id))
    }

    pub fn navigate_to(&mut self, page_id: &str) -> Result<CmdResult> {
        self.apply("navigate_to", |doc, _| {
            commands::pages::navigate(doc, page_id)
        })
    }

    /// Resolves a link field and acts on it.
    ///
    /// Internal links to existing pages switch the current page. External
    /// URLs are returned for the host to open. Inert anchors and links to
    /// pages that no longer exist do nothing.
    pub fn follow_link(&mut self, link: &str) -> Result<LinkTarget> {
        let target = links::resolve(link);
        if let LinkTarget::Internal(page_id) = &target {
            if self.doc.has_page(page_id) {
                self.navigate_to(page_id)?;
            } else {
                tracing::warn!(
                    page_id = %page_id,
                    "link points at a page that does not exist, ignoring"
                );
            }
        }
        Ok(target)
    }

    // --- Selection ---

    /// Selects a section on the current page, or clears the selection.
    ///
    /// Returns false when the section is not on the current page; the
    /// selection is left unchanged then.
    pub fn select_section(&mut self, section_id: Option<&str>) -> bool {
        match section_id {
            None => {
                self.selected = None;
                true
            }
            Some(id) => {
                let on_page = self
                    .doc
                    .current_page()
                    .is_some_and(|p| p.section(id).is_some());
                if on_page {
                    self.selected = Some(id.to_string());
                } else {
                    tracing::warn!(
                        section_id = id,
                        "select_section: not on current page, ignoring"
                    );
                }
                on_page
            }
        }
    }

    pub fn selected_section(&self) -> Option<&Section> {
        let id = self.selected.as_deref()?;
        self.doc.current_page()?.section(id)
    }

    // --- Subscribers ---

    /// Registers a callback run with the new document after every commit.
    pub fn subscribe(&mut self, listener: impl FnMut(&Document) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // --- Export / Import ---

    /// Builds the export file for the whole document.
    pub fn export_design(&self) -> Result<ExportFile> {
        transfer::export(
            &self.doc,
            self.clock.as_ref(),
            self.config.export_prefix(),
            self.config.pretty_export,
        )
    }

    /// Exports and hands the file to `sink`. A document without any
    /// sections is not exported.
    pub fn export_to(&self, sink: &dyn FileSink) -> Result<CmdResult> {
        let section_count = self.doc.section_ids().count();
        let mut result = CmdResult::default();
        if section_count == 0 {
            result.add_message(CmdMessage::info(
                "Nothing to Export",
                "Add some sections to your page before exporting.",
            ));
            return Ok(result);
        }

        let file = self.export_design()?;
        let path = sink.deliver(&file)?;
        tracing::debug!(path = %path.display(), sections = section_count, "design exported");
        result.add_message(CmdMessage::success(
            "Design Exported Successfully!",
            format!(
                "Your website design with {} sections has been downloaded.",
                section_count
            ),
        ));
        Ok(result)
    }

    /// Replaces the whole document with an export file's contents.
    ///
    /// On any error the current document is kept as is.
    pub fn import_design(&mut self, bytes: &[u8]) -> Result<CmdResult> {
        let default_name = self.config.default_page_name();
        let design = match transfer::import(bytes, self.ids.as_ref(), default_name) {
            Ok(design) => design,
            Err(e) => {
                tracing::warn!(error = %e, "import rejected");
                return Err(e);
            }
        };

        let next = design.into_document();
        let affected = next.pages.iter().map(|p| p.id.clone()).collect();
        if next != self.doc {
            self.commit("import_design", next)?;
        }
        self.selected = None;

        let mut result = CmdResult::default().with_affected_pages(affected);
        result.add_message(CmdMessage::success(
            "Design Imported",
            "Your website design has been successfully loaded.",
        ));
        Ok(result)
    }

    // --- Onboarding ---

    pub fn is_first_visit(&self) -> bool {
        self.persistence.is_first_visit()
    }

    pub fn mark_tour_seen(&self) -> Result<()> {
        self.persistence.mark_tour_seen()
    }

    pub fn reset_tour(&self) -> Result<()> {
        self.persistence.reset_tour()
    }

    // --- Commit machinery ---

    fn apply<F>(&mut self, op: &str, command: F) -> Result<CmdResult>
    where
        F: FnOnce(&mut Document, &dyn IdGenerator) -> Result<CmdResult>,
    {
        let mut next = self.doc.clone();
        let result = command(&mut next, self.ids.as_ref())?;
        if next != self.doc {
            self.commit(op, next)?;
        }
        Ok(result)
    }

    fn commit(&mut self, op: &str, next: Document) -> Result<()> {
        if let Err(e) = self.persistence.save(&next) {
            tracing::warn!(op, error = %e, "save failed, keeping previous document");
            return Err(e);
        }
        self.doc = next;
        self.drop_stale_selection();
        tracing::debug!(op, current = %self.doc.current_page_id, "committed");

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.doc);
        }
        Ok(())
    }

    fn drop_stale_selection(&mut self) {
        if self.selected.is_some() && self.selected_section().is_none() {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::persistence::PAGES_KEY;
    use crate::test_utils::mem_api as api;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_fresh_document() {
        let api = api();
        assert_eq!(api.pages().len(), 1);
        assert_eq!(api.current_page_id(), "home");
        assert_eq!(api.current_page().unwrap().name, "Home");
        assert!(api.backend().is_empty());
    }

    #[test]
    fn test_mutation_is_written_through() {
        let mut api = api();
        api.add_section("home", SectionType::Hero).unwrap();
        let saved = api.backend().get(PAGES_KEY).unwrap().unwrap();
        assert!(saved.contains("hero-1"));
    }

    #[test]
    fn test_noop_does_not_save_or_notify() {
        let mut api = api();
        let calls = Rc::new(RefCell::new(0));
        let seen = calls.clone();
        api.subscribe(move |_| *seen.borrow_mut() += 1);

        api.delete_section("home", "ghost").unwrap();
        api.navigate_to("home").unwrap();
        assert_eq!(*calls.borrow(), 0);
        assert!(api.backend().is_empty());
    }

    #[test]
    fn test_save_failure_keeps_previous_document() {
        let mut api = api();
        api.add_section("home", SectionType::Hero).unwrap();
        let before = api.document().clone();

        api.backend().set_simulate_write_error(true);
        assert!(api.add_section("home", SectionType::Footer).is_err());
        assert_eq!(api.document(), &before);
    }

    #[test]
    fn test_validation_error_keeps_previous_document() {
        let mut api = api();
        let before = api.document().clone();
        assert!(api.delete_page("home").is_err());
        assert_eq!(api.document(), &before);
    }

    #[test]
    fn test_unsubscribe() {
        let mut api = api();
        let calls = Rc::new(RefCell::new(0));
        let seen = calls.clone();
        let id = api.subscribe(move |_| *seen.borrow_mut() += 1);

        api.add_page(None).unwrap();
        assert!(api.unsubscribe(id));
        assert!(!api.unsubscribe(id));
        api.add_page(None).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_select_requires_section_on_current_page() {
        let mut api = api();
        api.add_section("home", SectionType::Hero).unwrap();
        assert!(api.select_section(Some("hero-1")));
        assert_eq!(api.selected_section().unwrap().id, "hero-1");

        assert!(!api.select_section(Some("ghost")));
        assert_eq!(api.selected_section().unwrap().id, "hero-1");

        assert!(api.select_section(None));
        assert!(api.selected_section().is_none());
    }

    #[test]
    fn test_export_to_skips_empty_document() {
        struct PanicSink;
        impl FileSink for PanicSink {
            fn deliver(&self, _: &ExportFile) -> Result<std::path::PathBuf> {
                panic!("nothing should be delivered");
            }
        }

        let res = api().export_to(&PanicSink).unwrap();
        assert_eq!(res.messages[0].title, "Nothing to Export");
    }
}
