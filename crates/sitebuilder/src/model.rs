//! # Domain Model: Sections, Pages and the Document
//!
//! This module defines the core data structures of the builder: [`Section`],
//! [`Page`] and [`Document`].
//!
//! ## Ordering
//!
//! A page's sections have two representations of order: their position in
//! `Page::sections` and their `order` field. List position is authoritative;
//! `order` is a mirror that must read `0..N-1` after every mutation. The
//! mirror exists because the export format carries it and importers sort by
//! it. [`Page::rerank`] restores the mirror after any structural change.
//!
//! ## Identity
//!
//! Section ids are unique within the whole document (not only within their
//! page), page ids are unique across the document. Ids are opaque strings;
//! see [`crate::ids`] for how fresh ones are minted.
//!
//! ## Document Invariants
//!
//! - `pages` is never empty.
//! - `current_page_id` names an existing page.
//!
//! The store layer (`commands`, `api`) is the only code that mutates a
//! document and is responsible for keeping both true.
//!
//! ## Wire Format
//!
//! ```text
//! { "id": "hero-...", "type": "hero", "props": { "title": ... }, "order": 0 }
//! ```
//!
//! A section is decoded through a lenient helper that tolerates a missing
//! `id`, `props` or `order` so that the import path can repair them instead
//! of rejecting the whole file.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::props::{SectionProps, SectionType};

/// Id of the page a fresh document starts with, and the fallback current
/// page of an import whose first page has no id.
pub const DEFAULT_PAGE_ID: &str = "home";

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub props: SectionProps,
    pub order: usize,
}

impl Section {
    pub fn new(id: String, props: SectionProps, order: usize) -> Self {
        Self { id, props, order }
    }

    pub fn type_tag(&self) -> &str {
        self.props.type_tag()
    }

    pub fn section_type(&self) -> Option<SectionType> {
        self.props.section_type()
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Section", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.type_tag())?;
        state.serialize_field("props", &self.props)?;
        state.serialize_field("order", &self.order)?;
        state.end()
    }
}

// Decoding goes through a helper so the type tag can pick the props record.
impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = SectionHelper::deserialize(deserializer)?;
        Ok(Section {
            id: helper.id.unwrap_or_default(),
            props: SectionProps::from_parts(&helper.section_type, helper.props),
            order: helper.order.unwrap_or(usize::MAX),
        })
    }
}

#[derive(Deserialize)]
struct SectionHelper {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    section_type: String,
    #[serde(default)]
    props: Map<String, Value>,
    #[serde(default)]
    order: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Rewrites every `order` field to match list position.
    pub fn rerank(&mut self) {
        for (index, section) in self.sections.iter_mut().enumerate() {
            section.order = index;
        }
    }

    /// True when `order` reads exactly `0..N-1` in list order.
    pub fn is_densely_ordered(&self) -> bool {
        self.sections
            .iter()
            .enumerate()
            .all(|(index, section)| section.order == index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
    pub current_page_id: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::with_home_page("Home")
    }
}

impl Document {
    /// A fresh document: one empty page with id [`DEFAULT_PAGE_ID`].
    pub fn with_home_page(name: &str) -> Self {
        Self {
            pages: vec![Page::new(DEFAULT_PAGE_ID, name)],
            current_page_id: DEFAULT_PAGE_ID.to_string(),
        }
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    pub fn page_index(&self, id: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    pub fn has_page(&self, id: &str) -> bool {
        self.page(id).is_some()
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.page(&self.current_page_id)
    }

    /// Points `current_page_id` at the first page if it names nothing.
    pub fn repair_current_page(&mut self) {
        if !self.has_page(&self.current_page_id) {
            if let Some(first) = self.pages.first() {
                self.current_page_id = first.id.clone();
            }
        }
    }

    /// All section ids across all pages, in page then list order.
    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter().map(|s| s.id.as_str()))
    }
}
