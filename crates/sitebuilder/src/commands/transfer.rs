//! # Export and Import
//!
//! The export file is the document's pages plus two metadata keys:
//!
//! ```text
//! {
//!   "pages": [ { "id", "name", "sections": [ { "id", "type", "props", "order" } ] } ],
//!   "timestamp": "2024-05-01T12:00:00.000Z",
//!   "version": "1.0"
//! }
//! ```
//!
//! ## Import Rules
//!
//! An import succeeds only if the bytes are UTF-8 JSON whose top level has a
//! `pages` array of well-formed pages. Unknown keys are ignored at every
//! level. Anything else is an [`SiteError::Import`] and the caller keeps its
//! current document.
//!
//! Accepted pages are normalized before use, so a hand-edited file can never
//! break the document invariants:
//!
//! 1. An empty `pages` array becomes a single page with id `home`, named
//!    after the configured default page name.
//! 2. A first page without an id gets `home` unless another page claims it;
//!    other pages without an id get fresh ids.
//! 3. Two pages with the same id reject the whole import.
//! 4. Sections are stably sorted by `order`, then re-ranked `0..N-1`.
//! 5. A section with no id, or an id already used earlier in the document,
//!    gets a fresh one. Fresh ids never collide with ids already in the
//!    file.
//!
//! A file produced by [`export`] is already normal, so importing it gives
//! back exactly the exported pages.

use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use crate::clock::Clock;
use crate::commands::helpers::fresh_id;
use crate::error::{Result, SiteError};
use crate::ids::IdGenerator;
use crate::model::{Document, Page, DEFAULT_PAGE_ID};

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Serialize)]
struct ExportPayload<'a> {
    pages: &'a [Page],
    timestamp: String,
    version: &'static str,
}

/// A ready-to-save export: suggested file name plus JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

pub fn export(doc: &Document, clock: &dyn Clock, prefix: &str, pretty: bool) -> Result<ExportFile> {
    let now = clock.now();
    let payload = ExportPayload {
        pages: &doc.pages,
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: EXPORT_VERSION,
    };
    let contents = if pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };

    Ok(ExportFile {
        file_name: format!("{}-{}.json", prefix, now.timestamp_millis()),
        contents,
    })
}

/// Pages read from an export file, with the page to open first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedDesign {
    pub pages: Vec<Page>,
    pub current_page_id: String,
}

impl ImportedDesign {
    pub fn into_document(self) -> Document {
        Document {
            pages: self.pages,
            current_page_id: self.current_page_id,
        }
    }
}

/// Parses and normalizes an export file.
///
/// `default_page_name` names the page created when the file has no pages.
pub fn import(
    bytes: &[u8],
    ids: &dyn IdGenerator,
    default_page_name: &str,
) -> Result<ImportedDesign> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SiteError::Import(format!("file is not valid UTF-8: {}", e)))?;
    let root: Value = serde_json::from_str(text)
        .map_err(|e| SiteError::Import(format!("file is not valid JSON: {}", e)))?;

    let Value::Object(mut root) = root else {
        return Err(SiteError::Import("top level is not an object".to_string()));
    };
    match root.get("version") {
        None => {}
        Some(Value::String(v)) if v == EXPORT_VERSION => {}
        Some(other) => tracing::warn!(version = %other, "importing design with unexpected version"),
    }

    let pages = match root.remove("pages") {
        Some(pages @ Value::Array(_)) => pages,
        Some(_) => return Err(SiteError::Import("\"pages\" is not an array".to_string())),
        None => return Err(SiteError::Import("missing \"pages\"".to_string())),
    };
    let mut pages: Vec<Page> = serde_json::from_value(pages)
        .map_err(|e| SiteError::Import(format!("malformed page: {}", e)))?;

    normalize_pages(&mut pages, ids, default_page_name).map_err(SiteError::Import)?;

    let current_page_id = pages
        .first()
        .map(|p| p.id.clone())
        .unwrap_or_else(|| DEFAULT_PAGE_ID.to_string());
    Ok(ImportedDesign {
        pages,
        current_page_id,
    })
}

/// Repairs ids and ordering in place. See the module docs for the rules.
///
/// `default_page_name` names the page created for an empty `pages` array.
pub fn normalize_pages(
    pages: &mut Vec<Page>,
    ids: &dyn IdGenerator,
    default_page_name: &str,
) -> std::result::Result<(), String> {
    if pages.is_empty() {
        pages.push(Page::new(DEFAULT_PAGE_ID, default_page_name));
    }

    let mut page_ids = HashSet::new();
    for page in pages.iter().filter(|p| !p.id.is_empty()) {
        if !page_ids.insert(page.id.clone()) {
            return Err(format!("duplicate page id \"{}\"", page.id));
        }
    }
    for (index, page) in pages.iter_mut().enumerate() {
        if !page.id.is_empty() {
            continue;
        }
        let id = if index == 0 && !page_ids.contains(DEFAULT_PAGE_ID) {
            DEFAULT_PAGE_ID.to_string()
        } else {
            fresh_id(ids, "page", |id| page_ids.contains(id))
        };
        page_ids.insert(id.clone());
        page.id = id;
    }

    for page in pages.iter_mut() {
        page.sections.sort_by_key(|s| s.order);
        page.rerank();
    }

    // Fresh section ids must also avoid explicit ids further down the file
    let mut taken: HashSet<String> = pages
        .iter()
        .flat_map(|p| p.sections.iter())
        .filter(|s| !s.id.is_empty())
        .map(|s| s.id.clone())
        .collect();
    let mut seen = HashSet::new();
    for section in pages.iter_mut().flat_map(|p| p.sections.iter_mut()) {
        if section.id.is_empty() || seen.contains(&section.id) {
            section.id = fresh_id(ids, section.type_tag(), |id| taken.contains(id));
            taken.insert(section.id.clone());
        }
        seen.insert(section.id.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::commands::{pages, sections};
    use crate::ids::SequentialIds;
    use crate::props::SectionType;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    fn sample_doc() -> Document {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        sections::add(&mut doc, &ids, "home", SectionType::Header).unwrap();
        sections::add(&mut doc, &ids, "home", SectionType::Hero).unwrap();
        pages::add(&mut doc, &ids, Some("Pricing")).unwrap();
        sections::add(&mut doc, &ids, "page-3", SectionType::Pricing).unwrap();
        sections::reorder(&mut doc, "home", 1, 0).unwrap();
        doc
    }

    #[test]
    fn export_shape() {
        let file = export(&sample_doc(), &clock(), "website-design", true).unwrap();
        assert_eq!(file.file_name, "website-design-1714564800000.json");

        let value: Value = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["timestamp"], "2024-05-01T12:00:00.000Z");
        assert_eq!(value["pages"].as_array().unwrap().len(), 2);
        assert_eq!(value["pages"][0]["sections"][0]["type"], "hero");
        assert_eq!(value["pages"][0]["sections"][0]["order"], 0);
    }

    #[test]
    fn export_then_import_is_identity_on_pages() {
        let doc = sample_doc();
        let file = export(&doc, &clock(), "website-design", false).unwrap();
        let imported = import(file.contents.as_bytes(), &SequentialIds::new(), "Home").unwrap();

        assert_eq!(imported.pages, doc.pages);
        assert_eq!(imported.current_page_id, "home");
    }

    #[test]
    fn import_rejects_missing_pages() {
        let err = import(br#"{"foo": 1}"#, &SequentialIds::new(), "Home").unwrap_err();
        assert!(matches!(err, SiteError::Import(_)));
    }

    #[test]
    fn import_rejects_non_array_pages() {
        let err = import(br#"{"pages": {"id": "x"}}"#, &SequentialIds::new(), "Home").unwrap_err();
        assert!(matches!(err, SiteError::Import(_)));
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(matches!(
            import(b"not json", &SequentialIds::new(), "Home"),
            Err(SiteError::Import(_))
        ));
        assert!(matches!(
            import(&[0xff, 0xfe, 0x00], &SequentialIds::new(), "Home"),
            Err(SiteError::Import(_))
        ));
        assert!(matches!(
            import(b"[1, 2]", &SequentialIds::new(), "Home"),
            Err(SiteError::Import(_))
        ));
    }

    #[test]
    fn import_rejects_malformed_page() {
        let ids = SequentialIds::new();
        let err = import(br#"{"pages": [{"id": "a"}]}"#, &ids, "Home").unwrap_err();
        assert!(matches!(err, SiteError::Import(_)));
    }

    #[test]
    fn import_rejects_duplicate_page_ids() {
        let data = json!({"pages": [{"id": "a", "name": "A"}, {"id": "a", "name": "B"}]});
        let err = import(data.to_string().as_bytes(), &SequentialIds::new(), "Home").unwrap_err();
        assert!(matches!(err, SiteError::Import(_)));
    }

    #[test]
    fn import_ignores_unknown_top_level_keys() {
        let data = json!({
            "pages": [{"id": "landing", "name": "Landing", "sections": []}],
            "version": "1.0",
            "theme": "dark"
        });
        let design = import(data.to_string().as_bytes(), &SequentialIds::new(), "Home").unwrap();
        assert_eq!(design.current_page_id, "landing");
    }

    #[test]
    fn import_empty_pages_falls_back_to_home() {
        let design = import(br#"{"pages": []}"#, &SequentialIds::new(), "Home").unwrap();
        assert_eq!(design.current_page_id, "home");
        assert_eq!(design.pages.len(), 1);
        assert_eq!(design.pages[0].name, "Home");
    }

    #[test]
    fn import_empty_pages_uses_given_default_name() {
        let design = import(br#"{"pages": []}"#, &SequentialIds::new(), "Start").unwrap();
        assert_eq!(design.pages[0].id, "home");
        assert_eq!(design.pages[0].name, "Start");
    }

    #[test]
    fn import_fresh_ids_avoid_ids_later_in_file() {
        let data = json!({"pages": [
            {"name": "First", "sections": [
                {"type": "hero", "props": {}, "order": 0},
            ]},
            {"name": "Second"},
            {"id": "page-2", "name": "Third", "sections": [
                {"id": "hero-1", "type": "hero", "props": {}, "order": 0},
            ]}
        ]});
        let design = import(data.to_string().as_bytes(), &SequentialIds::new(), "Home").unwrap();

        let page_ids: Vec<_> = design.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(page_ids, vec!["home", "page-1", "page-2"]);
        assert_eq!(design.pages[0].sections[0].id, "hero-2");
        assert_eq!(design.pages[2].sections[0].id, "hero-1");
    }

    #[test]
    fn import_first_page_without_id_yields_home_to_explicit_owner() {
        let data = json!({"pages": [{"name": "Start"}, {"id": "home", "name": "Real Home"}]});
        let design = import(data.to_string().as_bytes(), &SequentialIds::new(), "Home").unwrap();
        assert_eq!(design.pages[0].id, "page-1");
        assert_eq!(design.pages[1].id, "home");
    }

    #[test]
    fn import_first_page_without_id_becomes_home() {
        let data = json!({"pages": [{"name": "Start"}, {"name": "Second"}]});
        let design = import(data.to_string().as_bytes(), &SequentialIds::new(), "Home").unwrap();
        assert_eq!(design.current_page_id, "home");
        assert_eq!(design.pages[0].id, "home");
        assert_eq!(design.pages[1].id, "page-1");
    }

    #[test]
    fn import_repairs_order_and_section_ids() {
        let data = json!({"pages": [
            {"id": "a", "name": "A", "sections": [
                {"id": "s1", "type": "footer", "props": {}, "order": 7},
                {"type": "hero", "props": {}, "order": 2},
            ]},
            {"id": "b", "name": "B", "sections": [
                {"id": "s1", "type": "cta", "props": {}, "order": 0},
            ]}
        ]});
        let design = import(data.to_string().as_bytes(), &SequentialIds::new(), "Home").unwrap();

        let a = &design.pages[0];
        assert_eq!(a.sections[0].type_tag(), "hero");
        assert_eq!(a.sections[0].order, 0);
        assert_eq!(a.sections[0].id, "hero-1");
        assert_eq!(a.sections[1].id, "s1");
        assert_eq!(a.sections[1].order, 1);

        let b = &design.pages[1];
        assert_eq!(b.sections[0].id, "cta-2");
    }

    #[test]
    fn import_accepts_other_versions() {
        let data = json!({"pages": [{"id": "a", "name": "A"}], "version": "2.0"});
        assert!(import(data.to_string().as_bytes(), &SequentialIds::new(), "Home").is_ok());
    }
}
