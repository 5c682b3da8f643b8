//! Page mutations.
//!
//! Pages are appended in creation order. Adding or duplicating a page makes
//! the new page current; deleting the current page falls back to the first
//! remaining one. The document never drops to zero pages.

use crate::commands::helpers::{fresh_id, fresh_page_id, page_or_miss};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SiteError};
use crate::ids::IdGenerator;
use crate::links::dangling_links;
use crate::model::{Document, Page, Section};

/// Creates an empty page and makes it current.
///
/// A missing or blank name falls back to `"Page {n+1}"`.
pub fn add(doc: &mut Document, ids: &dyn IdGenerator, name: Option<&str>) -> Result<CmdResult> {
    let name = match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => format!("Page {}", doc.pages.len() + 1),
    };

    let page = Page::new(fresh_page_id(doc, ids), name);
    let page_id = page.id.clone();
    let mut result = CmdResult::default().with_affected_pages(vec![page_id.clone()]);
    result.add_message(CmdMessage::success(
        "Page Added",
        format!("{} has been added to your site.", page.name),
    ));

    doc.pages.push(page);
    doc.current_page_id = page_id;
    Ok(result)
}

pub fn rename(doc: &mut Document, page_id: &str, new_name: &str) -> Result<CmdResult> {
    let trimmed = new_name.trim();
    if trimmed.is_empty() {
        return Err(SiteError::Validation("Page name cannot be empty".to_string()));
    }

    let Some(page) = page_or_miss(doc, page_id, "rename_page") else {
        return Ok(CmdResult::default());
    };
    page.name = trimmed.to_string();

    let mut result = CmdResult::default().with_affected_pages(vec![page_id.to_string()]);
    result.add_message(CmdMessage::success(
        "Page Renamed",
        format!("Page renamed to {}.", trimmed),
    ));
    Ok(result)
}

/// Deep-copies a page under a new id, minting a new id for every section.
pub fn duplicate(doc: &mut Document, ids: &dyn IdGenerator, page_id: &str) -> Result<CmdResult> {
    let Some(source) = doc.page(page_id) else {
        tracing::warn!(page_id, "duplicate_page: page not found, ignoring");
        return Ok(CmdResult::default());
    };

    let mut copy = Page::new(fresh_page_id(doc, ids), format!("{} (Copy)", source.name));
    let mut minted: Vec<String> = Vec::with_capacity(source.sections.len());
    for section in &source.sections {
        let id = fresh_id(ids, section.type_tag(), |id| {
            minted.iter().any(|m| m == id) || doc.section_ids().any(|s| s == id)
        });
        minted.push(id.clone());
        copy.sections.push(Section::new(id, section.props.clone(), section.order));
    }
    copy.rerank();

    let copy_id = copy.id.clone();
    let section_ids = copy.sections.iter().map(|s| s.id.clone()).collect();
    let mut result = CmdResult::default()
        .with_affected_pages(vec![copy_id.clone()])
        .with_affected_sections(section_ids);
    result.add_message(CmdMessage::success(
        "Page Duplicated",
        format!("{} has been created.", copy.name),
    ));

    doc.pages.push(copy);
    doc.current_page_id = copy_id;
    Ok(result)
}

/// Removes a page. The last remaining page cannot be deleted.
pub fn delete(doc: &mut Document, page_id: &str) -> Result<CmdResult> {
    let Some(index) = doc.page_index(page_id) else {
        tracing::warn!(page_id, "delete_page: page not found, ignoring");
        return Ok(CmdResult::default());
    };
    if doc.pages.len() <= 1 {
        return Err(SiteError::Validation(
            "Cannot delete the only page of the site".to_string(),
        ));
    }

    let removed = doc.pages.remove(index);
    doc.repair_current_page();

    let mut result = CmdResult::default().with_affected_pages(vec![removed.id.clone()]);
    result.add_message(CmdMessage::success(
        "Page Deleted",
        format!("{} has been removed.", removed.name),
    ));

    let dangling: Vec<_> = dangling_links(doc)
        .into_iter()
        .filter(|d| d.target == removed.id)
        .collect();
    if !dangling.is_empty() {
        for link in &dangling {
            tracing::warn!(
                page_id = %link.page_id,
                section_id = %link.section_id,
                target = %link.target,
                "link now points at a deleted page"
            );
        }
        result.add_message(CmdMessage::warning(
            "Broken Links",
            format!(
                "{} link(s) still point to {} and will do nothing when clicked.",
                dangling.len(),
                removed.name
            ),
        ));
    }
    Ok(result)
}

/// Makes an existing page current.
pub fn navigate(doc: &mut Document, page_id: &str) -> Result<CmdResult> {
    if !doc.has_page(page_id) {
        tracing::warn!(page_id, "navigate: page not found, ignoring");
        return Ok(CmdResult::default());
    }
    doc.current_page_id = page_id.to_string();
    Ok(CmdResult::default().with_affected_pages(vec![page_id.to_string()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sections;
    use crate::ids::SequentialIds;
    use crate::props::{SectionProps, SectionType};
    use std::collections::HashSet;

    #[test]
    fn add_uses_default_name_and_becomes_current() {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        add(&mut doc, &ids, None).unwrap();
        add(&mut doc, &ids, Some("   ")).unwrap();
        add(&mut doc, &ids, Some(" Pricing ")).unwrap();

        let names: Vec<_> = doc.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Page 2", "Page 3", "Pricing"]);
        assert_eq!(doc.current_page_id, "page-3");
        assert!(doc.current_page().unwrap().sections.is_empty());
    }

    #[test]
    fn rename_trims_name() {
        let mut doc = Document::default();
        rename(&mut doc, "home", "  Landing ").unwrap();
        assert_eq!(doc.page("home").unwrap().name, "Landing");
    }

    #[test]
    fn rename_rejects_blank() {
        let mut doc = Document::default();
        let before = doc.clone();
        let res = rename(&mut doc, "home", "   ");
        assert!(matches!(res, Err(SiteError::Validation(_))));
        assert_eq!(doc, before);
    }

    #[test]
    fn rename_missing_page_is_noop() {
        let mut doc = Document::default();
        let before = doc.clone();
        assert!(rename(&mut doc, "ghost", "Name").unwrap().is_empty());
        assert_eq!(doc, before);
    }

    #[test]
    fn duplicate_mints_new_ids_and_deep_copies_props() {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        sections::add(&mut doc, &ids, "home", SectionType::Hero).unwrap();
        sections::add(&mut doc, &ids, "home", SectionType::Features).unwrap();

        duplicate(&mut doc, &ids, "home").unwrap();
        assert_eq!(doc.pages.len(), 2);

        let original = doc.page("home").unwrap().clone();
        let copy = doc.current_page().unwrap().clone();
        assert_eq!(copy.name, "Home (Copy)");
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.sections.len(), 2);
        for (a, b) in original.sections.iter().zip(copy.sections.iter()) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.props, b.props);
            assert_eq!(a.order, b.order);
        }

        let all: Vec<_> = doc.section_ids().collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn add_and_duplicate_skip_ids_already_in_document() {
        let mut doc = Document::default();
        doc.pages.push(Page::new("page-1", "Imported"));
        doc.pages[0].sections.push(Section::new(
            "hero-2".to_string(),
            crate::catalog::default_props(SectionType::Hero),
            0,
        ));
        let ids = SequentialIds::new();

        add(&mut doc, &ids, Some("Fresh")).unwrap();
        assert_eq!(doc.current_page_id, "page-2");

        duplicate(&mut doc, &ids, "home").unwrap();
        let copy = doc.current_page().unwrap();
        assert_eq!(copy.id, "page-3");
        assert_eq!(copy.sections[0].id, "hero-4");

        let all: Vec<_> = doc.section_ids().collect();
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), unique.len());
        let pages: HashSet<_> = doc.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(pages.len(), doc.pages.len());
    }

    #[test]
    fn duplicate_is_independent_of_original() {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        sections::add(&mut doc, &ids, "home", SectionType::Features).unwrap();
        duplicate(&mut doc, &ids, "home").unwrap();

        let copy_id = doc.current_page_id.clone();
        if let SectionProps::Features(f) = &mut doc.page_mut(&copy_id).unwrap().sections[0].props {
            f.features.clear();
        }
        match &doc.page("home").unwrap().sections[0].props {
            SectionProps::Features(f) => assert_eq!(f.features.len(), 3),
            _ => panic!("expected features"),
        }
    }

    #[test]
    fn delete_sole_page_is_rejected() {
        let mut doc = Document::default();
        let before = doc.clone();
        assert!(matches!(delete(&mut doc, "home"), Err(SiteError::Validation(_))));
        assert_eq!(doc, before);
    }

    #[test]
    fn delete_current_page_falls_back_to_first() {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        add(&mut doc, &ids, Some("About")).unwrap();
        add(&mut doc, &ids, Some("Contact")).unwrap();
        assert_eq!(doc.current_page_id, "page-2");

        delete(&mut doc, "page-2").unwrap();
        assert_eq!(doc.current_page_id, "home");
        assert_eq!(doc.pages.len(), 2);
    }

    #[test]
    fn delete_non_current_page_keeps_current() {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        add(&mut doc, &ids, Some("About")).unwrap();
        delete(&mut doc, "home").unwrap();
        assert_eq!(doc.current_page_id, "page-1");
    }

    #[test]
    fn delete_warns_about_links_left_dangling() {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        add(&mut doc, &ids, Some("About")).unwrap();
        sections::add(&mut doc, &ids, "home", SectionType::Cta).unwrap();
        if let SectionProps::Cta(cta) = &mut doc.page_mut("home").unwrap().sections[0].props {
            cta.button_link = "page-1".into();
        }

        let res = delete(&mut doc, "page-1").unwrap();
        let warning = res
            .messages
            .iter()
            .find(|m| m.title == "Broken Links")
            .expect("expected a broken link warning");
        assert!(warning.content.starts_with("1 link(s)"));
    }

    #[test]
    fn navigate_switches_only_to_existing_pages() {
        let mut doc = Document::default();
        let ids = SequentialIds::new();
        add(&mut doc, &ids, None).unwrap();

        navigate(&mut doc, "home").unwrap();
        assert_eq!(doc.current_page_id, "home");

        assert!(navigate(&mut doc, "ghost").unwrap().is_empty());
        assert_eq!(doc.current_page_id, "home");
    }
}
