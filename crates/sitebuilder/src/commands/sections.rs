//! Section mutations.
//!
//! Every function here leaves the touched page densely ordered: `order`
//! equals list position when it returns.

use crate::catalog::default_props;
use crate::commands::helpers::{display_name, fresh_section_id, page_or_miss};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SiteError};
use crate::ids::IdGenerator;
use crate::model::{Document, Section};
use crate::props::{SectionProps, SectionType};

/// Appends a fresh section built from the catalog template.
pub fn add(
    doc: &mut Document,
    ids: &dyn IdGenerator,
    page_id: &str,
    section_type: SectionType,
) -> Result<CmdResult> {
    let Some(page) = page_or_miss(doc, page_id, "add_section") else {
        return Ok(CmdResult::default());
    };
    let position = page.sections.len();

    let section_id = fresh_section_id(doc, ids, section_type.as_str());
    let section = Section::new(section_id.clone(), default_props(section_type), position);
    if let Some(page) = doc.page_mut(page_id) {
        page.sections.push(section);
    }

    let mut result = CmdResult::default()
        .with_affected_pages(vec![page_id.to_string()])
        .with_affected_sections(vec![section_id]);
    result.add_message(CmdMessage::success(
        "Section Added",
        format!(
            "{} section has been added to your page.",
            display_name(section_type.as_str())
        ),
    ));
    Ok(result)
}

/// Replaces a section's props wholesale.
///
/// The new bag must carry the same type tag as the section it replaces;
/// merging individual fields is the caller's job (see
/// [`SectionProps::merged`]).
pub fn update(
    doc: &mut Document,
    page_id: &str,
    section_id: &str,
    props: SectionProps,
) -> Result<CmdResult> {
    let Some(page) = page_or_miss(doc, page_id, "update_section") else {
        return Ok(CmdResult::default());
    };
    let Some(section) = page.section_mut(section_id) else {
        tracing::warn!(page_id, section_id, "update_section: section not found, ignoring");
        return Ok(CmdResult::default());
    };

    if section.type_tag() != props.type_tag() {
        return Err(SiteError::Validation(format!(
            "Cannot replace {} props with {} props",
            section.type_tag(),
            props.type_tag()
        )));
    }

    // Caller-built Generic bags for known types are stored as the typed record
    let tag = props.type_tag().to_string();
    section.props = SectionProps::from_parts(&tag, props.to_map()?);
    Ok(CmdResult::default()
        .with_affected_pages(vec![page_id.to_string()])
        .with_affected_sections(vec![section_id.to_string()]))
}

/// Removes a section and re-ranks the rest.
pub fn delete(doc: &mut Document, page_id: &str, section_id: &str) -> Result<CmdResult> {
    let Some(page) = page_or_miss(doc, page_id, "delete_section") else {
        return Ok(CmdResult::default());
    };
    let Some(index) = page.section_index(section_id) else {
        tracing::warn!(page_id, section_id, "delete_section: section not found, ignoring");
        return Ok(CmdResult::default());
    };

    page.sections.remove(index);
    page.rerank();

    let mut result = CmdResult::default().with_affected_pages(vec![page_id.to_string()]);
    result.add_message(CmdMessage::success(
        "Section Deleted",
        "The section has been removed from your page.",
    ));
    Ok(result)
}

/// Moves the section at `drag_index` to `hover_index` and re-ranks.
///
/// Out-of-range indices are ignored with a warning; drag interactions only
/// produce valid positions.
pub fn reorder(
    doc: &mut Document,
    page_id: &str,
    drag_index: usize,
    hover_index: usize,
) -> Result<CmdResult> {
    let Some(page) = page_or_miss(doc, page_id, "reorder_section") else {
        return Ok(CmdResult::default());
    };

    let len = page.sections.len();
    if drag_index >= len || hover_index >= len {
        tracing::warn!(
            page_id,
            drag_index,
            hover_index,
            len,
            "reorder_section: index out of range, ignoring"
        );
        return Ok(CmdResult::default());
    }

    let section = page.sections.remove(drag_index);
    let section_id = section.id.clone();
    page.sections.insert(hover_index, section);
    page.rerank();

    Ok(CmdResult::default()
        .with_affected_pages(vec![page_id.to_string()])
        .with_affected_sections(vec![section_id]))
}

/// Empties a page.
pub fn clear(doc: &mut Document, page_id: &str) -> Result<CmdResult> {
    let Some(page) = page_or_miss(doc, page_id, "clear_sections") else {
        return Ok(CmdResult::default());
    };

    let removed = page.sections.len();
    page.sections.clear();

    let mut result = CmdResult::default().with_affected_pages(vec![page_id.to_string()]);
    result.add_message(CmdMessage::success(
        "Page Cleared",
        format!("Removed {} sections from {}.", removed, page.name),
    ));
    Ok(result)
}
