use crate::ids::IdGenerator;
use crate::model::{Document, Page};

/// Looks up a page for mutation, logging a reference miss when it is gone.
pub fn page_or_miss<'a>(doc: &'a mut Document, page_id: &str, op: &str) -> Option<&'a mut Page> {
    let page = doc.page_mut(page_id);
    if page.is_none() {
        tracing::warn!(op, page_id, "page not found, ignoring");
    }
    page
}

/// Mints an id with `prefix` that `taken` rejects, drawing again on a clash.
///
/// Generators only promise fresh ids relative to their own history; a loaded
/// or imported document may already hold ids from another generator.
pub fn fresh_id(ids: &dyn IdGenerator, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = ids.next_id(prefix);
        if !taken(&id) {
            return id;
        }
        tracing::debug!(id = %id, "minted id already in use, drawing again");
    }
}

/// A section id not used anywhere in `doc`.
pub fn fresh_section_id(doc: &Document, ids: &dyn IdGenerator, prefix: &str) -> String {
    fresh_id(ids, prefix, |id| doc.section_ids().any(|s| s == id))
}

/// A page id not used by any page of `doc`.
pub fn fresh_page_id(doc: &Document, ids: &dyn IdGenerator) -> String {
    fresh_id(ids, "page", |id| doc.has_page(id))
}

/// Title-cases a type tag for notices ("hero" -> "Hero").
pub fn display_name(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
