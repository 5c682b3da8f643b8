//! # Link Resolution
//!
//! Header navigation items, hero/CTA/pricing buttons, blog posts and footer
//! links all store their target as a plain string. The same three-way rule
//! applies to every one of them:
//!
//! | Link | Target | Behavior |
//! |------|--------|----------|
//! | `""` or `"#"` | [`LinkTarget::Inert`] | nothing happens |
//! | `http://...`, `https://...` | [`LinkTarget::External`] | normal browser navigation |
//! | anything else | [`LinkTarget::Internal`] | switch to the page with that id |
//!
//! Internal links are not validated when written. A link to a page that was
//! later deleted stays in the document and resolves to a no-op at click time;
//! [`dangling_links`] finds them so the caller can warn about them.

use crate::model::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Inert,
    External(String),
    Internal(String),
}

pub fn resolve(link: &str) -> LinkTarget {
    if link.is_empty() || link == "#" {
        LinkTarget::Inert
    } else if link.starts_with("http://") || link.starts_with("https://") {
        LinkTarget::External(link.to_string())
    } else {
        LinkTarget::Internal(link.to_string())
    }
}

/// An internal link whose page no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink {
    pub page_id: String,
    pub section_id: String,
    pub target: String,
}

/// Scans every section of every page for internal links to missing pages.
pub fn dangling_links(doc: &Document) -> Vec<DanglingLink> {
    let mut found = Vec::new();
    for page in &doc.pages {
        for section in &page.sections {
            for link in section.props.links() {
                if let LinkTarget::Internal(target) = resolve(link) {
                    if !doc.has_page(&target) {
                        found.push(DanglingLink {
                            page_id: page.id.clone(),
                            section_id: section.id.clone(),
                            target,
                        });
                    }
                }
            }
        }
    }
    found
}
