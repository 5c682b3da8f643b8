//! # Section Properties
//!
//! Every section carries a property bag whose shape depends on its type. The
//! builder's editors and renderers read these bags by key, so the wire format
//! is a flat camelCase JSON object (`buttonText`, `backgroundColor`, ...).
//!
//! In Rust the bag is a tagged union, [`SectionProps`], with one strongly
//! typed record per [`SectionType`]. Two escape hatches keep imported data
//! intact:
//!
//! - Each typed record has a flattened `extra` map. Keys the record does not
//!   know about land there and are written back out untouched, so a generic
//!   editor can still surface them.
//! - [`SectionProps::Generic`] holds any bag whose type tag is unknown or
//!   whose fields do not fit the typed record (a missing field, a string
//!   where a list was expected, ...). Nothing is coerced or dropped.
//!
//! ## Links
//!
//! Navigable elements store their target in a `link`, `buttonLink` or `url`
//! field. [`SectionProps::links`] enumerates them so that dangling internal
//! links can be reported after a page is deleted.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SiteError};

/// The closed set of section kinds offered by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Header,
    Hero,
    About,
    Services,
    Features,
    Pricing,
    Testimonials,
    Gallery,
    Faq,
    Stats,
    Contact,
    Newsletter,
    Blog,
    Cta,
    Footer,
}

impl SectionType {
    pub const ALL: [SectionType; 15] = [
        SectionType::Header,
        SectionType::Hero,
        SectionType::About,
        SectionType::Services,
        SectionType::Features,
        SectionType::Pricing,
        SectionType::Testimonials,
        SectionType::Gallery,
        SectionType::Faq,
        SectionType::Stats,
        SectionType::Contact,
        SectionType::Newsletter,
        SectionType::Blog,
        SectionType::Cta,
        SectionType::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::Hero => "hero",
            SectionType::About => "about",
            SectionType::Services => "services",
            SectionType::Features => "features",
            SectionType::Pricing => "pricing",
            SectionType::Testimonials => "testimonials",
            SectionType::Gallery => "gallery",
            SectionType::Faq => "faq",
            SectionType::Stats => "stats",
            SectionType::Contact => "contact",
            SectionType::Newsletter => "newsletter",
            SectionType::Blog => "blog",
            SectionType::Cta => "cta",
            SectionType::Footer => "footer",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        SectionType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SiteError::Validation(format!("Unknown section type: {}", s)))
    }
}

// --- Nested records ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub link: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub features: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    pub period: String,
    pub features: Vec<String>,
    pub button_text: String,
    pub button_link: String,
    pub highlighted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub content: String,
    pub avatar: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
    pub caption: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A headline number ("10K+", "99%") with its caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatItem {
    pub value: String,
    pub label: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub image: String,
    pub link: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    pub title: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// --- Per-type records ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderProps {
    pub title: String,
    pub navigation: Vec<NavItem>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroProps {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub background_image: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutProps {
    pub title: String,
    pub content: String,
    pub image: String,
    pub stats: Vec<StatItem>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesProps {
    pub title: String,
    pub subtitle: String,
    pub services: Vec<ServiceItem>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesProps {
    pub title: String,
    pub subtitle: String,
    pub features: Vec<FeatureItem>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingProps {
    pub title: String,
    pub subtitle: String,
    pub plans: Vec<PricingPlan>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsProps {
    pub title: String,
    pub testimonials: Vec<Testimonial>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryProps {
    pub title: String,
    pub subtitle: String,
    pub images: Vec<GalleryImage>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqProps {
    pub title: String,
    pub subtitle: String,
    pub faqs: Vec<FaqItem>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsProps {
    pub title: String,
    pub stats: Vec<StatItem>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactProps {
    pub title: String,
    pub subtitle: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub button_text: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterProps {
    pub title: String,
    pub subtitle: String,
    pub placeholder: String,
    pub button_text: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogProps {
    pub title: String,
    pub subtitle: String,
    pub posts: Vec<BlogPost>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaProps {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_link: String,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterProps {
    pub company_name: String,
    pub description: String,
    pub links: Vec<FooterLink>,
    pub background_color: String,
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Property bag of a section, keyed by its type.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionProps {
    Header(HeaderProps),
    Hero(HeroProps),
    About(AboutProps),
    Services(ServicesProps),
    Features(FeaturesProps),
    Pricing(PricingProps),
    Testimonials(TestimonialsProps),
    Gallery(GalleryProps),
    Faq(FaqProps),
    Stats(StatsProps),
    Contact(ContactProps),
    Newsletter(NewsletterProps),
    Blog(BlogProps),
    Cta(CtaProps),
    Footer(FooterProps),
    /// Raw bag for unknown type tags, or known tags whose fields do not
    /// match the typed record.
    Generic {
        section_type: String,
        props: Map<String, Value>,
    },
}

impl SectionProps {
    /// Builds the props for a section of type `tag` from a raw JSON object.
    ///
    /// Never fails: anything that does not fit a typed record is kept as
    /// [`SectionProps::Generic`].
    pub fn from_parts(tag: &str, props: Map<String, Value>) -> Self {
        let Ok(section_type) = tag.parse::<SectionType>() else {
            return SectionProps::Generic {
                section_type: tag.to_string(),
                props,
            };
        };

        let typed = match section_type {
            SectionType::Header => typed(&props).map(SectionProps::Header),
            SectionType::Hero => typed(&props).map(SectionProps::Hero),
            SectionType::About => typed(&props).map(SectionProps::About),
            SectionType::Services => typed(&props).map(SectionProps::Services),
            SectionType::Features => typed(&props).map(SectionProps::Features),
            SectionType::Pricing => typed(&props).map(SectionProps::Pricing),
            SectionType::Testimonials => typed(&props).map(SectionProps::Testimonials),
            SectionType::Gallery => typed(&props).map(SectionProps::Gallery),
            SectionType::Faq => typed(&props).map(SectionProps::Faq),
            SectionType::Stats => typed(&props).map(SectionProps::Stats),
            SectionType::Contact => typed(&props).map(SectionProps::Contact),
            SectionType::Newsletter => typed(&props).map(SectionProps::Newsletter),
            SectionType::Blog => typed(&props).map(SectionProps::Blog),
            SectionType::Cta => typed(&props).map(SectionProps::Cta),
            SectionType::Footer => typed(&props).map(SectionProps::Footer),
        };

        typed.unwrap_or(SectionProps::Generic {
            section_type: tag.to_string(),
            props,
        })
    }

    /// The wire tag (`"hero"`, `"footer"`, ...), including unknown tags.
    pub fn type_tag(&self) -> &str {
        match self {
            SectionProps::Generic { section_type, .. } => section_type,
            other => other
                .section_type()
                .map(|t| t.as_str())
                .unwrap_or_default(),
        }
    }

    /// The catalog type, if the tag is one of the known kinds.
    pub fn section_type(&self) -> Option<SectionType> {
        Some(match self {
            SectionProps::Header(_) => SectionType::Header,
            SectionProps::Hero(_) => SectionType::Hero,
            SectionProps::About(_) => SectionType::About,
            SectionProps::Services(_) => SectionType::Services,
            SectionProps::Features(_) => SectionType::Features,
            SectionProps::Pricing(_) => SectionType::Pricing,
            SectionProps::Testimonials(_) => SectionType::Testimonials,
            SectionProps::Gallery(_) => SectionType::Gallery,
            SectionProps::Faq(_) => SectionType::Faq,
            SectionProps::Stats(_) => SectionType::Stats,
            SectionProps::Contact(_) => SectionType::Contact,
            SectionProps::Newsletter(_) => SectionType::Newsletter,
            SectionProps::Blog(_) => SectionType::Blog,
            SectionProps::Cta(_) => SectionType::Cta,
            SectionProps::Footer(_) => SectionType::Footer,
            SectionProps::Generic { section_type, .. } => return section_type.parse().ok(),
        })
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, SectionProps::Generic { .. })
    }

    /// Flat JSON view of the bag, as editors and the export file see it.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(SiteError::Store(format!(
                "Section props serialized to a non-object: {}",
                other
            ))),
        }
    }

    /// Applies a field-level patch on top of the current bag.
    ///
    /// This is the client-side merge editors perform before handing the full
    /// bag to `update_section`. The result keeps the same type tag.
    pub fn merged(&self, patch: Map<String, Value>) -> Result<SectionProps> {
        let mut map = self.to_map()?;
        map.extend(patch);
        Ok(SectionProps::from_parts(self.type_tag(), map))
    }

    /// Every navigable link stored in the bag, in field order.
    pub fn links(&self) -> Vec<&str> {
        match self {
            SectionProps::Header(p) => p.navigation.iter().map(|n| n.link.as_str()).collect(),
            SectionProps::Hero(p) => vec![p.button_link.as_str()],
            SectionProps::Cta(p) => vec![p.button_link.as_str()],
            SectionProps::Pricing(p) => p.plans.iter().map(|pl| pl.button_link.as_str()).collect(),
            SectionProps::Blog(p) => p.posts.iter().map(|post| post.link.as_str()).collect(),
            SectionProps::Footer(p) => p.links.iter().map(|l| l.url.as_str()).collect(),
            SectionProps::Generic { props, .. } => {
                let mut found = Vec::new();
                for value in props.iter() {
                    collect_links(value, &mut found);
                }
                found
            }
            _ => Vec::new(),
        }
    }
}

fn typed<T: DeserializeOwned>(props: &Map<String, Value>) -> Option<T> {
    serde_json::from_value(Value::Object(props.clone())).ok()
}

const LINK_KEYS: [&str; 3] = ["link", "buttonLink", "url"];

fn collect_links<'a>((key, value): (&'a String, &'a Value), found: &mut Vec<&'a str>) {
    match value {
        Value::String(s) if LINK_KEYS.contains(&key.as_str()) => found.push(s.as_str()),
        Value::Object(map) => {
            for entry in map.iter() {
                collect_links(entry, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                if let Value::Object(map) = item {
                    for entry in map.iter() {
                        collect_links(entry, found);
                    }
                }
            }
        }
        _ => {}
    }
}

impl Serialize for SectionProps {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SectionProps::Header(p) => p.serialize(serializer),
            SectionProps::Hero(p) => p.serialize(serializer),
            SectionProps::About(p) => p.serialize(serializer),
            SectionProps::Services(p) => p.serialize(serializer),
            SectionProps::Features(p) => p.serialize(serializer),
            SectionProps::Pricing(p) => p.serialize(serializer),
            SectionProps::Testimonials(p) => p.serialize(serializer),
            SectionProps::Gallery(p) => p.serialize(serializer),
            SectionProps::Faq(p) => p.serialize(serializer),
            SectionProps::Stats(p) => p.serialize(serializer),
            SectionProps::Contact(p) => p.serialize(serializer),
            SectionProps::Newsletter(p) => p.serialize(serializer),
            SectionProps::Blog(p) => p.serialize(serializer),
            SectionProps::Cta(p) => p.serialize(serializer),
            SectionProps::Footer(p) => p.serialize(serializer),
            SectionProps::Generic { props, .. } => props.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn hero_map() -> Map<String, Value> {
        object(json!({
            "title": "Welcome",
            "subtitle": "Sub",
            "buttonText": "Go",
            "buttonLink": "#",
            "backgroundImage": "/bg.svg",
            "backgroundColor": "#000000",
            "textColor": "#ffffff"
        }))
    }

    #[test]
    fn test_section_type_parse_and_display() {
        for t in SectionType::ALL {
            assert_eq!(t.as_str().parse::<SectionType>().unwrap(), t);
            assert_eq!(t.to_string(), t.as_str());
        }
        assert!("carousel".parse::<SectionType>().is_err());
    }

    #[test]
    fn test_section_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&SectionType::Cta).unwrap(), "\"cta\"");
        let t: SectionType = serde_json::from_str("\"faq\"").unwrap();
        assert_eq!(t, SectionType::Faq);
    }

    #[test]
    fn test_from_parts_builds_typed_record() {
        let props = SectionProps::from_parts("hero", hero_map());
        match &props {
            SectionProps::Hero(hero) => {
                assert_eq!(hero.button_text, "Go");
                assert!(hero.extra.is_empty());
            }
            other => panic!("expected hero, got {:?}", other),
        }
        assert_eq!(props.type_tag(), "hero");
        assert_eq!(props.section_type(), Some(SectionType::Hero));
    }

    #[test]
    fn test_extra_keys_survive_serialization() {
        let mut map = hero_map();
        map.insert("animation".into(), json!("fade"));
        let props = SectionProps::from_parts("hero", map.clone());

        assert!(!props.is_generic());
        assert_eq!(props.to_map().unwrap(), map);
    }

    #[test]
    fn test_missing_field_falls_back_to_generic() {
        let mut map = hero_map();
        map.remove("subtitle");
        let props = SectionProps::from_parts("hero", map.clone());

        assert!(props.is_generic());
        assert_eq!(props.type_tag(), "hero");
        assert_eq!(props.section_type(), Some(SectionType::Hero));
        assert_eq!(props.to_map().unwrap(), map);
    }

    #[test]
    fn test_unknown_tag_is_generic() {
        let map = object(json!({"slides": [1, 2, 3]}));
        let props = SectionProps::from_parts("carousel", map.clone());

        assert_eq!(props.type_tag(), "carousel");
        assert_eq!(props.section_type(), None);
        assert_eq!(props.to_map().unwrap(), map);
    }

    #[test]
    fn test_merged_replaces_only_patched_keys() {
        let props = SectionProps::from_parts("hero", hero_map());
        let merged = props
            .merged(object(json!({"title": "Hello there"})))
            .unwrap();

        match merged {
            SectionProps::Hero(hero) => {
                assert_eq!(hero.title, "Hello there");
                assert_eq!(hero.subtitle, "Sub");
            }
            other => panic!("expected hero, got {:?}", other),
        }
    }

    #[test]
    fn test_merged_can_complete_a_generic_bag() {
        let mut map = hero_map();
        map.remove("subtitle");
        let partial = SectionProps::from_parts("hero", map);
        let fixed = partial.merged(object(json!({"subtitle": "Back"}))).unwrap();
        assert!(matches!(fixed, SectionProps::Hero(_)));
    }

    #[test]
    fn test_links_of_typed_records() {
        let footer = SectionProps::from_parts(
            "footer",
            object(json!({
                "companyName": "Acme",
                "description": "",
                "links": [{"title": "About", "url": "about"}, {"title": "X", "url": "https://x.com"}],
                "backgroundColor": "#000",
                "textColor": "#fff"
            })),
        );
        assert_eq!(footer.links(), vec!["about", "https://x.com"]);

        let hero = SectionProps::from_parts("hero", hero_map());
        assert_eq!(hero.links(), vec!["#"]);
    }

    #[test]
    fn test_links_of_generic_bag_are_found_recursively() {
        let props = SectionProps::from_parts(
            "carousel",
            object(json!({
                "buttonLink": "page-2",
                "slides": [{"caption": "one", "link": "page-3"}],
                "url": 5
            })),
        );
        let mut links = props.links();
        links.sort();
        assert_eq!(links, vec!["page-2", "page-3"]);
    }
}
