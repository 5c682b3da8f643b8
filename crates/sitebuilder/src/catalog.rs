//! # Section Catalog
//!
//! Static registry of section templates. [`default_props`] is the single
//! source of the property bag every new section starts with, and
//! [`catalog`] lists the library entries in the order the section library
//! shows them.
//!
//! Templates are rebuilt on every call. Two sections of the same type never
//! share a nested list, so editing one section's feature cards can never
//! leak into another's.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Map;

use crate::props::*;

/// One entry of the section library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub section_type: SectionType,
    pub title: &'static str,
    pub description: &'static str,
    pub preview: &'static str,
    pub category: &'static str,
}

static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    let entry = |section_type, title, description, preview, category| CatalogEntry {
        section_type,
        title,
        description,
        preview,
        category,
    };
    vec![
        entry(
            SectionType::Header,
            "Header",
            "Navigation bar with logo and menu items",
            "Logo + Navigation",
            "Navigation",
        ),
        entry(
            SectionType::Hero,
            "Hero Section",
            "Eye-catching banner with call-to-action",
            "Title + Subtitle + Button",
            "Hero",
        ),
        entry(
            SectionType::About,
            "About Us",
            "Company story with stats and image",
            "Story + Stats + Image",
            "Content",
        ),
        entry(
            SectionType::Services,
            "Services",
            "Showcase your services with features",
            "Service Cards + Features",
            "Content",
        ),
        entry(
            SectionType::Features,
            "Features",
            "Highlight key features and benefits",
            "Feature Grid Layout",
            "Content",
        ),
        entry(
            SectionType::Pricing,
            "Pricing",
            "Pricing plans and packages",
            "Pricing Cards",
            "Commerce",
        ),
        entry(
            SectionType::Testimonials,
            "Testimonials",
            "Customer reviews and social proof",
            "Customer Reviews",
            "Social Proof",
        ),
        entry(
            SectionType::Gallery,
            "Gallery",
            "Image gallery or portfolio showcase",
            "Image Grid",
            "Media",
        ),
        entry(
            SectionType::Stats,
            "Statistics",
            "Numbers and achievements showcase",
            "Number Counters",
            "Social Proof",
        ),
        entry(SectionType::Faq, "FAQ", "Frequently asked questions", "Q&A Accordion", "Support"),
        entry(
            SectionType::Blog,
            "Blog/News",
            "Latest articles and news posts",
            "Article Cards",
            "Content",
        ),
        entry(
            SectionType::Contact,
            "Contact",
            "Contact form and information",
            "Form + Contact Info",
            "Contact",
        ),
        entry(
            SectionType::Newsletter,
            "Newsletter",
            "Email subscription signup",
            "Email Signup Form",
            "Marketing",
        ),
        entry(
            SectionType::Cta,
            "Call to Action",
            "Encourage users to take action",
            "Action Button Section",
            "Marketing",
        ),
        entry(
            SectionType::Footer,
            "Footer",
            "Bottom section with links and info",
            "Links + Copyright",
            "Navigation",
        ),
    ]
});

/// Library entries, in display order.
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn catalog_entry(section_type: SectionType) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.section_type == section_type)
}

fn placeholder(width: u32, height: u32) -> String {
    format!("/placeholder.svg?height={}&width={}", height, width)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn stat(value: &str, label: &str) -> StatItem {
    StatItem {
        value: value.into(),
        label: label.into(),
        extra: Map::new(),
    }
}

/// Fresh template for a new section of the given type.
pub fn default_props(section_type: SectionType) -> SectionProps {
    match section_type {
        SectionType::Header => SectionProps::Header(HeaderProps {
            title: "Your Brand".into(),
            navigation: [("Home", "home"), ("About", "#"), ("Services", "#"), ("Contact", "#")]
                .iter()
                .map(|(label, link)| NavItem {
                    label: label.to_string(),
                    link: link.to_string(),
                    extra: Map::new(),
                })
                .collect(),
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Hero => SectionProps::Hero(HeroProps {
            title: "Welcome to Our Amazing Website".into(),
            subtitle: "We create beautiful experiences that drive results".into(),
            button_text: "Get Started".into(),
            button_link: "#".into(),
            background_image: placeholder(1200, 600),
            background_color: "#1f2937".into(),
            text_color: "#ffffff".into(),
            extra: Map::new(),
        }),
        SectionType::About => SectionProps::About(AboutProps {
            title: "About Our Company".into(),
            content: "We are a team of passionate professionals dedicated to delivering exceptional results for our clients.".into(),
            image: placeholder(600, 400),
            stats: vec![
                stat("10+", "Years Experience"),
                stat("500+", "Happy Clients"),
                stat("50+", "Team Members"),
            ],
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Services => SectionProps::Services(ServicesProps {
            title: "Our Services".into(),
            subtitle: "Comprehensive solutions for your business".into(),
            services: [
                (
                    "Web Design",
                    "Beautiful, responsive websites",
                    "🎨",
                    &["Custom Design", "Mobile First"][..],
                ),
                (
                    "Development",
                    "Robust and scalable applications",
                    "💻",
                    &["Modern Stack", "Clean Code"][..],
                ),
                ("Marketing", "Grow your online presence", "📈", &["SEO", "Social Media"][..]),
            ]
            .iter()
            .map(|(title, description, icon, features)| ServiceItem {
                title: title.to_string(),
                description: description.to_string(),
                icon: icon.to_string(),
                features: strings(features),
                extra: Map::new(),
            })
            .collect(),
            background_color: "#f9fafb".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Features => SectionProps::Features(FeaturesProps {
            title: "Our Features".into(),
            subtitle: "Everything you need to succeed".into(),
            features: [
                ("Fast Performance", "Lightning fast loading times", "⚡"),
                ("Responsive Design", "Works on all devices", "📱"),
                ("24/7 Support", "Always here to help", "🛟"),
            ]
            .iter()
            .map(|(title, description, icon)| FeatureItem {
                title: title.to_string(),
                description: description.to_string(),
                icon: icon.to_string(),
                extra: Map::new(),
            })
            .collect(),
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Pricing => SectionProps::Pricing(PricingProps {
            title: "Simple Pricing".into(),
            subtitle: "Choose the plan that fits your needs".into(),
            plans: [
                ("Starter", "$9", &["1 Website", "Basic Support"][..], false),
                ("Pro", "$29", &["5 Websites", "Priority Support", "Analytics"][..], true),
                (
                    "Enterprise",
                    "$99",
                    &["Unlimited Websites", "Dedicated Support", "Custom Integrations"][..],
                    false,
                ),
            ]
            .iter()
            .map(|(name, price, features, highlighted)| PricingPlan {
                name: name.to_string(),
                price: price.to_string(),
                period: "/month".into(),
                features: strings(features),
                button_text: "Choose Plan".into(),
                button_link: "#".into(),
                highlighted: *highlighted,
                extra: Map::new(),
            })
            .collect(),
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Testimonials => SectionProps::Testimonials(TestimonialsProps {
            title: "What Our Customers Say".into(),
            testimonials: vec![
                Testimonial {
                    name: "John Doe".into(),
                    role: "CEO, Company".into(),
                    content: "Amazing service and great results!".into(),
                    avatar: placeholder(60, 60),
                    extra: Map::new(),
                },
                Testimonial {
                    name: "Jane Smith".into(),
                    role: "Marketing Director".into(),
                    content: "Exceeded our expectations in every way.".into(),
                    avatar: placeholder(60, 60),
                    extra: Map::new(),
                },
            ],
            background_color: "#f9fafb".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Gallery => SectionProps::Gallery(GalleryProps {
            title: "Our Work".into(),
            subtitle: "A selection of recent projects".into(),
            images: (1..=6)
                .map(|n| GalleryImage {
                    src: placeholder(400, 300),
                    alt: format!("Project {}", n),
                    caption: format!("Project {}", n),
                    extra: Map::new(),
                })
                .collect(),
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Faq => SectionProps::Faq(FaqProps {
            title: "Frequently Asked Questions".into(),
            subtitle: "Find answers to common questions".into(),
            faqs: [
                ("How do I get started?", "Pick a plan and follow the setup guide."),
                ("Can I cancel anytime?", "Yes, there are no long-term contracts."),
                ("Do you offer support?", "Our team is available around the clock."),
            ]
            .iter()
            .map(|(question, answer)| FaqItem {
                question: question.to_string(),
                answer: answer.to_string(),
                extra: Map::new(),
            })
            .collect(),
            background_color: "#f9fafb".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Stats => SectionProps::Stats(StatsProps {
            title: "Our Achievements".into(),
            stats: vec![
                stat("10K+", "Customers"),
                stat("99%", "Satisfaction"),
                stat("24/7", "Support"),
                stat("50+", "Countries"),
            ],
            background_color: "#3b82f6".into(),
            text_color: "#ffffff".into(),
            extra: Map::new(),
        }),
        SectionType::Contact => SectionProps::Contact(ContactProps {
            title: "Get In Touch".into(),
            subtitle: "We'd love to hear from you".into(),
            email: "hello@example.com".into(),
            phone: "+1 (555) 123-4567".into(),
            address: "123 Main Street, City, Country".into(),
            button_text: "Send Message".into(),
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Newsletter => SectionProps::Newsletter(NewsletterProps {
            title: "Stay Updated".into(),
            subtitle: "Subscribe to our newsletter for the latest news".into(),
            placeholder: "Enter your email".into(),
            button_text: "Subscribe".into(),
            background_color: "#1f2937".into(),
            text_color: "#ffffff".into(),
            extra: Map::new(),
        }),
        SectionType::Blog => SectionProps::Blog(BlogProps {
            title: "Latest News".into(),
            subtitle: "Insights and updates from our team".into(),
            posts: [
                (
                    "Getting Started with Web Design",
                    "Learn the basics of building a great website.",
                ),
                ("10 Tips for Better UX", "Small changes that make a big difference."),
                ("The Future of the Web", "Trends to watch this year."),
            ]
            .iter()
            .map(|(title, excerpt)| BlogPost {
                title: title.to_string(),
                excerpt: excerpt.to_string(),
                date: "2024-01-01".into(),
                image: placeholder(400, 250),
                link: "#".into(),
                extra: Map::new(),
            })
            .collect(),
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            extra: Map::new(),
        }),
        SectionType::Cta => SectionProps::Cta(CtaProps {
            title: "Ready to Get Started?".into(),
            subtitle: "Join thousands of satisfied customers today".into(),
            button_text: "Start Now".into(),
            button_link: "#".into(),
            background_color: "#3b82f6".into(),
            text_color: "#ffffff".into(),
            extra: Map::new(),
        }),
        SectionType::Footer => SectionProps::Footer(FooterProps {
            company_name: "Your Company".into(),
            description: "Building amazing experiences since 2024".into(),
            links: ["About", "Services", "Contact", "Privacy"]
                .iter()
                .map(|title| FooterLink {
                    title: title.to_string(),
                    url: "#".into(),
                    extra: Map::new(),
                })
                .collect(),
            background_color: "#1f2937".into(),
            text_color: "#ffffff".into(),
            extra: Map::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_props_total_and_typed() {
        for t in SectionType::ALL {
            let props = default_props(t);
            assert_eq!(props.section_type(), Some(t));
            assert!(!props.is_generic(), "{} template should be typed", t);
        }
    }

    #[test]
    fn test_templates_survive_their_own_wire_format() {
        for t in SectionType::ALL {
            let props = default_props(t);
            let map = props.to_map().unwrap();
            assert_eq!(SectionProps::from_parts(t.as_str(), map), props);
        }
    }

    #[test]
    fn test_hero_template_keys() {
        let map = default_props(SectionType::Hero).to_map().unwrap();
        for key in [
            "title",
            "subtitle",
            "buttonText",
            "buttonLink",
            "backgroundImage",
            "backgroundColor",
            "textColor",
        ] {
            assert!(map.contains_key(key), "hero template missing {}", key);
        }
    }

    #[test]
    fn test_templates_are_independent_copies() {
        let mut first = default_props(SectionType::Features);
        let second = default_props(SectionType::Features);

        if let SectionProps::Features(f) = &mut first {
            f.features[0].title = "Changed".into();
            f.features.clear();
        }

        match second {
            SectionProps::Features(f) => {
                assert_eq!(f.features.len(), 3);
                assert_eq!(f.features[0].title, "Fast Performance");
            }
            _ => panic!("expected features"),
        }
    }

    #[test]
    fn test_catalog_covers_every_type_once() {
        assert_eq!(catalog().len(), SectionType::ALL.len());
        for t in SectionType::ALL {
            assert_eq!(
                catalog().iter().filter(|e| e.section_type == t).count(),
                1,
                "{} listed more than once",
                t
            );
        }
        assert_eq!(catalog_entry(SectionType::Cta).unwrap().title, "Call to Action");
    }
}
