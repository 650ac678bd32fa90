//! Typed section records.
//!
//! A section document is a flat YAML mapping. The shared fields (`slug`,
//! `title`, `order`, ...) live on [`SectionData`]; the `component` tag
//! selects the [`SectionBody`] variant that carries the rest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Component tags
// ============================================================================

/// Declared renderer type of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    RichText,
    PublicationList,
}

impl ComponentKind {
    pub const ALL: [Self; 2] = [Self::RichText, Self::PublicationList];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RichText => "rich-text",
            Self::PublicationList => "publication-list",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag that matches no known component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComponent(pub String);

impl fmt::Display for UnknownComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown section component `{}`", self.0)
    }
}

impl std::error::Error for UnknownComponent {}

impl FromStr for ComponentKind {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownComponent(s.to_string()))
    }
}

// ============================================================================
// Section record
// ============================================================================

/// One validated section, identified by its slug.
#[derive(Debug, Clone, Serialize)]
pub struct SectionRecord {
    pub id: String,
    pub data: SectionData,
}

impl SectionRecord {
    pub fn new(data: SectionData) -> Self {
        Self {
            id: data.slug.clone(),
            data,
        }
    }

    #[inline]
    pub fn component(&self) -> ComponentKind {
        self.data.body.kind()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionData {
    pub slug: String,
    pub title: String,
    pub order: f64,
    #[serde(default)]
    pub description: Option<String>,
    /// Render the visible section heading. When false the title is only
    /// used as the accessible label.
    #[serde(default = "default_show_title")]
    pub show_title: bool,
    #[serde(flatten)]
    pub body: SectionBody,
}

const fn default_show_title() -> bool {
    true
}

/// Variant payload, selected by the `component` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "kebab-case")]
pub enum SectionBody {
    RichText(RichTextContent),
    PublicationList(PublicationListContent),
}

impl SectionBody {
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::RichText(_) => ComponentKind::RichText,
            Self::PublicationList(_) => ComponentKind::PublicationList,
        }
    }
}

// ============================================================================
// rich-text
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextContent {
    #[serde(default)]
    pub hero: Option<Hero>,
    pub content: RichTextBody,
    #[serde(default)]
    pub spotlight: Option<Spotlight>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hero {
    pub eyebrow: Option<String>,
    pub headline: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<HeroImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroImage {
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichTextBody {
    #[serde(default)]
    pub lead: Option<String>,
    #[serde(default)]
    pub blocks: Vec<RichTextBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RichTextBlock {
    Heading {
        /// Any integer; rendering clamps it to `1..=4`.
        level: i64,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        style: ListStyle,
        #[serde(default)]
        title: Option<String>,
        items: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    Unordered,
}

impl ListStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Unordered => "unordered",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spotlight {
    #[serde(default)]
    pub items: Vec<SpotlightItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotlightItem {
    pub label: String,
    pub value: String,
}

// ============================================================================
// publication-list
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationListContent {
    pub content: PublicationList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationList {
    #[serde(default)]
    pub items: Vec<PublicationItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationItem {
    pub title: String,
    pub authors: String,
    pub venue: String,
    pub year: i32,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub primary_url: Option<String>,
    #[serde(default)]
    pub links: Vec<PublicationLink>,
}

impl PublicationItem {
    /// Target of the card title: `primaryUrl`, else the first link.
    pub fn title_href(&self) -> Option<&str> {
        self.primary_url
            .as_deref()
            .or_else(|| self.links.first().map(|link| link.url.as_str()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationLink {
    pub label: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_round_trip_names() {
        assert_eq!("rich-text".parse(), Ok(ComponentKind::RichText));
        assert_eq!(
            "publication-list".parse(),
            Ok(ComponentKind::PublicationList)
        );
        assert_eq!(
            "gallery".parse::<ComponentKind>(),
            Err(UnknownComponent("gallery".into()))
        );
    }

    #[test]
    fn test_parse_rich_text_section() {
        let yaml = r#"
slug: about
title: About
order: 1
component: rich-text
showTitle: false
hero:
  eyebrow: PhD student
content:
  lead: Hello
  blocks:
    - type: heading
      level: 2
      text: Research
    - type: list
      style: ordered
      items: [a, b]
spotlight:
  items:
    - label: Focus
      value: Systems
"#;
        let data: SectionData = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(data.slug, "about");
        assert!(!data.show_title);
        assert_eq!(data.body.kind(), ComponentKind::RichText);

        let SectionBody::RichText(rich) = data.body else {
            panic!("expected rich-text body");
        };
        assert_eq!(rich.content.blocks.len(), 2);
        assert!(matches!(
            rich.content.blocks[1],
            RichTextBlock::List {
                style: ListStyle::Ordered,
                ..
            }
        ));
        assert_eq!(rich.spotlight.unwrap().items[0].value, "Systems");
    }

    #[test]
    fn test_parse_publication_section() {
        let yaml = r#"
slug: publications
title: Publications
order: 2
component: publication-list
content:
  items:
    - title: A Paper
      authors: A. Author
      venue: CONF
      year: 2024
      links:
        - label: PDF
          url: https://example.com/a.pdf
"#;
        let data: SectionData = serde_yaml::from_str(yaml).unwrap();
        assert!(data.show_title);
        let SectionBody::PublicationList(list) = data.body else {
            panic!("expected publication-list body");
        };
        let item = &list.content.items[0];
        assert_eq!(item.year, 2024);
        assert_eq!(item.title_href(), Some("https://example.com/a.pdf"));
    }

    #[test]
    fn test_title_href_prefers_primary_url() {
        let item = PublicationItem {
            title: "T".into(),
            authors: "A".into(),
            venue: "V".into(),
            year: 2020,
            summary: None,
            tags: vec![],
            primary_url: Some("https://primary".into()),
            links: vec![PublicationLink {
                label: "PDF".into(),
                url: "https://pdf".into(),
            }],
        };
        assert_eq!(item.title_href(), Some("https://primary"));
    }
}
