//! `rich-text` sections: optional profile column, header and content blocks.

use std::fmt::Write as _;

use crate::content::{
    ComponentKind, Hero, RichTextBlock, RichTextContent, SectionBody, SectionData, SectionRecord,
};
use crate::registry::{RegistryError, SectionRenderer};
use crate::utils::html::{escape, escape_attr};

use super::inline::render_inline;
use super::section_class;

pub struct RichTextRenderer;

impl SectionRenderer for RichTextRenderer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::RichText
    }

    fn render(&self, section: &SectionRecord, is_active: bool) -> Result<String, RegistryError> {
        match &section.data.body {
            SectionBody::RichText(content) => Ok(render_rich_text(&section.data, content, is_active)),
            other => Err(RegistryError::Mismatch {
                expected: ComponentKind::RichText,
                found: other.kind(),
            }),
        }
    }
}

/// Clamp a heading level to `1..=4`.
pub fn heading_level(level: i64) -> u8 {
    // 1..=4 always fits
    level.clamp(1, 4) as u8
}

pub fn render_rich_text(data: &SectionData, content: &RichTextContent, is_active: bool) -> String {
    let slug = escape_attr(&data.slug);
    let hero = content.hero.as_ref();
    let has_spotlight = content
        .spotlight
        .as_ref()
        .is_some_and(|spotlight| !spotlight.items.is_empty());
    let has_profile = hero.is_some_and(|h| h.image.is_some() || h.eyebrow.is_some()) || has_spotlight;

    let mut html = String::new();
    let label = if data.show_title {
        format!(r#"aria-labelledby="{slug}-title""#)
    } else {
        format!(r#"aria-label="{}""#, escape_attr(&data.title))
    };
    let _ = writeln!(
        html,
        r#"<section id="{slug}" class="{}" {label}>"#,
        section_class("section--rich-text", is_active)
    );
    html.push_str("<div class=\"section__inner\">\n");
    let layout = if has_profile {
        "section__content rt-layout rt-layout--two-column"
    } else {
        "section__content rt-layout"
    };
    let _ = writeln!(html, r#"<div class="{layout}">"#);

    if has_profile {
        render_profile(&mut html, hero, content);
    }

    html.push_str("<div class=\"rt-main\">\n<header class=\"rt-header\">\n");
    if data.show_title {
        let _ = writeln!(
            html,
            r#"<h2 id="{slug}-title" class="rt-title">{}</h2>"#,
            escape(&data.title)
        );
    }
    if let Some(hero) = hero {
        if let Some(headline) = &hero.headline {
            let _ = writeln!(html, r#"<h3 class="rt-headline">{}</h3>"#, escape(headline));
        }
        if let Some(subtitle) = &hero.subtitle {
            let _ = writeln!(html, r#"<p class="rt-subtitle">{}</p>"#, escape(subtitle));
        }
    }
    if let Some(lead) = &content.content.lead {
        let _ = writeln!(html, r#"<p class="rt-lead">{}</p>"#, render_inline(lead));
    }
    html.push_str("</header>\n<div class=\"rt-body\">\n");
    for block in &content.content.blocks {
        render_block(&mut html, block);
    }
    html.push_str("</div>\n</div>\n</div>\n</div>\n</section>\n");
    html
}

fn render_profile(html: &mut String, hero: Option<&Hero>, content: &RichTextContent) {
    html.push_str("<div class=\"rt-profile\">\n");
    if let Some(image) = hero.and_then(|h| h.image.as_ref()) {
        let _ = writeln!(
            html,
            r#"<figure class="rt-profile__portrait"><img src="{}" alt="{}" loading="lazy"></figure>"#,
            escape_attr(&image.src),
            escape_attr(image.alt.as_deref().unwrap_or_default())
        );
    }
    if let Some(eyebrow) = hero.and_then(|h| h.eyebrow.as_ref()) {
        let _ = writeln!(html, r#"<p class="rt-profile__role">{}</p>"#, escape(eyebrow));
    }
    if let Some(spotlight) = content.spotlight.as_ref().filter(|s| !s.items.is_empty()) {
        html.push_str("<div class=\"rt-spotlight\">\n");
        for item in &spotlight.items {
            let _ = writeln!(
                html,
                r#"<div class="rt-spotlight-card"><span class="rt-spotlight-label">{}</span><span class="rt-spotlight-value">{}</span></div>"#,
                escape(&item.label),
                escape(&item.value)
            );
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");
}

fn render_block(html: &mut String, block: &RichTextBlock) {
    match block {
        RichTextBlock::Paragraph { text } => {
            let _ = writeln!(html, r#"<p class="rt-block">{}</p>"#, render_inline(text));
        }
        RichTextBlock::Heading { level, text } => {
            let level = heading_level(*level);
            let _ = writeln!(html, r#"<h{level} class="rt-heading">{}</h{level}>"#, escape(text));
        }
        RichTextBlock::List { style, title, items } => {
            html.push_str("<div class=\"rt-block\">\n");
            if let Some(title) = title {
                let _ = writeln!(html, r#"<h4 class="rt-list-title">{}</h4>"#, escape(title));
            }
            let tag = match style {
                crate::content::ListStyle::Ordered => "ol",
                crate::content::ListStyle::Unordered => "ul",
            };
            let _ = writeln!(html, r#"<{tag} class="rt-list rt-list--{}">"#, style.as_str());
            for item in items {
                let _ = writeln!(html, r#"<li class="rt-list-item">{}</li>"#, render_inline(item));
            }
            let _ = writeln!(html, "</{tag}>\n</div>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_section;
    use std::path::Path;

    fn record(yaml: &str) -> SectionRecord {
        parse_section(Path::new("sections/about/section.yaml"), yaml).unwrap()
    }

    const ABOUT: &str = r#"
slug: about
title: About
order: 1
component: rich-text
hero:
  eyebrow: PhD student
  headline: Hello
  image:
    src: /me.png
    alt: Portrait
content:
  lead: "Working on [verification](https://example.org)"
  blocks:
    - type: heading
      level: 9
      text: Interests
    - type: paragraph
      text: "line one\nline two"
    - type: list
      style: ordered
      title: Steps
      items: [first, second]
spotlight:
  items:
    - label: Lab
      value: Formal Methods
"#;

    #[test]
    fn test_heading_level_is_clamped() {
        assert_eq!(heading_level(0), 1);
        assert_eq!(heading_level(3), 3);
        assert_eq!(heading_level(9), 4);
        assert_eq!(heading_level(-1), 1);
        assert_eq!(heading_level(300), 4);
    }

    #[test]
    fn test_out_of_range_levels_parse_and_clamp() {
        let yaml = r#"
slug: notes
title: Notes
order: 3
component: rich-text
content:
  blocks:
    - type: heading
      level: -1
      text: Low
    - type: heading
      level: 300
      text: High
"#;
        let html = RichTextRenderer.render(&record(yaml), false).unwrap();
        assert!(html.contains(r#"<h1 class="rt-heading">Low</h1>"#));
        assert!(html.contains(r#"<h4 class="rt-heading">High</h4>"#));
    }

    #[test]
    fn test_two_column_layout_with_profile() {
        let html = RichTextRenderer.render(&record(ABOUT), true).unwrap();
        assert!(html.contains(r#"<section id="about" class="section section--rich-text section--active" aria-labelledby="about-title">"#));
        assert!(html.contains("rt-layout--two-column"));
        assert!(html.contains(r#"<img src="/me.png" alt="Portrait" loading="lazy">"#));
        assert!(html.contains(r#"<p class="rt-profile__role">PhD student</p>"#));
        assert!(html.contains(r#"<span class="rt-spotlight-value">Formal Methods</span>"#));
        assert!(html.contains(r#"<h2 id="about-title" class="rt-title">About</h2>"#));
    }

    #[test]
    fn test_blocks() {
        let html = RichTextRenderer.render(&record(ABOUT), false).unwrap();
        assert!(html.contains(r#"<h4 class="rt-heading">Interests</h4>"#));
        assert!(html.contains(r#"<p class="rt-block">line one<br>line two</p>"#));
        assert!(html.contains(r#"<h4 class="rt-list-title">Steps</h4>"#));
        assert!(html.contains(r#"<ol class="rt-list rt-list--ordered">"#));
        assert!(html.contains(r#"<li class="rt-list-item">second</li>"#));
        assert!(html.contains(r#"<a href="https://example.org" target="_blank""#));
        assert!(!html.contains("section--active"));
    }

    #[test]
    fn test_hidden_title_becomes_label() {
        let yaml = "slug: intro\ntitle: Intro\norder: 0\ncomponent: rich-text\nshowTitle: false\ncontent:\n  blocks: []\n";
        let html = RichTextRenderer.render(&record(yaml), false).unwrap();
        assert!(html.contains(r#"aria-label="Intro""#));
        assert!(!html.contains("rt-title"));
        assert!(!html.contains("rt-layout--two-column"));
    }

    #[test]
    fn test_wrong_variant_is_rejected() {
        let yaml = "slug: pubs\ntitle: Pubs\norder: 2\ncomponent: publication-list\ncontent:\n  items: []\n";
        let err = RichTextRenderer.render(&record(yaml), false).unwrap_err();
        assert!(matches!(err, RegistryError::Mismatch { .. }));
    }
}
