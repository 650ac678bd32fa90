//! `publication-list` sections: a grid of publication cards.

use std::fmt::Write as _;

use crate::content::{ComponentKind, PublicationItem, SectionBody, SectionData, SectionRecord};
use crate::registry::{RegistryError, SectionRenderer};
use crate::utils::html::{escape, escape_attr};

use super::section_class;

pub struct PublicationListRenderer;

impl SectionRenderer for PublicationListRenderer {
    fn kind(&self) -> ComponentKind {
        ComponentKind::PublicationList
    }

    fn render(&self, section: &SectionRecord, is_active: bool) -> Result<String, RegistryError> {
        match &section.data.body {
            SectionBody::PublicationList(list) => Ok(render_publications(
                &section.data,
                &list.content.items,
                is_active,
            )),
            other => Err(RegistryError::Mismatch {
                expected: ComponentKind::PublicationList,
                found: other.kind(),
            }),
        }
    }
}

pub fn render_publications(data: &SectionData, items: &[PublicationItem], is_active: bool) -> String {
    let slug = escape_attr(&data.slug);
    let mut html = String::new();

    let _ = writeln!(
        html,
        r#"<section id="{slug}" class="{}" aria-labelledby="{slug}-title">"#,
        section_class("section--publications", is_active)
    );
    html.push_str("<div class=\"section__inner\">\n<header class=\"section__header\">\n");
    let _ = writeln!(html, r#"<h2 id="{slug}-title">{}</h2>"#, escape(&data.title));
    if let Some(description) = &data.description {
        let _ = writeln!(
            html,
            r#"<p class="section__description">{}</p>"#,
            escape(description)
        );
    }
    html.push_str("</header>\n<ul class=\"pub-grid\">\n");
    for item in items {
        render_card(&mut html, item);
    }
    html.push_str("</ul>\n</div>\n</section>\n");
    html
}

fn render_card(html: &mut String, item: &PublicationItem) {
    html.push_str("<li class=\"pub-card\">\n");
    let _ = writeln!(
        html,
        r#"<div class="pub-card__meta"><span class="pub-card__year">{}</span><span class="pub-card__venue">{}</span></div>"#,
        item.year,
        escape(&item.venue)
    );

    let title = escape(&item.title);
    match item.title_href() {
        Some(href) => {
            let _ = writeln!(
                html,
                r#"<h3 class="pub-card__title"><a href="{}" target="_blank" rel="noreferrer noopener" class="pub-card__title-link">{title}</a></h3>"#,
                escape_attr(href)
            );
        }
        None => {
            let _ = writeln!(html, r#"<h3 class="pub-card__title">{title}</h3>"#);
        }
    }

    let _ = writeln!(html, r#"<p class="pub-card__authors">{}</p>"#, escape(&item.authors));
    if let Some(summary) = &item.summary {
        let _ = writeln!(html, r#"<p class="pub-card__summary">{}</p>"#, escape(summary));
    }
    if !item.tags.is_empty() {
        html.push_str("<ul class=\"pub-card__tags\">");
        for tag in &item.tags {
            let _ = write!(html, r#"<li class="pub-card__tag">{}</li>"#, escape(tag));
        }
        html.push_str("</ul>\n");
    }
    if !item.links.is_empty() {
        html.push_str("<div class=\"pub-card__links\">");
        for link in &item.links {
            let _ = write!(
                html,
                r#"<a href="{}" class="pub-card__link" target="_blank" rel="noreferrer noopener">{}</a>"#,
                escape_attr(&link.url),
                escape(&link.label)
            );
        }
        html.push_str("</div>\n");
    }
    html.push_str("</li>\n");
}
