//! Full HTML documents: the site page, the dev-server loading page and 404.

use crate::config::SiteConfig;
use crate::content::SectionStore;
use crate::embed::AssetUrls;
use crate::embed::runtime::{SCHEME_BOOT, SiteJsVars};
use crate::registry::{RegistryError, RendererRegistry};
use crate::render::render_fallback;
use crate::theme::{SCHEME_ATTRIBUTE, ThemeState, scheme_stylesheet};
use crate::tracker::ActiveSectionTracker;
use crate::utils::html::{escape, escape_attr, minify};

use super::{NavigationBar, ThemeToggle};

/// Document-level metadata.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub lang: String,
    /// URL prefix, `""` or `/path`.
    pub base_path: String,
    pub assets: AssetUrls,
    /// localStorage key holding the visitor's scheme setting.
    pub storage_key: String,
    pub minify: bool,
}

impl PageMeta {
    pub fn from_config(config: &SiteConfig, assets: AssetUrls) -> Self {
        Self {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            author: config.site.author.clone(),
            lang: config.site.lang.clone(),
            base_path: config.build.url_prefix(),
            assets,
            storage_key: config.theme.preference_key.clone(),
            minify: config.build.minify,
        }
    }

    fn finish(&self, html: String) -> String {
        if self.minify { minify(&html) } else { html }
    }
}

/// Render the site: navigation, then every section in store order through
/// its registered renderer.
///
/// Fails on the first section whose renderer is missing or fails to load.
pub async fn render_page(
    store: &SectionStore,
    registry: &RendererRegistry,
    theme: &ThemeState,
    tracker: &ActiveSectionTracker,
    meta: &PageMeta,
) -> Result<String, RegistryError> {
    let active = tracker.active_id();

    let mut main = String::new();
    for section in store.get_all() {
        let is_active = active.as_deref() == Some(section.id.as_str());
        main.push_str(&registry.render(section, is_active).await?);
    }

    let nav = NavigationBar::from_store(store);
    let toggle = ThemeToggle::new().render(theme.setting(), theme.resolved());
    let body = format!(
        "<div class=\"app-shell\">\n{}<main class=\"app-main\" id=\"top\">\n{}</main>\n</div>\n",
        nav.render(active.as_deref(), &toggle),
        main
    );

    Ok(meta.finish(document(meta, theme, &meta.title, "", &body)))
}

/// Page served while the first build runs: the shell with a skeleton per
/// section. Reloads itself until the real page replaces it.
pub fn render_loading_page(store: &SectionStore, theme: &ThemeState, meta: &PageMeta) -> String {
    let main: String = store
        .get_all()
        .iter()
        .map(|section| render_fallback(&section.data.title))
        .collect();

    let body = format!(
        "<div class=\"app-shell\">\n<main class=\"app-main\" id=\"top\">\n{main}</main>\n</div>\n"
    );
    let head = "<meta http-equiv=\"refresh\" content=\"1\">\n";
    meta.finish(document(meta, theme, &meta.title, head, &body))
}

pub fn render_not_found(theme: &ThemeState, meta: &PageMeta) -> String {
    let title = format!("Not found · {}", meta.title);
    let body = format!(
        concat!(
            "<main class=\"app-main\" id=\"top\">\n",
            "<section class=\"section section--not-found\" aria-labelledby=\"not-found-title\">\n",
            "<div class=\"section__inner\">\n",
            "<h1 id=\"not-found-title\" class=\"section__title\">Page not found</h1>\n",
            "<p><a href=\"{}/\">Back to {}</a></p>\n",
            "</div>\n</section>\n</main>\n"
        ),
        escape_attr(&meta.base_path),
        escape(&meta.title),
    );
    meta.finish(document(meta, theme, &title, "", &body))
}

/// `<html>` carries the scheme the build-time theme state resolved to. The
/// inline boot script replaces it with the visitor's own setting before
/// the stylesheet applies, so a stored or OS dark scheme never paints light.
fn document(meta: &PageMeta, theme: &ThemeState, title: &str, head: &str, body: &str) -> String {
    let root = theme.root();
    let scheme = root
        .attribute(SCHEME_ATTRIBUTE)
        .unwrap_or(theme.resolved().as_str());

    let mut html = String::with_capacity(body.len() + 4096);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\" {SCHEME_ATTRIBUTE}=\"{}\" data-default-scheme=\"{}\">\n",
        escape_attr(&meta.lang),
        escape_attr(scheme),
        theme.setting().as_str(),
    ));
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<script>\n");
    html.push_str(&SCHEME_BOOT.render(&SiteJsVars::new(&meta.storage_key)));
    html.push_str("</script>\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    if !meta.description.is_empty() {
        html.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape_attr(&meta.description)
        ));
    }
    if let Some(author) = &meta.author {
        html.push_str(&format!(
            "<meta name=\"author\" content=\"{}\">\n",
            escape_attr(author)
        ));
    }
    html.push_str(head);
    html.push_str("<style>\n");
    html.push_str(&scheme_stylesheet(theme.definition()));
    html.push_str("</style>\n");
    html.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        escape_attr(&meta.assets.stylesheet)
    ));
    html.push_str(&format!(
        "<script src=\"{}\" defer></script>\n",
        escape_attr(&meta.assets.script)
    ));
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::definition::fixtures::THEME_YAML;
    use crate::theme::{
        ColorSchemeSetting, MemoryPreferenceStore, PREFERENCE_KEY, PreferenceStore,
        ResolvedColorScheme, RootElement, SystemScheme, ThemeDefinition,
    };
    use std::path::Path;
    use std::sync::Arc;

    const ABOUT: &str = r#"
slug: about
title: About
order: 1
component: rich-text
content:
  lead: Hello
"#;

    const PAPERS: &str = r#"
slug: papers
title: Papers
order: 2
component: publication-list
content:
  items:
    - title: On Things
      authors: A. Author
      venue: Conf
      year: 2024
"#;

    fn store() -> SectionStore {
        SectionStore::from_sources([("about.yaml", ABOUT), ("papers.yaml", PAPERS)]).unwrap()
    }

    fn theme(store: Arc<dyn PreferenceStore>, os: ResolvedColorScheme) -> ThemeState {
        let definition =
            Arc::new(ThemeDefinition::parse(Path::new("theme.yaml"), THEME_YAML).unwrap());
        ThemeState::new(
            definition,
            store,
            PREFERENCE_KEY,
            &SystemScheme::new(os),
            RootElement::new(),
        )
    }

    fn meta(minify: bool) -> PageMeta {
        PageMeta {
            title: "Ada & Co".into(),
            description: "Research".into(),
            author: None,
            lang: "en".into(),
            base_path: "/portfolio".into(),
            assets: AssetUrls {
                script: "/portfolio/assets/site.abc.js".into(),
                stylesheet: "/portfolio/assets/site.def.css".into(),
            },
            storage_key: PREFERENCE_KEY.into(),
            minify,
        }
    }

    #[tokio::test]
    async fn test_render_page_structure() {
        let store = store();
        let registry = RendererRegistry::builtin();
        let theme = theme(Arc::new(MemoryPreferenceStore::new()), ResolvedColorScheme::Dark);
        let tracker = ActiveSectionTracker::new(store.section_ids());

        let html = render_page(&store, &registry, &theme, &tracker, &meta(false))
            .await
            .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("data-color-scheme=\"dark\" data-default-scheme=\"system\""));
        assert!(html.contains("--color-background: #111114"));
        assert!(html.contains(":root[data-color-scheme=\"light\"]"));
        assert!(html.contains("<title>Ada &amp; Co</title>"));
        assert!(html.contains("src=\"/portfolio/assets/site.abc.js\""));
        assert!(html.contains("<main class=\"app-main\" id=\"top\">"));

        // the boot script runs before the scheme stylesheet; no inline palette
        let boot = html
            .find("window.localStorage.getItem(\"website-theme-preference\")")
            .unwrap();
        let style = html.find("<style>").unwrap();
        assert!(boot < style);
        let html_tag = &html[html.find("<html").unwrap()..html.find("<head>").unwrap()];
        assert!(!html_tag.contains("style="));

        let about = html.find("<section id=\"about\"").unwrap();
        let papers = html.find("<section id=\"papers\"").unwrap();
        assert!(about < papers);
        assert!(html.contains("data-nav-target=\"about\" aria-current=\"page\""));
        assert!(registry.is_loaded(crate::content::ComponentKind::RichText));
    }

    #[tokio::test]
    async fn test_stored_preference_sets_initial_scheme() {
        let prefs = Arc::new(MemoryPreferenceStore::new());
        prefs.set(PREFERENCE_KEY, "light").unwrap();
        let theme = theme(prefs, ResolvedColorScheme::Dark);
        let store = store();
        let tracker = ActiveSectionTracker::new(store.section_ids());

        let html = render_page(
            &store,
            &RendererRegistry::builtin(),
            &theme,
            &tracker,
            &meta(true),
        )
        .await
        .unwrap();

        assert_eq!(theme.setting(), ColorSchemeSetting::Light);
        assert!(html.contains("data-color-scheme=\"light\" data-default-scheme=\"light\""));
        assert!(html.contains("data-theme-option=\"light\""));
    }

    #[tokio::test]
    async fn test_missing_renderer_fails_page() {
        let store = store();
        let registry = RendererRegistry::new();
        let theme = theme(Arc::new(MemoryPreferenceStore::new()), ResolvedColorScheme::Light);
        let tracker = ActiveSectionTracker::new(store.section_ids());

        let err = render_page(&store, &registry, &theme, &tracker, &meta(false))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::MissingRenderer(tag) if tag == "rich-text"));
    }

    #[test]
    fn test_loading_page_uses_fallbacks() {
        let theme = theme(Arc::new(MemoryPreferenceStore::new()), ResolvedColorScheme::Light);
        let html = render_loading_page(&store(), &theme, &meta(false));

        assert_eq!(html.matches("section--fallback").count(), 2);
        assert!(html.contains("aria-label=\"Papers\""));
        assert!(html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn test_not_found_links_home() {
        let theme = theme(Arc::new(MemoryPreferenceStore::new()), ResolvedColorScheme::Light);
        let html = render_not_found(&theme, &meta(false));
        assert!(html.contains("<a href=\"/portfolio/\">Back to Ada &amp; Co</a>"));
    }
}
