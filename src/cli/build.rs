//! Site building.
//!
//! Phases:
//! - **Load** - sections, theme definition, stored preference
//! - **Assets** - site.js / site.css with content-hash names
//! - **Render** - `index.html` through the renderer registry, `404.html`

use anyhow::{Context, Result};
use std::{fs, path::Path, sync::Arc};

use crate::{
    config::SiteConfig,
    content::SectionStore,
    embed::{AssetUrls, write_embedded_assets},
    log,
    registry::RendererRegistry,
    theme::{
        FilePreferenceStore, ResolvedColorScheme, RootElement, SystemScheme, ThemeDefinition,
        ThemeState,
    },
    tracker::ActiveSectionTracker,
    ui::{PageMeta, render_loading_page, render_not_found, render_page},
    utils::plural::plural_count,
};

/// Sections and theme state the page is rendered from.
pub struct LoadedSite {
    pub store: SectionStore,
    pub theme: ThemeState,
}

/// Load the section store and theme state for `config`.
///
/// There is no OS preference at build time; `system` resolves to light
/// until the runtime script takes over in the browser.
pub fn load_site(config: &SiteConfig) -> Result<LoadedSite> {
    let store = SectionStore::load(&config.build.content)?;
    let theme = load_theme(config)?;

    crate::debug!(
        "build";
        "loaded {} ({})",
        plural_count(store.len(), "section"),
        store
            .available_component_types()
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(LoadedSite { store, theme })
}

/// Theme state over the configured definition and preference file.
pub fn load_theme(config: &SiteConfig) -> Result<ThemeState> {
    let definition = ThemeDefinition::load(&config.theme_definition_path())?;
    let preferences = FilePreferenceStore::new(config.preference_path());

    Ok(ThemeState::new(
        Arc::new(definition),
        Arc::new(preferences),
        config.theme.preference_key.as_str(),
        &SystemScheme::new(ResolvedColorScheme::Light),
        RootElement::new(),
    ))
}

/// Build the whole site into `build.output`. Returns the section count.
pub fn build_site(config: &SiteConfig, quiet: bool) -> Result<usize> {
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("failed to clean output directory {}", output.display())
        })?;
    }

    let site = load_site(config)?;
    let assets = write_embedded_assets(config, output)
        .with_context(|| format!("failed to write assets into {}", output.display()))?;
    let meta = PageMeta::from_config(config, assets);

    let html = render_index(&site, &meta)?;
    write_page(output, "index.html", &html)?;
    write_page(output, "404.html", &render_not_found(&site.theme, &meta))?;

    if !quiet {
        log!(
            "build";
            "{} -> {}",
            plural_count(site.store.len(), "section"),
            config.root_relative(output).display()
        );
    }
    Ok(site.store.len())
}

/// Loading page for the dev server, linking the assets a build will write.
pub fn build_loading_page(config: &SiteConfig, assets: AssetUrls) -> Result<String> {
    let site = load_site(config)?;
    let meta = PageMeta::from_config(config, assets);
    Ok(render_loading_page(&site.store, &site.theme, &meta))
}

/// Renderer factories are async; drive them on a private runtime.
fn render_index(site: &LoadedSite, meta: &PageMeta) -> Result<String> {
    let registry = RendererRegistry::builtin();
    let tracker = ActiveSectionTracker::new(site.store.section_ids());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start render runtime")?;

    let html = runtime.block_on(render_page(
        &site.store,
        &registry,
        &site.theme,
        &tracker,
        meta,
    ))?;
    Ok(html)
}

fn write_page(output: &Path, name: &str, html: &str) -> Result<()> {
    let path = output.join(name);
    fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))
}
