//! Component tag → section renderer.
//!
//! Renderers come from async loaders and are built on first use. Each tag
//! owns one `OnceCell`, so concurrent first lookups share a single load and
//! every later lookup returns the same `Arc`.

mod error;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::OnceCell;

use crate::content::{ComponentKind, SectionRecord};
use crate::render::{PublicationListRenderer, RichTextRenderer};

pub use error::RegistryError;

/// Draws one kind of section.
pub trait SectionRenderer: Send + Sync {
    fn kind(&self) -> ComponentKind;

    fn render(&self, section: &SectionRecord, is_active: bool) -> Result<String, RegistryError>;
}

pub type RendererFuture =
    Pin<Box<dyn Future<Output = Result<Arc<dyn SectionRenderer>, RegistryError>> + Send>>;

type Loader = Box<dyn Fn() -> RendererFuture + Send + Sync>;

struct Entry {
    loader: Loader,
    cell: OnceCell<Arc<dyn SectionRenderer>>,
}

#[derive(Default)]
pub struct RendererRegistry {
    entries: FxHashMap<ComponentKind, Entry>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a loader for every built-in component.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ComponentKind::RichText, || async {
            Ok(Arc::new(RichTextRenderer) as Arc<dyn SectionRenderer>)
        });
        registry.register(ComponentKind::PublicationList, || async {
            Ok(Arc::new(PublicationListRenderer) as Arc<dyn SectionRenderer>)
        });
        registry
    }

    /// Register (or replace) the loader for `kind`.
    pub fn register<F, Fut>(&mut self, kind: ComponentKind, loader: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn SectionRenderer>, RegistryError>> + Send + 'static,
    {
        let loader: Loader = Box::new(move || Box::pin(loader()));
        self.entries.insert(
            kind,
            Entry {
                loader,
                cell: OnceCell::new(),
            },
        );
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Whether the renderer for `kind` has already been loaded.
    pub fn is_loaded(&self, kind: ComponentKind) -> bool {
        self.entries
            .get(&kind)
            .is_some_and(|entry| entry.cell.initialized())
    }

    /// Resolve the renderer for `kind`, loading it on first use.
    ///
    /// A failed load is not cached; neither is a missing registration.
    pub async fn resolve(
        &self,
        kind: ComponentKind,
    ) -> Result<Arc<dyn SectionRenderer>, RegistryError> {
        let entry = self
            .entries
            .get(&kind)
            .ok_or_else(|| RegistryError::MissingRenderer(kind.to_string()))?;

        let renderer = entry
            .cell
            .get_or_try_init(|| {
                crate::debug!("registry"; "loading renderer for {}", kind);
                (entry.loader)()
            })
            .await?;
        Ok(Arc::clone(renderer))
    }

    /// Resolve by raw tag string.
    pub async fn resolve_tag(&self, tag: &str) -> Result<Arc<dyn SectionRenderer>, RegistryError> {
        let kind: ComponentKind = tag
            .parse()
            .map_err(|_| RegistryError::MissingRenderer(tag.to_string()))?;
        self.resolve(kind).await
    }

    /// Resolve the renderer for `section` and draw it.
    pub async fn render(
        &self,
        section: &SectionRecord,
        is_active: bool,
    ) -> Result<String, RegistryError> {
        let renderer = self.resolve(section.component()).await?;
        renderer.render(section, is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting;

    impl SectionRenderer for Counting {
        fn kind(&self) -> ComponentKind {
            ComponentKind::RichText
        }

        fn render(&self, _: &SectionRecord, _: bool) -> Result<String, RegistryError> {
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn test_same_tag_returns_same_renderer() {
        let registry = RendererRegistry::builtin();
        assert!(!registry.is_loaded(ComponentKind::RichText));

        let a = registry.resolve(ComponentKind::RichText).await.unwrap();
        let b = registry.resolve_tag("rich-text").await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(registry.is_loaded(ComponentKind::RichText));
        assert!(!registry.is_loaded(ComponentKind::PublicationList));
    }

    #[tokio::test]
    async fn test_unregistered_tag_fails_every_time() {
        let registry = RendererRegistry::new();
        for _ in 0..2 {
            let err = registry.resolve(ComponentKind::RichText).await.err().unwrap();
            assert_eq!(
                err.to_string(),
                "Missing renderer for section type \"rich-text\""
            );
        }
        let err = RendererRegistry::builtin()
            .resolve_tag("gallery")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RegistryError::MissingRenderer(tag) if tag == "gallery"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_lookups_load_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let mut registry = RendererRegistry::new();
        let counter = loads.clone();
        registry.register(ComponentKind::RichText, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                Ok(Arc::new(Counting) as Arc<dyn SectionRenderer>)
            }
        });
        let registry = Arc::new(registry);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.resolve(ComponentKind::RichText).await })
            })
            .collect();
        let mut renderers = Vec::new();
        for handle in handles {
            renderers.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(renderers.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[tokio::test]
    async fn test_load_failure_is_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let mut registry = RendererRegistry::new();
        let counter = attempts.clone();
        registry.register(ComponentKind::PublicationList, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(RegistryError::Load {
                    kind: ComponentKind::PublicationList,
                    message: "offline".into(),
                })
            }
        });

        assert!(registry.resolve(ComponentKind::PublicationList).await.is_err());
        assert!(registry.resolve(ComponentKind::PublicationList).await.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(!registry.is_loaded(ComponentKind::PublicationList));
    }
}
