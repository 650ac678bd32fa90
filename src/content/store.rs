//! Read-only section store.
//!
//! Built once at startup from `sections/**/section.yaml` under the content
//! directory. Any malformed document aborts construction with an error
//! naming the offending file.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rustc_hash::FxHashMap;
use serde_yaml::Value;

use super::error::{ContentError, RequiredField};
use super::types::{ComponentKind, SectionData, SectionRecord};

/// Directory (relative to the content root) holding one folder per section.
pub const SECTIONS_DIR: &str = "sections";

/// File names accepted as section documents.
const SECTION_FILES: &[&str] = &["section.yaml", "section.yml"];

/// Ordered, immutable list of section records.
#[derive(Debug, Clone, Default)]
pub struct SectionStore {
    sections: Vec<SectionRecord>,
}

impl SectionStore {
    /// Scan and parse every section document under `content_dir`.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let sources = read_sources(content_dir)?;
        Self::from_sources(sources)
    }

    /// Build a store from already-read `(source, text)` pairs.
    ///
    /// Sources are taken in the given order; equal `order` values keep it.
    pub fn from_sources<I, P, S>(sources: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let mut sections = Vec::new();
        let mut seen: FxHashMap<String, PathBuf> = FxHashMap::default();

        for (path, text) in sources {
            let path = path.into();
            let record = parse_section(&path, text.as_ref())?;

            if let Some(first) = seen.get(&record.id) {
                return Err(ContentError::DuplicateSlug {
                    slug: record.id,
                    path,
                    first: first.clone(),
                });
            }
            seen.insert(record.id.clone(), path);
            sections.push(record);
        }

        // `sort_by` is stable: ties keep declaration order.
        sections.sort_by(|a, b| a.data.order.total_cmp(&b.data.order));

        crate::debug!("content"; "loaded {} sections", sections.len());
        Ok(Self { sections })
    }

    pub fn get_all(&self) -> &[SectionRecord] {
        &self.sections
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&SectionRecord> {
        self.sections.iter().find(|section| section.data.slug == slug)
    }

    /// Component tags present in the store, deduplicated, first-seen order.
    pub fn available_component_types(&self) -> Vec<ComponentKind> {
        let mut kinds = Vec::new();
        for section in &self.sections {
            let kind = section.component();
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    /// Section slugs in page order.
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// ============================================================================
// Scanning
// ============================================================================

/// Collect section document paths in deterministic (sorted) order.
pub fn collect_section_files(content_dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    if !content_dir.is_dir() {
        return Err(ContentError::MissingDir(content_dir.to_path_buf()));
    }

    let sections_dir = content_dir.join(SECTIONS_DIR);
    if !sections_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&sections_dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            SECTION_FILES.contains(&name)
        })
        .map(|e| e.path())
        .collect();

    files.sort();
    Ok(files)
}

fn read_sources(content_dir: &Path) -> Result<Vec<(PathBuf, String)>, ContentError> {
    collect_section_files(content_dir)?
        .into_iter()
        .map(|path| {
            let text =
                fs::read_to_string(&path).map_err(|err| ContentError::Io(path.clone(), err))?;
            Ok((path, text))
        })
        .collect()
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse and validate a single section document.
pub fn parse_section(path: &Path, text: &str) -> Result<SectionRecord, ContentError> {
    let parse_err = |error| ContentError::Parse {
        path: path.to_path_buf(),
        error,
    };

    let value: Value = serde_yaml::from_str(text).map_err(parse_err)?;
    check_required(&value, path)?;

    let data: SectionData = serde_yaml::from_value(value).map_err(parse_err)?;
    Ok(SectionRecord::new(data))
}

/// Check the three required fields before typed deserialization, so a
/// missing one is reported by name rather than as a generic schema error.
fn check_required(value: &Value, path: &Path) -> Result<(), ContentError> {
    let missing = |field| ContentError::MissingField {
        field,
        path: path.to_path_buf(),
    };

    value
        .get("slug")
        .and_then(Value::as_str)
        .filter(|slug| !slug.trim().is_empty())
        .ok_or_else(|| missing(RequiredField::Slug))?;

    value
        .get("order")
        .filter(|order| order.is_number())
        .ok_or_else(|| missing(RequiredField::Order))?;

    let tag = value
        .get("component")
        .and_then(Value::as_str)
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| missing(RequiredField::Component))?;

    tag.parse::<ComponentKind>()
        .map_err(|_| ContentError::UnknownComponent {
            tag: tag.to_string(),
            path: path.to_path_buf(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rich(slug: &str, order: &str) -> String {
        format!(
            "slug: {slug}\ntitle: {slug}\norder: {order}\ncomponent: rich-text\ncontent:\n  blocks: []\n"
        )
    }

    fn slugs(store: &SectionStore) -> Vec<&str> {
        store.get_all().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_order() {
        let store = SectionStore::from_sources([
            ("c.yaml", rich("c", "3")),
            ("a.yaml", rich("a", "1")),
            ("b.yaml", rich("b", "2")),
        ])
        .unwrap();
        assert_eq!(slugs(&store), ["a", "b", "c"]);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let store = SectionStore::from_sources([
            ("x.yaml", rich("x", "1")),
            ("first.yaml", rich("first", "0")),
            ("y.yaml", rich("y", "1")),
            ("z.yaml", rich("z", "1")),
        ])
        .unwrap();
        assert_eq!(slugs(&store), ["first", "x", "y", "z"]);
    }

    #[test]
    fn test_fractional_and_negative_order() {
        let store = SectionStore::from_sources([
            ("a.yaml", rich("a", "1.5")),
            ("b.yaml", rich("b", "-2")),
            ("c.yaml", rich("c", "1")),
        ])
        .unwrap();
        assert_eq!(slugs(&store), ["b", "c", "a"]);
    }

    #[test]
    fn test_missing_slug_fails() {
        let text = "title: t\norder: 1\ncomponent: rich-text\ncontent:\n  blocks: []\n";
        let err = SectionStore::from_sources([("broken.yaml", text)]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: RequiredField::Slug,
                ..
            }
        ));
        assert_eq!(err.to_string(), "Section slug missing in broken.yaml");
    }

    #[test]
    fn test_empty_slug_fails() {
        let text = "slug: ''\ntitle: t\norder: 1\ncomponent: rich-text\ncontent:\n  blocks: []\n";
        let err = SectionStore::from_sources([("empty.yaml", text)]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: RequiredField::Slug,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_order_fails() {
        let text = "slug: a\ntitle: t\ncomponent: rich-text\ncontent:\n  blocks: []\n";
        let err = SectionStore::from_sources([("a.yaml", text)]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: RequiredField::Order,
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_order_fails() {
        let text = "slug: a\ntitle: t\norder: first\ncomponent: rich-text\ncontent:\n  blocks: []\n";
        let err = SectionStore::from_sources([("a.yaml", text)]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: RequiredField::Order,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_component_fails() {
        let text = "slug: a\ntitle: t\norder: 1\ncontent:\n  blocks: []\n";
        let err = SectionStore::from_sources([("a.yaml", text)]).unwrap_err();
        assert!(matches!(
            err,
            ContentError::MissingField {
                field: RequiredField::Component,
                ..
            }
        ));
        assert!(err.to_string().contains("a.yaml"));
    }

    #[test]
    fn test_unknown_component_fails() {
        let text = "slug: a\ntitle: t\norder: 1\ncomponent: gallery\n";
        let err = SectionStore::from_sources([("a.yaml", text)]).unwrap_err();
        assert!(
            matches!(err, ContentError::UnknownComponent { ref tag, .. } if tag == "gallery")
        );
    }

    #[test]
    fn test_duplicate_slug_fails() {
        let err =
            SectionStore::from_sources([("one.yaml", rich("a", "1")), ("two.yaml", rich("a", "2"))])
                .unwrap_err();
        match err {
            ContentError::DuplicateSlug { slug, path, first } => {
                assert_eq!(slug, "a");
                assert_eq!(path, PathBuf::from("two.yaml"));
                assert_eq!(first, PathBuf::from("one.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_get_by_slug() {
        let store =
            SectionStore::from_sources([("a.yaml", rich("a", "1")), ("b.yaml", rich("b", "2"))])
                .unwrap();
        assert_eq!(store.get_by_slug("b").map(|s| s.data.order), Some(2.0));
        assert!(store.get_by_slug("missing").is_none());
    }

    #[test]
    fn test_available_component_types_deduplicated() {
        let pubs = "slug: p\ntitle: P\norder: 0\ncomponent: publication-list\ncontent:\n  items: []\n";
        let store = SectionStore::from_sources([
            ("a.yaml", rich("a", "1")),
            ("p.yaml", pubs.to_string()),
            ("b.yaml", rich("b", "2")),
        ])
        .unwrap();
        assert_eq!(
            store.available_component_types(),
            [ComponentKind::PublicationList, ComponentKind::RichText]
        );
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        let sections = dir.path().join(SECTIONS_DIR);
        for (name, order) in [("about", "1"), ("news", "3"), ("bio", "2")] {
            let folder = sections.join(name);
            fs::create_dir_all(&folder).unwrap();
            fs::write(folder.join("section.yaml"), rich(name, order)).unwrap();
        }
        // Non-section files are ignored
        fs::write(sections.join("notes.txt"), "ignored").unwrap();

        let store = SectionStore::load(dir.path()).unwrap();
        assert_eq!(slugs(&store), ["about", "bio", "news"]);
    }

    #[test]
    fn test_load_reports_source_path() {
        let dir = TempDir::new().unwrap();
        let folder = dir.path().join(SECTIONS_DIR).join("broken");
        fs::create_dir_all(&folder).unwrap();
        let file = folder.join("section.yaml");
        fs::write(&file, "title: t\norder: 1\ncomponent: rich-text\n").unwrap();

        let err = SectionStore::load(dir.path()).unwrap_err();
        assert_eq!(err.path(), &file);
    }

    #[test]
    fn test_load_missing_content_dir() {
        let dir = TempDir::new().unwrap();
        let err = SectionStore::load(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ContentError::MissingDir(_)));
    }

    #[test]
    fn test_load_without_sections_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = SectionStore::load(dir.path()).unwrap();
        assert!(store.is_empty());
    }
}
