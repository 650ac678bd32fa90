//! Section content: typed records loaded from declarative YAML.
//!
//! # Layout
//!
//! ```text
//! content/
//! ├── theme.yaml
//! └── sections/
//!     ├── about/section.yaml
//!     └── publications/section.yaml
//! ```

mod error;
mod store;
mod types;

pub use error::{ContentError, RequiredField};
pub use store::{SECTIONS_DIR, SectionStore, collect_section_files, parse_section};
pub use types::{
    ComponentKind, Hero, HeroImage, ListStyle, PublicationItem, PublicationLink,
    PublicationListContent, RichTextBlock, RichTextBody, RichTextContent, SectionBody,
    SectionData, SectionRecord, Spotlight, SpotlightItem, UnknownComponent,
};
