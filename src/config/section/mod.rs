//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `build` | `[build]`    | Content/output paths, base path, minify  |
//! | `serve` | `[serve]`    | Development server                       |
//! | `site`  | `[site]`     | Page metadata                            |
//! | `theme` | `[theme]`    | Theme definition and preference storage  |

mod build;
mod serve;
mod site;
mod theme;

pub use build::BuildSectionConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
pub use theme::ThemeSectionConfig;
