//! Content loading errors.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Field every section document must declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Slug,
    Order,
    Component,
}

impl RequiredField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slug => "slug",
            Self::Order => "order",
            Self::Component => "component",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building the section store. All of them abort startup.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content directory `{}` not found", .0.display())]
    MissingDir(PathBuf),

    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse `{}`", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_yaml::Error,
    },

    #[error("Section {field} missing in {}", .path.display())]
    MissingField { field: RequiredField, path: PathBuf },

    #[error("unknown section component `{tag}` in {}", .path.display())]
    UnknownComponent { tag: String, path: PathBuf },

    #[error("duplicate section slug `{slug}` in {} (already declared in {})", .path.display(), .first.display())]
    DuplicateSlug {
        slug: String,
        path: PathBuf,
        first: PathBuf,
    },
}

impl ContentError {
    /// Source file the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::MissingDir(path) | Self::Io(path, _) => path,
            Self::Parse { path, .. }
            | Self::MissingField { path, .. }
            | Self::UnknownComponent { path, .. }
            | Self::DuplicateSlug { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display_names_source() {
        let err = ContentError::MissingField {
            field: RequiredField::Order,
            path: PathBuf::from("content/sections/about/section.yaml"),
        };
        assert_eq!(
            err.to_string(),
            "Section order missing in content/sections/about/section.yaml"
        );
    }
}
