//! Renderer resolution errors.

use thiserror::Error;

use crate::content::ComponentKind;

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Missing renderer for section type \"{0}\"")]
    MissingRenderer(String),

    #[error("failed to load renderer for \"{kind}\": {message}")]
    Load { kind: ComponentKind, message: String },

    #[error("renderer for \"{expected}\" cannot draw a \"{found}\" section")]
    Mismatch {
        expected: ComponentKind,
        found: ComponentKind,
    },
}
