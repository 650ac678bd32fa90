//! Small shared helpers.

pub mod hash;
pub mod html;
pub mod mime;
pub mod path;
pub mod plural;
