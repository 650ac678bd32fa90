//! Configuration utility types.
//!
//! | Module   | Purpose                                   |
//! |----------|-------------------------------------------|
//! | `error`  | Config errors, per-table diagnostics      |
//! | `field`  | Field paths used in diagnostics           |
//! | `handle` | Global configuration handle (thread-safe) |

mod error;
mod field;
pub mod handle;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, Severity};
pub use field::FieldPath;
pub use handle::{cfg, clear_clean_flag, init_config, reload_config};
