//! Config errors and the diagnostics collected while validating `folio.toml`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use super::FieldPath;
use crate::utils::plural::plural_count;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file `{}` not found; run `folio init` to start a portfolio", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("folio.toml is not valid TOML")]
    Toml(#[from] toml::de::Error),

    // No #[from]: source() would print the diagnostics twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One problem with one field.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub field: FieldPath,
    pub severity: Severity,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self
            .field
            .as_str()
            .split_once('.')
            .map_or(self.field.as_str(), |(_, key)| key);
        let arrow = match self.severity {
            Severity::Error => "→".red().to_string(),
            Severity::Warning => "→".yellow().to_string(),
        };
        write!(f, "{arrow} {}: {}", key.bold(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

/// Problems found across `[site]`, `[build]`, `[serve]` and `[theme]`.
///
/// Shown grouped by table, in the order tables first reported something.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    items: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        field: FieldPath,
        severity: Severity,
        message: String,
        hint: Option<String>,
    ) {
        self.items.push(ConfigDiagnostic {
            field,
            severity,
            message,
            hint,
        });
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, Severity::Error, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(field, Severity::Error, message.into(), Some(hint.into()));
    }

    /// Legal but probably unintended; never fails the load.
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(field, Severity::Warning, message.into(), None);
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn len(&self) -> usize {
        self.errors().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    /// Diagnostics of one severity keyed by table, tables in first-seen order.
    fn by_table(&self, severity: Severity) -> Vec<(&'static str, Vec<&ConfigDiagnostic>)> {
        let mut order: BTreeMap<usize, &'static str> = BTreeMap::new();
        let mut groups: BTreeMap<&'static str, Vec<&ConfigDiagnostic>> = BTreeMap::new();
        for (i, diag) in self.items.iter().enumerate() {
            if diag.severity != severity {
                continue;
            }
            let table = diag.field.section();
            if !groups.contains_key(table) {
                order.insert(i, table);
            }
            groups.entry(table).or_default().push(diag);
        }
        order
            .into_values()
            .filter_map(|table| groups.remove(table).map(|items| (table, items)))
            .collect()
    }

    pub fn print_warnings(&self) {
        let groups = self.by_table(Severity::Warning);
        if groups.is_empty() {
            return;
        }
        crate::log!("warning"; "folio.toml:");
        for (table, items) in groups {
            eprintln!("{}", format!("[{table}]").cyan());
            for item in items {
                eprintln!("{item}");
            }
        }
    }

    /// `Err` when any error was collected; warnings alone pass.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.by_table(Severity::Error);
        write!(f, "{}", "folio.toml has problems:".red().bold())?;
        for (table, items) in &groups {
            write!(f, "\n\n{}", format!("[{table}]").cyan())?;
            for item in items {
                write!(f, "\n{item}")?;
            }
        }
        if self.len() > 1 {
            write!(
                f,
                "\n\n{}",
                format!(
                    "{} in {}",
                    plural_count(self.len(), "error"),
                    plural_count(groups.len(), "table")
                )
                .dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_points_at_init() {
        let err = ConfigError::NotFound(PathBuf::from("folio.toml"));
        let shown = err.to_string();
        assert!(shown.contains("folio.toml"));
        assert!(shown.contains("folio init"));
    }

    #[test]
    fn test_grouped_by_table() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("theme.preference_key"), "preference key is empty");
        diag.error_with_hint(FieldPath::new("site.url"), "invalid URL", "use https://");
        diag.error(FieldPath::new("theme.definition"), "must be a .yaml file");
        diag.warn(FieldPath::new("serve.interface"), "reachable from the network");

        assert_eq!(diag.len(), 3);
        assert_eq!(diag.warnings().count(), 1);

        let shown = diag.to_string();
        let theme = shown.find("[theme]").unwrap();
        let site = shown.find("[site]").unwrap();
        assert!(theme < site);
        assert_eq!(shown.matches("[theme]").count(), 1);
        assert!(shown.contains("preference key is empty"));
        assert!(shown.contains("use https://"));
        assert!(shown.contains("3 errors in 2 tables"));
        assert!(!shown.contains("[serve]"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("serve.interface"), "reachable from the network");
        assert!(diag.into_result().is_ok());
    }
}
