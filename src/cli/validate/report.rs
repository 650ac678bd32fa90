//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural::plural_s;

/// A single validation problem
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field or item the problem is about, empty for whole-file errors.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Every problem found, grouped by area and then by source file.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Section documents.
    pub sections: BTreeMap<String, Vec<ValidationError>>,
    /// Theme definition and stored preference.
    pub theme: BTreeMap<String, Vec<ValidationError>>,
}

impl ValidationReport {
    pub fn add_section(&mut self, source: String, target: String, reason: String) {
        self.sections
            .entry(source)
            .or_default()
            .push(ValidationError { target, reason });
    }

    pub fn add_theme(&mut self, source: String, target: String, reason: String) {
        self.theme
            .entry(source)
            .or_default()
            .push(ValidationError { target, reason });
    }

    pub fn section_error_count(&self) -> usize {
        self.sections.values().map(|v| v.len()).sum()
    }

    pub fn theme_error_count(&self) -> usize {
        self.theme.values().map(|v| v.len()).sum()
    }

    pub fn error_count(&self) -> usize {
        self.section_error_count() + self.theme_error_count()
    }

    pub fn is_empty(&self) -> bool {
        self.error_count() == 0
    }

    /// Print the full report to stderr (sections -> theme).
    pub fn print(&self) {
        self.print_section("sections", &self.sections);
        self.print_section("theme", &self.theme);
    }

    fn print_section(&self, name: &str, errors: &BTreeMap<String, Vec<ValidationError>>) {
        if errors.is_empty() {
            return;
        }
        eprintln!();

        let file_count = errors.len();
        let error_count: usize = errors.values().map(|v| v.len()).sum();

        eprintln!(
            "{} {}",
            name.red().bold(),
            format!(
                "({file_count} file{}, {error_count} error{})",
                plural_s(file_count),
                plural_s(error_count)
            )
            .dimmed()
        );

        for (path, errs) in errors {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                if e.target.is_empty() {
                    eprintln!("{} {}", "→".red(), e.reason);
                } else {
                    eprintln!("{} {} {}", "→".red(), e.target, e.reason);
                }
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();

        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("problem{}", plural_s(total)).dimmed()
            )
        }
    }
}
