//! Site validation command.
//!
//! Unlike `build`, which stops at the first bad file, this checks every
//! section document and the theme and reports all problems together.

mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::config::SiteConfig;
use crate::content::{ContentError, SectionRecord, collect_section_files, parse_section};
use crate::log;
use crate::registry::RendererRegistry;
use crate::theme::{ColorSchemeSetting, FilePreferenceStore, PreferenceStore, ThemeDefinition};
use crate::utils::plural::plural_count;

pub use report::ValidationReport;

/// Validate content and theme, printing a report of every problem.
pub fn validate_site(config: &SiteConfig) -> Result<()> {
    let report = collect_report(config);

    report.print();
    if !report.is_empty() {
        eprintln!();
        bail!("validation failed: {}", report);
    }

    log!("validate"; "{}", report);
    Ok(())
}

/// Run every check without printing.
pub fn collect_report(config: &SiteConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_sections(config, &mut report);
    check_theme(config, &mut report);
    report
}

fn check_sections(config: &SiteConfig, report: &mut ValidationReport) {
    let files = match collect_section_files(&config.build.content) {
        Ok(files) => files,
        Err(e) => {
            report.add_section(display(config, e.path()), String::new(), describe(&e));
            return;
        }
    };

    log!("validate"; "checking {}", plural_count(files.len(), "section"));

    let parsed: Vec<(PathBuf, Result<SectionRecord, ContentError>)> = files
        .into_par_iter()
        .map(|path| {
            let record = fs::read_to_string(&path)
                .map_err(|err| ContentError::Io(path.clone(), err))
                .and_then(|text| parse_section(&path, &text));
            (path, record)
        })
        .collect();

    let registry = RendererRegistry::builtin();
    let mut slugs: FxHashMap<String, PathBuf> = FxHashMap::default();

    for (path, record) in parsed {
        let source = display(config, &path);
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                report.add_section(source, String::new(), describe(&e));
                continue;
            }
        };

        if let Some(first) = slugs.get(&record.id) {
            report.add_section(
                source.clone(),
                format!("slug `{}`", record.id),
                format!("already declared in {}", display(config, first)),
            );
        } else {
            slugs.insert(record.id.clone(), path.clone());
        }

        let kind = record.component();
        if !registry.contains(kind) {
            report.add_section(
                source,
                format!("component `{kind}`"),
                "has no registered renderer".to_string(),
            );
        }
    }
}

fn check_theme(config: &SiteConfig, report: &mut ValidationReport) {
    let definition = config.theme_definition_path();
    if let Err(e) = ThemeDefinition::load(&definition) {
        report.add_theme(
            display(config, &definition),
            String::new(),
            format!("{:#}", anyhow::Error::new(e)),
        );
    }

    let preferences = config.preference_path();
    let store = FilePreferenceStore::new(&preferences);
    match store.get(&config.theme.preference_key) {
        Ok(Some(value)) if ColorSchemeSetting::from_stored(&value).is_none() => {
            report.add_theme(
                display(config, &preferences),
                format!("`{}`", config.theme.preference_key),
                format!("holds `{value}`, expected light, dark or system"),
            );
        }
        Ok(_) => {}
        Err(e) => report.add_theme(display(config, &preferences), String::new(), e.to_string()),
    }
}

/// Error message with its source chain.
fn describe(error: &ContentError) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn display(config: &SiteConfig, path: &Path) -> String {
    config.root_relative(path).display().to_string()
}
