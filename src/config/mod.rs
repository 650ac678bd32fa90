//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── serve      # [serve]
//! │   ├── site       # [site]
//! │   └── theme      # [theme]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::{extract_url_path, find_config_file};

pub use section::{BuildSectionConfig, ServeConfig, SiteSectionConfig, ThemeSectionConfig};
pub use types::{
    ConfigDiagnostics, ConfigError, FieldPath, cfg, clear_clean_flag, init_config, reload_config,
};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory, the parent of the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub serve: ServeConfig,

    #[serde(default)]
    pub theme: ThemeSectionConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// For non-Init commands, searches upward from cwd to find config file.
    /// The project root is determined by the config file's parent directory.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        if !cli.is_init() && !exists {
            bail!(ConfigError::NotFound(cli.config.clone()));
        }

        let mut config = if exists && !cli.is_init() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);

        // Nothing to validate before init writes the config file
        if !cli.is_init() {
            config.validate()?;
        }

        Ok(config)
    }

    /// Resolve config file path based on command.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let path = match &cli.command {
            Commands::Init { name: Some(name) } => cwd.join(name).join(&cli.config),
            Commands::Init { name: None } => cwd.join(&cli.config),
            _ => match find_config_file(&cli.config) {
                Some(path) => return Ok((path, true)),
                None => cwd.join(&cli.config),
            },
        };
        let exists = path.exists();
        Ok((path, exists))
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli) {
        let cwd = std::env::current_dir().unwrap_or_default();
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => cwd.join(name),
            Commands::Init { name: None } => cwd,
            _ => self
                .config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.normalize_paths(&root);
        self.apply_command_options(cli);
        self.sync_base_path_from_url();

        // Local preview serves from `/`
        if cli.is_serve() {
            self.build.base_path.clear();
        }
    }

    /// Derive `build.base_path` from the path of `site.url`.
    ///
    /// `https://ada.github.io/portfolio` serves assets under `/portfolio/`.
    fn sync_base_path_from_url(&mut self) {
        if let Some(ref url) = self.site.url
            && let Some(path) = extract_url_path(url)
            && !path.is_empty()
        {
            self.build.base_path = path;
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub(crate) fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Absolute path of the theme token file.
    pub fn theme_definition_path(&self) -> PathBuf {
        self.build.content.join(&self.theme.definition)
    }

    /// Absolute path of the preference store file.
    pub fn preference_path(&self) -> PathBuf {
        self.root.join(&self.theme.preference_file)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                build_args,
                interface,
                port,
                watch,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                Self::update_option(&mut self.serve.watch, watch.as_ref());
            }
            Commands::Init { .. } | Commands::Validate | Commands::Scheme { .. } => {}
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        self.build.clean = args.clean;

        // base_path is derived from it in sync_base_path_from_url()
        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Make root, config, content and output paths absolute.
    fn normalize_paths(&mut self, root: &Path) {
        use crate::utils::path::normalize_path;

        self.root = normalize_path(root);
        self.config_path = normalize_path(&self.config_path);
        self.build.content = normalize_path(&self.root.join(&self.build.content));
        self.build.output = normalize_path(&self.root.join(&self.build.output));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if !self.config_path.exists() {
            bail!(ConfigError::NotFound(self.config_path.clone()));
        }

        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        self.serve.validate(&mut diag);
        self.theme.validate(&mut diag);

        if !self.build.content.is_dir() {
            diag.error_with_hint(
                BuildSectionConfig::FIELD_CONTENT,
                format!("`{}` is not a directory", self.build.content.display()),
                "run `folio init` or point `build.content` at your sections",
            );
        }

        if self.preference_path().starts_with(&self.build.output) {
            diag.error_with_hint(
                ThemeSectionConfig::FIELD_PREFERENCE_FILE,
                "stored scheme would be deleted by `--clean`",
                "keep `theme.preference_file` outside `build.output`, e.g. .folio/preferences.json",
            );
        }

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with a minimal `[site]` section.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\ndescription = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
