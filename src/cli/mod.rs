//! Command-line interface module.

mod args;
pub mod build;
pub mod init;
pub mod scheme;
pub mod serve;
pub mod validate;

pub use args::{BuildArgs, Cli, Commands, SchemeAction};

/// Scaffolded project under `root` with every path already absolute.
#[cfg(test)]
pub(crate) fn test_project(root: &std::path::Path) -> crate::config::SiteConfig {
    let root = root.canonicalize().unwrap();
    let mut config = crate::config::test_parse_config("");
    config.root = root.clone();
    config.config_path = root.join("folio.toml");
    config.build.content = root.join("content");
    config.build.output = root.join("public");

    std::fs::write(&config.config_path, "[site]\ntitle = \"Test\"\n").unwrap();
    init::create_structure(&config).unwrap();
    config
}
