//! folio-rs: a portfolio website server with CMS-backed content
//!
//! Pages are rendered from view models resolved against a headless CMS, with
//! compiled-in static fallback whenever live content is unavailable. CMS rich
//! text is parsed into a data-only node tree before any HTML is emitted.

pub mod cms;
pub mod config;
pub mod content;
pub mod html;
pub mod locale;
pub mod richtext;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main Folio application
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory, loading `folio.yml`
    /// when present.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("folio.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Create an instance from an already-built configuration.
    pub fn with_config(config: config::SiteConfig, base_dir: PathBuf) -> Self {
        Self { config, base_dir }
    }

    /// Build a content resolver with the compiled-in fallback content.
    pub fn resolver(&self) -> content::ContentResolver {
        content::ContentResolver::new(&self.config.cms, content::StaticContent::compiled())
    }
}
