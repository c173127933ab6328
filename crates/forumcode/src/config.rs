//! Renderer configuration loaded from YAML.
//!
//! Every field is optional and falls back to the renderer's defaults:
//!
//! ```yaml
//! max_quote_depth: 8
//! smileys: true
//! paragraphs: false
//! link_prefix: /forum
//! thread_titles:
//!   erdbeer-daiquiri: Der perfekte Erdbeer-Daiquiri
//! ```
//!
//! Command-line flags are applied on top of the loaded file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use forumcode_bbparser::{is_thread_slug, BBRenderer, ForumRoutes, RenderOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest quote depth a configuration may ask for.
pub const MAX_QUOTE_DEPTH: usize = RenderOptions::MAX_QUOTE_DEPTH;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML could not be parsed into a configuration.
    #[error("invalid configuration{}: {message}", location(.path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A value is outside its allowed range.
    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

fn location(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Quotes nested deeper than this render as text.
    pub max_quote_depth: usize,
    /// Replace smiley shortcuts with images.
    pub smileys: bool,
    /// Wrap the output in paragraphs.
    pub paragraphs: bool,
    /// Path prefix of post and thread links.
    pub link_prefix: String,
    /// Known thread titles by slug, used for `[thread]` links without text.
    pub thread_titles: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_quote_depth: RenderOptions::DEFAULT_MAX_QUOTE_DEPTH,
            smileys: true,
            paragraphs: true,
            link_prefix: ForumRoutes::DEFAULT_PREFIX.to_string(),
            thread_titles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, Some(path))
    }

    /// Parses and validates a configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Loads `path` if given, the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        // An empty document is a valid, empty configuration.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: path.map(Path::to_path_buf),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_quote_depth > MAX_QUOTE_DEPTH {
            return Err(ConfigError::InvalidValue {
                field: "max_quote_depth",
                message: format!("{} exceeds the limit of {}", self.max_quote_depth, MAX_QUOTE_DEPTH),
            });
        }
        if !self.link_prefix.is_empty() && !self.link_prefix.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "link_prefix",
                message: format!("'{}' must start with '/'", self.link_prefix),
            });
        }
        if let Some(slug) = self.thread_titles.keys().find(|slug| !is_thread_slug(slug)) {
            return Err(ConfigError::InvalidValue {
                field: "thread_titles",
                message: format!("'{}' is not a thread slug", slug),
            });
        }
        Ok(())
    }

    /// The render options described by this configuration.
    pub fn options(&self) -> RenderOptions {
        RenderOptions::new()
            .max_quote_depth(self.max_quote_depth)
            .smileys(self.smileys)
            .paragraphs(self.paragraphs)
    }

    /// The link routes described by this configuration.
    pub fn routes(&self) -> ForumRoutes {
        ForumRoutes::new(self.link_prefix.as_str()).threads(self.thread_titles.clone())
    }

    /// A renderer configured by this configuration.
    pub fn renderer(&self) -> BBRenderer {
        BBRenderer::new()
            .with_options(self.options())
            .link_resolver(self.routes())
    }
}
