//! Site configuration for sitenav.
//!
//! Parses `sitenav.toml` (or a JSON/YAML equivalent) with serde, provides
//! auto-discovery of the config file in parent directories, and validates it
//! into a [`Site`] whose sidebar is a [`NavigationTree`].
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `title`
//! - `socials[].link`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sitenav_tree::{NavigationTree, RawNode, RawTree, ValidationError};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site title.
    pub title: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Serialization format of a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (default).
    Toml,
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from the file extension. Unknown or missing
    /// extensions are read as TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Site configuration as authored.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Social links, in rendering order.
    #[serde(default)]
    pub socials: Vec<Social>,
    /// Root-level sidebar entries, unvalidated.
    #[serde(default)]
    pub sidebar: Vec<RawNode>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// External social link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Social {
    /// Icon identifier.
    pub icon: SocialIcon,
    /// Absolute URL.
    pub link: String,
}

/// Known social icons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialIcon {
    /// Discord.
    Discord,
    /// GitHub.
    Github,
    /// Telegram.
    Telegram,
    /// Warpcast.
    Warpcast,
    /// X (formerly Twitter).
    X,
}

/// Validated site configuration, ready for a renderer.
#[derive(Debug)]
pub struct Site {
    /// Site title.
    pub title: String,
    /// Social links, in rendering order.
    pub socials: Vec<Social>,
    /// Validated sidebar.
    pub sidebar: NavigationTree,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Sidebar validation error.
    #[error("Invalid sidebar: {0}")]
    Sidebar(#[from] ValidationError),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`socials[0].link`").
        field: String,
        /// Error message (e.g., "${`GITHUB_ORG`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "{field} must be an absolute http:// or https:// URL"
        ))),
    }
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, or reading or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => {
                let cwd = std::env::current_dir()?;
                discover_config(&cwd)
                    .ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAME)))?
            }
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from a string in the given format.
    ///
    /// Environment variables are expanded; nothing is validated yet.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or expansion fails.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let mut config: Self = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
        };
        config.expand_env_vars()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let format = ConfigFormat::from_path(path);
        tracing::debug!(path = %path.display(), %format, "Loading site configuration");

        let mut config = Self::parse(&content, format)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.title {
            self.title.clone_from(title);
        }
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.title = expand::expand_env(&self.title, "title")?;

        for (i, social) in self.socials.iter_mut().enumerate() {
            social.link = expand::expand_env(&social.link, &format!("socials[{i}].link"))?;
        }

        Ok(())
    }

    /// Validate configuration values and the sidebar.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for an empty title or a social link
    /// that is not an absolute URL, and `ConfigError::Sidebar` for the first
    /// sidebar violation.
    pub fn validate(&self) -> Result<Site, ConfigError> {
        require_non_empty(&self.title, "title")?;
        self.validate_socials()?;

        let sidebar = NavigationTree::validate(&self.raw_sidebar())?;

        Ok(Site {
            title: self.title.clone(),
            socials: self.socials.clone(),
            sidebar,
        })
    }

    /// Sidebar lowered into an arena for validation or diagnosis.
    #[must_use]
    pub fn raw_sidebar(&self) -> RawTree {
        RawTree::from_nodes(&self.sidebar)
    }

    /// Validate social links.
    fn validate_socials(&self) -> Result<(), ConfigError> {
        let mut seen = Vec::with_capacity(self.socials.len());
        for (i, social) in self.socials.iter().enumerate() {
            require_http_url(&social.link, &format!("socials[{i}].link"))?;

            if seen.contains(&social.icon) {
                tracing::warn!(icon = ?social.icon, index = i, "Social icon listed more than once");
            }
            seen.push(social.icon);
        }
        Ok(())
    }
}

/// Search for config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
