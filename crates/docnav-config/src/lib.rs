//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
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
//! - `site.manifest`
//! - `locale.preferred`

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site manifest path.
    pub manifest: Option<PathBuf>,
    /// Override the persisted locale preference.
    pub locale: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Locale tags the site is translated into.
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en-US"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site data configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Locale selection.
    pub locale: LocaleConfig,
    /// Menu grouping and ordering.
    pub menu: MenuConfig,
    /// Route aliases.
    pub routes: RoutesConfig,

    /// Resolved manifest path (set after loading).
    #[serde(skip)]
    pub manifest_path: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    manifest: Option<String>,
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale used when neither an override nor a recognised preference exists.
    pub fallback: String,
    /// Persisted locale preference.
    pub preferred: Option<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            fallback: "en-US".to_owned(),
            preferred: None,
        }
    }
}

/// Menu configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// URL prefixes whose menu links end with a `/`.
    pub trailing_slash: Vec<String>,
    /// Modules that share one combined menu.
    pub shared_modules: Vec<String>,
    /// Rank of each category name (ascending).
    pub category_order: HashMap<String, i32>,
    /// Rank of each type name (ascending).
    pub type_order: HashMap<String, i32>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            trailing_slash: vec!["components".to_owned()],
            shared_modules: vec![
                "components".to_owned(),
                "docs/react".to_owned(),
                "changelog".to_owned(),
            ],
            category_order: HashMap::new(),
            type_order: HashMap::new(),
        }
    }
}

/// Route configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Reserved route paths mapped to the content key they load instead.
    pub aliases: HashMap<String, String>,
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
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.manifest`").
        field: String,
        /// Error message (e.g., "${`DOCNAV_MANIFEST`} not set").
        message: String,
    },
}

/// Require a locale tag to be one of [`SUPPORTED_LOCALES`].
fn require_supported_locale(value: &str, field: &str) -> Result<(), ConfigError> {
    if !SUPPORTED_LOCALES.contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be one of {}, got {value:?}",
            SUPPORTED_LOCALES.join(", ")
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(manifest) = &settings.manifest {
            self.manifest_path.clone_from(manifest);
        }
        if let Some(locale) = &settings.locale {
            self.locale.preferred = Some(locale.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            locale: LocaleConfig::default(),
            menu: MenuConfig::default(),
            routes: RoutesConfig::default(),
            manifest_path: base.join("site-data.json"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_locale()?;
        self.validate_menu()?;
        self.validate_routes()?;
        Ok(())
    }

    fn validate_locale(&self) -> Result<(), ConfigError> {
        require_supported_locale(&self.locale.fallback, "locale.fallback")?;
        if let Some(preferred) = &self.locale.preferred {
            require_supported_locale(preferred, "locale.preferred")?;
        }
        Ok(())
    }

    fn validate_menu(&self) -> Result<(), ConfigError> {
        if self.menu.shared_modules.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "menu.shared_modules cannot contain empty names".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_routes(&self) -> Result<(), ConfigError> {
        for (path, target) in &self.routes.aliases {
            if target.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "routes.aliases.{path} cannot be empty"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref manifest) = self.site.manifest {
            self.site.manifest = Some(expand::expand_env(manifest, "site.manifest")?);
        }
        if let Some(ref preferred) = self.locale.preferred {
            self.locale.preferred = Some(expand::expand_env(preferred, "locale.preferred")?);
        }
        Ok(())
    }

    /// Resolve the manifest path relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.manifest_path = config_dir.join(
            self.site
                .manifest
                .as_deref()
                .unwrap_or("site-data.json"),
        );
    }
}
