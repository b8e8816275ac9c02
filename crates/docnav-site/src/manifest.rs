//! Site manifest: page metadata and content locations per module.
//!
//! A manifest is a JSON or YAML document produced by the metadata collector:
//!
//! ```json
//! {
//!   "modules": {
//!     "components": [
//!       {"meta": {"filename": "components/button/index.en-US.md", "title": "Button"},
//!        "content": "components/button/index.en-US.json"}
//!     ]
//!   },
//!   "demos": {"components/button": "components/button/demos.json"}
//! }
//! ```
//!
//! Content and demo paths are relative to the manifest's directory and are only
//! read when a route is resolved.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::loader::{ContentIndex, ContentProvider, Loadable, ProviderError};
use crate::locale::Locale;
use crate::modules::ModuleScope;
use crate::page_meta::PageMeta;
use crate::route::{filename_locale, filename_to_route};

/// One page in a module.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ManifestEntry {
    /// Page metadata.
    pub meta: PageMeta,
    /// Content file; entries without one appear in menus only.
    #[serde(default)]
    pub content: Option<PathBuf>,
}

/// Collected site data.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SiteManifest {
    /// Module name to pages.
    #[serde(default)]
    pub modules: BTreeMap<String, Vec<ManifestEntry>>,
    /// Route path to demo bundle file.
    #[serde(default)]
    pub demos: BTreeMap<String, PathBuf>,
}

/// Error returned when a manifest cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// I/O error.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed JSON.
    #[error("Invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed YAML.
    #[error("Invalid manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SiteManifest {
    /// Parse a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Json`] if the document is malformed.
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a YAML manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Yaml`] if the document is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read a manifest, choosing the format by extension (`.yaml`/`.yml` or JSON).
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ManifestError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let manifest = if is_yaml(path) {
            Self::from_yaml(&content)?
        } else {
            Self::from_json(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            modules = manifest.modules.len(),
            demos = manifest.demos.len(),
            "Loaded site manifest"
        );
        Ok(manifest)
    }

    /// Page metadata grouped by module, with `shared` modules combined.
    #[must_use]
    pub fn module_scope(&self, shared: Vec<String>) -> ModuleScope {
        let modules = self
            .modules
            .iter()
            .map(|(name, entries)| {
                let pages = entries.iter().map(|entry| entry.meta.clone()).collect();
                (name.clone(), pages)
            })
            .collect();
        ModuleScope::new(modules, shared)
    }

    /// Build the route index, with file paths resolved against `base_dir`.
    ///
    /// Entries sharing a route merge into one provider: suffixed filenames
    /// become per-locale entries and an unsuffixed one becomes the index.
    #[must_use]
    pub fn content_index(&self, base_dir: &Path) -> ContentIndex<Value> {
        let mut routes: HashMap<&str, RouteFiles> = HashMap::new();

        for entry in self.modules.values().flatten() {
            let Some(content) = &entry.content else {
                continue;
            };
            let route = filename_to_route(&entry.meta.filename);
            if route.is_empty() {
                tracing::warn!(filename = %entry.meta.filename, "Skipping entry without route");
                continue;
            }

            let files = routes.entry(route).or_default();
            let loadable = file_loadable(base_dir.join(content));
            match filename_locale(&entry.meta.filename) {
                Some(locale) => {
                    files.locales.insert(locale, loadable);
                }
                None => files.index = Some(loadable),
            }
        }

        let mut index = ContentIndex::new();
        for (route, files) in routes {
            index.insert_page(route, files.into_provider());
        }
        for (route, path) in &self.demos {
            index.insert_demos(route, file_loadable(base_dir.join(path)));
        }

        tracing::debug!(routes = index.len(), "Built content index");
        index
    }
}

#[derive(Default)]
struct RouteFiles {
    locales: HashMap<Locale, Loadable<Value>>,
    index: Option<Loadable<Value>>,
}

impl RouteFiles {
    fn into_provider(self) -> ContentProvider<Value> {
        match self.index {
            Some(index) if self.locales.is_empty() => ContentProvider::Lazy(index),
            index => ContentProvider::Localized {
                locales: self.locales,
                index: index.map(|i| Box::new(ContentProvider::Lazy(i))),
            },
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// A provider that reads and parses `path` each time it is loaded.
fn file_loadable<T>(path: PathBuf) -> Loadable<T>
where
    T: DeserializeOwned + Send + 'static,
{
    Loadable::new(move || {
        let path = path.clone();
        async move {
            let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
                ProviderError::new(format!("Failed to read {}", path.display())).with_source(e)
            })?;
            parse_document(&path, &text)
        }
    })
}

fn parse_document<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T, ProviderError> {
    let invalid = || ProviderError::new(format!("Failed to parse {}", path.display()));
    if is_yaml(path) {
        serde_yaml::from_str(text).map_err(|e| invalid().with_source(e))
    } else {
        serde_json::from_str(text).map_err(|e| invalid().with_source(e))
    }
}
