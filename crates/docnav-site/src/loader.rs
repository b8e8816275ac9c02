//! Per-route content resolution.
//!
//! [`ContentLoader::resolve`] finds the content provider for a route, picks
//! the variant for the active locale, and loads it together with the route's
//! demo bundle. Both loads run concurrently and the result is returned only
//! after both have settled.
//!
//! # Outcomes
//!
//! - [`Resolution::Found`] with content and, when the route has one, demos.
//! - [`Resolution::NotFound`] when no provider matches the route.
//! - [`LoadError`] when a provider itself fails.
//!
//! Superseded calls are not cancelled: every call runs to completion, and the
//! caller discards results for routes it has moved away from.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;

use crate::demos::DemoBundle;
use crate::locale::Locale;
use crate::route::{RouteContext, normalize_pathname};

/// Boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error reported by a provider.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Create an error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// A deferred value: nothing runs until [`Loadable::load`] is called.
pub struct Loadable<T> {
    load: Arc<dyn Fn() -> BoxFuture<'static, Result<T, ProviderError>> + Send + Sync>,
}

impl<T> Clone for Loadable<T> {
    fn clone(&self) -> Self {
        Self {
            load: Arc::clone(&self.load),
        }
    }
}

impl<T> fmt::Debug for Loadable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loadable").finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Loadable<T> {
    /// Wrap a function producing a future.
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ProviderError>> + Send + 'static,
    {
        Self {
            load: Arc::new(move || Box::pin(load())),
        }
    }

    /// A provider that yields a clone of `value`.
    pub fn ready(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::new(move || {
            let value = value.clone();
            async move { Ok(value) }
        })
    }

    /// Run the provider.
    pub fn load(&self) -> BoxFuture<'static, Result<T, ProviderError>> {
        (self.load)()
    }
}

/// Run a required and an optional provider concurrently; wait for both.
pub async fn await_all<A, B>(
    primary: &Loadable<A>,
    secondary: Option<&Loadable<B>>,
) -> (Result<A, ProviderError>, Option<Result<B, ProviderError>>)
where
    A: Send + 'static,
    B: Send + 'static,
{
    let secondary = async {
        match secondary {
            Some(loadable) => Some(loadable.load().await),
            None => None,
        }
    };
    tokio::join!(primary.load(), secondary)
}

/// Content provider registered for a route.
pub enum ContentProvider<C> {
    /// One provider for every locale.
    Lazy(Loadable<C>),
    /// Per-locale providers, with an optional `index` provider used when
    /// the active locale has no entry.
    Localized {
        /// Locale to provider.
        locales: HashMap<Locale, Loadable<C>>,
        /// Fallback provider.
        index: Option<Box<ContentProvider<C>>>,
    },
}

impl<C> fmt::Debug for ContentProvider<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lazy(_) => f.write_str("Lazy"),
            Self::Localized { locales, index } => f
                .debug_struct("Localized")
                .field("locales", &locales.keys().collect::<Vec<_>>())
                .field("index", index)
                .finish(),
        }
    }
}

impl<C> ContentProvider<C> {
    /// Provider for `locale`: its own entry, else the index provider.
    #[must_use]
    pub fn select(&self, locale: Locale) -> Option<&Loadable<C>> {
        match self {
            Self::Lazy(loadable) => Some(loadable),
            Self::Localized { locales, index } => locales
                .get(&locale)
                .or_else(|| index.as_deref().and_then(|i| i.select(locale))),
        }
    }
}

/// Route content and demo providers.
#[derive(Debug)]
pub struct ContentIndex<C> {
    pages: HashMap<String, ContentProvider<C>>,
    demos: HashMap<String, Loadable<DemoBundle>>,
    aliases: HashMap<String, String>,
}

impl<C> Default for ContentIndex<C> {
    fn default() -> Self {
        Self {
            pages: HashMap::new(),
            demos: HashMap::new(),
            aliases: HashMap::new(),
        }
    }
}

impl<C> ContentIndex<C> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the content provider for a route path.
    #[must_use]
    pub fn with_page(mut self, path: &str, provider: ContentProvider<C>) -> Self {
        self.insert_page(path, provider);
        self
    }

    /// Register the demo bundle provider for a route path.
    #[must_use]
    pub fn with_demos(mut self, path: &str, demos: Loadable<DemoBundle>) -> Self {
        self.insert_demos(path, demos);
        self
    }

    /// Serve the content registered under `target` for route `path`.
    #[must_use]
    pub fn with_alias(mut self, path: &str, target: &str) -> Self {
        self.insert_alias(path, target);
        self
    }

    /// Register the content provider for a route path.
    pub fn insert_page(&mut self, path: &str, provider: ContentProvider<C>) {
        self.pages
            .insert(normalize_pathname(path).to_owned(), provider);
    }

    /// Serve the content registered under `target` for route `path`.
    pub fn insert_alias(&mut self, path: &str, target: &str) {
        self.aliases.insert(
            normalize_pathname(path).to_owned(),
            normalize_pathname(target).to_owned(),
        );
    }

    /// Register the demo bundle provider for a route path.
    pub fn insert_demos(&mut self, path: &str, demos: Loadable<DemoBundle>) {
        self.demos
            .insert(normalize_pathname(path).to_owned(), demos);
    }

    /// Content provider for route `path`, following aliases.
    #[must_use]
    pub fn page(&self, path: &str) -> Option<&ContentProvider<C>> {
        let path = normalize_pathname(path);
        let key = self.aliases.get(path).map_or(path, String::as_str);
        self.pages.get(key)
    }

    /// Demo bundle provider for route `path`.
    #[must_use]
    pub fn demos(&self, path: &str) -> Option<&Loadable<DemoBundle>> {
        self.demos.get(normalize_pathname(path))
    }

    /// Number of routes with content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no route has content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Loaded content for a route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoadResult<C> {
    /// Localized page content.
    pub content: C,
    /// Demo bundle, when the route has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demos: Option<DemoBundle>,
}

/// Not-found signal for a route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NotFound {
    /// Always 404.
    pub code: u16,
    /// The requested pathname.
    pub pathname: String,
}

impl NotFound {
    fn new(pathname: &str) -> Self {
        Self {
            code: 404,
            pathname: pathname.to_owned(),
        }
    }
}

/// Outcome of resolving a route.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Resolution<C> {
    /// Content was loaded.
    Found(LoadResult<C>),
    /// Nothing is registered for the route.
    NotFound(NotFound),
}

/// Error returned when a provider fails during resolution.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The content provider failed.
    #[error("Content provider failed for {path}: {source}")]
    Content {
        /// Route path.
        path: String,
        /// Provider error.
        #[source]
        source: ProviderError,
    },
    /// The demo provider failed.
    #[error("Demo provider failed for {path}: {source}")]
    Demos {
        /// Route path.
        path: String,
        /// Provider error.
        #[source]
        source: ProviderError,
    },
}

/// Resolves routes against a shared [`ContentIndex`].
#[derive(Debug)]
pub struct ContentLoader<C> {
    index: Arc<ContentIndex<C>>,
}

impl<C> Clone for ContentLoader<C> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
        }
    }
}

impl<C: Send + 'static> ContentLoader<C> {
    /// Create a loader over `index`.
    #[must_use]
    pub fn new(index: Arc<ContentIndex<C>>) -> Self {
        Self { index }
    }

    /// Resolve content and demos for `route` in `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the content or demo provider fails. A route
    /// without content is not an error; it yields [`Resolution::NotFound`].
    pub async fn resolve(
        &self,
        route: &RouteContext,
        locale: Locale,
    ) -> Result<Resolution<C>, LoadError> {
        let path = normalize_pathname(&route.pathname);

        let Some(content) = self.index.page(path).and_then(|p| p.select(locale)) else {
            tracing::info!(path = %path, %locale, "No content for route");
            return Ok(Resolution::NotFound(NotFound::new(&route.pathname)));
        };

        let demos = self.index.demos(path);
        let (content, demos) = await_all(content, demos).await;

        let content = content.map_err(|source| LoadError::Content {
            path: path.to_owned(),
            source,
        })?;
        let demos = demos.transpose().map_err(|source| LoadError::Demos {
            path: path.to_owned(),
            source,
        })?;

        tracing::debug!(
            path = %path,
            %locale,
            demos = demos.as_ref().map_or(0, DemoBundle::len),
            "Resolved route"
        );

        Ok(Resolution::Found(LoadResult { content, demos }))
    }
}
