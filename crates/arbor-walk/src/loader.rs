//! Extension-keyed payload loaders.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use arbor_core::{Payload, WalkError};

/// Turns a file's path (and contents) into a [`Payload`].
///
/// Loaders run during the construction pass, one at a time. A loader error
/// aborts the whole walk; construction is all-or-nothing.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Produce a payload for the file at `path`.
    async fn load(&self, path: &Path, options: Option<&Value>) -> Result<Payload, WalkError>;
}

/// Configuration handed to a loader on each invocation.
#[derive(Clone)]
pub enum LoaderOptions {
    /// A static value, passed as-is.
    Value(Value),
    /// A zero-argument provider re-evaluated per invocation, for per-call
    /// configuration such as a parser dialect.
    Provider(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl LoaderOptions {
    /// Resolve to a concrete value for one invocation.
    pub fn resolve(&self) -> Value {
        match self {
            LoaderOptions::Value(value) => value.clone(),
            LoaderOptions::Provider(provider) => provider(),
        }
    }

    /// Build provider-backed options.
    pub fn provider(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        LoaderOptions::Provider(Arc::new(f))
    }
}

impl From<Value> for LoaderOptions {
    fn from(value: Value) -> Self {
        LoaderOptions::Value(value)
    }
}

impl fmt::Debug for LoaderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderOptions::Value(value) => f.debug_tuple("LoaderOptions::Value").field(value).finish(),
            LoaderOptions::Provider(_) => f.write_str("LoaderOptions::Provider(..)"),
        }
    }
}

/// A registered loader plus its optional configuration.
pub struct LoaderEntry {
    loader: Arc<dyn Loader>,
    options: Option<LoaderOptions>,
}

impl LoaderEntry {
    /// Resolve options and run the loader for one file.
    pub async fn load(&self, path: &Path) -> Result<Payload, WalkError> {
        let options = self.options.as_ref().map(LoaderOptions::resolve);
        self.loader.load(path, options.as_ref()).await
    }

    /// The configured options, unresolved.
    pub fn options(&self) -> Option<&LoaderOptions> {
        self.options.as_ref()
    }
}

impl fmt::Debug for LoaderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderEntry")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Maps file extensions to loaders.
///
/// Keys include the leading dot (`".json"`); the empty string claims
/// extensionless files. Resolution is exact-match only — there is no
/// wildcard or fallback, and an unregistered extension yields no payload.
#[derive(Debug, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, LoaderEntry>,
}

impl LoaderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader for an extension.
    pub fn register(
        &mut self,
        extension: impl Into<String>,
        loader: impl Loader + 'static,
    ) -> &mut Self {
        self.loaders.insert(
            extension.into(),
            LoaderEntry {
                loader: Arc::new(loader),
                options: None,
            },
        );
        self
    }

    /// Register a loader for an extension, with options.
    pub fn register_with_options(
        &mut self,
        extension: impl Into<String>,
        loader: impl Loader + 'static,
        options: impl Into<LoaderOptions>,
    ) -> &mut Self {
        self.loaders.insert(
            extension.into(),
            LoaderEntry {
                loader: Arc::new(loader),
                options: Some(options.into()),
            },
        );
        self
    }

    /// Look up the loader registered for an extension, exactly.
    pub fn get(&self, extension: &str) -> Option<&LoaderEntry> {
        self.loaders.get(extension)
    }

    /// Number of registered loaders.
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// True when no loader is registered.
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

// ==================== Default loaders ====================

/// Reads a file's UTF-8 contents into a text payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader;

#[async_trait]
impl Loader for TextLoader {
    async fn load(&self, path: &Path, _options: Option<&Value>) -> Result<Payload, WalkError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| WalkError::io(path, err))?;
        Ok(Payload::text(content))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonLoaderOptions {
    #[serde(default)]
    dialect: Option<String>,
}

/// Parses a file as a strict JSON document.
///
/// Recognizes an optional `{"dialect": "json"}` option; any other dialect or
/// unknown option key is an error, so a misconfiguration fails the walk
/// instead of silently omitting payloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLoader;

#[async_trait]
impl Loader for JsonLoader {
    async fn load(&self, path: &Path, options: Option<&Value>) -> Result<Payload, WalkError> {
        if let Some(options) = options {
            let options: JsonLoaderOptions = serde_json::from_value(options.clone())
                .map_err(|err| WalkError::loader(path, err.to_string()))?;
            if let Some(dialect) = options.dialect {
                if dialect != "json" {
                    return Err(WalkError::loader(
                        path,
                        format!("unsupported dialect `{dialect}`"),
                    ));
                }
            }
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| WalkError::io(path, err))?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|err| WalkError::loader(path, err.to_string()))?;
        Ok(Payload::json(value))
    }
}
