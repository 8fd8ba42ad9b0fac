use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::base::Model;
use super::openai::OpenAiModel;
use crate::errors::ModelError;

/// A model reference: either a constructed instance or a namespaced
/// `"provider:model-name"` identifier.
pub enum ModelRef {
    Instance(Arc<dyn Model>),
    Name(String),
}

impl From<Arc<dyn Model>> for ModelRef {
    fn from(model: Arc<dyn Model>) -> Self {
        ModelRef::Instance(model)
    }
}

impl From<&str> for ModelRef {
    fn from(name: &str) -> Self {
        ModelRef::Name(name.to_string())
    }
}

impl From<String> for ModelRef {
    fn from(name: String) -> Self {
        ModelRef::Name(name)
    }
}

/// Constructor registered for a provider prefix. Receives the model name
/// with the prefix already stripped.
pub type ModelConstructor = fn(&str) -> Result<Arc<dyn Model>>;

/// Mapping from provider prefix to model constructor.
#[derive(Default)]
pub struct ProviderRegistry {
    constructors: HashMap<String, ModelConstructor>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry recognizing the standard provider set (`openai` today)
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("openai", openai_model);
        registry
    }

    /// Register a constructor for a provider prefix.
    ///
    /// # Panics
    ///
    /// Panics if the prefix is already registered.
    pub fn register(&mut self, prefix: impl Into<String>, constructor: ModelConstructor) {
        let prefix = prefix.into();
        assert!(
            !self.constructors.contains_key(&prefix),
            "provider '{prefix}' is already registered"
        );
        self.constructors.insert(prefix, constructor);
    }

    /// Resolve a `"provider:model-name"` identifier to a concrete model.
    ///
    /// The identifier splits on the first colon; everything after it is
    /// passed to the provider constructor unmodified. Identifiers without a
    /// recognized prefix fail with [`ModelError::UnrecognizedModel`]
    /// carrying the offending string.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<dyn Model>> {
        let (prefix, model_name) = identifier
            .split_once(':')
            .ok_or_else(|| ModelError::UnrecognizedModel(identifier.to_string()))?;

        let constructor = self
            .constructors
            .get(prefix)
            .ok_or_else(|| ModelError::UnrecognizedModel(identifier.to_string()))?;

        debug!(provider = %prefix, model = %model_name, "resolving model identifier");
        constructor(model_name)
    }
}

fn openai_model(model: &str) -> Result<Arc<dyn Model>> {
    Ok(Arc::new(OpenAiModel::from_env(model)?))
}

/// Resolve `model` to a concrete [`Model`].
///
/// An already constructed instance passes through unchanged; a string
/// identifier is dispatched through the standard provider registry. No
/// caching and no network calls are involved.
pub fn infer_model(model: impl Into<ModelRef>) -> Result<Arc<dyn Model>> {
    match model.into() {
        ModelRef::Instance(model) => Ok(model),
        ModelRef::Name(name) => ProviderRegistry::standard().resolve(&name),
    }
}
