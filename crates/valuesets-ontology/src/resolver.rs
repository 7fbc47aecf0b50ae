//! # Label Resolver
//!
//! Routes CURIE lookups to label sources and remembers the answers.
//!
//! ## Source Selection
//!
//! With the dynamic locator each lowercase CURIE prefix gets its own source,
//! opened on first use: the prefix's own database if it can be opened,
//! otherwise the merged database. When neither opens, the prefix is
//! tombstoned and every later CURIE with that prefix resolves to no label
//! without another open attempt.
//!
//! Any other locator names one source, opened when the resolver is built and
//! used for every prefix. If it fails to open, every lookup resolves to no
//! label.
//!
//! ## Caching
//!
//! When enabled, the outcome for each CURIE (including "no label") is kept
//! for the resolver's lifetime and never invalidated.

use std::collections::HashMap;

use valuesets_core::Curie;

use crate::locator::{AdapterLocator, MERGED_ONTOLOGY};
use crate::source::{LabelSource, SourceFactory};

enum SourcePolicy {
    /// Per-prefix sources. `None` marks a prefix whose sources failed to open.
    PerPrefix(HashMap<String, Option<Box<dyn LabelSource>>>),
    /// One source for every prefix, or none if it failed to open.
    Shared(Option<Box<dyn LabelSource>>),
}

/// Resolves CURIEs to ontology labels. Never fails.
pub struct LabelResolver {
    factory: Box<dyn SourceFactory>,
    policy: SourcePolicy,
    cache: Option<HashMap<Curie, Option<String>>>,
}

impl std::fmt::Debug for LabelResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let policy = match &self.policy {
            SourcePolicy::PerPrefix(sources) => format!("per-prefix ({} known)", sources.len()),
            SourcePolicy::Shared(source) => format!("shared (open: {})", source.is_some()),
        };
        f.debug_struct("LabelResolver")
            .field("policy", &policy)
            .field("cached", &self.cached_count())
            .finish_non_exhaustive()
    }
}

impl LabelResolver {
    /// Build a resolver for `locator`.
    ///
    /// For a non-dynamic locator the shared source is opened here; failure
    /// is logged and leaves the resolver answering "no label" for everything.
    pub fn new(
        locator: &AdapterLocator,
        factory: Box<dyn SourceFactory>,
        cache_labels: bool,
    ) -> Self {
        let policy = if locator.is_dynamic() {
            tracing::info!("using dynamic ontology source selection by CURIE prefix");
            SourcePolicy::PerPrefix(HashMap::new())
        } else {
            match factory.open_locator(locator) {
                Ok(source) => {
                    tracing::info!(locator = %locator, "initialized ontology source");
                    SourcePolicy::Shared(Some(source))
                }
                Err(e) => {
                    tracing::warn!(
                        locator = %locator,
                        error = %e,
                        "could not initialize ontology source"
                    );
                    SourcePolicy::Shared(None)
                }
            }
        };

        Self {
            factory,
            policy,
            cache: cache_labels.then(HashMap::new),
        }
    }

    /// The label the ontology asserts for `curie`, if any.
    pub fn label_for(&mut self, curie: &Curie) -> Option<String> {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(curie)) {
            return cached.clone();
        }

        let label = self.lookup(curie);

        if let Some(cache) = self.cache.as_mut() {
            cache.insert(curie.clone(), label.clone());
        }
        label
    }

    /// Number of CURIEs with a cached outcome.
    pub fn cached_count(&self) -> usize {
        self.cache.as_ref().map_or(0, HashMap::len)
    }

    fn lookup(&mut self, curie: &Curie) -> Option<String> {
        let prefix = curie.prefix()?;

        let source = match &mut self.policy {
            SourcePolicy::Shared(source) => source.as_deref(),
            SourcePolicy::PerPrefix(sources) => sources
                .entry(prefix.clone())
                .or_insert_with(|| open_for_prefix(self.factory.as_ref(), &prefix))
                .as_deref(),
        }?;

        match source.label(curie) {
            Ok(label) => label,
            Err(e) => {
                tracing::debug!(curie = %curie, error = %e, "could not get label");
                None
            }
        }
    }
}

fn open_for_prefix(factory: &dyn SourceFactory, prefix: &str) -> Option<Box<dyn LabelSource>> {
    match factory.open_ontology(prefix) {
        Ok(source) => {
            tracing::info!(prefix, "created ontology source");
            return Some(source);
        }
        Err(e) => tracing::debug!(prefix, error = %e, "could not open ontology source"),
    }

    match factory.open_ontology(MERGED_ONTOLOGY) {
        Ok(source) => {
            tracing::info!(prefix, "using merged ontology source");
            Some(source)
        }
        Err(e) => {
            tracing::warn!(prefix, error = %e, "could not open any ontology source");
            None
        }
    }
}
