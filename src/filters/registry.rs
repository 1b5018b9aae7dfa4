//! Filter registry: the name -> function dispatch table.

use crate::core::error::{FilterResult, UnsupportedFilterError};
use crate::core::kind::{Category, FilterInfo, FilterKind};
use crate::core::types::Image;
use image::RgbImage;
use indexmap::IndexMap;
use std::sync::OnceLock;

/// Signature shared by every filter function.
pub type FilterFn = fn(&RgbImage, f32) -> RgbImage;

/// Registry entry containing the filter function and its listing metadata.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Which filter this is.
    pub kind: FilterKind,
    /// The transformation itself.
    pub apply: FilterFn,
    /// Cached metadata for listings.
    pub info: FilterInfo,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("kind", &self.kind)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// Registry of all supported filters.
///
/// The set of filters is fixed at construction; lookups are a single hash
/// probe on the lower-cased identifier. A registry holds no mutable state and
/// can be shared freely between threads.
#[derive(Debug)]
pub struct FilterRegistry {
    /// Filters indexed by their canonical identifier.
    filters: IndexMap<&'static str, RegistryEntry>,
    /// Filters grouped by category.
    categories: IndexMap<Category, Vec<FilterKind>>,
}

impl FilterRegistry {
    fn empty() -> Self {
        Self {
            filters: IndexMap::new(),
            categories: IndexMap::new(),
        }
    }

    /// Create a registry holding every built-in filter.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        crate::filters::builtin::register_all(&mut registry);

        // listing order follows FilterKind::ALL, not module order
        registry.filters.sort_by(|_, a, _, b| a.kind.cmp(&b.kind));
        registry
    }

    /// Process-wide shared registry.
    pub fn global() -> &'static FilterRegistry {
        static REGISTRY: OnceLock<FilterRegistry> = OnceLock::new();
        REGISTRY.get_or_init(FilterRegistry::with_builtins)
    }

    /// Register a filter function.
    pub(crate) fn register(&mut self, kind: FilterKind, apply: FilterFn) {
        let entry = RegistryEntry {
            kind,
            apply,
            info: kind.info(),
        };

        if self.filters.insert(kind.as_str(), entry).is_none() {
            self.categories
                .entry(kind.category())
                .or_insert_with(Vec::new)
                .push(kind);
        }
    }

    /// Look up a filter by identifier, ignoring ASCII case.
    pub fn resolve(&self, identifier: &str) -> Result<&RegistryEntry, UnsupportedFilterError> {
        let key = identifier.trim().to_ascii_lowercase();
        self.filters
            .get(key.as_str())
            .ok_or_else(|| UnsupportedFilterError {
                name: identifier.to_string(),
                valid: self.filter_ids().map(str::to_string).collect(),
            })
    }

    /// Apply the filter named `identifier` to `image`.
    ///
    /// Accepts a string identifier or a [`FilterKind`]. The input image is
    /// left untouched; the result is a new image of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Unsupported`](crate::core::error::FilterError::Unsupported) when the identifier is not one of
    /// the registered filters. The error lists every valid identifier.
    pub fn apply(
        &self,
        image: &Image,
        identifier: impl AsRef<str>,
        strength: f32,
    ) -> FilterResult<Image> {
        let entry = self.resolve(identifier.as_ref())?;
        Ok(run(entry, image, strength))
    }

    /// Apply a filter chosen by kind. Infallible, since every kind is registered.
    pub fn apply_kind(&self, image: &Image, kind: FilterKind, strength: f32) -> Image {
        match self.filters.get(kind.as_str()) {
            Some(entry) => run(entry, image, strength),
            None => unreachable!("built-in filter {kind} is always registered"),
        }
    }

    /// Check if a filter is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_ok()
    }

    /// Get metadata for a filter.
    pub fn get_info(&self, identifier: &str) -> Option<&FilterInfo> {
        self.resolve(identifier).ok().map(|e| &e.info)
    }

    /// Get all registered filter IDs, in listing order.
    pub fn filter_ids(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().copied()
    }

    /// Metadata for every filter, in listing order.
    pub fn list(&self) -> Vec<FilterInfo> {
        self.filters.values().map(|e| e.info.clone()).collect()
    }

    /// Identifier -> description map, as surfaced by a discovery endpoint.
    pub fn descriptions(&self) -> IndexMap<&'static str, &'static str> {
        self.filters
            .values()
            .map(|e| (e.kind.as_str(), e.kind.description()))
            .collect()
    }

    /// Get filters by category.
    pub fn filters_by_category(&self, category: &Category) -> Vec<FilterKind> {
        self.categories.get(category).cloned().unwrap_or_default()
    }

    /// Get filters grouped by category for display.
    pub fn grouped_by_category(&self) -> IndexMap<Category, Vec<&FilterInfo>> {
        let mut grouped: IndexMap<Category, Vec<&FilterInfo>> = IndexMap::new();

        for category in Category::all() {
            for kind in self.filters_by_category(category) {
                if let Some(entry) = self.filters.get(kind.as_str()) {
                    grouped.entry(*category).or_default().push(&entry.info);
                }
            }
        }

        // Sort each category by name
        for filters in grouped.values_mut() {
            filters.sort_by(|a, b| a.name.cmp(&b.name));
        }

        grouped
    }

    /// Search filters by identifier, name or description.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();

        self.filters
            .iter()
            .filter(|(_, entry)| {
                let id_match = entry.info.id.contains(&query);
                let name_match = entry.info.name.to_lowercase().contains(&query);
                let desc_match = entry.info.description.to_lowercase().contains(&query);

                id_match || name_match || desc_match
            })
            .map(|(id, _)| *id)
            .collect()
    }

    /// Get the total number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn run(entry: &RegistryEntry, image: &Image, strength: f32) -> Image {
    let output = (entry.apply)(image.as_rgb(), strength);
    debug_assert_eq!(output.dimensions(), image.as_rgb().dimensions());
    Image::from_filter_output(output)
}
