//! Filter previews rendered on a solid sample image.
//!
//! Renders are JPEG-encoded and kept in an LRU cache keyed by filter and
//! strength, since the sample never changes for a given configuration.
//! Strength arrives as a [`Strength`], so it is always within `[0, 2]`.

use crate::config::{Config, PreviewConfig};
use crate::core::error::ChitraResult;
use crate::core::kind::FilterKind;
use crate::core::types::{Image, Strength};
use crate::filters::registry::FilterRegistry;
use crate::io::{encode_image, OutputFormat};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Build the solid sample image previews are rendered on.
pub fn sample_image(config: &PreviewConfig) -> ChitraResult<Image> {
    Ok(Image::filled(config.width, config.height, config.color)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PreviewKey {
    kind: FilterKind,
    strength_bits: u32,
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of renders.
    pub misses: u64,
    /// Entries currently cached.
    pub entries: usize,
}

impl PreviewStats {
    /// Calculate hit ratio.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

/// Renders and caches filter previews. Safe to share between threads.
pub struct PreviewRenderer {
    registry: &'static FilterRegistry,
    sample: Image,
    jpeg_quality: u8,
    cache: Mutex<LruCache<PreviewKey, Arc<Vec<u8>>>>,
    stats: Mutex<PreviewStats>,
}

impl PreviewRenderer {
    /// Create a renderer from configuration.
    pub fn new(config: &Config) -> ChitraResult<Self> {
        let capacity = NonZeroUsize::new(config.preview.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Ok(Self {
            registry: FilterRegistry::global(),
            sample: sample_image(&config.preview)?,
            jpeg_quality: config.jpeg_quality,
            cache: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(PreviewStats::default()),
        })
    }

    /// The sample image previews are rendered on.
    pub fn sample(&self) -> &Image {
        &self.sample
    }

    /// Apply a filter to the sample without encoding.
    pub fn render_image(&self, filter: &str, strength: Strength) -> ChitraResult<Image> {
        Ok(self.registry.apply(&self.sample, filter, strength.value())?)
    }

    /// JPEG bytes of `filter` applied to the sample at `strength`.
    pub fn render(&self, filter: &str, strength: Strength) -> ChitraResult<Arc<Vec<u8>>> {
        let kind = self.registry.resolve(filter)?.kind;
        let strength = strength.value();
        let key = PreviewKey {
            kind,
            strength_bits: strength.to_bits(),
        };

        if let Some(bytes) = self.cache.lock().get(&key) {
            self.stats.lock().hits += 1;
            return Ok(Arc::clone(bytes));
        }

        log::debug!("Rendering preview for {} at strength {}", kind, strength);
        let filtered = self.registry.apply_kind(&self.sample, kind, strength);
        let bytes = Arc::new(encode_image(&filtered, OutputFormat::Jpeg, self.jpeg_quality)?);

        self.cache.lock().put(key, Arc::clone(&bytes));
        self.stats.lock().misses += 1;
        Ok(bytes)
    }

    /// Get cache statistics.
    pub fn stats(&self) -> PreviewStats {
        let mut stats = *self.stats.lock();
        stats.entries = self.cache.lock().len();
        stats
    }

    /// Drop every cached preview.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ChitraError;

    fn strength(value: f32) -> Strength {
        Strength::new(value).unwrap()
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.preview.width = 16;
        config.preview.height = 12;
        config.preview.cache_capacity = 2;
        config
    }

    #[test]
    fn test_sample_defaults() {
        let sample = sample_image(&PreviewConfig::default()).unwrap();
        assert_eq!((sample.width(), sample.height()), (400, 300));
        assert_eq!(sample.pixel(0, 0), [73, 109, 137]);
    }

    #[test]
    fn test_render_is_cached() {
        let renderer = PreviewRenderer::new(&small_config()).unwrap();
        let first = renderer.render("sepia", Strength::DEFAULT).unwrap();
        let second = renderer.render("SEPIA", strength(1.0)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let stats = renderer.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.hit_ratio(), 0.5);
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let renderer = PreviewRenderer::new(&small_config()).unwrap();
        renderer.render("blur", strength(0.5)).unwrap();
        renderer.render("blur", strength(1.0)).unwrap();
        renderer.render("vignette", strength(1.0)).unwrap();
        assert_eq!(renderer.stats().entries, 2);

        renderer.clear();
        assert_eq!(renderer.stats().entries, 0);
    }

    #[test]
    fn test_unknown_filter() {
        let renderer = PreviewRenderer::new(&small_config()).unwrap();
        assert!(matches!(
            renderer.render("glow", Strength::DEFAULT),
            Err(ChitraError::Filter(_))
        ));
    }

    #[test]
    fn test_render_image_applies_filter() {
        let renderer = PreviewRenderer::new(&small_config()).unwrap();
        let negative = renderer.render_image("negative", Strength::DEFAULT).unwrap();
        assert_eq!(negative.pixel(3, 3), [255 - 73, 255 - 109, 255 - 137]);
    }

    #[test]
    fn test_strength_range_enforced_before_render() {
        let renderer = PreviewRenderer::new(&small_config()).unwrap();
        for bad in [-0.1, 2.5, f32::NAN] {
            assert!(Strength::new(bad).is_err());
        }
        let darkest = renderer.render_image("brightness", strength(Strength::MIN)).unwrap();
        assert_eq!(darkest.pixel(0, 0), [0, 0, 0]);
        let brightest = renderer.render_image("brightness", strength(Strength::MAX)).unwrap();
        assert_eq!(brightest.pixel(0, 0), [146, 218, 255]);
    }
}
