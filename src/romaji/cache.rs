use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::{debug, debug_span, warn};

use super::tokenizer::tokenize;
use super::variants::{expand_into, VariantSet, MAX_VARIANTS};
use super::validate_reading;
use crate::error::ReadingError;

/// Memoized reading -> spelling list map.
///
/// Entries are never invalidated; readings are static game data. The lock is
/// released while a miss is computed, so two threads may both compute the same
/// reading, but the first insert wins and every caller sees that list.
#[derive(Debug, Default)]
pub struct VariantCache {
    entries: Mutex<HashMap<String, Arc<[String]>>>,
}

impl VariantCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance behind [`generate_variants`].
    pub fn global() -> &'static VariantCache {
        static INSTANCE: OnceLock<VariantCache> = OnceLock::new();
        INSTANCE.get_or_init(VariantCache::new)
    }

    /// All accepted spellings of `reading`, computed on first request.
    ///
    /// The list is non-empty, duplicate-free, starts with `reading` itself and
    /// holds at most [`MAX_VARIANTS`] entries.
    pub fn variants(&self, reading: &str) -> Arc<[String]> {
        if let Some(hit) = self.lock().get(reading) {
            return Arc::clone(hit);
        }
        let computed: Arc<[String]> = compute_variants(reading).into();
        let mut entries = self.lock();
        Arc::clone(entries.entry(reading.to_string()).or_insert(computed))
    }

    /// Like [`variants`](Self::variants), but rejects readings outside `[a-z-]+`.
    pub fn try_variants(&self, reading: &str) -> Result<Arc<[String]>, ReadingError> {
        validate_reading(reading)?;
        Ok(self.variants(reading))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<[String]>>> {
        // The map is only ever inserted into, so a poisoned guard is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn compute_variants(reading: &str) -> Vec<String> {
    let _span = debug_span!("compute_variants", reading).entered();
    let mut set = VariantSet::with_cap(MAX_VARIANTS);
    set.insert(reading);

    let sequences = tokenize(reading);
    for seq in &sequences {
        if !expand_into(seq, &mut set) {
            warn!(reading, cap = MAX_VARIANTS, "variant cap reached");
            break;
        }
    }
    debug!(sequences = sequences.len(), variants = set.len());
    set.into_vec()
}

/// Spellings of `reading` from the process-wide cache.
pub fn generate_variants(reading: &str) -> Arc<[String]> {
    VariantCache::global().variants(reading)
}

/// Checked form of [`generate_variants`].
pub fn try_generate_variants(reading: &str) -> Result<Arc<[String]>, ReadingError> {
    VariantCache::global().try_variants(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_comes_first() {
        let cache = VariantCache::new();
        let v = cache.variants("sushi");
        assert_eq!(v[0], "sushi");
        assert!(v.iter().any(|s| s == "susi"));
    }

    #[test]
    fn test_hit_returns_same_list() {
        let cache = VariantCache::new();
        let a = cache.variants("maguro");
        let b = cache.variants("maguro");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_recomputes_identically() {
        let cache = VariantCache::new();
        let a = cache.variants("chu-toro");
        cache.clear();
        assert!(cache.is_empty());
        let b = cache.variants("chu-toro");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_nya_has_both_readings() {
        let cache = VariantCache::new();
        let v = cache.variants("nya");
        for expected in ["nya", "nnya", "n'ya", "xnya", "nxya"] {
            assert!(v.iter().any(|s| s == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_try_variants_rejects_bad_input() {
        let cache = VariantCache::new();
        assert_eq!(cache.try_variants(""), Err(ReadingError::Empty));
        assert_eq!(
            cache.try_variants("ika!"),
            Err(ReadingError::InvalidChar { ch: '!', pos: 3 })
        );
        assert!(cache.is_empty());
        assert!(cache.try_variants("ika").is_ok());
    }

    #[test]
    fn test_unchecked_accepts_anything() {
        let cache = VariantCache::new();
        let v = cache.variants("寿司");
        assert_eq!(&v[..], &["寿司".to_string()]);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(VariantCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.variants("ikura"))
            })
            .collect();
        let lists: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for list in &lists {
            assert!(Arc::ptr_eq(list, &lists[0]));
        }
    }
}
