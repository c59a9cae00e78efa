//! Process-wide cache of parsed layouts
//!
//! Parsing is a pure function of the format string, so layouts are memoized
//! per distinct format and shared behind an [`Arc`]. Lookups take a read lock;
//! only a miss takes the write lock. Parse errors are never stored.
//!
//! A cache holds at most its capacity of formats. Once full, misses are parsed
//! and returned without being stored, so formats built at runtime cannot grow
//! it without bound.

use crate::error::StructError;
use crate::format::Layout;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

#[cfg(feature = "logging")]
use tracing::debug;

/// Default number of formats a cache keeps
pub const DEFAULT_CAPACITY: usize = 1024;

/// A memo of parsed layouts keyed by format string
#[derive(Debug)]
pub struct FormatCache {
    layouts: RwLock<HashMap<String, Arc<Layout>>>,
    capacity: usize,
}

impl Default for FormatCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl FormatCache {
    /// Create an empty cache holding up to [`DEFAULT_CAPACITY`] formats
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache holding up to `capacity` formats
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layouts: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Maximum number of formats kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the cached layout for `format`, parsing it on first use
    pub fn get_or_parse(&self, format: &str) -> Result<Arc<Layout>, StructError> {
        if let Some(layout) = self.read().get(format) {
            return Ok(Arc::clone(layout));
        }

        let layout = Arc::new(Layout::parse(format)?);

        let mut layouts = self.write();
        if layouts.len() >= self.capacity && !layouts.contains_key(format) {
            #[cfg(feature = "logging")]
            debug!("Format cache full ({} entries), not storing {:?}", self.capacity, format);

            return Ok(layout);
        }

        #[cfg(feature = "logging")]
        debug!("Caching layout for format {:?}", format);

        // Another caller may have inserted it while we parsed
        let entry = layouts
            .entry(format.to_string())
            .or_insert_with(|| Arc::clone(&layout));
        Ok(Arc::clone(entry))
    }

    /// Number of cached formats
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True if nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every cached layout
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Layout>>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent
        self.layouts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Layout>>> {
        self.layouts.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// The shared process-wide cache
pub fn global() -> &'static FormatCache {
    static CACHE: OnceLock<FormatCache> = OnceLock::new();
    CACHE.get_or_init(FormatCache::new)
}

/// Cached layout for `format` from the process-wide cache
pub fn layout(format: &str) -> Result<Arc<Layout>, StructError> {
    global().get_or_parse(format)
}
