// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CatalogError;
use crate::source::CatalogSource;
use plazas_domain::{PositionRecord, validate_unique_positions};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a loaded catalog is served before the source is read again.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    records: Arc<Vec<PositionRecord>>,
    loaded_at: Instant,
}

/// Time-boxed cache in front of a catalog source.
///
/// The entry is populated on first use and replaced wholesale on reload.
/// It is dropped when the TTL passes, on [`CatalogCache::clear`], or when a
/// reload fails, so a load error is always surfaced instead of stale data.
pub struct CatalogCache {
    source: Box<dyn CatalogSource>,
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl std::fmt::Debug for CatalogCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogCache")
            .field("source", &self.source.describe())
            .field("ttl", &self.ttl)
            .field("cached", &self.entry.is_some())
            .finish()
    }
}

impl CatalogCache {
    /// Creates an empty cache over `source`.
    #[must_use]
    pub fn new(source: Box<dyn CatalogSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: None,
        }
    }

    /// Returns the cached catalog, loading it if absent or expired.
    ///
    /// # Errors
    ///
    /// Propagates the source's error. The cache is left empty in that case.
    pub fn get(&mut self) -> Result<Arc<Vec<PositionRecord>>, CatalogError> {
        self.get_at(Instant::now())
    }

    /// Same as [`CatalogCache::get`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// Propagates the source's error. The cache is left empty in that case.
    pub fn get_at(&mut self, now: Instant) -> Result<Arc<Vec<PositionRecord>>, CatalogError> {
        if let Some(entry) = &self.entry
            && self.is_fresh(entry, now)
        {
            debug!(source = %self.source.describe(), "Catalog cache hit");
            return Ok(Arc::clone(&entry.records));
        }

        self.entry = None;

        let records: Vec<PositionRecord> = match self.load_checked() {
            Ok(records) => records,
            Err(e) => {
                warn!(source = %self.source.describe(), error = %e, "Catalog load failed");
                return Err(e);
            }
        };

        info!(
            source = %self.source.describe(),
            positions = records.len(),
            "Loaded catalog"
        );

        let records: Arc<Vec<PositionRecord>> = Arc::new(records);
        self.entry = Some(CacheEntry {
            records: Arc::clone(&records),
            loaded_at: now,
        });
        Ok(records)
    }

    /// Drops the cached catalog so the next read goes to the source.
    pub fn clear(&mut self) {
        if self.entry.take().is_some() {
            info!(source = %self.source.describe(), "Catalog cache cleared");
        }
    }

    /// Returns true if a catalog is cached and still within its TTL at `now`.
    #[must_use]
    pub fn is_cached_at(&self, now: Instant) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| self.is_fresh(entry, now))
    }

    /// Returns the configured TTL.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Describes the underlying source.
    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.loaded_at) < self.ttl
    }

    fn load_checked(&self) -> Result<Vec<PositionRecord>, CatalogError> {
        let records: Vec<PositionRecord> = self.source.load()?;
        validate_unique_positions(&records).map_err(|e| CatalogError::Layout {
            reason: e.to_string(),
        })?;
        Ok(records)
    }
}
