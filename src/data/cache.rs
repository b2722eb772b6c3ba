use std::sync::{Arc, OnceLock};

use super::country::CountryResolver;
use super::loader;
use super::model::TradeDataset;
use super::source::DataSource;
use crate::error::Result;

// ---------------------------------------------------------------------------
// DatasetCache – load once, share forever
// ---------------------------------------------------------------------------

/// Memoizes the normalized dataset for one source.
///
/// The first successful [`get_or_load`](Self::get_or_load) pins the dataset;
/// later calls return the same `Arc`. Failures are not memoized, so a retry
/// fetches again. [`invalidate`](Self::invalidate) forgets the dataset.
pub struct DatasetCache {
    source: DataSource,
    resolver: CountryResolver,
    cell: OnceLock<Arc<TradeDataset>>,
}

impl DatasetCache {
    pub fn new(source: DataSource, resolver: CountryResolver) -> Self {
        Self {
            source,
            resolver,
            cell: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// The cached dataset, if one has been loaded.
    pub fn get(&self) -> Option<Arc<TradeDataset>> {
        self.cell.get().cloned()
    }

    pub fn get_or_load(&self) -> Result<Arc<TradeDataset>> {
        if let Some(ds) = self.cell.get() {
            return Ok(Arc::clone(ds));
        }
        let loaded = Arc::new(loader::load(&self.source, &self.resolver)?);
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }

    /// Drop the cached dataset so the next access reloads.
    pub fn invalidate(&mut self) {
        self.cell = OnceLock::new();
    }

    /// Point the cache at a different source, dropping what was loaded.
    pub fn set_source(&mut self, source: DataSource) {
        self.source = source;
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TradeError;
    use std::io::Write;

    fn write_csv(file: &mut tempfile::NamedTempFile, rows: &str) {
        file.as_file().set_len(0).unwrap();
        let mut f = file.reopen().unwrap();
        f.write_all(b"period,cmdcode,reporter,partner,netwgt\n").unwrap();
        f.write_all(rows.as_bytes()).unwrap();
    }

    #[test]
    fn test_loads_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_csv(&mut file, "202301,283691,Japan,Viet Nam,10\n");
        let cache = DatasetCache::new(
            DataSource::Local(file.path().to_path_buf()),
            CountryResolver::default(),
        );
        assert!(cache.get().is_none());

        let first = cache.get_or_load().unwrap();
        assert_eq!(first.len(), 1);

        // Changing the file does not affect the memoized dataset.
        write_csv(&mut file, "202301,283691,Japan,Viet Nam,10\n202302,283691,Japan,Viet Nam,20\n");
        let second = cache.get_or_load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_invalidate_reloads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write_csv(&mut file, "202301,283691,Japan,Viet Nam,10\n");
        let mut cache = DatasetCache::new(
            DataSource::Local(file.path().to_path_buf()),
            CountryResolver::default(),
        );
        cache.get_or_load().unwrap();

        write_csv(&mut file, "202301,283691,Japan,Viet Nam,10\n202302,283691,Japan,Viet Nam,20\n");
        cache.invalidate();
        assert_eq!(cache.get_or_load().unwrap().len(), 2);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.csv");
        let cache = DatasetCache::new(DataSource::Local(path.clone()), CountryResolver::default());

        let err = cache.get_or_load().unwrap_err();
        assert!(matches!(err, TradeError::SourceUnavailable { .. }));

        let body = "period,cmdcode,reporter,partner,netwgt\n202301,283691,Japan,Viet Nam,1\n";
        std::fs::write(&path, body).unwrap();
        assert_eq!(cache.get_or_load().unwrap().len(), 1);
    }
}
