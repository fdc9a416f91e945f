//! Brand list with a process-local cache.

use super::store::BrandStore;
use crate::tagger::ModelMetadata;
use crate::{ItemcodeError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::RwLock;

/// Summary of a trained brand.
#[derive(Debug, Clone, Serialize)]
pub struct BrandInfo {
    /// Brand name
    pub name: String,
    /// Number of known codes
    pub code_count: usize,
    /// Model bookkeeping
    pub metadata: ModelMetadata,
    /// Model directory
    pub path: PathBuf,
}

/// Lists and manages trained brands.
///
/// The brand list is scanned from disk once and then served from memory until
/// [`BrandRegistry::invalidate`] is called. Deleting through the registry
/// invalidates the cache itself.
#[derive(Debug)]
pub struct BrandRegistry {
    store: BrandStore,
    cache: RwLock<Option<Vec<String>>>,
}

impl BrandRegistry {
    /// Create a registry over a store.
    pub fn new(store: BrandStore) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &BrandStore {
        &self.store
    }

    /// Sorted names of all trained brands.
    pub fn list(&self) -> Result<Vec<String>> {
        if let Ok(cache) = self.cache.read()
            && let Some(brands) = cache.as_ref()
        {
            return Ok(brands.clone());
        }
        self.refresh()
    }

    /// Rescan the models directory and replace the cached list.
    pub fn refresh(&self) -> Result<Vec<String>> {
        let brands = self.store.scan()?;
        tracing::debug!(count = brands.len(), "Scanned brand directories");
        if let Ok(mut cache) = self.cache.write() {
            *cache = Some(brands.clone());
        }
        Ok(brands)
    }

    /// Forget the cached list so the next [`BrandRegistry::list`] rescans.
    pub fn invalidate(&self) {
        if let Ok(mut cache) = self.cache.write() {
            *cache = None;
        }
    }

    /// Whether a brand appears in the brand list.
    pub fn exists(&self, brand: &str) -> Result<bool> {
        let brand = BrandStore::validate_brand_name(brand)?;
        Ok(self.list()?.iter().any(|b| b == brand))
    }

    /// Model metadata and code count of a brand.
    pub fn info(&self, brand: &str) -> Result<BrandInfo> {
        let name = BrandStore::validate_brand_name(brand)?;
        let model = self
            .store
            .load_model(name)?
            .ok_or_else(|| ItemcodeError::BrandNotFound {
                brand: name.to_string(),
            })?;
        let codes = self.store.load_codes(name)?;

        Ok(BrandInfo {
            name: name.to_string(),
            code_count: codes.len(),
            metadata: model.metadata,
            path: self.store.model_dir(name)?,
        })
    }

    /// Delete a brand. Returns `false` when the brand did not exist.
    pub fn delete(&self, brand: &str) -> Result<bool> {
        let deleted = self.store.delete(brand)?;
        self.invalidate();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::TaggerModel;
    use std::collections::HashMap;

    fn registry_with(brands: &[&str]) -> (tempfile::TempDir, BrandRegistry) {
        let dir = tempfile::tempdir().unwrap();
        let store = BrandStore::new(dir.path());
        for brand in brands {
            let model = TaggerModel::new(ModelMetadata::new("PRODUCT_CODE"), HashMap::new());
            store.save_model(brand, &model).unwrap();
            store
                .save_codes(brand, &["AB1234".to_string(), "CD5678".to_string()])
                .unwrap();
        }
        (dir, BrandRegistry::new(store))
    }

    #[test]
    fn test_list_is_cached_until_invalidated() {
        let (_dir, registry) = registry_with(&["nike"]);
        assert_eq!(registry.list().unwrap(), vec!["nike"]);

        let model = TaggerModel::new(ModelMetadata::new("PRODUCT_CODE"), HashMap::new());
        registry.store().save_model("adidas", &model).unwrap();
        assert_eq!(registry.list().unwrap(), vec!["nike"]);

        registry.invalidate();
        assert_eq!(registry.list().unwrap(), vec!["adidas", "nike"]);
    }

    #[test]
    fn test_delete_updates_list() {
        let (_dir, registry) = registry_with(&["nike", "puma"]);
        assert!(registry.exists("nike").unwrap());

        assert!(registry.delete("nike").unwrap());
        assert_eq!(registry.list().unwrap(), vec!["puma"]);
        assert!(!registry.exists("nike").unwrap());
        assert!(!registry.delete("nike").unwrap());
    }

    #[test]
    fn test_info() {
        let (_dir, registry) = registry_with(&["nike"]);
        let info = registry.info(" nike ").unwrap();
        assert_eq!(info.name, "nike");
        assert_eq!(info.code_count, 2);
        assert_eq!(info.metadata.label, "PRODUCT_CODE");

        assert!(matches!(
            registry.info("unknown"),
            Err(ItemcodeError::BrandNotFound { .. })
        ));
    }
}
