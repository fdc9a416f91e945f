//! Filesystem layout of brand models.

use crate::tagger::TaggerModel;
use crate::{ItemcodeError, Result};
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Directory inside a brand directory that holds the trained model.
pub const MODEL_DIR_NAME: &str = "product_code_model";

/// Serialized tagger inside the model directory.
pub const MODEL_FILE_NAME: &str = "model.json";

/// Known codes inside the model directory, one per line.
pub const CODES_FILE_NAME: &str = "codes.txt";

/// Reads and writes brand directories below a root directory.
#[derive(Debug, Clone)]
pub struct BrandStore {
    root: PathBuf,
}

impl BrandStore {
    /// Create a store rooted at `root`. Nothing is created until a model is saved.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory holding one sub-directory per brand.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Trim a brand name and reject names that cannot be a single directory name.
    pub fn validate_brand_name(name: &str) -> Result<&str> {
        let trimmed = name.trim();
        let invalid = trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
            || trimmed.contains('\0');

        if invalid {
            return Err(ItemcodeError::InvalidBrandName {
                name: name.to_string(),
            });
        }
        Ok(trimmed)
    }

    /// Directory of a brand.
    pub fn brand_dir(&self, brand: &str) -> Result<PathBuf> {
        let brand = Self::validate_brand_name(brand)?;
        Ok(self.root.join(brand))
    }

    /// Model directory of a brand.
    pub fn model_dir(&self, brand: &str) -> Result<PathBuf> {
        Ok(self.brand_dir(brand)?.join(MODEL_DIR_NAME))
    }

    /// Path of the serialized model of a brand.
    pub fn model_path(&self, brand: &str) -> Result<PathBuf> {
        Ok(self.model_dir(brand)?.join(MODEL_FILE_NAME))
    }

    /// Path of the code list of a brand.
    pub fn codes_path(&self, brand: &str) -> Result<PathBuf> {
        Ok(self.model_dir(brand)?.join(CODES_FILE_NAME))
    }

    /// Whether the brand has a trained model.
    pub fn has_model(&self, brand: &str) -> Result<bool> {
        Ok(self.model_path(brand)?.is_file())
    }

    /// Load the brand's model, or `None` when it was never trained.
    pub fn load_model(&self, brand: &str) -> Result<Option<TaggerModel>> {
        let path = self.model_path(brand)?;
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(TaggerModel::load(&path)?))
    }

    /// Persist a model, replacing any previous one. Returns the model directory.
    pub fn save_model(&self, brand: &str, model: &TaggerModel) -> Result<PathBuf> {
        let dir = self.model_dir(brand)?;
        fs::create_dir_all(&dir)?;
        model.save(dir.join(MODEL_FILE_NAME))?;
        Ok(dir)
    }

    /// Known codes of a brand. A missing code list reads as empty.
    pub fn load_codes(&self, brand: &str) -> Result<Vec<String>> {
        let path = self.codes_path(brand)?;
        if !path.is_file() {
            tracing::debug!(brand, path = %path.display(), "No code list on disk");
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&path)?);
        let mut codes = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let code = line.trim();
            if !code.is_empty() {
                codes.push(code.to_string());
            }
        }
        Ok(codes)
    }

    /// Write the code list of a brand, one code per line.
    pub fn save_codes(&self, brand: &str, codes: &[String]) -> Result<()> {
        let dir = self.model_dir(brand)?;
        fs::create_dir_all(&dir)?;

        let mut writer = BufWriter::new(fs::File::create(dir.join(CODES_FILE_NAME))?);
        for code in codes {
            writeln!(writer, "{}", code)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Remove the whole brand directory. Returns `false` when there was nothing to remove.
    pub fn delete(&self, brand: &str) -> Result<bool> {
        let dir = self.brand_dir(brand)?;
        if !dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&dir)?;
        tracing::info!(brand, path = %dir.display(), "Deleted brand directory");
        Ok(true)
    }

    /// Names of all brands with a trained model, sorted.
    pub fn scan(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut brands = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if entry
                .path()
                .join(MODEL_DIR_NAME)
                .join(MODEL_FILE_NAME)
                .is_file()
            {
                brands.push(name);
            }
        }
        brands.sort();
        Ok(brands)
    }
}
