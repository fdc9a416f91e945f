//! Per-brand model storage and the brand registry.
//!
//! Every brand lives in its own directory under the models directory:
//!
//! ```text
//! <models_dir>/<brand>/product_code_model/model.json
//! <models_dir>/<brand>/product_code_model/codes.txt
//! ```

mod registry;
mod store;

pub use registry::{BrandInfo, BrandRegistry};
pub use store::{BrandStore, CODES_FILE_NAME, MODEL_DIR_NAME, MODEL_FILE_NAME};
