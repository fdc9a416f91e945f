//! Shape check for product codes.

use crate::entity_extraction::MIN_CODE_LEN;
use crate::entity_extraction::pipeline::{EntityValidator, RawEntity, ValidationContext};

/// Accepts entities with the expected label whose text is ASCII letters and
/// digits only and at least [`MIN_CODE_LEN`] characters long.
#[derive(Debug, Clone)]
pub struct ProductCodeValidator {
    label: String,
    min_len: usize,
}

impl ProductCodeValidator {
    /// Validator for entities labeled `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            min_len: MIN_CODE_LEN,
        }
    }

    /// Whether `text` looks like a product code.
    pub fn is_code_like(&self, text: &str) -> bool {
        text.len() >= self.min_len && text.bytes().all(|b| b.is_ascii_alphanumeric())
    }
}

impl EntityValidator for ProductCodeValidator {
    fn validate(&self, entity: &RawEntity, _context: &ValidationContext) -> bool {
        entity.label == self.label && self.is_code_like(&entity.text)
    }

    fn name(&self) -> &str {
        "product_code_validator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(text: &str, label: &str) -> RawEntity {
        RawEntity::new(text.to_string(), label.to_string(), 0, text.len(), 1.0)
    }

    #[test]
    fn test_accepts_codes() {
        let validator = ProductCodeValidator::new("PRODUCT_CODE");
        let context = ValidationContext::new("");
        assert!(validator.validate(&entity("AB1234", "PRODUCT_CODE"), &context));
        assert!(validator.validate(&entity("abcd", "PRODUCT_CODE"), &context));
    }

    #[test]
    fn test_rejects_short_symbols_and_other_labels() {
        let validator = ProductCodeValidator::new("PRODUCT_CODE");
        let context = ValidationContext::new("");
        assert!(!validator.validate(&entity("AB1", "PRODUCT_CODE"), &context));
        assert!(!validator.validate(&entity("DD1391-100", "PRODUCT_CODE"), &context));
        assert!(!validator.validate(&entity("シャツ1234", "PRODUCT_CODE"), &context));
        assert!(!validator.validate(&entity("AB1234", "BRAND"), &context));
    }
}
