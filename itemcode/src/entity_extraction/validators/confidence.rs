//! Confidence-based entity validator.

use crate::entity_extraction::pipeline::{EntityValidator, RawEntity, ValidationContext};

/// Keeps entities whose confidence reaches a threshold (inclusive)
#[derive(Debug, Clone)]
pub struct ConfidenceValidator {
    threshold: f32,
    name: String,
}

impl ConfidenceValidator {
    /// Create a new confidence validator with the given threshold
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            name: format!("confidence_validator_{:.2}", threshold),
        }
    }

    /// Threshold in use
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl EntityValidator for ConfidenceValidator {
    fn validate(&self, entity: &RawEntity, _context: &ValidationContext) -> bool {
        entity.confidence >= self.threshold
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let validator = ConfidenceValidator::new(0.5);
        let context = ValidationContext::new("");
        let at = RawEntity::new("AB1234".into(), "X".into(), 0, 6, 0.5);
        let below = RawEntity::new("AB1234".into(), "X".into(), 0, 6, 0.49);
        assert!(validator.validate(&at, &context));
        assert!(!validator.validate(&below, &context));
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(ConfidenceValidator::new(4.0).threshold(), 1.0);
        assert_eq!(ConfidenceValidator::new(-1.0).threshold(), 0.0);
    }
}
