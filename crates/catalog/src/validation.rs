//! Request-boundary validation helpers.
//!
//! Managers validate every request field before touching any provider, so a
//! rejected request has no side effects. All failures are `InvalidArgument`.

use std::collections::HashMap;

use crate::config::LimitsConfig;
use crate::error::{CatalogError, OpResult};

/// Required string field: non-empty after trimming, within the length limit.
pub fn require_field(field: &str, value: &str, limits: &LimitsConfig) -> OpResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::invalid_argument(format!(
            "{field} cannot be empty"
        )));
    }
    check_len(field, value, limits)
}

/// Optional string field: only the length limit applies.
pub fn check_len(field: &str, value: &str, limits: &LimitsConfig) -> OpResult<()> {
    if value.len() > limits.max_field_len {
        return Err(CatalogError::invalid_argument(format!(
            "{field} exceeds {} characters",
            limits.max_field_len
        )));
    }
    Ok(())
}

/// Label maps: bounded size, non-empty keys, bounded key/value lengths.
pub fn check_labels(labels: &HashMap<String, String>, limits: &LimitsConfig) -> OpResult<()> {
    if labels.len() > limits.max_labels {
        return Err(CatalogError::invalid_argument(format!(
            "labels exceed {} entries",
            limits.max_labels
        )));
    }
    for (key, value) in labels {
        if key.trim().is_empty() {
            return Err(CatalogError::invalid_argument(
                "label keys cannot be empty".to_string(),
            ));
        }
        if key.len() > limits.max_label_key_len {
            return Err(CatalogError::invalid_argument(format!(
                "label key '{key}' exceeds {} characters",
                limits.max_label_key_len
            )));
        }
        if value.len() > limits.max_label_value_len {
            return Err(CatalogError::invalid_argument(format!(
                "label value for '{key}' exceeds {} characters",
                limits.max_label_value_len
            )));
        }
    }
    Ok(())
}

/// Batch id lists: non-empty, bounded, and free of blank entries.
pub fn check_id_batch(field: &str, ids: &[String], limits: &LimitsConfig) -> OpResult<()> {
    if ids.is_empty() {
        return Err(CatalogError::invalid_argument(format!(
            "{field} cannot be empty"
        )));
    }
    if ids.len() > limits.max_batch_ids {
        return Err(CatalogError::invalid_argument(format!(
            "{field} exceeds {} entries",
            limits.max_batch_ids
        )));
    }
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::invalid_argument(format!(
                "{field} contains an empty identifier"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn limits() -> LimitsConfig {
        LimitsConfig::default()
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let err = require_field("organization_id", "  ", &limits()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("organization_id"));
    }

    #[test]
    fn oversized_field_is_rejected() {
        let long = "x".repeat(limits().max_field_len + 1);
        assert!(require_field("name", &long, &limits()).is_err());
        assert!(require_field("name", "fine", &limits()).is_ok());
    }

    #[test]
    fn label_limits_are_enforced() {
        let mut labels = HashMap::new();
        labels.insert(String::new(), "v".to_string());
        assert!(check_labels(&labels, &limits()).is_err());

        let mut labels = HashMap::new();
        labels.insert("k".to_string(), "v".repeat(limits().max_label_value_len + 1));
        assert!(check_labels(&labels, &limits()).is_err());

        let mut labels = HashMap::new();
        labels.insert("env".to_string(), "production".to_string());
        assert!(check_labels(&labels, &limits()).is_ok());
    }

    #[test]
    fn batch_bounds_are_enforced() {
        let empty: Vec<String> = Vec::new();
        assert!(check_id_batch("node_ids", &empty, &limits()).is_err());

        let blank = vec!["n-1".to_string(), " ".to_string()];
        assert!(check_id_batch("node_ids", &blank, &limits()).is_err());

        let too_many: Vec<String> = (0..limits().max_batch_ids + 1)
            .map(|i| format!("n-{i}"))
            .collect();
        assert!(check_id_batch("node_ids", &too_many, &limits()).is_err());

        let fine = vec!["n-1".to_string()];
        assert!(check_id_batch("node_ids", &fine, &limits()).is_ok());
    }
}
