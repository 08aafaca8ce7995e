//! Asset template rules.
//!
//! A template is the blueprint a generation batch copies its defaults from.
//! Templates are soft-deactivated, never deleted while assets reference them.

use crate::error::CoreError;

/// Maximum template name length.
pub const MAX_TEMPLATE_NAME_LEN: usize = 200;

/// Default values a template contributes to every generated asset.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDefaults {
    pub template_id: i64,
    pub asset_type: String,
    pub manufacturer: Option<String>,
    pub cost: Option<f64>,
    pub maintenance_interval_days: Option<i32>,
    pub configuration_notes: Option<String>,
}

/// Validate the invariant every active template must satisfy.
///
/// The asset type must be non-empty, and when maintenance tracking is
/// enabled (an interval is set) the interval must be positive.
pub fn validate_template_fields(
    name: &str,
    asset_type: &str,
    maintenance_interval_days: Option<i32>,
    default_cost: Option<f64>,
) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Template name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_TEMPLATE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Template name exceeds maximum length of {MAX_TEMPLATE_NAME_LEN} characters"
        )));
    }
    if asset_type.trim().is_empty() {
        return Err(CoreError::Validation(
            "Template asset type must not be empty".to_string(),
        ));
    }
    if let Some(days) = maintenance_interval_days {
        if days <= 0 {
            return Err(CoreError::Validation(format!(
                "Maintenance interval must be a positive number of days, got {days}"
            )));
        }
    }
    if let Some(cost) = default_cost {
        if !cost.is_finite() || cost < 0.0 {
            return Err(CoreError::Validation(format!(
                "Default cost must be a non-negative amount, got {cost}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn valid_template_passes() {
        assert!(validate_template_fields("Fleet van", "Vehicle", Some(90), Some(35_000.0)).is_ok());
    }

    #[test]
    fn tracking_disabled_needs_no_interval() {
        assert!(validate_template_fields("Rack", "Rack", None, None).is_ok());
    }

    #[test]
    fn blank_asset_type_rejected() {
        assert_matches!(
            validate_template_fields("Rack", "  ", None, None),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn non_positive_interval_rejected() {
        assert_matches!(
            validate_template_fields("Rack", "Rack", Some(0), None),
            Err(CoreError::Validation(msg)) if msg.contains("positive")
        );
    }

    #[test]
    fn negative_cost_rejected() {
        assert_matches!(
            validate_template_fields("Rack", "Rack", None, Some(-1.0)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn overlong_name_rejected() {
        let name = "x".repeat(MAX_TEMPLATE_NAME_LEN + 1);
        assert_matches!(
            validate_template_fields(&name, "Rack", None, None),
            Err(CoreError::Validation(_))
        );
    }
}
