//! Asset naming sequencer.
//!
//! Generates deterministic, sequential asset names for a generation batch.
//!
//! Convention: `{site_prefix}-{ASSET_TYPE}-{number}`
//!
//! - `site_prefix` is used as given (trimmed)
//! - `ASSET_TYPE` is the upper-cased asset type, inner whitespace replaced by `_`
//! - `number` is zero-padded to at least [`MIN_NUMBER_WIDTH`] digits, wider
//!   when the last number of the batch needs more digits; every name in a
//!   batch uses the same width
//!
//! Preview and generation both go through [`asset_names`], so a preview is
//! always a prefix of the names a generation run persists.
//!
//! # Examples
//!
//! ```
//! use assetforge_core::naming::asset_names;
//!
//! let names = asset_names("SITE-A", "Vehicle", 1, 3).unwrap();
//! assert_eq!(
//!     names,
//!     ["SITE-A-VEHICLE-0001", "SITE-A-VEHICLE-0002", "SITE-A-VEHICLE-0003"]
//! );
//! ```

use crate::error::CoreError;

/// Smallest batch a generation request may ask for.
pub const MIN_BATCH_SIZE: i64 = 1;

/// Largest batch a generation request may ask for.
pub const MAX_BATCH_SIZE: i64 = 100;

/// Minimum number of digits in the numeric suffix.
pub const MIN_NUMBER_WIDTH: usize = 4;

/// Number of names shown in a live preview.
pub const PREVIEW_SIZE: i64 = 5;

/// Validate sequencer inputs without producing names.
pub fn validate_sequence_inputs(
    site_prefix: &str,
    asset_type: &str,
    start_number: i64,
    count: i64,
) -> Result<(), CoreError> {
    if asset_type.trim().is_empty() {
        return Err(CoreError::Validation(
            "Asset type must not be empty".to_string(),
        ));
    }
    validate_batch_bounds(site_prefix, start_number, count)
}

/// Validate the caller-supplied part of a request: prefix, start and count.
///
/// Split out so a generation request can be rejected before its template is
/// loaded.
pub fn validate_batch_bounds(site_prefix: &str, start_number: i64, count: i64) -> Result<(), CoreError> {
    if site_prefix.trim().is_empty() {
        return Err(CoreError::Validation(
            "Site prefix must not be empty".to_string(),
        ));
    }
    if start_number < 0 {
        return Err(CoreError::Validation(format!(
            "Start number must be zero or greater, got {start_number}"
        )));
    }
    if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&count) {
        return Err(CoreError::Validation(format!(
            "Quantity must be between {MIN_BATCH_SIZE} and {MAX_BATCH_SIZE}, got {count}"
        )));
    }
    if start_number.checked_add(count - 1).is_none() {
        return Err(CoreError::Validation(format!(
            "Start number {start_number} is too large for a batch of {count}"
        )));
    }
    Ok(())
}

/// Normalize an asset type into its name segment (`"Fork Lift"` -> `"FORK_LIFT"`).
pub fn type_segment(asset_type: &str) -> String {
    asset_type
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// Width of the numeric suffix for a batch ending at `last_number`.
pub fn number_width(last_number: i64) -> usize {
    last_number.to_string().len().max(MIN_NUMBER_WIDTH)
}

/// Produce `count` consecutive names starting at `start_number`.
pub fn asset_names(
    site_prefix: &str,
    asset_type: &str,
    start_number: i64,
    count: i64,
) -> Result<Vec<String>, CoreError> {
    validate_sequence_inputs(site_prefix, asset_type, start_number, count)?;

    let prefix = site_prefix.trim();
    let segment = type_segment(asset_type);
    let last = start_number + count - 1;
    let width = number_width(last);

    Ok((start_number..=last)
        .map(|n| format!("{prefix}-{segment}-{n:0width$}"))
        .collect())
}

/// The first `min(PREVIEW_SIZE, count)` names of a batch.
///
/// Validates the full request (including `count`) so a preview never shows
/// names for a batch that generation would reject.
pub fn preview_names(
    site_prefix: &str,
    asset_type: &str,
    start_number: i64,
    count: i64,
) -> Result<Vec<String>, CoreError> {
    let mut names = asset_names(site_prefix, asset_type, start_number, count)?;
    names.truncate(PREVIEW_SIZE as usize);
    Ok(names)
}
