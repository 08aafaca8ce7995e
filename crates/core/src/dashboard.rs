//! Dashboard aggregation shapes and chart payloads.
//!
//! Repositories return raw `(key, value)` groupings; the helpers here put
//! them into a stable, zero-filled order and wrap them in typed chart
//! variants the UI renders without further interpretation.

use serde::Serialize;

use crate::asset::{AssetStatus, Condition, Criticality, MaintenanceStatus, VersionStatus};

/// Default number of rows in the top-by-value widget.
pub const DEFAULT_TOP_N: i64 = 10;

/// Upper bound on any list widget.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Label used for rows whose grouping key is NULL.
pub const UNSET_LABEL: &str = "Not Set";

/// Headline numbers for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardMetrics {
    pub total_assets: i64,
    pub active_assets: i64,
    pub overdue_assets: i64,
    pub critical_assets: i64,
    pub total_value: f64,
    /// Assets that currently carry a maintenance status.
    pub maintenance_tracked_assets: i64,
}

/// One labelled value in a grouping (a count or a sum).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// Stored key (`"due_soon"`), or the raw value for free-text groupings.
    pub key: String,
    /// Display label (`"Due Soon"`).
    pub label: String,
    pub value: f64,
}

/// Severity band on a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Good,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub severity: Severity,
}

/// A chart and its data. Each variant carries exactly the fields its
/// renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartSpec {
    Donut {
        title: String,
        segments: Vec<CategoryTotal>,
        /// Total shown in the hole of the donut.
        center_value: f64,
    },
    Pie {
        title: String,
        segments: Vec<CategoryTotal>,
    },
    Bar {
        title: String,
        value_axis: String,
        bars: Vec<CategoryTotal>,
    },
    HorizontalBar {
        title: String,
        value_axis: String,
        bars: Vec<CategoryTotal>,
    },
    Funnel {
        title: String,
        stages: Vec<CategoryTotal>,
    },
    Gauge {
        title: String,
        value: f64,
        min: f64,
        max: f64,
        bands: Vec<GaugeBand>,
    },
}

// ---------------------------------------------------------------------------
// Grouping helpers
// ---------------------------------------------------------------------------

/// Arrange grouped rows in a fixed category order, filling gaps with zero.
///
/// `known` lists `(key, label)` pairs in display order. Rows with keys not in
/// `known` (including NULL) are appended after them, NULL last.
pub fn fill_categories(known: &[(&str, &str)], rows: &[(Option<String>, f64)]) -> Vec<CategoryTotal> {
    let value_of = |key: &str| -> f64 {
        rows.iter()
            .filter(|(k, _)| k.as_deref() == Some(key))
            .map(|(_, v)| *v)
            .sum()
    };

    let mut out: Vec<CategoryTotal> = known
        .iter()
        .map(|(key, label)| CategoryTotal {
            key: (*key).to_string(),
            label: (*label).to_string(),
            value: value_of(*key),
        })
        .collect();

    for (key, value) in rows {
        match key {
            Some(k) if known.iter().any(|(known_key, _)| *known_key == k.as_str()) => {}
            Some(k) => out.push(CategoryTotal {
                key: k.clone(),
                label: k.clone(),
                value: *value,
            }),
            None => {}
        }
    }

    let unset: f64 = rows.iter().filter(|(k, _)| k.is_none()).map(|(_, v)| *v).sum();
    if unset > 0.0 {
        out.push(CategoryTotal {
            key: String::new(),
            label: UNSET_LABEL.to_string(),
            value: unset,
        });
    }
    out
}

/// Free-text groupings (e.g. site): largest first, ties by key.
pub fn rank_categories(rows: &[(Option<String>, f64)]) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = rows
        .iter()
        .map(|(key, value)| CategoryTotal {
            key: key.clone().unwrap_or_default(),
            label: key.clone().unwrap_or_else(|| UNSET_LABEL.to_string()),
            value: *value,
        })
        .collect();
    out.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
    out
}

/// Clamp a caller-supplied list limit into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_LIST_LIMIT)
}

fn known<const N: usize, T: Copy>(
    all: [T; N],
    as_str: fn(T) -> &'static str,
    label: fn(T) -> &'static str,
) -> Vec<(&'static str, &'static str)> {
    all.iter().map(|v| (as_str(*v), label(*v))).collect()
}

fn total(segments: &[CategoryTotal]) -> f64 {
    segments.iter().map(|s| s.value).sum()
}

// ---------------------------------------------------------------------------
// Chart builders
// ---------------------------------------------------------------------------

pub fn status_chart(rows: &[(Option<String>, f64)]) -> ChartSpec {
    let segments = fill_categories(
        &known(AssetStatus::ALL, AssetStatus::as_str, AssetStatus::label),
        rows,
    );
    ChartSpec::Donut {
        title: "Assets by Status".to_string(),
        center_value: total(&segments),
        segments,
    }
}

pub fn criticality_chart(rows: &[(Option<String>, f64)]) -> ChartSpec {
    ChartSpec::Bar {
        title: "Assets by Criticality".to_string(),
        value_axis: "Assets".to_string(),
        bars: fill_categories(
            &known(Criticality::ALL, Criticality::as_str, Criticality::label),
            rows,
        ),
    }
}

/// Planned -> Live -> Superseded, in lifecycle order.
pub fn version_funnel(rows: &[(Option<String>, f64)]) -> ChartSpec {
    ChartSpec::Funnel {
        title: "Version Lifecycle".to_string(),
        stages: fill_categories(
            &known(VersionStatus::ALL, VersionStatus::as_str, VersionStatus::label),
            rows,
        ),
    }
}

pub fn maintenance_chart(rows: &[(Option<String>, f64)]) -> ChartSpec {
    ChartSpec::Pie {
        title: "Maintenance Status".to_string(),
        segments: fill_categories(
            &known(
                MaintenanceStatus::ALL,
                MaintenanceStatus::as_str,
                MaintenanceStatus::label,
            ),
            rows,
        ),
    }
}

pub fn condition_chart(rows: &[(Option<String>, f64)]) -> ChartSpec {
    ChartSpec::HorizontalBar {
        title: "Assets by Condition".to_string(),
        value_axis: "Assets".to_string(),
        bars: fill_categories(
            &known(Condition::ALL, Condition::as_str, Condition::label),
            rows,
        ),
    }
}

pub fn site_chart(rows: &[(Option<String>, f64)]) -> ChartSpec {
    ChartSpec::Bar {
        title: "Assets by Site".to_string(),
        value_axis: "Assets".to_string(),
        bars: rank_categories(rows),
    }
}

pub fn site_value_chart(rows: &[(Option<String>, f64)]) -> ChartSpec {
    ChartSpec::HorizontalBar {
        title: "Asset Value by Site".to_string(),
        value_axis: "Current value".to_string(),
        bars: rank_categories(rows),
    }
}

/// Percentage of maintenance-tracked assets that are not overdue.
///
/// With nothing tracked the gauge reads 100: there is nothing overdue.
pub fn maintenance_health_pct(metrics: &DashboardMetrics) -> f64 {
    if metrics.maintenance_tracked_assets <= 0 {
        return 100.0;
    }
    let ok = (metrics.maintenance_tracked_assets - metrics.overdue_assets).max(0) as f64;
    let pct = ok / metrics.maintenance_tracked_assets as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

pub fn maintenance_health_gauge(metrics: &DashboardMetrics) -> ChartSpec {
    ChartSpec::Gauge {
        title: "Maintenance Health".to_string(),
        value: maintenance_health_pct(metrics),
        min: 0.0,
        max: 100.0,
        bands: vec![
            GaugeBand {
                from: 0.0,
                to: 70.0,
                severity: Severity::Critical,
            },
            GaugeBand {
                from: 70.0,
                to: 90.0,
                severity: Severity::Warning,
            },
            GaugeBand {
                from: 90.0,
                to: 100.0,
                severity: Severity::Good,
            },
        ],
    }
}
