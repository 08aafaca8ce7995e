//! Categorical asset fields and their database string representations.
//!
//! Every enum here is stored as lowercase snake_case `TEXT` guarded by a
//! `CHECK` constraint. `as_str` is the storage form, `label` the display form.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Operational status
// ---------------------------------------------------------------------------

/// Operational status of an asset. Retirement is a status, never a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Active,
    Inactive,
    Retired,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 3] = [Self::Active, Self::Inactive, Self::Retired];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Retired => "retired",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Retired => "Retired",
        }
    }
}

impl FromStr for AssetStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "retired" => Ok(Self::Retired),
            other => Err(unknown_value("asset status", other, &Self::ALL.map(Self::as_str))),
        }
    }
}

// ---------------------------------------------------------------------------
// Criticality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub const ALL: [Criticality; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl FromStr for Criticality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(unknown_value("criticality", other, &Self::ALL.map(Self::as_str))),
        }
    }
}

// ---------------------------------------------------------------------------
// Physical condition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Poor,
        Self::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

impl FromStr for Condition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            "critical" => Ok(Self::Critical),
            other => Err(unknown_value("condition", other, &Self::ALL.map(Self::as_str))),
        }
    }
}

// ---------------------------------------------------------------------------
// Version status
// ---------------------------------------------------------------------------

/// Position of an asset in its version chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    /// Prepared replacement, not yet in service.
    Planned,
    /// The in-service member of the chain. At most one per chain.
    Live,
    /// Replaced or withdrawn. Terminal.
    Superseded,
}

impl VersionStatus {
    pub const ALL: [VersionStatus; 3] = [Self::Planned, Self::Live, Self::Superseded];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Live => "live",
            Self::Superseded => "superseded",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Live => "Live",
            Self::Superseded => "Superseded",
        }
    }
}

impl FromStr for VersionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "live" => Ok(Self::Live),
            "superseded" => Ok(Self::Superseded),
            other => Err(unknown_value("version status", other, &Self::ALL.map(Self::as_str))),
        }
    }
}

// ---------------------------------------------------------------------------
// Maintenance status (derived)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Current,
    DueSoon,
    Overdue,
}

impl MaintenanceStatus {
    pub const ALL: [MaintenanceStatus; 3] = [Self::Current, Self::DueSoon, Self::Overdue];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::DueSoon => "due_soon",
            Self::Overdue => "overdue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::DueSoon => "Due Soon",
            Self::Overdue => "Overdue",
        }
    }
}

impl FromStr for MaintenanceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(Self::Current),
            "due_soon" => Ok(Self::DueSoon),
            "overdue" => Ok(Self::Overdue),
            other => Err(unknown_value(
                "maintenance status",
                other,
                &Self::ALL.map(Self::as_str),
            )),
        }
    }
}

fn unknown_value(field: &str, value: &str, valid: &[&str]) -> CoreError {
    CoreError::Validation(format!(
        "Unknown {field}: '{value}'. Valid values: {}",
        valid.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn storage_strings_round_trip() {
        for s in AssetStatus::ALL {
            assert_eq!(s.as_str().parse::<AssetStatus>().unwrap(), s);
        }
        for c in Criticality::ALL {
            assert_eq!(c.as_str().parse::<Criticality>().unwrap(), c);
        }
        for c in Condition::ALL {
            assert_eq!(c.as_str().parse::<Condition>().unwrap(), c);
        }
        for v in VersionStatus::ALL {
            assert_eq!(v.as_str().parse::<VersionStatus>().unwrap(), v);
        }
        for m in MaintenanceStatus::ALL {
            assert_eq!(m.as_str().parse::<MaintenanceStatus>().unwrap(), m);
        }
    }

    #[test]
    fn unknown_value_lists_valid_options() {
        let err = "archived".parse::<VersionStatus>().unwrap_err();
        assert_matches!(&err, CoreError::Validation(msg) if msg.contains("planned, live, superseded"));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Live".parse::<VersionStatus>().is_err());
    }

    #[test]
    fn due_soon_serializes_snake_case() {
        let json = serde_json::to_string(&MaintenanceStatus::DueSoon).unwrap();
        assert_eq!(json, "\"due_soon\"");
        assert_eq!(MaintenanceStatus::DueSoon.label(), "Due Soon");
    }
}
