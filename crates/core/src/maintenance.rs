//! Maintenance status derivation.
//!
//! `next_maintenance_due = last_maintenance_date + maintenance_interval_days`,
//! and the categorical status is a function of that date and "today":
//!
//! | Condition                          | Status    |
//! |------------------------------------|-----------|
//! | due < today                        | Overdue   |
//! | today <= due <= today + window     | Due Soon  |
//! | due > today + window               | Current   |
//!
//! Only Active, Live assets are tracked; everything else derives to no
//! status. The derivation never writes on its own: callers pass the record
//! set they changed plus the prior state, and receive back the derived
//! columns that actually need writing.

use std::collections::HashMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::asset::{AssetStatus, MaintenanceStatus, VersionStatus};
use crate::types::{Date, DbId};

/// Default look-ahead window for the Due Soon category, in days.
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 30;

/// User-entered fields that feed the derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceInputs {
    pub maintenance_interval_days: Option<i32>,
    pub last_maintenance_date: Option<Date>,
    pub status: AssetStatus,
    pub version_status: VersionStatus,
}

/// The two derived columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedMaintenance {
    pub next_maintenance_due: Option<Date>,
    pub maintenance_status: Option<MaintenanceStatus>,
}

/// Current state of one record as seen by the derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceSnapshot {
    pub asset_id: DbId,
    pub inputs: MaintenanceInputs,
    /// What is stored right now.
    pub stored: DerivedMaintenance,
}

/// A derived-field write for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaintenanceUpdate {
    pub asset_id: DbId,
    pub next_maintenance_due: Option<Date>,
    pub maintenance_status: Option<MaintenanceStatus>,
}

impl MaintenanceInputs {
    /// Whether the asset participates in maintenance tracking at all.
    pub fn is_tracked(&self) -> bool {
        self.status == AssetStatus::Active && self.version_status == VersionStatus::Live
    }
}

/// `last + interval` days, or `None` when either is missing or the interval
/// is not positive.
pub fn next_due_date(last_maintenance: Option<Date>, interval_days: Option<i32>) -> Option<Date> {
    let last = last_maintenance?;
    let interval = interval_days.filter(|d| *d > 0)?;
    last.checked_add_signed(Duration::days(i64::from(interval)))
}

/// Categorize a due date relative to `today`.
pub fn classify(next_due: Date, today: Date, lookahead_days: i64) -> MaintenanceStatus {
    if next_due < today {
        return MaintenanceStatus::Overdue;
    }
    let horizon = today
        .checked_add_signed(Duration::days(lookahead_days.max(0)))
        .unwrap_or(Date::MAX);
    if next_due <= horizon {
        MaintenanceStatus::DueSoon
    } else {
        MaintenanceStatus::Current
    }
}

/// Derive both columns for one record.
///
/// The due date is computed whenever the inputs allow it (it is a plain
/// fact about the record); the status is only assigned to tracked assets.
pub fn derive(inputs: &MaintenanceInputs, today: Date, lookahead_days: i64) -> DerivedMaintenance {
    if inputs.version_status != VersionStatus::Live {
        return DerivedMaintenance::default();
    }
    let next_due = next_due_date(inputs.last_maintenance_date, inputs.maintenance_interval_days);
    let status = match next_due {
        Some(due) if inputs.is_tracked() => Some(classify(due, today, lookahead_days)),
        _ => None,
    };
    DerivedMaintenance {
        next_maintenance_due: next_due,
        maintenance_status: status,
    }
}

/// Automation entry point: recompute derived fields for a changed record set.
///
/// A record is considered when it has no entry in `prior` (newly created) or
/// when any of its inputs differ from the prior state. An update is emitted
/// only if the freshly derived value differs from what is stored, so calling
/// this twice with unchanged inputs yields no writes the second time.
pub fn derive_for_changes(
    changed: &[MaintenanceSnapshot],
    prior: &HashMap<DbId, MaintenanceInputs>,
    today: Date,
    lookahead_days: i64,
) -> Vec<MaintenanceUpdate> {
    changed
        .iter()
        .filter(|snap| prior.get(&snap.asset_id) != Some(&snap.inputs))
        .filter_map(|snap| {
            let derived = derive(&snap.inputs, today, lookahead_days);
            (derived != snap.stored).then_some(MaintenanceUpdate {
                asset_id: snap.asset_id,
                next_maintenance_due: derived.next_maintenance_due,
                maintenance_status: derived.maintenance_status,
            })
        })
        .collect()
}

/// Re-derive a set of records regardless of prior state.
///
/// Used for date roll-over sweeps, where the inputs are unchanged but
/// "today" has moved. Still suppresses no-op writes.
pub fn refresh_all(
    records: &[MaintenanceSnapshot],
    today: Date,
    lookahead_days: i64,
) -> Vec<MaintenanceUpdate> {
    derive_for_changes(records, &HashMap::new(), today, lookahead_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    fn live_active(last: Option<Date>, interval: Option<i32>) -> MaintenanceInputs {
        MaintenanceInputs {
            maintenance_interval_days: interval,
            last_maintenance_date: last,
            status: AssetStatus::Active,
            version_status: VersionStatus::Live,
        }
    }

    #[test]
    fn overdue_reference_case() {
        let inputs = live_active(Some(date(2024, 1, 1)), Some(30));
        let derived = derive(&inputs, date(2024, 2, 5), DEFAULT_LOOKAHEAD_DAYS);
        assert_eq!(derived.next_maintenance_due, Some(date(2024, 1, 31)));
        assert_eq!(derived.maintenance_status, Some(MaintenanceStatus::Overdue));
    }

    #[test]
    fn due_today_is_due_soon() {
        assert_eq!(
            classify(date(2024, 3, 1), date(2024, 3, 1), 30),
            MaintenanceStatus::DueSoon
        );
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let today = date(2024, 3, 1);
        assert_eq!(classify(date(2024, 3, 31), today, 30), MaintenanceStatus::DueSoon);
        assert_eq!(classify(date(2024, 4, 1), today, 30), MaintenanceStatus::Current);
    }

    #[test]
    fn zero_window_only_today_is_due_soon() {
        let today = date(2024, 3, 1);
        assert_eq!(classify(today, today, 0), MaintenanceStatus::DueSoon);
        assert_eq!(classify(date(2024, 3, 2), today, 0), MaintenanceStatus::Current);
    }

    #[test]
    fn missing_inputs_leave_everything_unset() {
        let today = date(2024, 3, 1);
        assert_eq!(
            derive(&live_active(None, Some(30)), today, 30),
            DerivedMaintenance::default()
        );
        assert_eq!(
            derive(&live_active(Some(today), None), today, 30),
            DerivedMaintenance::default()
        );
        assert_eq!(
            derive(&live_active(Some(today), Some(0)), today, 30),
            DerivedMaintenance::default()
        );
    }

    #[test]
    fn inactive_asset_has_due_date_but_no_status() {
        let mut inputs = live_active(Some(date(2024, 1, 1)), Some(10));
        inputs.status = AssetStatus::Inactive;
        let derived = derive(&inputs, date(2024, 6, 1), 30);
        assert_eq!(derived.next_maintenance_due, Some(date(2024, 1, 11)));
        assert_eq!(derived.maintenance_status, None);
    }

    #[test]
    fn planned_asset_is_not_evaluated() {
        let mut inputs = live_active(Some(date(2020, 1, 1)), Some(10));
        inputs.version_status = VersionStatus::Planned;
        assert_eq!(derive(&inputs, date(2024, 6, 1), 30), DerivedMaintenance::default());
    }

    #[test]
    fn superseded_asset_is_cleared() {
        let mut inputs = live_active(Some(date(2020, 1, 1)), Some(10));
        inputs.version_status = VersionStatus::Superseded;
        assert_eq!(derive(&inputs, date(2024, 6, 1), 30), DerivedMaintenance::default());
    }

    #[test]
    fn derive_for_changes_is_idempotent() {
        let today = date(2024, 2, 5);
        let inputs = live_active(Some(date(2024, 1, 1)), Some(30));
        let snap = MaintenanceSnapshot {
            asset_id: 7,
            inputs,
            stored: DerivedMaintenance::default(),
        };

        let first = derive_for_changes(&[snap], &HashMap::new(), today, 30);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].maintenance_status, Some(MaintenanceStatus::Overdue));

        // Apply the write, then run again with the same inputs.
        let applied = MaintenanceSnapshot {
            stored: DerivedMaintenance {
                next_maintenance_due: first[0].next_maintenance_due,
                maintenance_status: first[0].maintenance_status,
            },
            ..snap
        };
        assert!(derive_for_changes(&[applied], &HashMap::new(), today, 30).is_empty());
    }

    #[test]
    fn unchanged_inputs_are_skipped() {
        let inputs = live_active(Some(date(2024, 1, 1)), Some(30));
        let snap = MaintenanceSnapshot {
            asset_id: 1,
            inputs,
            stored: DerivedMaintenance::default(),
        };
        let prior = HashMap::from([(1, inputs)]);
        assert!(derive_for_changes(&[snap], &prior, date(2024, 2, 5), 30).is_empty());
    }

    #[test]
    fn changed_interval_triggers_update() {
        let before = live_active(Some(date(2024, 1, 1)), Some(30));
        let after = live_active(Some(date(2024, 1, 1)), Some(90));
        let snap = MaintenanceSnapshot {
            asset_id: 3,
            inputs: after,
            stored: derive(&before, date(2024, 2, 5), 30),
        };
        let prior = HashMap::from([(3, before)]);
        let updates = derive_for_changes(&[snap], &prior, date(2024, 2, 5), 30);
        assert_eq!(
            updates,
            vec![MaintenanceUpdate {
                asset_id: 3,
                next_maintenance_due: Some(date(2024, 3, 31)),
                maintenance_status: Some(MaintenanceStatus::Current),
            }]
        );
    }

    #[test]
    fn refresh_all_picks_up_date_rollover() {
        let inputs = live_active(Some(date(2024, 1, 1)), Some(30));
        let stored = derive(&inputs, date(2024, 1, 2), 7);
        assert_eq!(stored.maintenance_status, Some(MaintenanceStatus::Current));

        let snap = MaintenanceSnapshot {
            asset_id: 9,
            inputs,
            stored,
        };
        let updates = refresh_all(&[snap], date(2024, 2, 1), 7);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].maintenance_status, Some(MaintenanceStatus::Overdue));
    }
}
