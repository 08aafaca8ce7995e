//! Version chain state machine.
//!
//! ```text
//!   create_planned          activate_planned
//!  ───────────────> Planned ────────────────> Live ──supersede──> Superseded
//!                                              │                     ^
//!                                              └── (demoted when its ┘
//!                                                   successor goes live)
//! ```
//!
//! Chains are linked explicitly: a Planned asset records its predecessor's
//! id when created, and the predecessor records the successor's id. The
//! rules here only decide whether a transition is legal; the caller locks the
//! rows, applies the writes and commits them as one transaction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::asset::VersionStatus;
use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Maximum length of a version label.
pub const MAX_VERSION_LABEL_LEN: usize = 50;

/// The transition a [`TransitionOutcome`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    CreatePlanned,
    ActivatePlanned,
    Supersede,
}

/// Result of a committed transition.
///
/// Lists every asset whose fields changed so the caller can refresh exactly
/// those records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
    pub transition: Transition,
    /// The asset the transition was requested on (or created by it).
    pub asset_id: DbId,
    pub changed_asset_ids: Vec<DbId>,
}

/// The chain-relevant view of an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMember {
    pub id: DbId,
    pub name: String,
    pub version_status: VersionStatus,
    pub version_label: String,
    pub predecessor_id: Option<DbId>,
    pub successor_id: Option<DbId>,
}

/// Caller input for creating a planned version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannedVersionInput {
    pub new_version_label: String,
    pub notes: Option<String>,
    pub go_live_date: Option<Date>,
    pub assigned_engineer_id: Option<DbId>,
}

impl PlannedVersionInput {
    /// Check the label is present, bounded and actually new.
    pub fn validate(&self, current_label: &str) -> Result<(), CoreError> {
        let label = self.new_version_label.trim();
        if label.is_empty() {
            return Err(CoreError::Validation(
                "New version label must not be empty".to_string(),
            ));
        }
        if label.len() > MAX_VERSION_LABEL_LEN {
            return Err(CoreError::Validation(format!(
                "Version label exceeds maximum length of {MAX_VERSION_LABEL_LEN} characters"
            )));
        }
        if label == current_label.trim() {
            return Err(CoreError::Validation(format!(
                "New version label '{label}' matches the current version"
            )));
        }
        Ok(())
    }
}

/// A planned version may only branch from a Live asset that has no pending
/// planned successor.
///
/// `pending_successor` is the status of the asset's current successor, if it
/// has one.
pub fn ensure_can_create_planned(
    original: &ChainMember,
    pending_successor: Option<VersionStatus>,
) -> Result<(), CoreError> {
    if original.version_status != VersionStatus::Live {
        return Err(CoreError::InvalidState(format!(
            "Asset {} is {}; planned versions can only be created from a Live asset",
            original.id,
            original.version_status.label()
        )));
    }
    if pending_successor == Some(VersionStatus::Planned) {
        return Err(CoreError::InvalidState(format!(
            "Asset {} already has a planned version awaiting activation",
            original.id
        )));
    }
    Ok(())
}

/// Decide which Live asset an activation demotes.
///
/// The planned asset's recorded predecessor is authoritative. A caller may
/// name the related asset explicitly, but it must agree with the link.
pub fn resolve_related_live(
    planned: &ChainMember,
    requested: Option<DbId>,
) -> Result<DbId, CoreError> {
    let predecessor = planned.predecessor_id.ok_or_else(|| {
        CoreError::Validation(format!(
            "Planned asset {} has no predecessor to replace",
            planned.id
        ))
    })?;
    match requested {
        Some(id) if id != predecessor => Err(CoreError::Validation(format!(
            "Asset {id} is not the predecessor of planned asset {} (expected {predecessor})",
            planned.id
        ))),
        _ => Ok(predecessor),
    }
}

/// Only Planned assets can be activated.
pub fn ensure_is_planned(planned: &ChainMember) -> Result<(), CoreError> {
    if planned.version_status != VersionStatus::Planned {
        return Err(CoreError::InvalidState(format!(
            "Asset {} is {}; only Planned assets can be activated",
            planned.id,
            planned.version_status.label()
        )));
    }
    Ok(())
}

/// Check both sides of an activation.
///
/// A related asset that is no longer Live is reported as not found.
pub fn ensure_can_activate(planned: &ChainMember, related: &ChainMember) -> Result<(), CoreError> {
    ensure_is_planned(planned)?;
    if related.version_status != VersionStatus::Live {
        return Err(CoreError::NotFound {
            entity: "Live asset",
            id: related.id,
        });
    }
    Ok(())
}

/// Supersede is only valid from Live.
pub fn ensure_can_supersede(asset: &ChainMember) -> Result<(), CoreError> {
    if asset.version_status != VersionStatus::Live {
        return Err(CoreError::InvalidState(format!(
            "Asset {} is {}; only Live assets can be superseded",
            asset.id,
            asset.version_status.label()
        )));
    }
    Ok(())
}

/// Pick the single Live asset among name matches.
///
/// More than one match breaks the one-Live-per-chain invariant and is
/// reported rather than resolved arbitrarily.
pub fn single_live_match(name: &str, live_ids: &[DbId]) -> Result<DbId, CoreError> {
    match live_ids {
        [] => Err(CoreError::NotFoundByKey {
            entity: "Live asset",
            key: name.to_string(),
        }),
        [id] => Ok(*id),
        many => Err(CoreError::Conflict(format!(
            "{} Live assets share the name '{name}': {:?}",
            many.len(),
            many
        ))),
    }
}

/// Order chain members oldest first by following the explicit links.
///
/// Members whose predecessor is outside the set start a run; runs are
/// emitted in ascending id order, so a well-formed chain yields a single
/// run from root to tip.
pub fn order_chain(members: Vec<ChainMember>) -> Vec<ChainMember> {
    let mut by_id: HashMap<DbId, ChainMember> = members.into_iter().map(|m| (m.id, m)).collect();

    let mut roots: Vec<DbId> = by_id
        .values()
        .filter(|m| m.predecessor_id.map_or(true, |p| !by_id.contains_key(&p)))
        .map(|m| m.id)
        .collect();
    roots.sort_unstable();

    let mut ordered = Vec::with_capacity(by_id.len());
    for root in roots {
        let mut next = Some(root);
        while let Some(id) = next {
            match by_id.remove(&id) {
                Some(member) => {
                    next = member.successor_id;
                    ordered.push(member);
                }
                None => next = None,
            }
        }
    }

    // Anything left is on a cycle; keep it visible rather than dropping it.
    let mut rest: Vec<ChainMember> = by_id.into_values().collect();
    rest.sort_by_key(|m| m.id);
    ordered.extend(rest);
    ordered
}
