//! Impact reconciliation for record updates
//!
//! Given the impacts currently stored for a record and the list a client
//! sent, decide which rows to insert, update and delete. Pure; the storage
//! layer applies the plan inside its transaction.

use crate::contract::{HistoryError, Impact, ImpactInput, NewImpact};
use std::collections::HashMap;
use uuid::Uuid;

/// Row changes needed to turn the stored impact list into the incoming one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImpactPlan {
    pub inserts: Vec<NewImpact>,
    /// Impacts with their new values; ids are unchanged
    pub updates: Vec<Impact>,
    /// Stored impacts no longer present in the incoming list
    pub deletes: Vec<Impact>,
}

/// Build the plan for `record_id`.
///
/// Incoming entries without an id (or with the nil UUID) are new. An id that
/// does not belong to the record fails with `NotFound`. Unchanged impacts
/// produce no row change.
pub fn plan_impacts(
    record_id: Uuid,
    existing: &[Impact],
    incoming: &[ImpactInput],
) -> Result<ImpactPlan, HistoryError> {
    let mut remaining: HashMap<Uuid, &Impact> = existing.iter().map(|i| (i.id, i)).collect();
    let mut plan = ImpactPlan::default();

    for input in incoming {
        let Some(id) = input.id.filter(|id| !id.is_nil()) else {
            plan.inserts.push(NewImpact {
                description: input.description.clone(),
                value: input.value,
                category: input.category,
            });
            continue;
        };

        let current = remaining
            .remove(&id)
            .ok_or_else(|| HistoryError::impact_not_found(id))?;

        let desired = Impact {
            id,
            record_id,
            description: input.description.clone(),
            value: input.value,
            category: input.category,
        };
        if *current != desired {
            plan.updates.push(desired);
        }
    }

    // Preserve stored order for deterministic deletes
    plan.deletes = existing
        .iter()
        .filter(|i| remaining.contains_key(&i.id))
        .cloned()
        .collect();

    Ok(plan)
}
