//! Optimistic workout-plan editor.
//!
//! Mirrors a plan aggregate locally and applies edits immediately while the
//! matching network call is in flight. Every edit is recorded in a
//! reconciliation log as a pending operation carrying its own rollback, so
//! failure handling is uniform instead of per-operation ad hoc code:
//!
//! - a failed add removes the optimistic entry (negative temp id)
//! - a failed remove or reorder marks the whole aggregate stale for refetch
//! - a failed update restores the previous value
//!
//! Reordering recomputes the `order` field for every item and reports only
//! the items whose order actually changed, for batch persistence.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Local mirror of the plan aggregate
// ---------------------------------------------------------------------------

/// Local copy of one target set of a plan item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSnapshot {
    pub id: DbId,
    pub reps: String,
    pub weight: String,
    pub rest: String,
}

/// Local copy of one plan item with its ordered sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: DbId,
    pub exercise_id: DbId,
    pub order: i32,
    pub sets: Vec<SetSnapshot>,
}

/// Local copy of the whole plan aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub id: DbId,
    pub friendly_name: String,
    pub items: Vec<ItemSnapshot>,
}

/// An (item id, new order) pair produced by a reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDelta {
    pub item_id: DbId,
    pub order: i32,
}

// ---------------------------------------------------------------------------
// Reconciliation log
// ---------------------------------------------------------------------------

/// How to undo one pending operation if its network call fails.
#[derive(Debug, Clone)]
enum Rollback {
    /// Drop the optimistically inserted item (by temp id).
    DropItem(DbId),
    /// Drop the optimistically inserted set (by temp id).
    DropSet(DbId),
    /// Put an updated set back to its previous value.
    RestoreSet { item_id: DbId, previous: SetSnapshot },
    /// Restore the previous (item id, order) assignment.
    RestoreOrders(Vec<OrderDelta>),
    /// Local state can no longer be reconciled; refetch the aggregate.
    MarkStale,
}

/// One in-flight edit awaiting server acknowledgement.
#[derive(Debug, Clone)]
struct PendingOp {
    seq: u64,
    rollback: Rollback,
}

/// Sequence number identifying a pending operation.
pub type OpSeq = u64;

/// The editor: local aggregate state plus the pending-operation log.
#[derive(Debug, Clone)]
pub struct PlanEditor {
    plan: PlanSnapshot,
    pending: Vec<PendingOp>,
    next_seq: u64,
    next_temp_id: DbId,
    stale: bool,
}

/// Temp ids start below this value and decrement (first allocation: -1001).
const TEMP_ID_BASE: DbId = -1000;

impl PlanEditor {
    /// Start editing from a server-fetched aggregate.
    pub fn new(plan: PlanSnapshot) -> Self {
        Self {
            plan,
            pending: Vec::new(),
            next_seq: 0,
            next_temp_id: TEMP_ID_BASE,
            stale: false,
        }
    }

    /// Current local state, optimistic edits included.
    pub fn plan(&self) -> &PlanSnapshot {
        &self.plan
    }

    /// True once a failed remove/reorder has made local state untrustworthy.
    /// The owner is expected to refetch and call [`PlanEditor::resync`].
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of operations still awaiting acknowledgement.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Replace local state with a fresh server aggregate, clearing the log.
    pub fn resync(&mut self, plan: PlanSnapshot) {
        self.plan = plan;
        self.pending.clear();
        self.stale = false;
    }

    fn alloc_temp_id(&mut self) -> DbId {
        self.next_temp_id -= 1;
        self.next_temp_id
    }

    fn record(&mut self, rollback: Rollback) -> OpSeq {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingOp { seq, rollback });
        seq
    }

    // -- edits ---------------------------------------------------------------

    /// Append an item for `exercise_id` at the end of the plan.
    /// Returns the optimistic temp id and the pending-op sequence.
    pub fn add_item(&mut self, exercise_id: DbId) -> (DbId, OpSeq) {
        let temp_id = self.alloc_temp_id();
        let order = self.plan.items.len() as i32;
        self.plan.items.push(ItemSnapshot {
            id: temp_id,
            exercise_id,
            order,
            sets: Vec::new(),
        });
        let seq = self.record(Rollback::DropItem(temp_id));
        (temp_id, seq)
    }

    /// Remove an item locally. A later failure marks the aggregate stale.
    pub fn remove_item(&mut self, item_id: DbId) -> Result<OpSeq, CoreError> {
        let before = self.plan.items.len();
        self.plan.items.retain(|i| i.id != item_id);
        if self.plan.items.len() == before {
            return Err(CoreError::not_found("WorkoutPlanItem", item_id));
        }
        Ok(self.record(Rollback::MarkStale))
    }

    /// Append a target set to an item.
    /// Returns the optimistic temp id and the pending-op sequence.
    pub fn add_set(
        &mut self,
        item_id: DbId,
        reps: &str,
        weight: &str,
        rest: &str,
    ) -> Result<(DbId, OpSeq), CoreError> {
        let temp_id = self.alloc_temp_id();
        let item = self
            .plan
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::not_found("WorkoutPlanItem", item_id))?;
        item.sets.push(SetSnapshot {
            id: temp_id,
            reps: reps.to_string(),
            weight: weight.to_string(),
            rest: rest.to_string(),
        });
        let seq = self.record(Rollback::DropSet(temp_id));
        Ok((temp_id, seq))
    }

    /// Remove a set locally. A later failure marks the aggregate stale.
    pub fn remove_set(&mut self, set_id: DbId) -> Result<OpSeq, CoreError> {
        let mut removed = false;
        for item in &mut self.plan.items {
            let before = item.sets.len();
            item.sets.retain(|s| s.id != set_id);
            if item.sets.len() != before {
                removed = true;
                break;
            }
        }
        if !removed {
            return Err(CoreError::not_found("WorkoutPlanItemSet", set_id));
        }
        Ok(self.record(Rollback::MarkStale))
    }

    /// Overwrite a set's targets. A later failure restores the old value.
    pub fn update_set(
        &mut self,
        set_id: DbId,
        reps: &str,
        weight: &str,
        rest: &str,
    ) -> Result<OpSeq, CoreError> {
        for item in &mut self.plan.items {
            let item_id = item.id;
            if let Some(set) = item.sets.iter_mut().find(|s| s.id == set_id) {
                let previous = set.clone();
                set.reps = reps.to_string();
                set.weight = weight.to_string();
                set.rest = rest.to_string();
                return Ok(self.record(Rollback::RestoreSet { item_id, previous }));
            }
        }
        Err(CoreError::not_found("WorkoutPlanItemSet", set_id))
    }

    /// Reassign `order` across all items to match `new_order` (item ids,
    /// front to back). Every listed id must exist and every item must be
    /// listed. Returns the pending-op sequence plus only the (id, order)
    /// pairs that actually changed.
    pub fn reorder(&mut self, new_order: &[DbId]) -> Result<(OpSeq, Vec<OrderDelta>), CoreError> {
        if new_order.len() != self.plan.items.len() {
            return Err(CoreError::Validation(format!(
                "Reorder lists {} items, plan has {}",
                new_order.len(),
                self.plan.items.len()
            )));
        }

        let previous: Vec<OrderDelta> = self
            .plan
            .items
            .iter()
            .map(|i| OrderDelta {
                item_id: i.id,
                order: i.order,
            })
            .collect();

        let mut reordered = Vec::with_capacity(new_order.len());
        for (pos, &id) in new_order.iter().enumerate() {
            let mut item = self
                .plan
                .items
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .ok_or_else(|| CoreError::not_found("WorkoutPlanItem", id))?;
            item.order = pos as i32;
            reordered.push(item);
        }

        let deltas: Vec<OrderDelta> = reordered
            .iter()
            .filter(|item| {
                previous
                    .iter()
                    .find(|p| p.item_id == item.id)
                    .is_some_and(|p| p.order != item.order)
            })
            .map(|item| OrderDelta {
                item_id: item.id,
                order: item.order,
            })
            .collect();

        self.plan.items = reordered;
        let seq = self.record(Rollback::RestoreOrders(previous));
        Ok((seq, deltas))
    }

    // -- reconciliation ------------------------------------------------------

    /// The server confirmed the operation; drop it from the log.
    pub fn ack(&mut self, seq: OpSeq) {
        self.pending.retain(|op| op.seq != seq);
    }

    /// The server confirmed an insert and assigned a real id; swap the
    /// optimistic temp id for it and drop the op from the log.
    pub fn ack_insert(&mut self, seq: OpSeq, real_id: DbId) {
        let Some(pos) = self.pending.iter().position(|op| op.seq == seq) else {
            return;
        };
        match self.pending.remove(pos).rollback {
            Rollback::DropItem(temp_id) => {
                if let Some(item) = self.plan.items.iter_mut().find(|i| i.id == temp_id) {
                    item.id = real_id;
                }
            }
            Rollback::DropSet(temp_id) => {
                for item in &mut self.plan.items {
                    if let Some(set) = item.sets.iter_mut().find(|s| s.id == temp_id) {
                        set.id = real_id;
                        break;
                    }
                }
            }
            // Not an insert; nothing to re-identify.
            _ => {}
        }
    }

    /// The network call for an operation failed; run its rollback.
    pub fn fail(&mut self, seq: OpSeq) {
        let Some(pos) = self.pending.iter().position(|op| op.seq == seq) else {
            return;
        };
        match self.pending.remove(pos).rollback {
            Rollback::DropItem(temp_id) => {
                self.plan.items.retain(|i| i.id != temp_id);
            }
            Rollback::DropSet(temp_id) => {
                for item in &mut self.plan.items {
                    item.sets.retain(|s| s.id != temp_id);
                }
            }
            Rollback::RestoreSet { item_id, previous } => {
                if let Some(item) = self.plan.items.iter_mut().find(|i| i.id == item_id) {
                    if let Some(set) = item.sets.iter_mut().find(|s| s.id == previous.id) {
                        *set = previous;
                    }
                }
            }
            Rollback::RestoreOrders(previous) => {
                for delta in previous {
                    if let Some(item) =
                        self.plan.items.iter_mut().find(|i| i.id == delta.item_id)
                    {
                        item.order = delta.order;
                    }
                }
                self.plan.items.sort_by_key(|i| i.order);
            }
            Rollback::MarkStale => {
                self.stale = true;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_with_one_item() -> PlanSnapshot {
        PlanSnapshot {
            id: 1,
            friendly_name: "Leg Day".to_string(),
            items: vec![ItemSnapshot {
                id: 10,
                exercise_id: 42,
                order: 0,
                sets: vec![SetSnapshot {
                    id: 100,
                    reps: "10".to_string(),
                    weight: "50".to_string(),
                    rest: "60".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn first_temp_id_is_minus_1001() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        let (temp_id, _) = editor.add_set(10, "8", "60", "90").unwrap();
        assert_eq!(temp_id, -1001);
    }

    #[test]
    fn failed_add_set_leaves_no_trace() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        let (temp_id, seq) = editor.add_set(10, "8", "60", "90").unwrap();
        assert_eq!(temp_id, -1001);
        assert_eq!(editor.plan().items[0].sets.len(), 2);

        editor.fail(seq);

        let sets = &editor.plan().items[0].sets;
        assert_eq!(sets.len(), 1);
        assert!(sets.iter().all(|s| s.id != -1001));
        assert_eq!(editor.pending_count(), 0);
        assert!(!editor.is_stale());
    }

    #[test]
    fn acked_add_set_swaps_temp_id_for_real_id() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        let (temp_id, seq) = editor.add_set(10, "8", "60", "90").unwrap();
        editor.ack_insert(seq, 101);

        let sets = &editor.plan().items[0].sets;
        assert!(sets.iter().any(|s| s.id == 101));
        assert!(sets.iter().all(|s| s.id != temp_id));
        assert_eq!(editor.pending_count(), 0);
    }

    #[test]
    fn add_item_appends_with_next_order() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        let (temp_id, _) = editor.add_item(55);
        let items = &editor.plan().items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, temp_id);
        assert_eq!(items[1].order, 1);
    }

    #[test]
    fn failed_remove_marks_stale_without_restoring() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        let seq = editor.remove_set(100).unwrap();
        assert!(editor.plan().items[0].sets.is_empty());

        editor.fail(seq);

        // No optimistic rollback is attempted; the aggregate is refetched.
        assert!(editor.plan().items[0].sets.is_empty());
        assert!(editor.is_stale());
    }

    #[test]
    fn failed_update_restores_previous_value() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        let seq = editor.update_set(100, "12", "55", "45").unwrap();
        assert_eq!(editor.plan().items[0].sets[0].reps, "12");

        editor.fail(seq);

        let set = &editor.plan().items[0].sets[0];
        assert_eq!(set.reps, "10");
        assert_eq!(set.weight, "50");
        assert_eq!(set.rest, "60");
    }

    #[test]
    fn remove_unknown_set_is_an_error() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        assert!(editor.remove_set(999).is_err());
        assert_eq!(editor.pending_count(), 0);
    }

    #[test]
    fn reorder_reports_only_changed_items() {
        let mut plan = plan_with_one_item();
        plan.items.push(ItemSnapshot {
            id: 11,
            exercise_id: 43,
            order: 1,
            sets: Vec::new(),
        });
        plan.items.push(ItemSnapshot {
            id: 12,
            exercise_id: 44,
            order: 2,
            sets: Vec::new(),
        });
        let mut editor = PlanEditor::new(plan);

        // Swap the last two; item 10 keeps order 0.
        let (_, deltas) = editor.reorder(&[10, 12, 11]).unwrap();

        assert_eq!(deltas.len(), 2);
        assert!(deltas.contains(&OrderDelta {
            item_id: 12,
            order: 1
        }));
        assert!(deltas.contains(&OrderDelta {
            item_id: 11,
            order: 2
        }));
    }

    #[test]
    fn failed_reorder_restores_previous_orders() {
        let mut plan = plan_with_one_item();
        plan.items.push(ItemSnapshot {
            id: 11,
            exercise_id: 43,
            order: 1,
            sets: Vec::new(),
        });
        let mut editor = PlanEditor::new(plan);

        let (seq, _) = editor.reorder(&[11, 10]).unwrap();
        assert_eq!(editor.plan().items[0].id, 11);

        editor.fail(seq);

        assert_eq!(editor.plan().items[0].id, 10);
        assert_eq!(editor.plan().items[0].order, 0);
        assert_eq!(editor.plan().items[1].id, 11);
        assert_eq!(editor.plan().items[1].order, 1);
    }

    #[test]
    fn reorder_rejects_unknown_or_partial_lists() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        assert!(editor.reorder(&[]).is_err());
        assert!(editor.reorder(&[999]).is_err());
    }

    #[test]
    fn resync_clears_log_and_staleness() {
        let mut editor = PlanEditor::new(plan_with_one_item());
        let seq = editor.remove_set(100).unwrap();
        editor.fail(seq);
        assert!(editor.is_stale());

        editor.resync(plan_with_one_item());
        assert!(!editor.is_stale());
        assert_eq!(editor.pending_count(), 0);
        assert_eq!(editor.plan().items[0].sets.len(), 1);
    }
}
