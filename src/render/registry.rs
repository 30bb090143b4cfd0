use crate::foundation::core::Rgba8Premul;
use crate::scene::color::color;
use crate::scene::pose::{Hull, Pose};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How poses are matched to slots across reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotPolicy {
    /// Pose `i` always drives slot `i`. The feed carries no identity, so an entity that changes
    /// position in the feed ordering is silently drawn by another slot.
    #[default]
    Index,
    /// Poses with an `id` drive the slot first created for that id; poses without one fall back
    /// to their position in the read.
    Explicit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum SlotKey {
    Id(u64),
    Position(usize),
}

/// One persistent rendering entry for a dynamic entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    serial: u64,
    kind: String,
    color: Rgba8Premul,
    hull: Hull,
    visible: bool,
}

impl Slot {
    /// Creation sequence number; unique per registry and never reassigned.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Name of the pose that created the slot.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Fill color, fixed at creation.
    pub fn color(&self) -> Rgba8Premul {
        self.color
    }

    /// Current outline.
    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    /// Whether the slot is drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Index-addressed set of rendered entity shapes.
///
/// Slots are only ever appended. A slot whose entity is missing from a read is hidden and kept
/// for cheap reappearance.
#[derive(Clone, Debug, Default)]
pub struct PatchRegistry {
    policy: SlotPolicy,
    slots: Vec<Slot>,
    keys: HashMap<SlotKey, usize>,
    next_serial: u64,
}

impl PatchRegistry {
    /// Empty registry using `policy`.
    pub fn new(policy: SlotPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// All slots, in creation order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot count.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when no slot was ever created.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Visible slots, in creation order (draw order).
    pub fn visible(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.visible)
    }

    /// Apply a complete pose set.
    pub fn reconcile(&mut self, poses: &[Pose]) {
        let before = self.slots.len();
        match self.policy {
            SlotPolicy::Index => self.reconcile_by_index(poses),
            SlotPolicy::Explicit => self.reconcile_by_key(poses),
        }
        if self.slots.len() > before {
            tracing::debug!(
                created = self.slots.len() - before,
                slots = self.slots.len(),
                "registry grew"
            );
        }
        tracing::trace!(poses = poses.len(), slots = self.slots.len(), "reconciled");
    }

    fn reconcile_by_index(&mut self, poses: &[Pose]) {
        let n = poses.len().max(self.slots.len());
        for i in 0..n {
            if i >= self.slots.len() {
                let slot = self.create(&poses[i]);
                self.slots.push(slot);
            }
            let slot = &mut self.slots[i];
            match poses.get(i) {
                Some(pose) => {
                    slot.hull.clone_from(&pose.hull);
                    slot.visible = true;
                }
                None => slot.visible = false,
            }
        }
    }

    fn reconcile_by_key(&mut self, poses: &[Pose]) {
        let mut seen = vec![false; self.slots.len()];
        for (i, pose) in poses.iter().enumerate() {
            let key = pose
                .record
                .id
                .map_or(SlotKey::Position(i), SlotKey::Id);
            let idx = match self.keys.get(&key) {
                Some(&idx) => idx,
                None => {
                    let slot = self.create(pose);
                    self.keys.insert(key, self.slots.len());
                    self.slots.push(slot);
                    seen.push(false);
                    self.slots.len() - 1
                }
            };
            let slot = &mut self.slots[idx];
            slot.hull.clone_from(&pose.hull);
            slot.visible = true;
            seen[idx] = true;
        }
        for (slot, seen) in self.slots.iter_mut().zip(seen) {
            if !seen {
                slot.visible = false;
            }
        }
    }

    fn create(&mut self, pose: &Pose) -> Slot {
        let serial = self.next_serial;
        self.next_serial += 1;
        Slot {
            serial,
            kind: pose.name.clone(),
            color: color(&pose.name),
            hull: pose.hull.clone(),
            visible: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/registry.rs"]
mod tests;
