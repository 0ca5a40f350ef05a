//! Fixed direction-to-neighbor slot mapping

use crate::direction::Direction;
use crate::hive::NodeId;
use serde::{Deserialize, Serialize};

/// One optional node reference per [`Direction`]. A plain value type: the
/// graph invariants (bidirectionality, cell uniqueness) are maintained by
/// [`crate::hive::Hive`], never here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborTable {
    slots: [Option<NodeId>; 8],
}

impl NeighborTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dir: Direction) -> Option<NodeId> {
        self.slots[dir.index() as usize]
    }

    pub(crate) fn set(&mut self, dir: Direction, node: NodeId) {
        self.slots[dir.index() as usize] = Some(node);
    }

    pub(crate) fn clear(&mut self, dir: Direction) {
        self.slots[dir.index() as usize] = None;
    }

    /// Occupied slots as (direction, node) pairs, in encoding order.
    pub fn available(&self) -> Vec<(Direction, NodeId)> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.get(dir).map(|node| (dir, node)))
            .collect()
    }

    /// Unoccupied directions, in encoding order.
    pub fn empty_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&dir| self.get(dir).is_none())
            .collect()
    }

    /// The direction at which `node` sits, or `None` when absent.
    pub fn contains(&self, node: NodeId) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|&dir| self.get(dir) == Some(node))
    }

    /// Clear the slot holding `node`. A no-op when `node` is not a
    /// neighbor; other slots are never disturbed.
    pub(crate) fn remove(&mut self, node: NodeId) -> Option<Direction> {
        let dir = self.contains(node)?;
        self.clear(dir);
        Some(dir)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}
