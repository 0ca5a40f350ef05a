//! Minimal reversible move record
//!
//! Records only the graph motion of a placement or relocation. Inventory
//! and turn bookkeeping belong to the external game-flow controller.

use crate::hive::{Hive, NodeId};
use crate::route::Position;
use serde::{Deserialize, Serialize};

/// A completed placement (no origin) or relocation (with origin).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub node: NodeId,
    pub origin: Option<Position>,
    pub destination: Position,
}

impl Move {
    pub fn placement(node: NodeId, destination: Position) -> Self {
        Self {
            node,
            origin: None,
            destination,
        }
    }

    pub fn relocation(node: NodeId, origin: Position, destination: Position) -> Self {
        Self {
            node,
            origin: Some(origin),
            destination,
        }
    }
}

/// Outcome of undoing one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Undo {
    /// The piece went back to where it came from.
    Returned,
    /// The piece was a fresh placement; it is detached now and the
    /// controller should put it back into its owner's hand.
    Unplaced(NodeId),
}

/// Two-stack undo/redo over completed moves.
#[derive(Clone, Debug, Default)]
pub struct History {
    moves: Vec<Move>,
    popped: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Record a completed move. Recording discards any pending redo tail.
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
        self.popped.clear();
    }

    /// Undo the most recent move against `hive`.
    pub fn pop(&mut self, hive: &mut Hive) -> Option<Undo> {
        let mv = self.moves.pop()?;
        let undo = match mv.origin {
            Some(origin) => {
                hive.move_to(mv.node, origin);
                Undo::Returned
            }
            None => {
                hive.disconnect(mv.node);
                Undo::Unplaced(mv.node)
            }
        };
        self.popped.push(mv);
        Some(undo)
    }

    /// Redo the most recently undone move against `hive`.
    pub fn restore(&mut self, hive: &mut Hive) -> Option<Move> {
        let mv = self.popped.pop()?;
        match mv.origin {
            Some(_) => hive.move_to(mv.node, mv.destination),
            None => hive.place(mv.node, mv.destination),
        }
        self.moves.push(mv);
        Some(mv)
    }
}
