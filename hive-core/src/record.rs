//! Structure snapshots for external persistence
//!
//! A structure is serialized as (identity, route, color) triples anchored
//! at a root piece: the root carries an empty route, every other piece the
//! encoded route from the root to its cell. Rebuilding replays the triples
//! in snapshot order, which is breadth-first, so each record's anchor is
//! already on the board when it arrives.

use crate::hive::{Hive, NodeId};
use crate::pieces::{Color, PieceKind};
use crate::route::{Route, RouteError};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use thiserror::Error;

/// One placed piece, anchored at the snapshot root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    pub kind: PieceKind,
    pub color: Color,
    pub route: Vec<u8>,
}

/// A whole connected structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureRecord {
    pub pieces: Vec<PieceRecord>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("snapshot contains no pieces")]
    Empty,
    #[error("the first record must carry an empty route")]
    BadRoot,
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("record {0} does not resolve to an attachable cell")]
    Unresolvable(usize),
}

impl Hive {
    /// Snapshot the connected structure containing `root`.
    pub fn snapshot(&self, root: NodeId) -> StructureRecord {
        let anchor = self.node(root);
        let mut pieces = vec![PieceRecord {
            kind: anchor.kind,
            color: anchor.color,
            route: Vec::new(),
        }];
        for path in self.derive_paths(root) {
            let node = self.node(path.node);
            pieces.push(PieceRecord {
                kind: node.kind,
                color: node.color,
                route: path.route.encode(),
            });
        }
        StructureRecord { pieces }
    }
}

impl StructureRecord {
    /// Rebuild a structure, returning the fresh graph and its root.
    pub fn build(&self) -> Result<(Hive, NodeId), RecordError> {
        let first = self.pieces.first().ok_or(RecordError::Empty)?;
        if !first.route.is_empty() {
            return Err(RecordError::BadRoot);
        }
        let mut hive = Hive::new();
        let root = hive.spawn(first.kind, first.color);
        for (index, record) in self.pieces.iter().enumerate().skip(1) {
            let route = Route::decode(&record.route)?;
            let dest = hive
                .resolve(root, &route)
                .ok_or(RecordError::Unresolvable(index))?;
            let id = hive.spawn(record.kind, record.color);
            hive.place(id, dest);
        }
        Ok((hive, root))
    }

    /// Save to a JSON file.
    pub fn save(&self, path: &FsPath) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load(path: &FsPath) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let record: StructureRecord = serde_json::from_str(&content)?;
        Ok(record)
    }
}
