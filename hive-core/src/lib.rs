//! Hive Core - board graph and move generation
//!
//! This crate provides the core engine for the board game Hive:
//! - Direction and stacking geometry (axial columns plus levels)
//! - The mutable adjacency graph of placed pieces with the one-hive rule
//! - Route/path algebra with a stable integer encoding
//! - Per-piece legal move generation (queen bee, beetle, grasshopper,
//!   spider, soldier ant)
//! - A minimal reversible move record for external undo/redo
//!
//! Rendering, input handling, turn/hand bookkeeping and long-term storage
//! are external collaborators built on top of this surface. The engine is
//! single-threaded by contract: the owning controller serializes all calls.

pub mod direction;
pub mod pieces;
pub mod neighbors;
pub mod route;
pub mod hive;
pub mod moves;
pub mod history;
pub mod record;

// Re-exports for convenient access
pub use direction::{Delta, Direction};
pub use hive::{HexNode, Hive, NodeId};
pub use history::{History, Move, Undo};
pub use neighbors::NeighborTable;
pub use pieces::{Color, PieceKind};
pub use record::{PieceRecord, RecordError, StructureRecord};
pub use route::{Destination, Path, Position, Route, RouteError};
