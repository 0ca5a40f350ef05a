//! The mutable adjacency graph of placed pieces
//!
//! Every edge is bidirectional: if A's neighbor at D is B, then B's
//! neighbor at D.opposite() is A. All mutations preserve that invariant or
//! assert; violating a precondition (connecting into an occupied slot,
//! severing a non-edge) is a caller defect, not a runtime condition.

use crate::direction::{Delta, Direction};
use crate::neighbors::NeighborTable;
use crate::pieces::{Color, PieceKind};
use crate::route::{Destination, Path, Position, Route};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Stable arena index of a placed piece. Graph membership is compared by
/// id, never by node contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A placed piece: identity, owner, and its eight neighbor slots.
#[derive(Clone, Debug)]
pub struct HexNode {
    pub kind: PieceKind,
    pub color: Color,
    pub(crate) neighbors: NeighborTable,
}

impl HexNode {
    pub fn neighbors(&self) -> &NeighborTable {
        &self.neighbors
    }
}

/// The board structure: an arena of mutually referencing nodes. The
/// external game controller owns the one live instance and serializes all
/// calls; the engine itself does no locking.
///
/// Nodes are never deleted: a piece taken back into a player's hand stays
/// in the arena fully disconnected and keeps its id until the controller
/// discards the whole structure on reset.
#[derive(Clone, Debug, Default)]
pub struct Hive {
    nodes: Vec<HexNode>,
}

impl Hive {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn node(&self, id: NodeId) -> &HexNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn neighbor(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        self.nodes[id.0].neighbors.get(dir)
    }

    /// The direction at which `other` neighbors `id`, if it does.
    pub fn has_neighbor(&self, id: NodeId, other: NodeId) -> Option<Direction> {
        self.nodes[id.0].neighbors.contains(other)
    }

    /// A covered piece has another piece stacked directly on top and can
    /// never move or be detached.
    pub fn is_covered(&self, id: NodeId) -> bool {
        self.neighbor(id, Direction::Above).is_some()
    }

    /// Number of pieces stacked underneath `id` (0 for a grounded piece).
    pub fn elevation(&self, id: NodeId) -> i32 {
        let mut height = 0;
        let mut current = id;
        while let Some(below) = self.neighbor(current, Direction::Below) {
            height += 1;
            current = below;
        }
        height
    }

    // ========================================================================
    // CONSTRUCTION & EDGE MUTATION
    // ========================================================================

    /// Create an isolated node. The root piece of a structure starts here;
    /// so does every piece still in a player's hand.
    pub fn spawn(&mut self, kind: PieceKind, color: Color) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HexNode {
            kind,
            color,
            neighbors: NeighborTable::new(),
        });
        id
    }

    /// Establish the bidirectional edge putting `id` in slot `at.dir` of
    /// `at.node`. Both slots must be empty; callers check legality first.
    pub fn connect(&mut self, id: NodeId, at: Position) {
        let Position { node: anchor, dir } = at;
        assert_ne!(id, anchor, "cannot connect a node to itself");
        assert!(
            self.nodes[anchor.0].neighbors.get(dir).is_none(),
            "anchor slot already occupied"
        );
        assert!(
            self.nodes[id.0].neighbors.get(dir.opposite()).is_none(),
            "connecting node's slot already occupied"
        );
        self.nodes[anchor.0].neighbors.set(dir, id);
        self.nodes[id.0].neighbors.set(dir.opposite(), anchor);
    }

    /// Sever every edge of `id`, both sides. Idempotent on an isolated node.
    pub fn disconnect(&mut self, id: NodeId) {
        for (dir, neighbor) in self.nodes[id.0].neighbors.available() {
            self.nodes[id.0].neighbors.clear(dir);
            self.nodes[neighbor.0].neighbors.clear(dir.opposite());
        }
    }

    /// Sever exactly one edge. The edge must exist in both directions.
    pub fn disconnect_edge(&mut self, a: NodeId, b: NodeId) {
        let dir = self.nodes[a.0]
            .neighbors
            .contains(b)
            .expect("edge does not exist");
        assert_eq!(
            self.nodes[b.0].neighbors.get(dir.opposite()),
            Some(a),
            "edge is one-sided"
        );
        self.nodes[a.0].neighbors.clear(dir);
        self.nodes[b.0].neighbors.clear(dir.opposite());
    }

    // ========================================================================
    // TRAVERSAL
    // ========================================================================

    /// Every node in `id`'s connected component, `id` included, each
    /// exactly once.
    pub fn connected_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let mut visited = FxHashSet::default();
        let mut stack = vec![id];
        let mut out = Vec::new();
        visited.insert(id);
        while let Some(current) = stack.pop() {
            out.push(current);
            for (_, neighbor) in self.nodes[current.0].neighbors.available() {
                if visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        out
    }

    /// One shortest-by-construction [`Path`] per node reachable from `id`,
    /// excluding `id` itself, in breadth-first discovery order.
    pub fn derive_paths(&self, id: NodeId) -> Vec<Path> {
        let mut visited = FxHashSet::default();
        visited.insert(id);
        let mut queue = VecDeque::new();
        queue.push_back((id, Route::new()));
        let mut paths = Vec::new();
        while let Some((current, route)) = queue.pop_front() {
            for (dir, neighbor) in self.nodes[current.0].neighbors.available() {
                if !visited.insert(neighbor) {
                    continue;
                }
                let mut next = route.clone();
                next.push(dir);
                paths.push(Path {
                    route: next.clone(),
                    node: neighbor,
                });
                queue.push_back((neighbor, next));
            }
        }
        paths
    }

    fn component_excluding(&self, start: NodeId, excluded: NodeId) -> FxHashSet<NodeId> {
        let mut visited = FxHashSet::default();
        let mut stack = vec![start];
        visited.insert(start);
        while let Some(current) = stack.pop() {
            for (_, neighbor) in self.nodes[current.0].neighbors.available() {
                if neighbor != excluded && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        visited
    }

    // ========================================================================
    // ONE-HIVE RULE
    // ========================================================================

    /// Whether lifting `id` out keeps the rest of the structure a single
    /// connected component. False immediately for a covered piece.
    ///
    /// The check walks the component of one former neighbor with `id`
    /// excluded and requires every other former neighbor to appear in it.
    /// Exclusion in the walk replaces the sever-and-restore simulation: the
    /// structure is never modified, so no restore path can be missed.
    pub fn can_disconnect(&self, id: NodeId) -> bool {
        if self.is_covered(id) {
            return false;
        }
        let anchors = self.nodes[id.0].neighbors.available();
        if anchors.len() <= 1 {
            // A leaf or an isolated node can never split the structure.
            return true;
        }
        trace!(?id, neighbors = anchors.len(), "checking one-hive rule");
        let component = self.component_excluding(anchors[0].1, id);
        anchors[1..].iter().all(|(_, n)| component.contains(n))
    }

    // ========================================================================
    // RESOLUTION & MOVEMENT
    // ========================================================================

    /// Map a route from `origin` to the concrete anchor-plus-direction the
    /// target cell attaches at. `None` when the route goes nowhere (empty
    /// translation) or no placed node is adjacent to the target cell.
    pub fn resolve(&self, origin: NodeId, route: &Route) -> Option<Destination> {
        self.resolve_anchored(origin, route, true)
    }

    fn resolve_anchored(
        &self,
        origin: NodeId,
        route: &Route,
        origin_may_anchor: bool,
    ) -> Option<Destination> {
        let target = route.translation();
        if target == Delta::ZERO {
            return None;
        }
        if origin_may_anchor {
            if let Some(dir) = Direction::from_delta(target) {
                return Some(Position::new(origin, dir));
            }
        }
        for path in self.derive_paths(origin) {
            let offset = path.route.translation();
            if let Some(dir) = Direction::from_delta(target - offset) {
                return Some(Position::new(path.node, dir));
            }
        }
        None
    }

    /// Attach `id` at `dest`, then bind every secondary adjacency: a hex
    /// cell touches up to six others plus a level above and below, and only
    /// one of those contacts is the entry edge.
    pub fn place(&mut self, id: NodeId, dest: Destination) {
        self.connect(id, dest);
        self.bind_secondary(id);
        debug!(?id, anchor = ?dest.node, dir = ?dest.dir, "placed node");
    }

    fn bind_secondary(&mut self, id: NodeId) {
        for path in self.derive_paths(id) {
            let offset = path.route.translation();
            if let Some(dir) = Direction::from_delta(offset) {
                if self.nodes[id.0].neighbors.get(dir).is_none() {
                    self.connect(id, Position::new(path.node, dir.opposite()));
                }
            }
        }
    }

    /// The compound relocation primitive: sever everything, reattach at
    /// `dest`, rebind all adjacencies. Atomic from the caller's view; the
    /// transiently split state is never observable because the engine is
    /// single-threaded by contract.
    pub fn move_to(&mut self, id: NodeId, dest: Destination) {
        debug!(?id, anchor = ?dest.node, dir = ?dest.dir, "moving node");
        self.disconnect(id);
        self.place(id, dest);
    }

    /// Resolve `route` from `id`'s current position and relocate there.
    /// The vacated cell cannot anchor the resolution, so a legal move
    /// always resolves through some other piece.
    pub fn move_by(&mut self, id: NodeId, route: &Route) {
        let dest = self
            .resolve_anchored(id, route, false)
            .expect("route does not resolve to an attachable destination");
        self.move_to(id, dest);
    }
}
