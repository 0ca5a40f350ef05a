//! Per-piece legal move generation
//!
//! All generators work over a [`Footprint`]: the occupancy of the structure
//! relative to the moving piece, with the mover itself lifted out. Slides,
//! perimeter walks and jumps are pure geometry on that footprint; the
//! resulting routes are resolved back onto the graph only when a move is
//! applied.

use crate::direction::{Delta, Direction};
use crate::hive::{Hive, NodeId};
use crate::pieces::PieceKind;
use crate::route::Route;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// A planar column address relative to the mover.
type Cell = (i32, i32);

const ORIGIN: Cell = (0, 0);

fn step(cell: Cell, dir: Direction) -> Cell {
    let d = dir.delta();
    (cell.0 + d.x, cell.1 + d.y)
}

/// Column occupancy around a mover, the mover excluded. Values are the
/// highest occupied level per column, relative to the mover's own level.
struct Footprint {
    columns: FxHashMap<Cell, i32>,
}

impl Footprint {
    fn around(hive: &Hive, mover: NodeId) -> Footprint {
        let mut columns = FxHashMap::default();
        for path in hive.derive_paths(mover) {
            let offset = path.route.translation();
            let top = columns.entry((offset.x, offset.y)).or_insert(offset.z);
            if offset.z > *top {
                *top = offset.z;
            }
        }
        Footprint { columns }
    }

    fn occupied(&self, cell: Cell) -> bool {
        self.columns.contains_key(&cell)
    }

    fn top(&self, cell: Cell) -> Option<i32> {
        self.columns.get(&cell).copied()
    }
}

// ============================================================================
// SHARED PRIMITIVES
// ============================================================================

/// One-step slides available from `cell`: for each reachable ring direction
/// the pair `[gate, far-gate]` whose deltas sum to the destination's.
///
/// A slide pivots around exactly one occupied gate: both gates occupied is
/// physically blocked, both empty would break contact with the structure
/// mid-step.
fn slide_steps(fp: &Footprint, cell: Cell) -> Vec<(Direction, [Direction; 2])> {
    let mut out = Vec::new();
    for dir in Direction::PLANAR {
        if fp.occupied(step(cell, dir)) {
            continue;
        }
        let left = dir.rotated(-1);
        let right = dir.rotated(1);
        match (fp.occupied(step(cell, left)), fp.occupied(step(cell, right))) {
            (true, false) => out.push((dir, [left, right])),
            (false, true) => out.push((dir, [right, left])),
            _ => {}
        }
    }
    out
}

fn slide_route(pair: [Direction; 2]) -> Route {
    Route::from_steps(vec![pair[0], pair[1]])
}

// ============================================================================
// GENERATORS
// ============================================================================

impl Hive {
    /// Every legal destination route for the piece, one entry per distinct
    /// walk. Different walks may reach the same cell; see
    /// [`Hive::unique_available_moves`].
    pub fn available_moves(&self, id: NodeId) -> Vec<Route> {
        if self.is_covered(id) {
            return Vec::new();
        }
        match self.node(id).kind {
            PieceKind::QueenBee => self.queen_moves(id),
            PieceKind::Beetle => self.beetle_moves(id),
            PieceKind::Grasshopper => self.grasshopper_moves(id),
            PieceKind::Spider => self.spider_moves(id),
            PieceKind::SoldierAnt => self.ant_moves(id),
            PieceKind::Placeholder => Vec::new(),
        }
    }

    /// [`Hive::available_moves`] deduplicated by cumulative translation,
    /// keeping the first representative per physical destination.
    pub fn unique_available_moves(&self, id: NodeId) -> Vec<Route> {
        let mut seen: FxHashSet<Delta> = FxHashSet::default();
        self.available_moves(id)
            .into_iter()
            .filter(|route| seen.insert(route.translation()))
            .collect()
    }

    /// A piece may move only if lifting it keeps the structure whole and it
    /// has somewhere to go.
    pub fn can_move(&self, id: NodeId) -> bool {
        self.can_disconnect(id) && !self.available_moves(id).is_empty()
    }

    fn queen_moves(&self, id: NodeId) -> Vec<Route> {
        let fp = Footprint::around(self, id);
        slide_steps(&fp, ORIGIN)
            .into_iter()
            .map(|(_, pair)| slide_route(pair))
            .collect()
    }

    fn grasshopper_moves(&self, id: NodeId) -> Vec<Route> {
        let fp = Footprint::around(self, id);
        let mut out = Vec::new();
        for dir in Direction::PLANAR {
            if !fp.occupied(step(ORIGIN, dir)) {
                continue;
            }
            // Jump the whole occupied line, landing on the first empty cell.
            let mut cell = step(ORIGIN, dir);
            let mut hops = 1;
            while fp.occupied(cell) {
                cell = step(cell, dir);
                hops += 1;
            }
            out.push(Route::from_steps(vec![dir; hops]));
        }
        out
    }

    fn spider_moves(&self, id: NodeId) -> Vec<Route> {
        let fp = Footprint::around(self, id);
        let mut out = Vec::new();
        let mut visited = vec![ORIGIN];
        spider_walk(&fp, ORIGIN, Route::new(), &mut visited, 3, &mut out);
        out
    }

    fn ant_moves(&self, id: NodeId) -> Vec<Route> {
        let fp = Footprint::around(self, id);
        let mut visited = FxHashSet::default();
        visited.insert(ORIGIN);
        let mut queue = VecDeque::new();
        queue.push_back((ORIGIN, Route::new()));
        let mut out = Vec::new();
        while let Some((cell, route)) = queue.pop_front() {
            for (dir, pair) in slide_steps(&fp, cell) {
                let next = step(cell, dir);
                if !visited.insert(next) {
                    continue;
                }
                let mut extended = route.clone();
                extended.append(&slide_route(pair));
                out.push(extended.clone());
                queue.push_back((next, extended));
            }
        }
        out
    }

    fn beetle_moves(&self, id: NodeId) -> Vec<Route> {
        let fp = Footprint::around(self, id);
        let elevation = self.elevation(id);
        let mut out = Vec::new();
        if elevation == 0 {
            for (_, pair) in slide_steps(&fp, ORIGIN) {
                out.push(slide_route(pair));
            }
            // Climb onto any adjacent occupied column.
            for dir in Direction::PLANAR {
                if let Some(top) = fp.top(step(ORIGIN, dir)) {
                    let mut steps = vec![dir];
                    steps.extend(std::iter::repeat(Direction::Above).take((top + 1) as usize));
                    out.push(Route::from_steps(steps));
                }
            }
        } else {
            // On top of the structure every adjacent column is reachable:
            // across to its top, or down to the ground when it is empty.
            for dir in Direction::PLANAR {
                let level = fp
                    .top(step(ORIGIN, dir))
                    .map(|top| top + 1)
                    .unwrap_or(-elevation);
                let mut steps = vec![dir];
                if level >= 0 {
                    steps.extend(std::iter::repeat(Direction::Above).take(level as usize));
                } else {
                    steps.extend(std::iter::repeat(Direction::Below).take((-level) as usize));
                }
                out.push(Route::from_steps(steps));
            }
        }
        out
    }
}

fn spider_walk(
    fp: &Footprint,
    cell: Cell,
    route: Route,
    visited: &mut Vec<Cell>,
    remaining: u8,
    out: &mut Vec<Route>,
) {
    if remaining == 0 {
        out.push(route);
        return;
    }
    for (dir, pair) in slide_steps(fp, cell) {
        let next = step(cell, dir);
        if visited.contains(&next) {
            continue;
        }
        let mut extended = route.clone();
        extended.append(&slide_route(pair));
        visited.push(next);
        spider_walk(fp, next, extended, visited, remaining - 1, out);
        visited.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Color;
    use crate::route::Position;
    use Direction::*;

    fn place_new(hive: &mut Hive, kind: PieceKind, anchor: NodeId, dir: Direction) -> NodeId {
        let id = hive.spawn(kind, Color::White);
        hive.place(id, Position::new(anchor, dir));
        id
    }

    fn translations(routes: &[Route]) -> Vec<Delta> {
        let mut out: Vec<Delta> = routes.iter().map(|r| r.translation()).collect();
        out.sort();
        out
    }

    #[test]
    fn test_lone_queen_cannot_move() {
        let mut hive = Hive::new();
        let queen = hive.spawn(PieceKind::QueenBee, Color::Black);
        assert!(hive.available_moves(queen).is_empty());
        assert!(!hive.can_move(queen));
    }

    #[test]
    fn test_queen_slides_flank_the_contact_edge() {
        let mut hive = Hive::new();
        let black = hive.spawn(PieceKind::QueenBee, Color::Black);
        let white = place_new(&mut hive, PieceKind::QueenBee, black, UpRight);
        let moves = hive.available_moves(black);
        assert_eq!(
            translations(&moves),
            vec![Delta::new(0, 1, 0), Delta::new(1, -1, 0)]
        );
        // Removing a leaf of a two-node structure never splits it.
        assert!(hive.can_disconnect(white));
        assert!(hive.can_move(black));
    }

    #[test]
    fn test_queen_blocked_by_full_gates() {
        // Pieces on both gates of the only empty flank block the slide.
        let mut hive = Hive::new();
        let queen = hive.spawn(PieceKind::QueenBee, Color::Black);
        for dir in [UpRight, Down, DownLeft, UpLeft] {
            place_new(&mut hive, PieceKind::QueenBee, queen, dir);
        }
        // Up and DownRight stay empty; both have their two gates occupied.
        let moves = hive.available_moves(queen);
        assert!(moves.is_empty(), "queen squeezed between full gates");
    }

    #[test]
    fn test_grasshopper_jumps_to_first_empty_cell() {
        let mut hive = Hive::new();
        let hopper = hive.spawn(PieceKind::Grasshopper, Color::Black);
        let first = place_new(&mut hive, PieceKind::QueenBee, hopper, UpRight);
        place_new(&mut hive, PieceKind::QueenBee, first, UpRight);
        let moves = hive.available_moves(hopper);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].translation(), Delta::new(3, 0, 0));
        assert_eq!(moves[0].steps(), &[UpRight, UpRight, UpRight]);
    }

    #[test]
    fn test_grasshopper_needs_adjacent_piece_per_line() {
        let mut hive = Hive::new();
        let hopper = hive.spawn(PieceKind::Grasshopper, Color::Black);
        place_new(&mut hive, PieceKind::QueenBee, hopper, Down);
        let moves = hive.available_moves(hopper);
        // Only the Down line is occupied, so only one jump exists.
        assert_eq!(translations(&moves), vec![Delta::new(0, -2, 0)]);
    }

    #[test]
    fn test_spider_ring_with_one_gap() {
        // Hub surrounded except at UpLeft; the spider sits on the ring.
        let mut hive = Hive::new();
        let hub = hive.spawn(PieceKind::QueenBee, Color::Black);
        let spider = place_new(&mut hive, PieceKind::Spider, hub, Up);
        for dir in [UpRight, DownRight, Down, DownLeft] {
            place_new(&mut hive, PieceKind::QueenBee, hub, dir);
        }
        let moves = hive.unique_available_moves(spider);
        // Exactly three slide-steps along either side of the blob.
        assert_eq!(
            translations(&moves),
            vec![Delta::new(-2, -1, 0), Delta::new(2, -2, 0)]
        );
        // Cells one or two steps out are never final destinations.
        for route in &moves {
            assert_eq!(route.len(), 6);
        }
    }

    #[test]
    fn test_ant_walks_the_whole_perimeter() {
        // Chain ant - q1 - q2: the ant reaches all seven cells hugging the
        // two queens.
        let mut hive = Hive::new();
        let ant = hive.spawn(PieceKind::SoldierAnt, Color::Black);
        let q1 = place_new(&mut hive, PieceKind::QueenBee, ant, UpRight);
        place_new(&mut hive, PieceKind::QueenBee, q1, UpRight);
        let moves = hive.unique_available_moves(ant);
        assert_eq!(moves.len(), 7);
        let got = translations(&moves);
        let expected = vec![
            Delta::new(0, 1, 0),
            Delta::new(1, -1, 0),
            Delta::new(1, 1, 0),
            Delta::new(2, -1, 0),
            Delta::new(2, 1, 0),
            Delta::new(3, -1, 0),
            Delta::new(3, 0, 0),
        ];
        assert_eq!(got, expected);
        // The origin is never a destination.
        assert!(!got.contains(&Delta::ZERO));
    }

    #[test]
    fn test_beetle_slides_and_climbs() {
        let mut hive = Hive::new();
        let beetle = hive.spawn(PieceKind::Beetle, Color::Black);
        place_new(&mut hive, PieceKind::QueenBee, beetle, UpRight);
        let moves = hive.unique_available_moves(beetle);
        assert_eq!(
            translations(&moves),
            vec![
                Delta::new(0, 1, 0),
                Delta::new(1, -1, 0),
                Delta::new(1, 0, 1),
            ]
        );
    }

    #[test]
    fn test_raised_beetle_walks_across_and_dismounts() {
        let mut hive = Hive::new();
        let bottom = hive.spawn(PieceKind::QueenBee, Color::Black);
        let side = place_new(&mut hive, PieceKind::QueenBee, bottom, UpRight);
        let beetle = place_new(&mut hive, PieceKind::Beetle, bottom, Above);
        assert_eq!(hive.elevation(beetle), 1);
        let moves = hive.unique_available_moves(beetle);
        assert_eq!(moves.len(), 6);
        let got = translations(&moves);
        // Across onto the adjacent piece, staying at its level...
        assert!(got.contains(&Delta::new(1, 0, 0)));
        // ...and down to the ground everywhere else.
        assert!(got.contains(&Delta::new(0, 1, -1)));
        assert!(got.contains(&Delta::new(-1, 0, -1)));
        // Dismount next to the side piece and verify the graph afterwards.
        let dismount = moves
            .iter()
            .find(|r| r.translation() == Delta::new(1, -1, -1))
            .unwrap();
        hive.move_by(beetle, dismount);
        assert_eq!(hive.elevation(beetle), 0);
        assert!(!hive.is_covered(bottom));
        assert_eq!(hive.has_neighbor(beetle, side), Some(Up));
        assert_eq!(hive.has_neighbor(beetle, bottom), Some(UpLeft));
    }

    #[test]
    fn test_covered_piece_has_no_moves() {
        let mut hive = Hive::new();
        let bottom = hive.spawn(PieceKind::QueenBee, Color::Black);
        place_new(&mut hive, PieceKind::QueenBee, bottom, UpRight);
        let beetle = place_new(&mut hive, PieceKind::Beetle, bottom, Above);
        assert!(hive.available_moves(bottom).is_empty());
        assert!(!hive.can_move(bottom));
        assert!(hive.can_move(beetle));
    }

    #[test]
    fn test_placeholder_generates_nothing() {
        let mut hive = Hive::new();
        let root = hive.spawn(PieceKind::QueenBee, Color::Black);
        let marker = place_new(&mut hive, PieceKind::Placeholder, root, Up);
        assert!(hive.available_moves(marker).is_empty());
    }

    #[test]
    fn test_can_move_respects_one_hive_rule() {
        // ant - q1 - q2 chain: the middle piece has slide options but would
        // split the structure.
        let mut hive = Hive::new();
        let ant = hive.spawn(PieceKind::SoldierAnt, Color::Black);
        let q1 = place_new(&mut hive, PieceKind::SoldierAnt, ant, UpRight);
        place_new(&mut hive, PieceKind::SoldierAnt, q1, UpRight);
        assert!(!hive.available_moves(q1).is_empty());
        assert!(!hive.can_move(q1));
        assert!(hive.can_move(ant));
    }
}
