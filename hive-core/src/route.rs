//! Routes, paths and attachment positions

use crate::direction::{Delta, Direction};
use crate::hive::NodeId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid direction index {0}")]
    InvalidIndex(u8),
}

/// An ordered direction sequence from an implicit origin.
///
/// Equality, ordering and hashing go by cumulative translation: two
/// sequences that reach the same physical offset compare equal no matter
/// which way they went.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Route {
    steps: Vec<Direction>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<Direction>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn push(&mut self, step: Direction) {
        self.steps.push(step);
    }

    /// Concatenate `other` onto the end of this route.
    pub fn append(&mut self, other: &Route) {
        self.steps.extend_from_slice(&other.steps);
    }

    /// Cumulative translation of the whole sequence.
    pub fn translation(&self) -> Delta {
        self.steps
            .iter()
            .fold(Delta::ZERO, |acc, step| acc + step.delta())
    }

    /// Flat integer form for external persistence.
    pub fn encode(&self) -> Vec<u8> {
        self.steps.iter().map(|step| step.index()).collect()
    }

    /// Inverse of [`Route::encode`].
    pub fn decode(encoded: &[u8]) -> Result<Route, RouteError> {
        encoded
            .iter()
            .map(|&index| Direction::from_index(index).ok_or(RouteError::InvalidIndex(index)))
            .collect::<Result<Vec<_>, _>>()
            .map(Route::from_steps)
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.translation() == other.translation()
    }
}

impl Eq for Route {}

impl PartialOrd for Route {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Route {
    fn cmp(&self, other: &Self) -> Ordering {
        self.translation().cmp(&other.translation())
    }
}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.translation().hash(state);
    }
}

/// A route paired with the node it resolves to.
#[derive(Clone, Debug)]
pub struct Path {
    pub route: Route,
    pub node: NodeId,
}

/// An empty slot adjacent to a placed node: the anchor and the direction
/// the slot lies in from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub node: NodeId,
    pub dir: Direction,
}

impl Position {
    pub fn new(node: NodeId, dir: Direction) -> Self {
        Self { node, dir }
    }
}

/// A resolved attachment target for a moving or newly placed piece. Same
/// shape as [`Position`]; the name carries the intent.
pub type Destination = Position;
