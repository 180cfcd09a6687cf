pub mod dijkstra;
pub mod a_star;
mod shortest_path;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;
use crate::graph::Point;

/// Search bookkeeping keyed by graph index
/// The tuple contains (parent_slot, cost) where:
/// - parent_slot is the position of the parent entry in this map
/// - cost is the total distance to reach this node from the start
pub type GraphNodeMap = FxIndexMap<usize, (usize, f64)>;


/// Path returned by a search, ordered start to goal
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub path: Vec<Point>,
    pub distance: f64,
}

impl Route {

    /// Names along the path
    pub fn names(&self) -> Vec<String> {
        self.path.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn start(&self) -> Option<&Point> {
        self.path.first()
    }

    pub fn goal(&self) -> Option<&Point> {
        self.path.last()
    }
}
