use crate::errors::PathPlannerError;
use crate::geometry::{Coordinate, campus_distance};
use crate::graph::{Graph, Point};
use crate::collections::FxHashSet;
use super::{shortest_path, GraphNodeMap, Route};

use std::{
    collections::BinaryHeap,
    cmp::Ordering
};
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace};


/// Estimate of the remaining walking distance between two coordinates
/// Must never overestimate the true remaining distance for the search to stay optimal.
pub trait Heuristic {
    fn estimate(&self, from: &Coordinate, to: &Coordinate) -> f64;
}

/// Flat-earth campus distance, see `geometry::campus_distance`
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatEarth;

impl Heuristic for FlatEarth {
    fn estimate(&self, from: &Coordinate, to: &Coordinate) -> f64 {
        campus_distance(from, to)
    }
}

/// Zero estimate, turns the search into Dijkstra
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHeuristic;

impl Heuristic for NoHeuristic {
    fn estimate(&self, _from: &Coordinate, _to: &Coordinate) -> f64 {
        0.0
    }
}


/// Node on A* frontier
#[derive(Debug)]
struct Node {
    slot: usize, // slot in the node map - maps to the graph index of the node
    cost: f64, // Cost to reach this node
    f_cost: f64, // Total cost = cost + h(n) aka estimated cost
    sequence: usize, // discovery order, earlier wins ties
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_cost.total_cmp(&self.f_cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Node {}


/// A* search over a campus `Graph`
/// https://en.wikipedia.org/wiki/A*_search_algorithm
///
/// Holds no state between searches, one finder can serve any number of concurrent
/// searches against a graph that is no longer being mutated.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathFinder<H = FlatEarth> {
    heuristic: H,
}

impl PathFinder<FlatEarth> {

    /// Finder with the flat-earth estimate
    /// Points spaced whole degrees apart with short connections make the estimate overshoot,
    /// use `with_heuristic(NoHeuristic)` for such graphs.
    pub fn new() -> Self {
        Self { heuristic: FlatEarth }
    }
}

impl<H: Heuristic> PathFinder<H> {

    pub fn with_heuristic(heuristic: H) -> Self {
        Self { heuristic }
    }

    /// Lowest-cost path from `start` to `goal` and its total distance
    /// Both points must be in the graph. `start == goal` yields `[start]` with distance 0.
    pub fn search(&self, graph: &Graph, start: &Point, goal: &Point) -> Result<Route, PathPlannerError> {
        let start_index = graph.require(start)?;
        let goal_index = graph.require(goal)?;

        let (node_map, goal_slot) = self.build_graph(graph, start_index, goal_index);

        let no_path = || PathPlannerError::NoPathFound {
            start: start.name().to_string(),
            goal: goal.name().to_string(),
        };

        let goal_slot = goal_slot.ok_or_else(no_path)?;
        let distance = node_map.get_index(goal_slot).map(|(_, &(_, cost))| cost).ok_or_else(no_path)?;
        let indices = shortest_path(&node_map, goal_slot).ok_or_else(no_path)?;

        let path = indices
            .into_iter()
            .filter_map(|index| graph.point(index).cloned())
            .collect::<Vec<_>>();

        debug!("Route {} -> {}: {} points, distance {distance}", start, goal, path.len());
        Ok(Route { path, distance })
    }


    /// Expands the frontier until the goal is selected
    /// Returns the node map built so far along with the slot of the goal node
    fn build_graph(&self, graph: &Graph, start_index: usize, goal_index: usize) -> (GraphNodeMap, Option<usize>) {
        let Some(goal) = graph.point(goal_index).map(|p| *p.coordinate()) else {
            return (GraphNodeMap::default(), None);
        };
        let heuristic_fn = |index: usize| {
            graph.point(index).map_or(0.0, |p| self.heuristic.estimate(p.coordinate(), &goal))
        };

        // Open List
        // Nodes that need to be evaluated, implemented as priority queue
        // Sorting is done by f_cost (cost + heuristic), then discovery order
        let mut open_list: BinaryHeap<Node> = BinaryHeap::new();

        // Best known cost and parent for every discovered node
        // for the start node, parent_slot is set to usize::MAX to indicate it has no parent
        let mut node_map = GraphNodeMap::default();

        // Expanded nodes, never reconsidered
        let mut closed_list: FxHashSet<usize> = FxHashSet::default();

        let mut sequence = 0;
        let start_slot = node_map.insert_full(start_index, (usize::MAX, 0.0)).0;
        open_list.push(Node {
            slot: start_slot,
            cost: 0.0,
            f_cost: heuristic_fn(start_index),
            sequence,
        });

        while let Some(Node { slot, cost, .. }) = open_list.pop() {

            // fetch current best cost for node
            let Some((&index, &(_, g))) = node_map.get_index(slot) else {
                continue;
            };

            // Stale queue entry, a cheaper path to this node was found after it was pushed
            if cost > g || closed_list.contains(&index) {
                continue;
            }

            if index == goal_index {
                return (node_map, Some(slot));
            }

            closed_list.insert(index);
            trace!("Expanding node {index} at cost {g}");

            for neighbor in graph.neighbors(index) {
                if closed_list.contains(&neighbor.index) {
                    continue;
                }

                // tentative cost to reach the neighbor through this node
                let new_cost = g + neighbor.distance;

                let neighbor_slot = match node_map.entry(neighbor.index) {
                    Vacant(e) => {
                        let neighbor_slot = e.index();
                        e.insert((slot, new_cost));
                        neighbor_slot
                    }
                    Occupied(mut e) => {
                        if new_cost < e.get().1 {
                            // We've found a better path to this neighbor
                            e.insert((slot, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };

                sequence += 1;
                open_list.push(Node {
                    slot: neighbor_slot,
                    cost: new_cost,
                    f_cost: new_cost + heuristic_fn(neighbor.index),
                    sequence,
                });
            }
        }
        (node_map, None)
    }
}
