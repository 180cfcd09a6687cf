use crate::errors::PathPlannerError;
use crate::graph::{Graph, Point};
use super::GraphNodeMap;

use std::{collections::BinaryHeap, cmp::Ordering};
use indexmap::map::Entry::{Occupied, Vacant};
use log::debug;


/// Every point reachable from `start` with its shortest walking distance
/// Dijkstra's Algorithm: https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Points come back in the order they were settled, so distances never decrease.
pub fn reachable_from<'g>(graph: &'g Graph, start: &Point) -> Result<Vec<(&'g Point, f64)>, PathPlannerError> {
    let start_index = graph.require(start)?;

    let settled = build_dijkstra_graph(graph, start_index);
    debug!("{} points reachable from {}", settled.len(), start);

    Ok(settled
        .into_iter()
        .filter_map(|(index, cost)| graph.point(index).map(|point| (point, cost)))
        .collect())
}


/// Traverses the whole component of the start node
/// Returns (graph index, cost) pairs in settle order
fn build_dijkstra_graph(graph: &Graph, start_index: usize) -> Vec<(usize, f64)> {

    // Nodes to visit - binary heap sorts Biggest to Smallest
    // NodeId reverses the ordering so the least costly node is popped first
    let mut nodes_to_visit: BinaryHeap<NodeId> = BinaryHeap::new();

    // (parent_slot, cost) per discovered node
    let mut nodes_map = GraphNodeMap::default();
    let mut settled = Vec::new();

    // Add start node to the map and queue
    let start_slot = nodes_map.insert_full(start_index, (usize::MAX, 0.0)).0;
    nodes_to_visit.push(NodeId {
        slot: start_slot,
        cost: 0.0, // This is the cost from the start node
    });

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId { slot, cost }) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((&index, &(_, c))) = nodes_map.get_index(slot) else {
            continue;
        };

        // If cost of new node from BinaryHeap is higher than the best cost, skip it
        // This implies we've already found a better path to this node
        if cost > c {
            continue;
        }
        settled.push((index, c));

        // loop over neighbors
        for neighbor in graph.neighbors(index) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = neighbor.distance + c;

            let neighbor_slot = match nodes_map.entry(neighbor.index) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    let neighbor_slot = e.index();
                    e.insert((slot, new_cost));
                    neighbor_slot
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        // We've found a better path to this neighbor
                        e.insert((slot, new_cost));
                        e.index()
                    } else {
                        // The existing path is better, do nothing
                        continue;
                    }
                }
            };

            // Only add to the queue if we've found a better path
            nodes_to_visit.push(NodeId {
                slot: neighbor_slot,
                cost: new_cost,
            });
        }
    }

    settled
}


/// Node identifier 
/// - for ordering we only need cost and a way to identify the node
#[derive(Debug)]
struct NodeId {
    slot: usize,
    cost: f64,
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}
impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for NodeId {}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GraphError;
    use std::collections::HashMap;

    // Diamond-shaped graph: A - B - D and A - C - D, plus an isolated E
    fn create_test_graph() -> Graph {
        let mut graph = Graph::new();
        for (name, lat, lon) in [("A", 0.0, 0.0), ("B", 0.0, 1.0), ("C", 1.0, 0.0), ("D", 1.0, 1.0), ("E", 5.0, 5.0)] {
            graph.add_node(Point::new(name, lat, lon));
        }
        graph.add_edge_by_name("A", "B", 1.0).unwrap();
        graph.add_edge_by_name("A", "C", 3.0).unwrap();
        graph.add_edge_by_name("B", "D", 5.0).unwrap();
        graph.add_edge_by_name("C", "D", 1.0).unwrap();
        graph
    }

    fn costs(graph: &Graph, start: &str) -> HashMap<String, f64> {
        let start = graph.find_by_name(start).unwrap();
        reachable_from(graph, start)
            .unwrap()
            .into_iter()
            .map(|(point, cost)| (point.name().to_string(), cost))
            .collect()
    }

    #[test]
    fn test_reachable_costs() {
        let graph = create_test_graph();
        let costs = costs(&graph, "A");

        assert_eq!(costs.get("A"), Some(&0.0));
        assert_eq!(costs.get("B"), Some(&1.0));
        assert_eq!(costs.get("C"), Some(&3.0));
        assert_eq!(costs.get("D"), Some(&4.0)); // Should be 4 via the A-C-D path
        assert_eq!(costs.get("E"), None);
    }

    #[test]
    fn test_reachable_from_is_symmetric() {
        let graph = create_test_graph();
        assert_eq!(costs(&graph, "D").get("A"), Some(&4.0));
        assert_eq!(costs(&graph, "E").len(), 1);
    }

    #[test]
    fn test_settle_order_non_decreasing() {
        let graph = create_test_graph();
        let start = graph.find_by_name("A").unwrap();
        let settled = reachable_from(&graph, start).unwrap();

        assert_eq!(settled.first().map(|(p, c)| (p.name(), *c)), Some(("A", 0.0)));
        assert!(settled.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(settled.len(), 4);
    }

    #[test]
    fn test_unknown_start() {
        let graph = create_test_graph();
        let result = reachable_from(&graph, &Point::new("Z", 9.0, 9.0));
        assert!(matches!(result, Err(PathPlannerError::Graph(GraphError::UnknownNode(_)))));
    }
}
