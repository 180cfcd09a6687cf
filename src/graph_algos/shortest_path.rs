use super::GraphNodeMap;

/// Construct the shortest path from the goal entry back to the start entry
/// Returns the ordered graph indices from start to goal
/// node_map: GraphNodeMap - map of graph indices with their parent slot and cost
/// goal_slot: usize - slot of the goal node in the node_map
/// The start entry has parent slot `usize::MAX`, so a goal equal to the start yields a single index.
pub(crate) fn shortest_path(node_map: &GraphNodeMap, goal_slot: usize) -> Option<Vec<usize>> {

    let mut path = Vec::new();
    let mut current_slot = goal_slot;

    // Trace back from goal to start
    while current_slot != usize::MAX {
        let (&index, &(parent_slot, _)) = node_map.get_index(current_slot)?;
        path.push(index);
        current_slot = parent_slot;

        // a parent chain longer than the map means the chain loops
        if path.len() > node_map.len() {
            return None;
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();

    if path.is_empty() {
        return None;
    }

    Some(path)
}
