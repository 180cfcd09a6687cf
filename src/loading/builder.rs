use log::{info, warn};

use super::records::CampusData;
use crate::errors::LoadError;
use crate::graph::{Graph, Point};


/// Builds the campus graph: every point is added before any connection
/// Connections are resolved by name, the first point carrying a name wins.
///
/// # Errors
///
/// In strict mode any connection naming an unknown point, or carrying a negative,
/// non-finite or self-loop distance, fails the load. Otherwise it is skipped with a warning.
/// A point with a non-finite coordinate fails the load in either mode.
pub fn build_graph(data: &CampusData, strict: bool) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();

    for record in &data.points {
        graph.add_node(Point::new(record.name.clone(), record.latitude, record.longitude));
    }
    graph.validate_coordinates()?;

    let mut skipped = 0;
    for connection in &data.connections {
        match graph.add_edge_by_name(&connection.from, &connection.to, connection.distance) {
            Ok(()) => {}
            Err(e) if !strict => {
                warn!("Skipping connection '{}' - '{}': {e}", connection.from, connection.to);
                skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        "Loaded campus graph with {} points and {} connections ({skipped} skipped)",
        graph.len(),
        graph.edge_count()
    );
    Ok(graph)
}
