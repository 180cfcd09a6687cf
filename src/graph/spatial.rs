use kdtree::KdTree;
use kdtree::distance::squared_euclidean;

use super::{Graph, Point};
use crate::errors::GraphError;
use crate::geometry::{Coordinate, campus_distance};


/// Nearest-point lookup over the points of a `Graph`
/// Coordinates are projected to the plane around the mean latitude of the graph,
/// so distances agree with `campus_distance` at campus scale.
pub struct SpatialIndex {
    tree: KdTree<f64, usize, [f64; 2]>, // projected coordinate -> index in the graph
    reference_latitude: f64,
}

impl SpatialIndex {

    /// Index every point currently in the graph
    pub fn build(graph: &Graph) -> Result<Self, GraphError> {
        let reference_latitude = if graph.is_empty() {
            0.0
        } else {
            graph.all_nodes().map(Point::latitude).sum::<f64>() / graph.len() as f64
        };

        let mut tree = KdTree::new(2);
        for (index, point) in graph.all_nodes().enumerate() {
            tree.add(point.coordinate().project(reference_latitude), index)?;
        }

        Ok(Self { tree, reference_latitude })
    }

    /// Closest point to `coordinate` along with its `campus_distance`
    pub fn nearest<'g>(&self, graph: &'g Graph, coordinate: &Coordinate) -> Result<Option<(&'g Point, f64)>, GraphError> {
        let query = coordinate.project(self.reference_latitude);
        let closest = self.tree.nearest(&query, 1, &squared_euclidean)?;

        Ok(closest
            .first()
            .and_then(|&(_, &index)| graph.point(index))
            .map(|point| (point, campus_distance(coordinate, point.coordinate()))))
    }

    /// Points within `radius` of `coordinate`, closest first
    pub fn within<'g>(&self, graph: &'g Graph, coordinate: &Coordinate, radius: f64) -> Result<Vec<(&'g Point, f64)>, GraphError> {
        let query = coordinate.project(self.reference_latitude);
        let found = self.tree.within(&query, radius.powi(2), &squared_euclidean)?;

        let mut points: Vec<_> = found
            .into_iter()
            .filter_map(|(squared, &index)| graph.point(index).map(|point| (point, squared.sqrt())))
            .collect();
        points.sort_by(|a, b| a.1.total_cmp(&b.1));
        Ok(points)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Point::new("Fondren Library", 29.7184889244895, -95.40003002999113));
        graph.add_node(Point::new("Baker College", 29.71733243453455, -95.39902187616832));
        graph.add_node(Point::new("Will Rice College", 29.716466139816475, -95.39871387154595));
        graph.add_node(Point::new("Lovett College", 29.716736984405465, -95.39799155165602));
        graph
    }

    #[test]
    fn test_nearest_exact_point() {
        let graph = quad();
        let index = SpatialIndex::build(&graph).unwrap();
        assert_eq!(index.len(), 4);

        let (point, distance) = index
            .nearest(&graph, &Coordinate::new(29.71733243453455, -95.39902187616832))
            .unwrap()
            .unwrap();
        assert_eq!(point.name(), "Baker College");
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_nearest_offset_point() {
        let graph = quad();
        let index = SpatialIndex::build(&graph).unwrap();

        // a few meters north-west of the library
        let (point, distance) = index
            .nearest(&graph, &Coordinate::new(29.71850, -95.40010))
            .unwrap()
            .unwrap();
        assert_eq!(point.name(), "Fondren Library");
        assert!(distance > 0.0 && distance < 50.0);
    }

    #[test]
    fn test_within_radius_sorted() {
        let graph = quad();
        let index = SpatialIndex::build(&graph).unwrap();
        let baker = *graph.find_by_name("Baker College").unwrap().coordinate();

        let found = index.within(&graph, &baker, 400.0).unwrap();
        let names: Vec<_> = found.iter().map(|(p, _)| p.name()).collect();
        assert_eq!(names.first(), Some(&"Baker College"));
        assert!(names.contains(&"Will Rice College"));
        assert!(found.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new();
        let index = SpatialIndex::build(&graph).unwrap();
        assert!(index.is_empty());
        assert!(index.nearest(&graph, &Coordinate::new(0.0, 0.0)).unwrap().is_none());
    }

    #[test]
    fn test_non_finite_query() {
        let graph = quad();
        let index = SpatialIndex::build(&graph).unwrap();
        let result = index.nearest(&graph, &Coordinate::new(f64::NAN, 0.0));
        assert!(matches!(result, Err(GraphError::KdTreeError(_))));
    }
}
