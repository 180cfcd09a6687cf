//! Campus graph: named points joined by symmetric walking connections

mod spatial;

pub use spatial::SpatialIndex;

use std::fmt;
use std::hash::{Hash, Hasher};
use indexmap::map::Entry::{Occupied, Vacant};
use log::warn;
use serde::Serialize;

use crate::collections::{FxHashMap, FxIndexMap};
use crate::errors::GraphError;
use crate::geometry::Coordinate;


/// Named location on the map
/// Identity is the coordinate pair: two points at the same coordinate are the same point,
/// whatever their names.
#[derive(Clone, Debug, Serialize)]
pub struct Point {
    name: String,
    #[serde(flatten)]
    coordinate: Coordinate,
}

impl Point {

    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            coordinate: Coordinate::new(latitude, longitude),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn latitude(&self) -> f64 {
        self.coordinate.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinate.longitude
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coordinate == other.coordinate
    }
}
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coordinate.hash(state);
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}


/// Adjacency entry: index of the neighboring point and the walking distance to it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}


/// Undirected weighted graph of campus points
///
/// Points are kept in insertion order, so `all_nodes` and name lookups are deterministic.
/// Each point is addressed by its index in that order.
/// The graph is built once and then only read: searches take `&Graph`.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: FxIndexMap<Point, Vec<Neighbor>>,
    names: FxHashMap<String, usize>, // first point registered under each name
    edge_count: usize,
}

impl Graph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point with no neighbors and return its index
    /// A point co-located with an existing one is merged into it: nothing is inserted and the
    /// existing index is returned, so the later name does not resolve.
    /// Never fails. Searching a graph holding a non-finite coordinate is undefined, loaders
    /// reject such graphs through `validate_coordinates`.
    pub fn add_node(&mut self, point: Point) -> usize {
        let name = point.name.clone();

        match self.nodes.entry(point) {
            Occupied(e) => {
                if e.key().name != name {
                    warn!("'{name}' shares its coordinate with '{}' and is merged into it", e.key().name);
                }
                e.index()
            }
            Vacant(e) => {
                let index = e.index();
                e.insert(Vec::new());

                if self.names.contains_key(&name) {
                    warn!("Name '{name}' is already taken, lookups keep returning the first point");
                } else {
                    self.names.insert(name, index);
                }
                index
            }
        }
    }

    /// Connect two existing points in both directions
    /// Parallel connections are kept, self-loops and negative or non-finite distances are rejected.
    pub fn add_edge(&mut self, a: &Point, b: &Point, distance: f64) -> Result<(), GraphError> {
        let a_index = self.require(a)?;
        let b_index = self.require(b)?;
        self.connect(a_index, b_index, distance)
    }

    /// `add_edge` addressed by point names
    pub fn add_edge_by_name(&mut self, a: &str, b: &str, distance: f64) -> Result<(), GraphError> {
        let a_index = self.index_of_name(a).ok_or_else(|| GraphError::UnknownNode(a.to_string()))?;
        let b_index = self.index_of_name(b).ok_or_else(|| GraphError::UnknownNode(b.to_string()))?;
        self.connect(a_index, b_index, distance)
    }

    fn connect(&mut self, a_index: usize, b_index: usize, distance: f64) -> Result<(), GraphError> {
        if a_index == b_index {
            return Err(GraphError::SelfLoop(self.name_at(a_index)));
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(GraphError::InvalidDistance {
                from: self.name_at(a_index),
                to: self.name_at(b_index),
                distance,
            });
        }

        for (from, to) in [(a_index, b_index), (b_index, a_index)] {
            if let Some((_, neighbors)) = self.nodes.get_index_mut(from) {
                neighbors.push(Neighbor { index: to, distance });
            }
        }
        self.edge_count += 1;
        Ok(())
    }

    /// First point registered under `name`
    /// Backed by a name index, equivalent to scanning `all_nodes` in order.
    pub fn find_by_name(&self, name: &str) -> Result<&Point, GraphError> {
        self.index_of_name(name)
            .and_then(|index| self.point(index))
            .ok_or_else(|| GraphError::NotFound(name.to_string()))
    }

    /// All points in insertion order
    pub fn all_nodes(&self) -> impl ExactSizeIterator<Item = &Point> + '_ {
        self.nodes.keys()
    }

    pub fn index_of(&self, point: &Point) -> Option<usize> {
        self.nodes.get_index_of(point)
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.nodes.get_index(index).map(|(point, _)| point)
    }

    /// Neighbors of the point at `index`, empty for an unknown index
    pub fn neighbors(&self, index: usize) -> &[Neighbor] {
        self.nodes
            .get_index(index)
            .map(|(_, neighbors)| neighbors.as_slice())
            .unwrap_or(&[])
    }

    pub fn neighbors_of(&self, point: &Point) -> Result<&[Neighbor], GraphError> {
        let index = self.require(point)?;
        Ok(self.neighbors(index))
    }

    /// Shortest direct connection between two indices, if any
    pub fn edge_distance(&self, from: usize, to: usize) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .filter(|n| n.index == to)
            .map(|n| n.distance)
            .min_by(f64::total_cmp)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected connections
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// First point whose latitude or longitude is NaN or infinite
    pub fn validate_coordinates(&self) -> Result<(), GraphError> {
        match self.all_nodes().find(|p| !p.coordinate().is_finite()) {
            Some(point) => Err(GraphError::InvalidCoordinate(point.name.clone())),
            None => Ok(()),
        }
    }

    pub(crate) fn require(&self, point: &Point) -> Result<usize, GraphError> {
        self.index_of(point).ok_or_else(|| GraphError::UnknownNode(point.name.clone()))
    }

    fn name_at(&self, index: usize) -> String {
        self.point(index).map(|p| p.name.clone()).unwrap_or_default()
    }
}
