//! Shortest walking routes between named points on a campus map
//!
//! A [`Graph`] of named [`Point`]s is loaded once, then queried through a
//! [`PathFinder`] (A* with a flat-earth distance estimate) or the [`Navigator`] facade.

pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod loading;
pub mod navigator;

mod collections;

pub use errors::{GraphError, LoadError, PathPlannerError};
pub use geometry::{Coordinate, campus_distance};
pub use graph::{Graph, Neighbor, Point, SpatialIndex};
pub use graph_algos::Route;
pub use graph_algos::a_star::{FlatEarth, Heuristic, NoHeuristic, PathFinder};
pub use graph_algos::dijkstra::reachable_from;
pub use loading::{CampusData, NavigatorConfig, build_graph};
pub use navigator::{Navigator, NodesResponse, RouteResponse};
