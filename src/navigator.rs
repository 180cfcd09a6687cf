//! Query facade over one loaded campus graph

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::{GraphError, LoadError, PathPlannerError};
use crate::geometry::Coordinate;
use crate::graph::{Graph, SpatialIndex};
use crate::graph_algos::{Route, a_star::PathFinder, dijkstra::reachable_from};
use crate::loading::{CampusData, NavigatorConfig, build_graph};


/// Names of every point, in load order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
}

/// Route as handed to a presentation layer: `{"path": [...], "distance": ...}`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub path: Vec<String>,
    pub distance: f64,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            path: route.names(),
            distance: route.distance,
        }
    }
}

/// Named point closest to a raw coordinate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearestPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: f64,
}

/// Distance from one point to another reachable point
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reachable {
    pub name: String,
    pub distance: f64,
}


/// Owns the campus graph for the life of the process
/// Built once, then only read, so a shared `&Navigator` serves concurrent requests.
pub struct Navigator {
    graph: Graph,
    spatial: SpatialIndex,
    finder: PathFinder,
}

impl Navigator {

    /// Load the campus named by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the data cannot be read or built
    pub fn new(config: &NavigatorConfig) -> Result<Self, LoadError> {
        config.validate()?;

        let data = match &config.data_path {
            Some(path) => {
                info!("Loading campus data from {}", path.display());
                CampusData::from_path(path)?
            }
            None => {
                info!("Loading bundled campus data");
                CampusData::bundled()?
            }
        };

        Self::from_graph(build_graph(&data, config.strict)?)
    }

    /// Wrap an already built graph
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if any point has a non-finite coordinate
    pub fn from_graph(graph: Graph) -> Result<Self, LoadError> {
        graph.validate_coordinates()?;
        let spatial = SpatialIndex::build(&graph)?;
        Ok(Self {
            graph,
            spatial,
            finder: PathFinder::new(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> NodesResponse {
        NodesResponse {
            nodes: self.graph.all_nodes().map(|p| p.name().to_string()).collect(),
        }
    }

    /// Shortest route between two named points
    pub fn navigate(&self, start: &str, goal: &str) -> Result<RouteResponse, PathPlannerError> {
        self.route(start, goal).map(RouteResponse::from)
    }

    /// Same as `navigate` but keeps the full points
    pub fn route(&self, start: &str, goal: &str) -> Result<Route, PathPlannerError> {
        let start = self.graph.find_by_name(start)?;
        let goal = self.graph.find_by_name(goal)?;
        self.finder.search(&self.graph, start, goal)
    }

    /// Every point reachable from `start`, closest first
    pub fn reachable(&self, start: &str) -> Result<Vec<Reachable>, PathPlannerError> {
        let start = self.graph.find_by_name(start)?;
        Ok(reachable_from(&self.graph, start)?
            .into_iter()
            .map(|(point, distance)| Reachable {
                name: point.name().to_string(),
                distance,
            })
            .collect())
    }

    /// Snap a raw coordinate to the closest named point
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Result<Option<NearestPoint>, GraphError> {
        let found = self.spatial.nearest(&self.graph, &Coordinate::new(latitude, longitude))?;
        Ok(found.map(|(point, distance)| NearestPoint {
            name: point.name().to_string(),
            latitude: point.latitude(),
            longitude: point.longitude(),
            distance,
        }))
    }
}
