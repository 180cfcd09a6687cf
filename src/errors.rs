use thiserror::Error;


#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown node '{0}': it was never added to the graph")]
    UnknownNode(String),
    #[error("no node named '{0}'")]
    NotFound(String),
    #[error("invalid distance {distance} between '{from}' and '{to}'")]
    InvalidDistance { from: String, to: String, distance: f64 },
    #[error("self-loop on '{0}' is not a walkable connection")]
    SelfLoop(String),
    #[error("point '{0}' has a non-finite coordinate")]
    InvalidCoordinate(String),
    #[error("kd-tree error: {0}")]
    KdTreeError(String),
}

#[derive(Debug, Error)]
pub enum PathPlannerError {
    #[error("no path from '{start}' to '{goal}'")]
    NoPathFound { start: String, goal: String }, // Frontier exhausted before reaching the goal
    #[error(transparent)]
    Graph(#[from] GraphError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid campus data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}


impl From<kdtree::ErrorKind> for GraphError {
    fn from(error: kdtree::ErrorKind) -> Self {
        GraphError::KdTreeError(error.to_string())
    }
}
