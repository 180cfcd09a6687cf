//! Loading campus points and connections into a `Graph`

mod builder;
mod config;
mod records;

pub use builder::build_graph;
pub use config::NavigatorConfig;
pub use records::{CampusData, ConnectionRecord, PointRecord};
