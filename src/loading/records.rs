use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::errors::LoadError;


const BUNDLED_CAMPUS: &str = include_str!("campus.json");


/// Named point as stored on disk
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Walkable connection between two named points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// Raw campus map: points first, then the connections between them
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusData {
    pub points: Vec<PointRecord>,
    pub connections: Vec<ConnectionRecord>,
}

impl CampusData {

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Campus map shipped with the crate
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_json_str(BUNDLED_CAMPUS)
    }
}
