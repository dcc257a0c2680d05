//! Input model: positioned boxes and the connections between them.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::config::RoutingConfig;
use crate::layout::Rect;

#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    #[error("Invalid diagram JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),
    #[error("Invalid geometry for {0}: coordinates must be finite and sizes non-negative")]
    InvalidGeometry(String),
}

/// A fully positioned diagram, as produced by the layout collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub routing: RoutingConfig,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, alias = "edges")]
    pub connections: Vec<Connection>,
}

/// A geographic or organisational area grouping platforms.
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A platform box enclosing the systems that run on it.
#[derive(Debug, Clone, Deserialize)]
pub struct Platform {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Platform {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// An automated system drawn as a box.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub region: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub functions: Vec<String>,
}

impl Node {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Name shown in the box; falls back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}

/// A directed connection between two node ids.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Diagram {
    /// Parse and validate a diagram from JSON.
    pub fn from_json(input: &str) -> Result<Self, DiagramError> {
        let diagram: Diagram = serde_json::from_str(input)?;
        diagram.validate()?;
        Ok(diagram)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DiagramError> {
        let input = fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// Reject duplicate node ids and unusable geometry.
    ///
    /// Connections to unknown nodes are accepted here; routing drops them.
    pub fn validate(&self) -> Result<(), DiagramError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(DiagramError::DuplicateNode(node.id.clone()));
            }
            check_geometry(&node.id, node.bounds())?;
        }
        for region in &self.regions {
            check_geometry(&region.name, region.bounds())?;
        }
        for platform in &self.platforms {
            check_geometry(&platform.name, platform.bounds())?;
        }
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn check_geometry(name: &str, r: Rect) -> Result<(), DiagramError> {
    let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
    if !finite || r.width < 0.0 || r.height < 0.0 {
        return Err(DiagramError::InvalidGeometry(name.to_string()));
    }
    Ok(())
}
