//! Node input records.
//!
//! Nodes are supplied by the host as plain objects. Each node has:
//! - A stable unique identifier (survives graph mutations)
//! - An optional starting position (x, y, z)
//! - Optional size hints (`width`/`height` for layered layouts, `size` as metadata)
//! - An optional mass for force simulation

use serde::Deserialize;

use crate::geometry::Vec3;

/// Default node width used by the layered layout when none is given.
pub const DEFAULT_NODE_WIDTH: f32 = 100.0;

/// Default node height used by the layered layout when none is given.
pub const DEFAULT_NODE_HEIGHT: f32 = 50.0;

/// A node as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInput {
    /// Stable identifier.
    pub id: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub z: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    /// Visual size hint carried through untouched.
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub mass: Option<f32>,
}

impl NodeInput {
    /// Create a node with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder: starting position on the z = 0 plane.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Builder: starting position in 3D.
    pub fn at3(mut self, x: f32, y: f32, z: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.z = Some(z);
        self
    }

    /// Builder: width and height.
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Builder: simulation mass.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = Some(mass);
        self
    }

    /// The starting position, if the host supplied both x and y.
    ///
    /// A missing z is treated as 0.
    pub fn position(&self) -> Option<Vec3> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => {
                let p = Vec3::new(x, y, self.z.unwrap_or(0.0));
                p.is_finite().then_some(p)
            }
            _ => None,
        }
    }

    /// Mass, falling back to 1 for missing, non-positive or non-finite values.
    pub fn mass_or_default(&self) -> f32 {
        match self.mass {
            Some(m) if m.is_finite() && m > 0.0 => m,
            _ => 1.0,
        }
    }

    pub fn width_or_default(&self) -> f32 {
        positive_or(self.width, DEFAULT_NODE_WIDTH)
    }

    pub fn height_or_default(&self) -> f32 {
        positive_or(self.height, DEFAULT_NODE_HEIGHT)
    }
}

fn positive_or(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => default,
    }
}
