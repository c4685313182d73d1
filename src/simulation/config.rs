//! Force simulation configuration.
//!
//! Every option has a documented default, so hosts pass only what they want
//! to change. Out-of-range values are clamped by [`ForceConfig::sanitized`]
//! rather than rejected.

use log::warn;
use serde::Deserialize;

/// Node count above which Barnes-Hut replaces direct pairwise repulsion.
pub const DEFAULT_BARNES_HUT_THRESHOLD: usize = 50;

/// Largest integration step accepted, in seconds.
pub const MAX_TIME_STEP: f32 = 0.05;

/// Default integration step (one 60 Hz frame).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Spatial dimensionality of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Dimensions {
    /// Planar layout; z stays at zero and the Barnes-Hut tree is a quadtree.
    #[serde(rename = "2d", alias = "2D")]
    Two,
    /// Volumetric layout for the VR/AR view.
    #[default]
    #[serde(rename = "3d", alias = "3D")]
    Three,
}

impl Dimensions {
    pub fn is_planar(self) -> bool {
        self == Dimensions::Two
    }
}

/// Configuration for the force-directed simulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceConfig {
    /// Inverse-square repulsion constant between every pair of nodes.
    pub repulsion_strength: f32,
    /// Spring constant for edges.
    pub attraction_strength: f32,
    /// Rest length of edge springs.
    pub ideal_edge_length: f32,
    /// Pull toward the origin, proportional to distance from it.
    pub center_gravity: f32,
    /// Fraction of velocity retained each tick (0..=1).
    pub damping: f32,
    /// Starting temperature.
    #[serde(alias = "initialTemperature")]
    pub alpha: f32,
    /// Multiplicative cooling per tick, used when `alpha_decay` is unset.
    pub cooling_rate: f32,
    /// Linear cooling per tick. Takes precedence over `cooling_rate` when set.
    pub alpha_decay: Option<f32>,
    /// Temperature below which the simulation stops.
    #[serde(alias = "minTemperature")]
    pub min_alpha: f32,
    /// Speed cap at full temperature; the effective cap is `max_velocity * alpha`.
    pub max_velocity: f32,
    /// Barnes-Hut opening angle. Larger is faster and less accurate.
    pub barnes_hut_theta: f32,
    pub use_barnes_hut: bool,
    pub barnes_hut_threshold: usize,
    /// Stop early once average per-node movement falls under `movement_threshold`.
    pub adaptive_cooling: bool,
    pub movement_threshold: f32,
    /// Integration step used by `tick()`.
    pub time_step: f32,
    pub dimensions: Dimensions,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            repulsion_strength: 20_000.0,
            attraction_strength: 4.0,
            ideal_edge_length: 30.0,
            center_gravity: 0.5,
            damping: 0.85,
            alpha: 1.0,
            cooling_rate: 0.99,
            alpha_decay: None,
            min_alpha: 0.001,
            max_velocity: 300.0,
            barnes_hut_theta: 0.8,
            use_barnes_hut: true,
            barnes_hut_threshold: DEFAULT_BARNES_HUT_THRESHOLD,
            adaptive_cooling: false,
            movement_threshold: 0.01,
            time_step: DEFAULT_TIME_STEP,
            dimensions: Dimensions::Three,
        }
    }
}

impl ForceConfig {
    /// Planar configuration with all other options at their defaults.
    pub fn planar() -> Self {
        Self {
            dimensions: Dimensions::Two,
            ..Self::default()
        }
    }

    /// Copy of this configuration with every scalar clamped into range.
    ///
    /// Non-finite values fall back to the default for that option.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        Self {
            repulsion_strength: clamp(
                "repulsionStrength",
                self.repulsion_strength,
                0.0,
                f32::MAX,
                d.repulsion_strength,
            ),
            attraction_strength: clamp(
                "attractionStrength",
                self.attraction_strength,
                0.0,
                f32::MAX,
                d.attraction_strength,
            ),
            ideal_edge_length: clamp(
                "idealEdgeLength",
                self.ideal_edge_length,
                0.0,
                f32::MAX,
                d.ideal_edge_length,
            ),
            center_gravity: clamp(
                "centerGravity",
                self.center_gravity,
                0.0,
                f32::MAX,
                d.center_gravity,
            ),
            damping: clamp("damping", self.damping, 0.0, 1.0, d.damping),
            alpha: clamp("alpha", self.alpha, 0.0, 1.0, d.alpha),
            cooling_rate: clamp("coolingRate", self.cooling_rate, 0.0, 1.0, d.cooling_rate),
            alpha_decay: self
                .alpha_decay
                .map(|decay| clamp("alphaDecay", decay, 0.0, 1.0, 0.0)),
            min_alpha: clamp("minAlpha", self.min_alpha, 0.0, 1.0, d.min_alpha),
            max_velocity: clamp("maxVelocity", self.max_velocity, 0.0, f32::MAX, d.max_velocity),
            barnes_hut_theta: clamp(
                "barnesHutTheta",
                self.barnes_hut_theta,
                0.0,
                f32::MAX,
                d.barnes_hut_theta,
            ),
            use_barnes_hut: self.use_barnes_hut,
            barnes_hut_threshold: self.barnes_hut_threshold,
            adaptive_cooling: self.adaptive_cooling,
            movement_threshold: clamp(
                "movementThreshold",
                self.movement_threshold,
                0.0,
                f32::MAX,
                d.movement_threshold,
            ),
            time_step: clamp(
                "timeStep",
                self.time_step,
                f32::MIN_POSITIVE,
                MAX_TIME_STEP,
                d.time_step,
            ),
            dimensions: self.dimensions,
        }
    }
}

/// Clamp a named option into `[min, max]`, warning when the value changes.
/// Non-finite values are replaced by `fallback`.
pub(crate) fn clamp(name: &str, value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if !value.is_finite() {
        warn!("{name} is not finite ({value}); using {fallback}");
        return fallback;
    }
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("{name} = {value} is out of range; clamped to {clamped}");
    }
    clamped
}
