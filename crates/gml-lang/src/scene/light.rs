use crate::types::vecmat::Vec3;

/// Light source as built by the `light`, `pointlight` and `spotlight`
/// operators. Evaluation belongs to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Parallel light travelling along `direction`.
    Directional { direction: Vec3, color: Vec3 },
    Point { position: Vec3, color: Vec3 },
    /// `cutoff` is the half-angle of the cone in degrees; `exponent` sharpens
    /// the falloff towards its edge.
    Spot { position: Vec3, at: Vec3, color: Vec3, cutoff: f64, exponent: f64 },
}
