//! The seam between evaluation and image synthesis.
//!
//! The evaluator hands a `RenderJob` to whatever `RenderBackend` it was
//! given, and the backend calls back into the evaluator through
//! `SurfaceShader` whenever it needs the material at a hit.

use crate::error::Error;
use crate::runtime::value::Closure;
use crate::scene::Node;
use crate::scene::light::Light;
use crate::types::vecmat::Vec3;

/// Everything `render` popped off the stack.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub ambient: Vec3,
    pub lights: Vec<Light>,
    pub scene: Node,
    pub depth: u32,
    /// Horizontal field of view in degrees.
    pub fov: f64,
    pub width: usize,
    pub height: usize,
    pub output: String,
}

/// Material returned by a surface closure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceProps {
    pub color: Vec3,
    pub kd: f64,
    pub ks: f64,
    pub n: f64,
}

pub trait SurfaceShader {
    fn shade(&mut self, surface: &Closure, face: i64, u: f64, v: f64) -> Result<SurfaceProps, Error>;
}

pub trait RenderBackend {
    fn render(&self, job: &RenderJob, shader: &mut dyn SurfaceShader) -> Result<(), Error>;
}
