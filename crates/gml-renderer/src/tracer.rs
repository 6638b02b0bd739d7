//! Recursive Whitted-style tracer: Phong lighting with hard shadows and
//! mirror reflection, materials supplied by surface closures.

use gml_lang::scene::Crossing;
use gml_lang::{Error, Light, Node, SurfaceShader, Vec3};

use crate::image::{BLACK, Color};
use crate::lights::{Illumination, illuminate};

/// Numeric tolerances of the tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerConfig {
    /// Crossings at or before this distance along a ray are ignored.
    pub hit_epsilon: f64,
    /// Offset along the surface normal for secondary ray origins.
    pub shadow_bias: f64,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self { hit_epsilon: 1e-6, shadow_bias: 1e-4 }
    }
}

pub struct Tracer<'a> {
    scene: &'a Node,
    lights: &'a [Light],
    ambient: Color,
    config: TracerConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Node, lights: &'a [Light], ambient: Color, config: TracerConfig) -> Self {
        Self { scene, lights, ambient, config }
    }

    /// Color seen along the unit direction `dir`. `depth` bounds the number
    /// of further reflection bounces.
    pub fn trace(
        &self,
        shader: &mut dyn SurfaceShader,
        origin: Vec3,
        dir: Vec3,
        depth: u32,
    ) -> Result<Color, Error> {
        let hits = self.scene.intersect(origin, dir);
        let Some(hit) = hits.iter().find(|h| h.t > self.config.hit_epsilon) else {
            return Ok(BLACK);
        };
        // The ray starts inside a solid.
        if hit.crossing == Crossing::Exit {
            return Ok(BLACK);
        }

        let (face, u, v) = hit.surface_coords();
        let surface = shader.shade(&hit.primitive.surface, face, u, v)?;
        let (n, c) = (hit.normal, surface.color);
        let eye = -dir;
        let start = hit.point + n * self.config.shadow_bias;

        let mut color = self.ambient.cmul(c) * surface.kd;
        for light in self.lights {
            let il = illuminate(light, hit.point);
            let diffuse = n.dot(il.to_light);
            if diffuse <= 0.0 || self.occluded(start, &il) {
                continue;
            }
            let half = (il.to_light + eye).normalize();
            let specular = n.dot(half).max(0.0).powf(surface.n);
            color = color + il.intensity.cmul(c) * (surface.kd * diffuse + surface.ks * specular);
        }

        if surface.ks > 0.0 && depth > 0 {
            let reflected = self.trace(shader, start, dir.reflect(n), depth - 1)?;
            color = color + reflected.cmul(c) * surface.ks;
        }
        Ok(color)
    }

    /// Whether anything solid lies between `start` and the light.
    fn occluded(&self, start: Vec3, il: &Illumination) -> bool {
        self.scene
            .intersect(start, il.to_light)
            .iter()
            .find(|h| h.t > self.config.hit_epsilon)
            .is_some_and(|h| h.t < il.distance)
    }
}
