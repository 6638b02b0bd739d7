pub mod camera;
pub mod error;
pub mod image;
pub mod lights;
pub mod tracer;

pub use error::RenderError;
pub use image::{Color, PixelBuffer};
pub use tracer::{Tracer, TracerConfig};

use std::path::{Path, PathBuf};
use std::time::Instant;

use gml_lang::{RenderBackend, RenderJob, SurfaceShader};
use log::info;

use crate::camera::Camera;

// ─── Raytracer ────────────────────────────────────────────────────────────────

/// Render backend that traces one ray per pixel and writes the result as a
/// binary PPM file.
#[derive(Debug, Clone, Default)]
pub struct Raytracer {
    config: TracerConfig,
    output_dir: Option<PathBuf>,
}

impl Raytracer {
    pub fn new(config: TracerConfig) -> Self {
        Self { config, output_dir: None }
    }

    /// Relative output names are resolved against `dir` instead of the
    /// working directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(name),
            None => Path::new(name).to_path_buf(),
        }
    }

    /// Trace every pixel of the job without writing anything.
    pub fn trace_image(
        &self,
        job: &RenderJob,
        shader: &mut dyn SurfaceShader,
    ) -> Result<PixelBuffer, RenderError> {
        let camera = Camera::new(job.fov, job.width, job.height);
        let tracer = Tracer::new(&job.scene, &job.lights, job.ambient, self.config);
        let mut image = PixelBuffer::new(job.width, job.height);
        for y in 0..job.height {
            for x in 0..job.width {
                let (origin, dir) = camera.ray(x, y);
                image.set(x, y, tracer.trace(shader, origin, dir, job.depth)?);
            }
        }
        Ok(image)
    }
}

impl RenderBackend for Raytracer {
    fn render(&self, job: &RenderJob, shader: &mut dyn SurfaceShader) -> Result<(), gml_lang::Error> {
        let path = self.output_path(&job.output);
        info!("rendering {}x{} to {}", job.width, job.height, path.display());
        let started = Instant::now();
        let image = self.trace_image(job, shader)?;
        image.save(&path)?;
        info!("wrote {} in {:.2?}", path.display(), started.elapsed());
        Ok(())
    }
}
