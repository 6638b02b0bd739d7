//! Pixel storage and the binary PPM (P6) writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use gml_lang::Vec3;

use crate::error::RenderError;

/// Linear (r, g, b), nominally in [0, 1]. Out-of-range values are kept
/// until the image is written.
pub type Color = Vec3;

pub const BLACK: Color = Vec3::ZERO;

/// Row-major image, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![BLACK; width * height] }
    }

    pub fn set(&mut self, x: usize, y: usize, c: Color) {
        self.pixels[y * self.width + x] = c;
    }

    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "P6 {} {} 255", self.width, self.height)?;
        let bytes: Vec<u8> = self
            .pixels
            .iter()
            .flat_map(|c| [channel(c.x), channel(c.y), channel(c.z)])
            .collect();
        out.write_all(&bytes)?;
        out.flush()
    }

    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let io_err = |source| RenderError::Io { path: path.to_path_buf(), source };
        let file = File::create(path).map_err(io_err)?;
        self.write_ppm(BufWriter::new(file)).map_err(io_err)
    }
}

/// `floor(255 · clamp(c, 0, 1))`. NaN maps to 0.
fn channel(c: f64) -> u8 {
    (255.0 * c.clamp(0.0, 1.0)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_clamped_channels() {
        let mut img = PixelBuffer::new(2, 1);
        img.set(0, 0, Vec3::new(-0.5, 0.5, 1.0));
        img.set(1, 0, Vec3::new(2.0, 0.999, f64::NAN));
        let mut out = Vec::new();
        img.write_ppm(&mut out).unwrap();
        let header = b"P6 2 1 255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[0, 127, 255, 255, 254, 0]);
    }

    #[test]
    fn row_major_addressing() {
        let mut img = PixelBuffer::new(3, 2);
        img.set(2, 1, Vec3::new(1.0, 0.0, 0.0));
        let mut out = Vec::new();
        img.write_ppm(&mut out).unwrap();
        let body = &out[b"P6 3 2 255\n".len()..];
        assert_eq!(&body[15..18], &[255, 0, 0]);
        assert!(body[..15].iter().all(|&b| b == 0));
    }
}
