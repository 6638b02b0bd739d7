use gml_lang::Vec3;

/// Pinhole camera: eye at (0, 0, -1) looking down +Z through an image plane
/// at z = 0 whose width is `2·tan(fov/2)`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    eye: Vec3,
    left: f64,
    top: f64,
    pixel: f64,
}

impl Camera {
    pub fn new(fov_deg: f64, width: usize, height: usize) -> Self {
        let world_w = 2.0 * (0.5 * fov_deg.to_radians()).tan();
        let world_h = world_w * height as f64 / width as f64;
        Self {
            eye: Vec3::new(0.0, 0.0, -1.0),
            left: -0.5 * world_w,
            top: 0.5 * world_h,
            pixel: world_w / width as f64,
        }
    }

    /// Origin and unit direction of the ray through the center of pixel (x, y).
    pub fn ray(&self, x: usize, y: usize) -> (Vec3, Vec3) {
        let target = Vec3::new(
            self.left + (x as f64 + 0.5) * self.pixel,
            self.top - (y as f64 + 0.5) * self.pixel,
            0.0,
        );
        (self.eye, (target - self.eye).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_looks_down_z() {
        let cam = Camera::new(90.0, 3, 3);
        let (o, d) = cam.ray(1, 1);
        assert_eq!(o, Vec3::new(0.0, 0.0, -1.0));
        assert!((d - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn row_zero_is_top() {
        let cam = Camera::new(90.0, 4, 2);
        let (_, top_left) = cam.ray(0, 0);
        let (_, bottom_right) = cam.ray(3, 1);
        assert!(top_left.x < 0.0 && top_left.y > 0.0);
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
    }
}
