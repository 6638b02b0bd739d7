//! Light evaluation at a surface point.

use gml_lang::{Light, Vec3};

use crate::image::{BLACK, Color};

/// What a light contributes at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// Unit vector from the point towards the light.
    pub to_light: Vec3,
    /// Distance to the light; infinite for directional lights.
    pub distance: f64,
    pub intensity: Color,
}

/// Point and spot lights fall off as `100 / (99 + d²)`, which is 1 at unit
/// distance.
fn attenuation(dsq: f64) -> f64 {
    100.0 / (99.0 + dsq)
}

pub fn illuminate(light: &Light, point: Vec3) -> Illumination {
    match light {
        Light::Directional { direction, color } => Illumination {
            to_light: (-*direction).normalize(),
            distance: f64::INFINITY,
            intensity: *color,
        },
        Light::Point { position, color } => {
            let d = *position - point;
            let dsq = d.dot(d);
            Illumination {
                to_light: d.normalize(),
                distance: dsq.sqrt(),
                intensity: *color * attenuation(dsq),
            }
        }
        Light::Spot { position, at, color, cutoff, exponent } => {
            let d = *position - point;
            let dsq = d.dot(d);
            let dist = dsq.sqrt();
            let axis = (*at - *position).normalize();
            let cos_angle = -d.dot(axis) / dist;
            let intensity = if cos_angle < cutoff.to_radians().cos() {
                BLACK
            } else {
                *color * (cos_angle.powf(*exponent) * attenuation(dsq))
            };
            Illumination { to_light: d * (1.0 / dist), distance: dist, intensity }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    #[test]
    fn directional_points_against_travel() {
        let l = Light::Directional { direction: Vec3::new(0.0, -2.0, 0.0), color: WHITE };
        let il = illuminate(&l, Vec3::ZERO);
        assert_eq!(il.to_light, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(il.distance, f64::INFINITY);
        assert_eq!(il.intensity, WHITE);
    }

    #[test]
    fn point_light_attenuates() {
        let l = Light::Point { position: Vec3::new(0.0, 0.0, 1.0), color: WHITE };
        assert_eq!(illuminate(&l, Vec3::ZERO).intensity, WHITE);
        let far = illuminate(&l, Vec3::new(0.0, 0.0, -9.0));
        assert!((far.intensity.x - 100.0 / 199.0).abs() < 1e-12);
        assert!((far.distance - 10.0).abs() < 1e-12);
    }

    #[test]
    fn spot_light_cuts_off_outside_cone() {
        let l = Light::Spot {
            position: Vec3::new(0.0, 1.0, 0.0),
            at: Vec3::ZERO,
            color: WHITE,
            cutoff: 30.0,
            exponent: 1.0,
        };
        let on_axis = illuminate(&l, Vec3::ZERO);
        assert_eq!(on_axis.intensity, WHITE);
        let outside = illuminate(&l, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(outside.intensity, BLACK);
    }
}
