//! Drill-down shells: a fixed-count point set on a sphere around a parent
//! wallet, distributed with the Fibonacci-sphere method.

use bevy::math::Vec3;

use crate::layout::ConfigError;

/// Golden ratio, drives the azimuth step of the Fibonacci sphere.
const PHI: f64 = 1.618_033_988_749_895;

/// Tunables for shell generation. Exact values are product choices, not
/// invariants — see `validate` for the domains.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    /// Points distributed on each shell.
    pub points_per_shell: usize,
    /// Shell radius as a multiple of the parent's size basis. Must stay
    /// small enough that adjacent parents' shells never intersect given the
    /// spacing the layout engine guarantees.
    pub radius_scale: f32,
    /// Fraction each shell point's color is blended toward white.
    pub lighten: f32,
    /// Shell point size as a fraction of the parent's size basis.
    pub size_scale: f32,
    /// Scale of the duplicate center node rendered inside the shell.
    pub center_size_scale: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            points_per_shell: 200,
            radius_scale: 2.8,
            lighten: 0.3,
            size_scale: 0.18,
            center_size_scale: 0.5,
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points_per_shell == 0 {
            return Err(ConfigError::OutOfDomain {
                field: "points_per_shell",
                value: 0.0,
            });
        }
        if !self.radius_scale.is_finite() || self.radius_scale <= 0.0 {
            return Err(ConfigError::OutOfDomain {
                field: "radius_scale",
                value: self.radius_scale as f64,
            });
        }
        if !self.lighten.is_finite() || !(0.0..=1.0).contains(&self.lighten) {
            return Err(ConfigError::OutOfDomain {
                field: "lighten",
                value: self.lighten as f64,
            });
        }
        if !self.size_scale.is_finite() || self.size_scale <= 0.0 {
            return Err(ConfigError::OutOfDomain {
                field: "size_scale",
                value: self.size_scale as f64,
            });
        }
        if !self.center_size_scale.is_finite() || self.center_size_scale < 0.0 {
            return Err(ConfigError::OutOfDomain {
                field: "center_size_scale",
                value: self.center_size_scale as f64,
            });
        }
        Ok(())
    }

    pub fn shell_radius(&self, parent_size_basis: f32) -> f32 {
        self.radius_scale * parent_size_basis
    }
}

/// One point of a shell, positioned relative to its parent's center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellPoint {
    pub offset: Vec3,
    pub color: [f32; 3],
    pub size: f32,
}

/// Generates the shell for one parent. Bit-identical for identical inputs:
/// there is no randomness anywhere in this path, so re-rendering a category
/// never makes its shells jitter.
///
/// Fibonacci-sphere spacing: polar angle `acos(1 - 2(j+0.5)/n)`, azimuth
/// `2π·j·φ`. Near-equal-area coverage for any fixed count — naive uniform
/// angle stepping would crowd the poles.
pub fn generate_shell(
    parent_size_basis: f32,
    parent_color: [f32; 3],
    config: &ShellConfig,
) -> Vec<ShellPoint> {
    let count = config.points_per_shell;
    let radius = config.shell_radius(parent_size_basis);
    let color = lighten(parent_color, config.lighten);
    let size = parent_size_basis * config.size_scale;

    let mut points = Vec::with_capacity(count);
    for j in 0..count {
        // Angles accumulate to thousands of radians at the tail; f64 keeps
        // the azimuth exact before projecting back to f32.
        let polar = (1.0 - 2.0 * (j as f64 + 0.5) / count as f64).acos();
        let azimuth = std::f64::consts::TAU * j as f64 * PHI;

        let offset = Vec3::new(
            (radius as f64 * polar.sin() * azimuth.cos()) as f32,
            (radius as f64 * polar.cos()) as f32,
            (radius as f64 * polar.sin() * azimuth.sin()) as f32,
        );
        points.push(ShellPoint {
            offset,
            color,
            size,
        });
    }
    points
}

fn lighten(color: [f32; 3], fraction: f32) -> [f32; 3] {
    [
        color[0] + (1.0 - color[0]) * fraction,
        color[1] + (1.0 - color[1]) * fraction,
        color[2] + (1.0 - color[2]) * fraction,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ShellConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let mut config = ShellConfig::default();
        config.points_per_shell = 0;
        assert!(config.validate().is_err());

        let mut config = ShellConfig::default();
        config.radius_scale = -2.8;
        assert!(config.validate().is_err());

        let mut config = ShellConfig::default();
        config.lighten = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn generates_the_configured_count() {
        let shell = generate_shell(200.0, [1.0, 1.0, 1.0], &ShellConfig::default());
        assert_eq!(shell.len(), 200);
    }

    #[test]
    fn every_point_sits_on_the_shell_radius() {
        let config = ShellConfig::default();
        let shell = generate_shell(200.0, [1.0, 1.0, 1.0], &config);
        let radius = config.shell_radius(200.0);
        for point in &shell {
            let distance = point.offset.length();
            assert!(
                (distance - radius).abs() < radius * 1.0e-4,
                "point off the shell: {distance} vs {radius}"
            );
        }
    }

    #[test]
    fn generation_is_bit_identical() {
        let config = ShellConfig::default();
        let first = generate_shell(340.0, [0.0, 0.8, 0.0], &config);
        let second = generate_shell(340.0, [0.0, 0.8, 0.0], &config);
        assert_eq!(first, second);
    }

    #[test]
    fn no_two_points_coincide() {
        let config = ShellConfig::default();
        let shell = generate_shell(200.0, [1.0, 1.0, 1.0], &config);
        let radius = config.shell_radius(200.0);
        // For 200 near-uniform points the nearest-neighbor spacing stays a
        // healthy fraction of the mean spacing (~R·sqrt(4π/n)).
        let mean_spacing = radius * (4.0 * std::f32::consts::PI / 200.0).sqrt();
        let mut min_distance = f32::MAX;
        for i in 0..shell.len() {
            for j in (i + 1)..shell.len() {
                min_distance = min_distance.min(shell[i].offset.distance(shell[j].offset));
            }
        }
        assert!(
            min_distance > mean_spacing * 0.2,
            "points cluster too tightly: {min_distance} vs mean {mean_spacing}"
        );
    }

    #[test]
    fn shell_points_are_lighter_and_smaller_than_the_parent() {
        let config = ShellConfig::default();
        let parent_color = [0.0, 0.6, 0.0];
        let shell = generate_shell(300.0, parent_color, &config);
        let point = &shell[0];
        assert!(point.color[0] > parent_color[0]);
        assert!(point.color[1] > parent_color[1]);
        assert!(point.size < 300.0);
        assert_eq!(point.size, 300.0 * config.size_scale);
    }
}
