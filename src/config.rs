// Tunables for the particle field. Everything here is fixed once the field is
// constructed; there is no way to change it while the animation runs.

use crate::color::Color;
use crate::error::SetupError;
use crate::field::Viewport;
use rand::Rng;

pub const PER_PARTICLE_AREA: u64 = 80_000;
pub const WRAP_MARGIN: f64 = 50.0;
pub const CONNECTION_DISTANCE: f64 = 110.0;
pub const LINE_OPACITY: f64 = 0.25;
pub const MIN_GRID_CELL: f64 = 1e-3;
// Opaque so a line's alpha is exactly its connection opacity
pub const LINE_COLOR: Color = Color::rgba(0, 240, 255, 255);

pub const PALETTE: [Color; 2] = [
    // rgba(0,240,255,0.8)
    Color::from_u32(0x00f0_ffcc),
    // rgba(180,0,255,0.85)
    Color::from_u32(0xb400_ffd9),
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DensityPolicy {
    Fixed(usize),
    // square pixels per particle, rounded down
    PerArea(u64),
}

impl DensityPolicy {
    pub fn count(&self, viewport: Viewport) -> usize {
        match *self {
            DensityPolicy::Fixed(n) => n,
            DensityPolicy::PerArea(area) => viewport
                .area()
                .checked_div(area)
                .unwrap_or(0) as usize,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BoundaryPolicy {
    Bounce,
    // teleports once `margin` pixels outside
    Wrap { margin: f64 },
}

impl BoundaryPolicy {
    pub fn wrap() -> BoundaryPolicy {
        BoundaryPolicy::Wrap {
            margin: WRAP_MARGIN,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConnectionSearch {
    AllPairs,
    Grid,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Span {
        Span { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min, self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub density: DensityPolicy,
    pub boundary: BoundaryPolicy,
    pub velocity_x: Span,
    pub velocity_y: Span,
    pub radius: Span,
    pub opacity: Span,
    pub glow: Span,
    pub palette: [Color; 2],
    pub connection_distance: f64,
    pub line_opacity: f64,
    pub line_width: f64,
    pub line_color: Color,
    pub connection_search: ConnectionSearch,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            density: DensityPolicy::PerArea(PER_PARTICLE_AREA),
            boundary: BoundaryPolicy::Bounce,
            velocity_x: Span::new(-0.15, 0.15),
            velocity_y: Span::new(-0.05, 0.2),
            radius: Span::new(0.6, 2.8),
            opacity: Span::new(0.55, 0.95),
            glow: Span::new(8.0, 26.0),
            palette: PALETTE,
            connection_distance: CONNECTION_DISTANCE,
            line_opacity: LINE_OPACITY,
            line_width: 1.0,
            line_color: LINE_COLOR,
            connection_search: ConnectionSearch::AllPairs,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), SetupError> {
        let spans = [
            ("velocity_x", self.velocity_x),
            ("velocity_y", self.velocity_y),
            ("radius", self.radius),
            ("opacity", self.opacity),
            ("glow", self.glow),
        ];
        for (name, span) in spans.iter() {
            if !span.is_valid() {
                return Err(SetupError::InvalidConfig(format!(
                    "{} range [{}, {}] is empty or not finite",
                    name, span.min, span.max
                )));
            }
        }
        if self.radius.min < 0.0 || self.glow.min < 0.0 {
            return Err(SetupError::InvalidConfig(
                "radius and glow must be non-negative".to_owned(),
            ));
        }
        if self.opacity.min < 0.0 || self.opacity.max > 1.0 {
            return Err(SetupError::InvalidConfig(
                "particle opacity must lie within [0, 1]".to_owned(),
            ));
        }
        if !(self.connection_distance.is_finite() && self.connection_distance >= 0.0) {
            return Err(SetupError::InvalidConfig(format!(
                "connection distance {} must be finite and non-negative",
                self.connection_distance
            )));
        }
        if self.connection_search == ConnectionSearch::Grid
            && self.connection_distance > 0.0
            && self.connection_distance < MIN_GRID_CELL
        {
            return Err(SetupError::InvalidConfig(format!(
                "connection distance {} is too small for a grid search (minimum {})",
                self.connection_distance, MIN_GRID_CELL
            )));
        }
        if !(0.0..=1.0).contains(&self.line_opacity) {
            return Err(SetupError::InvalidConfig(format!(
                "line opacity {} must lie within [0, 1]",
                self.line_opacity
            )));
        }
        if let BoundaryPolicy::Wrap { margin } = self.boundary {
            if !(margin.is_finite() && margin >= 0.0) {
                return Err(SetupError::InvalidConfig(format!(
                    "wrap margin {} must be finite and non-negative",
                    margin
                )));
            }
        }
        if self.density == DensityPolicy::PerArea(0) {
            return Err(SetupError::InvalidConfig(
                "per-particle area must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_area_density_rounds_down() {
        let policy = DensityPolicy::PerArea(PER_PARTICLE_AREA);
        assert_eq!(policy.count(Viewport::new(800, 600)), 6);
        assert_eq!(policy.count(Viewport::new(1920, 1080)), 25);
        assert_eq!(policy.count(Viewport::new(100, 100)), 0);
    }

    #[test]
    fn fixed_density_ignores_viewport() {
        let policy = DensityPolicy::Fixed(80);
        assert_eq!(policy.count(Viewport::new(0, 0)), 80);
        assert_eq!(policy.count(Viewport::new(3840, 2160)), 80);
    }

    #[test]
    fn zero_area_policy_yields_nothing() {
        assert_eq!(DensityPolicy::PerArea(0).count(Viewport::new(800, 600)), 0);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_span() {
        let config = FieldConfig {
            radius: Span::new(3.0, 1.0),
            ..FieldConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn rejects_out_of_range_line_opacity() {
        let config = FieldConfig {
            line_opacity: 1.5,
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_grid_search_with_tiny_distance() {
        let config = FieldConfig {
            density: DensityPolicy::Fixed(4),
            connection_distance: 1e-300,
            connection_search: ConnectionSearch::Grid,
            ..FieldConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("grid search"));

        let all_pairs = FieldConfig {
            connection_search: ConnectionSearch::AllPairs,
            ..config
        };
        assert!(all_pairs.validate().is_ok());
    }

    #[test]
    fn default_line_color_is_opaque() {
        assert_eq!(FieldConfig::default().line_color.alpha(), 1.0);
    }

    #[test]
    fn rejects_zero_per_area_density() {
        let config = FieldConfig {
            density: DensityPolicy::PerArea(0),
            ..FieldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn degenerate_span_samples_its_minimum() {
        use rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Span::new(2.0, 2.0).sample(&mut rng), 2.0);
    }
}
