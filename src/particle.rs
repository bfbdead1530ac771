// Simple particle struct to keep track of individual position, velocity, and
// the look it was given at creation

use crate::color::Color;
use crate::config::{BoundaryPolicy, FieldConfig};
use crate::field::Viewport;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
    pub opacity: f64,
    pub glow: f64,
}

impl Particle {
    pub fn new(pos_x: f64, pos_y: f64, vel_x: f64, vel_y: f64, radius: f64, color: Color) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            color,
            opacity: 1.0,
            glow: 0.0,
        }
    }

    // Uniform position inside the viewport, everything else drawn from the config spans
    pub fn random<R: Rng>(rng: &mut R, viewport: Viewport, config: &FieldConfig) -> Particle {
        let pos_x = rng.gen::<f64>() * viewport.width as f64;
        let pos_y = rng.gen::<f64>() * viewport.height as f64;
        let vel_x = config.velocity_x.sample(rng);
        let vel_y = config.velocity_y.sample(rng);
        let radius = config.radius.sample(rng);
        let color = config.palette[rng.gen_range(0, config.palette.len())];
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            radius,
            color,
            opacity: config.opacity.sample(rng),
            glow: config.glow.sample(rng),
        }
    }

    pub fn step(&mut self, viewport: Viewport, boundary: BoundaryPolicy) {
        let extent = viewport.extent();
        for axis in 0..2 {
            self.pos[axis] += self.vel[axis];
            match boundary {
                BoundaryPolicy::Bounce => {
                    let leaving_low = self.pos[axis] <= 0.0 && self.vel[axis] < 0.0;
                    let leaving_high = self.pos[axis] >= extent[axis] && self.vel[axis] > 0.0;
                    if leaving_low || leaving_high {
                        self.vel[axis] *= -1.0;
                    }
                    self.pos[axis] = self.pos[axis].max(0.0).min(extent[axis]);
                }
                BoundaryPolicy::Wrap { margin } => {
                    if self.pos[axis] < -margin {
                        self.pos[axis] = extent[axis] + margin;
                    } else if self.pos[axis] > extent[axis] + margin {
                        self.pos[axis] = -margin;
                    }
                }
            }
        }
    }
}
