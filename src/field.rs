// Drifting points redrawn every frame, with faint lines between close pairs.
// The host calls on_resize and on_frame; each runs to completion.

use crate::config::{ConnectionSearch, FieldConfig};
use crate::error::SetupError;
use crate::grid::SpatialGrid;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::Rng;
use tracing::debug;
use vecmath::{vec2_len, vec2_sub};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Viewport {
        Viewport { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn extent(&self) -> [f64; 2] {
        [self.width as f64, self.height as f64]
    }

    pub fn contains(&self, pos: [f64; 2]) -> bool {
        pos[0] >= 0.0 && pos[0] <= self.width as f64 && pos[1] >= 0.0 && pos[1] <= self.height as f64
    }
}

// Line between particles a < b
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

pub fn connection_opacity(distance: f64, threshold: f64, base: f64) -> f64 {
    if distance >= threshold {
        0.0
    } else {
        base * (1.0 - distance / threshold)
    }
}

pub fn distance(a: &Particle, b: &Particle) -> f64 {
    vec2_len(vec2_sub(a.pos, b.pos))
}

pub struct ParticleField<R: Rng> {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    rng: R,
    frames: u64,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(config: FieldConfig, viewport: Viewport, rng: R) -> Result<Self, SetupError> {
        config.validate()?;
        let mut field = ParticleField {
            config,
            viewport,
            particles: Vec::new(),
            rng,
            frames: 0,
        };
        field.regenerate();
        Ok(field)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // For placing particles by hand, e.g. in scenarios. The set itself can
    // only be replaced wholesale through `on_resize`.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    // Throws the old set away
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        self.regenerate();
    }

    pub fn on_frame<S: Surface>(&mut self, surface: &mut S) {
        self.update();
        self.draw(surface);
    }

    pub fn update(&mut self) {
        let viewport = self.viewport;
        let boundary = self.config.boundary;
        for particle in &mut self.particles {
            particle.step(viewport, boundary);
        }
        self.frames += 1;
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.clear(self.viewport);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, p.color, p.opacity, p.glow);
        }
        for c in self.connections() {
            surface.stroke_line(
                self.particles[c.a].pos,
                self.particles[c.b].pos,
                self.config.line_color,
                c.opacity,
                self.config.line_width,
            );
        }
    }

    // Sorted by (a, b)
    pub fn connections(&self) -> Vec<Connection> {
        let threshold = self.config.connection_distance;
        if threshold <= 0.0 || self.particles.len() < 2 {
            return Vec::new();
        }
        match self.config.connection_search {
            ConnectionSearch::AllPairs => {
                let mut connections = Vec::new();
                for a in 0..self.particles.len() {
                    for b in a + 1..self.particles.len() {
                        if let Some(c) = self.connect(a, b) {
                            connections.push(c);
                        }
                    }
                }
                connections
            }
            ConnectionSearch::Grid => {
                let grid = SpatialGrid::build(self.particles.iter().map(|p| &p.pos), threshold);
                grid.candidate_pairs()
                    .into_iter()
                    .filter_map(|(a, b)| self.connect(a, b))
                    .collect()
            }
        }
    }

    fn connect(&self, a: usize, b: usize) -> Option<Connection> {
        let distance = distance(&self.particles[a], &self.particles[b]);
        let opacity = connection_opacity(
            distance,
            self.config.connection_distance,
            self.config.line_opacity,
        );
        if opacity > 0.0 {
            Some(Connection {
                a,
                b,
                distance,
                opacity,
            })
        } else {
            None
        }
    }

    fn regenerate(&mut self) {
        let count = self.config.density.count(self.viewport);
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(&mut self.rng, self.viewport, &self.config));
        }
        self.particles = particles;
        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            count,
            "regenerated particle field"
        );
    }
}
