//! Particle field simulation

use glam::{Vec2, Vec4};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gradient start/end colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPair {
    pub start: &'static str,
    pub end: &'static str,
}

/// Blue/teal/violet gradients
pub const PALETTE: [ColorPair; 3] = [
    ColorPair {
        start: "#002aff",
        end: "#009ff2",
    },
    ColorPair {
        start: "#0054ff",
        end: "#27e49b",
    },
    ColorPair {
        start: "#202bc5",
        end: "#873dcc",
    },
];

/// Backdrop fill behind the particles
pub const BACKGROUND: [&str; 2] = ["#000", "#000"];

/// Per-axis direction signs, each -1, 0 or 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Heading {
    pub x: i8,
    pub y: i8,
    pub blur: i8,
}

/// Canvas extent in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// One gradient disc
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub blur: f32,
    pub heading: Heading,
    pub colors: ColorPair,
    /// Linear gradient endpoints (x0, y0, x1, y1), fixed at spawn
    pub gradient: Vec4,
}

impl Particle {
    /// Spawn somewhere in or just outside `bounds`
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> Self {
        let radius = rng.random_range(RADIUS_RANGE.0..RADIUS_RANGE.1);
        let blur = rng.random_range(BLUR_SPAWN_RANGE.0..BLUR_SPAWN_RANGE.1);
        let pos = Vec2::new(
            rng.random_range(-SPAWN_MARGIN..bounds.width + SPAWN_MARGIN),
            rng.random_range(-SPAWN_MARGIN..bounds.height + SPAWN_MARGIN),
        );
        let colors = PALETTE[rng.random_range(0..PALETTE.len())];

        let x = quantize(rng.random_range(-0.99..=0.99));
        let y = quantize(rng.random_range(-0.99..=0.99));

        Self {
            pos,
            radius,
            blur,
            // Blur pulses in step with horizontal drift
            heading: Heading { x, y, blur: x },
            colors,
            gradient: Vec4::new(
                pos.x - radius / 2.0,
                pos.y - radius / 2.0,
                pos.x + radius,
                pos.y + radius,
            ),
        }
    }

    /// Bounce off the bounds, then advance one frame
    pub fn step(&mut self, bounds: Bounds) {
        self.heading.x = bounce(self.pos.x, self.heading.x, PARTICLE_STEP, 0.0, bounds.width);
        self.heading.y = bounce(self.pos.y, self.heading.y, PARTICLE_STEP, 0.0, bounds.height);
        self.heading.blur = bounce(self.blur, self.heading.blur, BLUR_STEP, BLUR_LIMITS.0, BLUR_LIMITS.1);

        self.pos.x += f32::from(self.heading.x) * PARTICLE_STEP;
        self.pos.y += f32::from(self.heading.y) * PARTICLE_STEP;
        self.blur += f32::from(self.heading.blur) * BLUR_STEP;
    }
}

/// Round a draw from [-0.99, 0.99] to a direction sign
fn quantize(value: f32) -> i8 {
    value.round().clamp(-1.0, 1.0) as i8
}

/// New direction for one axis: the sign flips when the next step would
/// reach `min`/`max` while heading toward that limit. A value already outside
/// the range keeps heading back in.
pub fn bounce(value: f32, dir: i8, step: f32, min: f32, max: f32) -> i8 {
    let next = value + f32::from(dir) * step;
    if (dir > 0 && next >= max) || (dir < 0 && next <= min) {
        -dir
    } else {
        dir
    }
}

/// The whole backdrop
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub bounds: Bounds,
    frames: u64,
}

impl ParticleField {
    /// Spawn `count` particles from a seeded RNG
    pub fn new(count: usize, bounds: Bounds, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..count).map(|_| Particle::spawn(&mut rng, bounds)).collect();
        Self {
            particles,
            bounds,
            frames: 0,
        }
    }

    /// Follow a viewport resize. Particles left outside drift back in.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds { width, height };
    }

    /// Advance every particle by one frame
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for particle in &mut self.particles {
            particle.step(bounds);
        }
        self.frames += 1;
    }

    /// Frames stepped so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
