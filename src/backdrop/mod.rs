//! Decorative backdrop
//!
//! A field of blurred gradient discs bouncing around the canvas. Independent
//! of game state; stepped once per display frame.

pub mod particle;

pub use particle::{Bounds, ColorPair, Heading, PALETTE, Particle, ParticleField, bounce};
