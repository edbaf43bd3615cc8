//! Memory Match - A concentration card game with an animated backdrop
//!
//! Core modules:
//! - `sim`: Board generation and the flip/match/win state machine (pure, host-driven time)
//! - `backdrop`: Bouncing gradient particle field behind the board
//! - `renderer`: DOM board view and Canvas 2D backdrop drawing
//! - `platform`: Click classification and the cancellable frame loop
//! - `settings`: Board size and particle quality configuration

pub mod backdrop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Board edge length used when the page does not specify one
    pub const DEFAULT_DIMENSION: u32 = 4;

    /// Game clock period (one elapsed second per tick)
    pub const CLOCK_INTERVAL_MS: u64 = 1000;
    /// How long a flipped pair stays visible before unmatched cards hide again
    pub const REVEAL_DELAY_MS: u64 = 1000;
    /// Delay between the last flip and the win summary
    pub const WIN_DELAY_MS: u64 = 1000;
    /// How often the browser host pumps due timers
    pub const TIMER_PUMP_MS: i32 = 50;

    /// Backdrop defaults
    pub const PARTICLE_COUNT: usize = 70;
    /// Pixels moved per frame on each axis
    pub const PARTICLE_STEP: f32 = 2.0;
    /// Blur pixels changed per frame
    pub const BLUR_STEP: f32 = 1.0;
    /// Spawn radius range (px)
    pub const RADIUS_RANGE: (f32, f32) = (1.0, 120.0);
    /// Spawn blur range (px)
    pub const BLUR_SPAWN_RANGE: (f32, f32) = (12.0, 70.0);
    /// Blur bounces between these limits once animating
    pub const BLUR_LIMITS: (f32, f32) = RADIUS_RANGE;
    /// Particles may spawn this far outside the canvas
    pub const SPAWN_MARGIN: f32 = 100.0;
}
