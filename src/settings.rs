//! Game settings
//!
//! Read once at startup from the page: an optional JSON blob in
//! `data-settings` on the board, then `data-dimension` on the board and
//! `data-quality` on the canvas, which override it.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DIMENSION, PARTICLE_COUNT};
use crate::sim::board::{BoardError, parse_dimension};

/// Backdrop quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Particles spawned for this preset
    pub fn particle_count(&self) -> usize {
        match self {
            QualityPreset::Low => PARTICLE_COUNT / 3,
            QualityPreset::Medium => PARTICLE_COUNT,
            QualityPreset::High => PARTICLE_COUNT * 2,
        }
    }
}

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board edge length (must be even)
    pub dimension: u32,
    /// Backdrop quality
    pub quality: QualityPreset,
    /// Backdrop enabled
    pub particles: bool,
    /// Fixed deal/backdrop seed; clock-seeded when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            quality: QualityPreset::Medium,
            particles: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Build settings from a `data-settings` JSON blob plus attribute
    /// overrides. Malformed JSON is logged and ignored.
    pub fn from_page(
        json: Option<&str>,
        dimension: Option<&str>,
        quality: Option<&str>,
    ) -> Result<Self, BoardError> {
        let mut settings = match json.map(Self::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Ignoring data-settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        };

        if let Some(raw) = dimension {
            settings.dimension = parse_dimension(raw)?;
        }

        if let Some(raw) = quality {
            match QualityPreset::from_str(raw) {
                Some(preset) => settings.quality = preset,
                None => log::warn!("Unknown quality {:?}, using {}", raw, settings.quality.as_str()),
            }
        }

        Ok(settings)
    }

    /// Effective particle count
    pub fn particle_count(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.particle_count()
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(document: &web_sys::Document) -> Result<Self, BoardError> {
        let board = document.query_selector(".board").ok().flatten();
        let json = board.as_ref().and_then(|el| el.get_attribute("data-settings"));
        let dimension = board.as_ref().and_then(|el| el.get_attribute("data-dimension"));
        let quality = document
            .get_element_by_id("canvas")
            .and_then(|el| el.get_attribute("data-quality"));

        let settings = Self::from_page(json.as_deref(), dimension.as_deref(), quality.as_deref())?;
        log::info!(
            "Loaded settings: {}x{} board, {} backdrop{}",
            settings.dimension,
            settings.dimension,
            settings.quality.as_str(),
            if settings.particles { "" } else { " (disabled)" }
        );
        Ok(settings)
    }
}
