//! # Effects Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid config.
//!
//! ```toml
//! block_crack_radius = 64.0
//! recoil_look_distance = 50.0
//!
//! [sounds]
//! shoot = "minecraft:item.crossbow.shoot"
//!
//! [impact_dust]
//! count = 6
//! offset = 0.1
//! size = 0.8
//! color = { r = 255, g = 255, b = 255 }
//!
//! [scheduler]
//! queue_capacity = 4096
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use volley_shared::constants::{
    BLOCK_CRACK_BROADCAST_RADIUS, RECOIL_LOOK_DISTANCE, SOUND_DRY_FIRE, SOUND_EXPLOSION,
    SOUND_LOADING_END, SOUND_LOADING_START, SOUND_SHOOT,
};
use volley_shared::Color;

use crate::error::{ConfigError, ConfigResult};

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Block crack packets reach clients within this distance of the block.
    pub block_crack_radius: f64,
    /// Recoil look-at target distance from the eye.
    pub recoil_look_distance: f64,
    /// Sound fallback keys.
    pub sounds: SoundFallbacks,
    /// Dust puff drawn on block impacts.
    pub impact_dust: ImpactDustConfig,
    /// Decorative explosion geometry.
    pub trans_explosion: TransExplosionConfig,
    /// Tick-thread queue.
    pub scheduler: SchedulerConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            block_crack_radius: BLOCK_CRACK_BROADCAST_RADIUS,
            recoil_look_distance: RECOIL_LOOK_DISTANCE,
            sounds: SoundFallbacks::default(),
            impact_dust: ImpactDustConfig::default(),
            trans_explosion: TransExplosionConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl EffectsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML, [`ConfigError::Invalid`] on
    /// out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        if !positive(self.block_crack_radius) {
            return Err(invalid("block_crack_radius must be positive"));
        }
        if !positive(self.recoil_look_distance) {
            return Err(invalid("recoil_look_distance must be positive"));
        }
        if !positive(f64::from(self.impact_dust.size)) {
            return Err(invalid("impact_dust.size must be positive"));
        }
        if self.impact_dust.offset < 0.0 {
            return Err(invalid("impact_dust.offset must not be negative"));
        }
        let trans = &self.trans_explosion;
        if trans.colors.is_empty() {
            return Err(invalid("trans_explosion.colors must not be empty"));
        }
        if !positive(trans.radius) || !positive(f64::from(trans.size)) || trans.spread < 0.0 {
            return Err(invalid("trans_explosion radius/size must be positive and spread non-negative"));
        }
        if self.scheduler.queue_capacity == Some(0) {
            return Err(invalid("scheduler.queue_capacity must be positive when set"));
        }
        Ok(())
    }
}

/// False for zero, negatives and NaN.
fn positive(value: f64) -> bool {
    value > 0.0
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid(reason.to_owned())
}

/// Substitute keys for sounds the host rejects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundFallbacks {
    /// End of a reload
    pub loading_end: String,
    /// Start of a reload
    pub loading_start: String,
    /// Empty magazine click
    pub dry_fire: String,
    /// Explosion
    pub explosion: String,
    /// Gunshot, also the default
    pub shoot: String,
}

impl Default for SoundFallbacks {
    fn default() -> Self {
        Self {
            loading_end: SOUND_LOADING_END.to_owned(),
            loading_start: SOUND_LOADING_START.to_owned(),
            dry_fire: SOUND_DRY_FIRE.to_owned(),
            explosion: SOUND_EXPLOSION.to_owned(),
            shoot: SOUND_SHOOT.to_owned(),
        }
    }
}

/// Dust puff drawn after the block fragments of a block impact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactDustConfig {
    /// Particles per puff
    pub count: u32,
    /// Random offset per axis
    pub offset: f64,
    /// Dust color
    pub color: Color,
    /// Dust size
    pub size: f32,
}

impl Default for ImpactDustConfig {
    fn default() -> Self {
        Self {
            count: 6,
            offset: 0.1,
            color: Color::WHITE,
            size: 0.8,
        }
    }
}

/// Pride-flag colored dust explosion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransExplosionConfig {
    /// Dust spawns per explosion
    pub spawns: u32,
    /// Half-width of the cube spawns are scattered in
    pub radius: f64,
    /// Particles per spawn
    pub count: u32,
    /// Random spread per axis, per spawn
    pub spread: f64,
    /// Dust size
    pub size: f32,
    /// Colors, cycled in order
    pub colors: Vec<Color>,
}

impl Default for TransExplosionConfig {
    fn default() -> Self {
        Self {
            spawns: 101,
            radius: 10.0,
            count: 8,
            spread: 0.7,
            size: 8.0,
            colors: vec![
                Color::WHITE,
                Color::from_rgb(91, 207, 250),
                Color::from_rgb(245, 171, 185),
            ],
        }
    }
}

/// Tick-thread queue settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum deferred batches waiting for the tick thread. Unbounded if unset.
    pub queue_capacity: Option<usize>,
}
