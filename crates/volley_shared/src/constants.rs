//! # Broadcast & Effect Constants
//!
//! Defaults baked into the effect layer. Most of them can be overridden
//! through the networking crate's `EffectsConfig`.

// =============================================================================
// PACKET BROADCAST
// =============================================================================

/// Block-crack animations only reach clients this close to the block.
pub const BLOCK_CRACK_BROADCAST_RADIUS: f64 = 64.0;

/// Lowest visible break stage.
pub const MIN_BREAK_STAGE: i32 = 0;

/// Highest visible break stage.
pub const MAX_BREAK_STAGE: i32 = 9;

/// Break stage that removes the crack overlay.
pub const CLEAR_BREAK_STAGE: i32 = -1;

// =============================================================================
// RECOIL
// =============================================================================

/// How far in front of the eyes the synthetic recoil look-target is placed.
pub const RECOIL_LOOK_DISTANCE: f64 = 50.0;

// =============================================================================
// INVENTORY
// =============================================================================

/// Container state ids wrap inside 15 bits, as the host does.
pub const STATE_ID_MASK: i32 = 0x7FFF;

// =============================================================================
// SOUND FALLBACKS
// =============================================================================

/// Played when a reload-finished sound is unknown.
pub const SOUND_LOADING_END: &str = "minecraft:item.crossbow.loading_end";

/// Played when a reload sound is unknown.
pub const SOUND_LOADING_START: &str = "minecraft:item.crossbow.loading_start";

/// Played when a dry-fire click is unknown.
pub const SOUND_DRY_FIRE: &str = "minecraft:block.note_block.hat";

/// Played when an explosion sound is unknown.
pub const SOUND_EXPLOSION: &str = "minecraft:entity.generic.explode";

/// Played when a shot sound, or anything unclassified, is unknown.
pub const SOUND_SHOOT: &str = "minecraft:item.crossbow.shoot";
