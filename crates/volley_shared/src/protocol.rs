//! Client-bound packet definitions.
//!
//! These are field-level descriptions. Encoding belongs to the host and is
//! reached through the compatibility layer, because the host's constructor
//! shapes change between releases.

use serde::{Deserialize, Serialize};

use crate::constants::{CLEAR_BREAK_STAGE, MAX_BREAK_STAGE, MIN_BREAK_STAGE, STATE_ID_MASK};
use crate::math::{BlockPos, Vec3};
use crate::nbt::CompoundTag;

/// Packet kinds this layer assembles.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketKind {
    /// Block crack animation
    BlockDestruction = 0,
    /// Single inventory slot update
    ContainerSetSlot = 1,
    /// Orient the client camera toward a point
    LookAt = 2,
}

/// Block crack animation packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDestructionPacket {
    /// Id of the breaking entity; one overlay per id.
    pub entity_id: i32,
    /// Target block
    pub position: BlockPos,
    /// 0..=9, or -1 to clear
    pub stage: i32,
}

impl BlockDestructionPacket {
    /// Creates a block crack packet.
    ///
    /// `stage` must be in `0..=9` or be `-1`.
    #[must_use]
    pub fn new(entity_id: i32, position: BlockPos, stage: i32) -> Self {
        debug_assert!(
            stage == CLEAR_BREAK_STAGE || (MIN_BREAK_STAGE..=MAX_BREAK_STAGE).contains(&stage),
            "break stage out of range: {stage}"
        );
        Self { entity_id, position, stage }
    }
}

/// Item carried by a slot update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    /// Host item key, e.g. `minecraft:iron_horse_armor`
    pub item: String,
    /// Stack size
    pub count: u8,
    /// Item metadata
    pub tag: Option<CompoundTag>,
}

impl ItemPayload {
    /// Creates an untagged stack.
    #[must_use]
    pub fn new(item: impl Into<String>, count: u8) -> Self {
        Self { item: item.into(), count, tag: None }
    }

    /// Attaches metadata.
    #[must_use]
    pub fn with_tag(mut self, tag: CompoundTag) -> Self {
        self.tag = Some(tag);
        self
    }
}

/// Inventory slot update packet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerSetSlotPacket {
    /// Open container id
    pub container_id: i32,
    /// Container state id after increment
    pub state_id: i32,
    /// Slot index
    pub slot: i32,
    /// New contents
    pub item: ItemPayload,
}

/// Which part of the player a look-at packet aims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityAnchor {
    /// Aim the feet
    Feet,
    /// Aim the eyes
    Eyes,
}

/// Look-direction packet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookAtPacket {
    /// Anchor on the receiving player
    pub anchor: EntityAnchor,
    /// World point to face
    pub target: Vec3,
}

impl LookAtPacket {
    /// Eye-anchored look-at.
    #[must_use]
    pub const fn eyes(target: Vec3) -> Self {
        Self { anchor: EntityAnchor::Eyes, target }
    }
}

/// Every packet this layer can send.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientboundPacket {
    /// Block crack animation
    BlockDestruction(BlockDestructionPacket),
    /// Slot update
    ContainerSetSlot(ContainerSetSlotPacket),
    /// Look direction
    LookAt(LookAtPacket),
}

impl ClientboundPacket {
    /// Returns the packet kind
    #[must_use]
    pub const fn kind(&self) -> PacketKind {
        match self {
            Self::BlockDestruction(_) => PacketKind::BlockDestruction,
            Self::ContainerSetSlot(_) => PacketKind::ContainerSetSlot,
            Self::LookAt(_) => PacketKind::LookAt,
        }
    }
}

/// A player's open inventory menu as the host tracks it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InventoryMenu {
    /// Container id
    pub container_id: i32,
    state_id: i32,
}

impl InventoryMenu {
    /// Creates a menu at state 0.
    #[must_use]
    pub const fn new(container_id: i32) -> Self {
        Self { container_id, state_id: 0 }
    }

    /// Current state id.
    #[must_use]
    pub const fn state_id(&self) -> i32 {
        self.state_id
    }

    /// Advances the state id, wrapping inside 15 bits, and returns it.
    pub fn increment_state_id(&mut self) -> i32 {
        self.state_id = (self.state_id + 1) & STATE_ID_MASK;
        self.state_id
    }
}

/// Eye position and rotation of a player, read at emission time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EyeLocation {
    /// Eye position
    pub position: Vec3,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
}
