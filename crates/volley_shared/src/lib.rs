//! # Volley Shared
//!
//! Value types used on both sides of the dispatcher: the effect descriptors
//! gameplay code builds, the packets the broadcast layer assembles, compound
//! tags for item metadata, and the math they share.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER reach into the host runtime. Anything that needs a
//! live world, a connection or a version-specific name belongs in
//! `volley_compat` or `volley_networking`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod constants;
pub mod effects;
pub mod math;
pub mod nbt;
pub mod protocol;

pub use constants::{BLOCK_CRACK_BROADCAST_RADIUS, RECOIL_LOOK_DISTANCE};
pub use effects::{
    BlockCrack, BlockImpact, BlockVisual, BulletTrail, ClientId, Color, DustOptions,
    EffectDescriptor, EffectKind, ExplosionEffect, HitboxImpact, LookAt, ParticleKind,
    ParticlePacket, Recoil, SlotChange, SoundPacket, WorldId,
};
pub use math::{BlockPos, Vec3};
pub use nbt::{CompoundTag, Tag, TagType};
pub use protocol::{
    BlockDestructionPacket, ClientboundPacket, ContainerSetSlotPacket, EntityAnchor, EyeLocation,
    InventoryMenu, ItemPayload, LookAtPacket, PacketKind,
};
