//! Effect descriptors.
//!
//! Gameplay code builds these on any thread and hands them to the dispatcher
//! in batches. They are plain values: the dispatcher reads each one once on
//! the tick thread and drops it.

use serde::{Deserialize, Serialize};

use crate::math::{BlockPos, Vec3};
use crate::protocol::ItemPayload;

/// Host world identifier.
pub type WorldId = u32;

/// Connected client identifier.
pub type ClientId = u64;

/// Particle kinds understood by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// Small explosion puff
    Explosion,
    /// Large explosion emitter
    ExplosionEmitter,
    /// Colored dust; the only kind that takes [`DustOptions`]
    Dust,
    /// Block fragments; takes a [`BlockVisual`]
    Block,
    /// Critical hit sparks
    Crit,
    /// Smoke
    Smoke,
    /// Large smoke
    LargeSmoke,
    /// Flame
    Flame,
    /// Cloud
    Cloud,
    /// Poof
    Poof,
    /// Firework spark
    Firework,
}

impl ParticleKind {
    /// Host resource key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Explosion => "minecraft:explosion",
            Self::ExplosionEmitter => "minecraft:explosion_emitter",
            Self::Dust => "minecraft:dust",
            Self::Block => "minecraft:block",
            Self::Crit => "minecraft:crit",
            Self::Smoke => "minecraft:smoke",
            Self::LargeSmoke => "minecraft:large_smoke",
            Self::Flame => "minecraft:flame",
            Self::Cloud => "minecraft:cloud",
            Self::Poof => "minecraft:poof",
            Self::Firework => "minecraft:firework",
        }
    }
}

/// RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Creates a color
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
}

/// Color and size for [`ParticleKind::Dust`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DustOptions {
    /// Dust color
    pub color: Color,
    /// Particle scale
    pub size: f32,
}

impl DustOptions {
    /// Creates dust options
    #[must_use]
    pub const fn new(color: Color, size: f32) -> Self {
        Self { color, size }
    }
}

/// Visual descriptor of a block, used for block-fragment particles.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockVisual {
    /// Host block state key, e.g. `minecraft:stone`
    pub state: String,
}

impl BlockVisual {
    /// Creates a block visual
    #[must_use]
    pub fn new(state: impl Into<String>) -> Self {
        Self { state: state.into() }
    }
}

/// Particle burst parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticlePacket {
    /// Particle kind
    pub particle: ParticleKind,
    /// Particles per burst
    pub count: u32,
    /// Random spread per axis
    pub random: Vec3,
    /// Render regardless of client particle settings
    pub force: bool,
}

impl ParticlePacket {
    /// Stand-in for a standard explosion.
    #[must_use]
    pub const fn placeholder_explosion() -> Self {
        Self {
            particle: ParticleKind::ExplosionEmitter,
            count: 1,
            random: Vec3::ZERO,
            force: true,
        }
    }

    /// Stand-in for a strong bullet hitbox impact.
    #[must_use]
    pub const fn placeholder_impact() -> Self {
        Self {
            particle: ParticleKind::Explosion,
            count: 6,
            random: Vec3::splat(0.25),
            force: true,
        }
    }
}

/// Bullet trail between two sampled bullet points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletTrail {
    /// World
    pub world: WorldId,
    /// Particle kind
    pub particle: ParticleKind,
    /// Dust options, used only when `particle` is `Dust`
    pub dust: Option<DustOptions>,
    /// Segment start
    pub start: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Segment length
    pub length: f64,
    /// Distance the bullet had already flown at `start`
    pub net_distance: f64,
    /// No particles until the bullet has flown this far
    pub min_distance: f64,
    /// Distance between particles; must be positive
    pub spacing: f64,
    /// Render regardless of client particle settings
    pub force: bool,
}

/// Fragments and dust where a bullet hits a block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockImpact {
    /// World
    pub world: WorldId,
    /// Fragment count
    pub count: u32,
    /// Impact point
    pub position: Vec3,
    /// Block that was hit
    pub block: BlockVisual,
    /// Render regardless of client particle settings
    pub force: bool,
}

/// Particles where a bullet hits an entity hitbox.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitboxImpact {
    /// World
    pub world: WorldId,
    /// Particle kind
    pub particle: ParticleKind,
    /// Particle count
    pub count: u32,
    /// Impact point
    pub position: Vec3,
    /// Random spread per axis
    pub random: Vec3,
    /// Render regardless of client particle settings
    pub force: bool,
}

/// Explosion particles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplosionEffect {
    /// Burst parameters
    pub particles: ParticlePacket,
    /// World
    pub world: WorldId,
    /// Center
    pub position: Vec3,
    /// Render regardless of client particle settings
    pub force: bool,
}

/// Positional sound.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundPacket {
    /// Requested sound key, free-form
    pub sound: String,
    /// World
    pub world: WorldId,
    /// Source position
    pub position: Vec3,
    /// Volume, host-clamped
    pub volume: f32,
    /// Pitch, host-clamped
    pub pitch: f32,
}

/// Block crack overlay broadcast to nearby clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCrack {
    /// World
    pub world: WorldId,
    /// Id of the breaking entity
    pub entity_id: i32,
    /// Target block
    pub block: BlockPos,
    /// 0..=9, or -1 to clear
    pub stage: i32,
}

/// Visual recoil: rotate the client's view by a delta.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recoil {
    /// Shooter
    pub client: ClientId,
    /// Yaw delta in degrees
    pub horizontal: f32,
    /// Pitch delta in degrees
    pub vertical: f32,
}

/// Make one client look at a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookAt {
    /// Target client
    pub client: ClientId,
    /// Point to face
    pub target: Vec3,
}

/// Resend one inventory slot to its owner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotChange {
    /// Owner
    pub client: ClientId,
    /// Slot index
    pub slot: i32,
    /// New contents
    pub item: ItemPayload,
}

/// Descriptor kind discriminator
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Bullet trail
    Trail = 0,
    /// Block impact
    BlockImpact = 1,
    /// Hitbox impact
    HitboxImpact = 2,
    /// Explosion
    Explosion = 3,
    /// Decorative explosion
    TransExplosion = 4,
    /// Sound
    Sound = 5,
    /// Block crack packet
    BlockCrack = 6,
    /// Recoil packet
    Recoil = 7,
    /// Look-at packet
    LookAt = 8,
    /// Slot update packet
    SlotChange = 9,
}

/// One unit of feedback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectDescriptor {
    /// Bullet trail
    Trail(BulletTrail),
    /// Block impact
    BlockImpact(BlockImpact),
    /// Hitbox impact
    HitboxImpact(HitboxImpact),
    /// Explosion
    Explosion(ExplosionEffect),
    /// Explosion drawn as a cloud of pride-flag colored dust
    TransExplosion(ExplosionEffect),
    /// Sound
    Sound(SoundPacket),
    /// Block crack packet
    BlockCrack(BlockCrack),
    /// Recoil packet
    Recoil(Recoil),
    /// Look-at packet
    LookAt(LookAt),
    /// Slot update packet
    SlotChange(SlotChange),
}

impl EffectDescriptor {
    /// Returns the descriptor kind
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Trail(_) => EffectKind::Trail,
            Self::BlockImpact(_) => EffectKind::BlockImpact,
            Self::HitboxImpact(_) => EffectKind::HitboxImpact,
            Self::Explosion(_) => EffectKind::Explosion,
            Self::TransExplosion(_) => EffectKind::TransExplosion,
            Self::Sound(_) => EffectKind::Sound,
            Self::BlockCrack(_) => EffectKind::BlockCrack,
            Self::Recoil(_) => EffectKind::Recoil,
            Self::LookAt(_) => EffectKind::LookAt,
            Self::SlotChange(_) => EffectKind::SlotChange,
        }
    }

    /// Returns where the effect happens, if it has a fixed position.
    #[must_use]
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Self::Trail(t) => Some(t.start),
            Self::BlockImpact(b) => Some(b.position),
            Self::HitboxImpact(h) => Some(h.position),
            Self::Explosion(e) | Self::TransExplosion(e) => Some(e.position),
            Self::Sound(s) => Some(s.position),
            Self::BlockCrack(c) => Some(c.block.corner()),
            Self::LookAt(l) => Some(l.target),
            Self::Recoil(_) | Self::SlotChange(_) => None,
        }
    }
}

macro_rules! impl_from_descriptor {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(impl From<$ty> for EffectDescriptor {
            fn from(value: $ty) -> Self {
                Self::$variant(value)
            }
        })*
    };
}

impl_from_descriptor! {
    BulletTrail => Trail,
    BlockImpact => BlockImpact,
    HitboxImpact => HitboxImpact,
    ExplosionEffect => Explosion,
    SoundPacket => Sound,
    BlockCrack => BlockCrack,
    Recoil => Recoil,
    LookAt => LookAt,
    SlotChange => SlotChange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        let impact = ParticlePacket::placeholder_impact();
        assert_eq!(impact.particle, ParticleKind::Explosion);
        assert_eq!(impact.count, 6);
        assert_eq!(impact.random, Vec3::new(0.25, 0.25, 0.25));
        assert!(impact.force);

        let explosion = ParticlePacket::placeholder_explosion();
        assert_eq!(explosion.particle, ParticleKind::ExplosionEmitter);
        assert_eq!(explosion.count, 1);
    }

    #[test]
    fn test_descriptor_kind_and_position() {
        let effect: EffectDescriptor = ExplosionEffect {
            particles: ParticlePacket::placeholder_impact(),
            world: 0,
            position: Vec3::new(1.0, 2.0, 3.0),
            force: true,
        }
        .into();
        assert_eq!(effect.kind(), EffectKind::Explosion);
        assert_eq!(effect.position(), Some(Vec3::new(1.0, 2.0, 3.0)));

        let recoil: EffectDescriptor = Recoil { client: 4, horizontal: 1.0, vertical: -2.0 }.into();
        assert_eq!(recoil.kind(), EffectKind::Recoil);
        assert_eq!(recoil.position(), None);
    }

    #[test]
    fn test_particle_kind_from_config() {
        #[derive(Deserialize)]
        struct Preset {
            particle: ParticleKind,
        }
        let preset: Preset = toml::from_str("particle = \"explosion_emitter\"").unwrap();
        assert_eq!(preset.particle, ParticleKind::ExplosionEmitter);
    }
}
